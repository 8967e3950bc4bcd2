//! Deterministic address derivation
//!
//! Every account the swap program owns lives at a program derived address computed from a
//! namespace seed and a list of component identifiers. Nothing here performs I/O: addresses
//! are recomputed on demand and memoized per process in a [`DashMap`], which is never a
//! source of truth.

use std::cmp::Ordering;

use dashmap::DashMap;
use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::{seeds::*, ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID},
    errors::{ClientError, Result},
};

/// A derived address together with the bump that pushed it off the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Derived {
    pub address: Pubkey,
    pub bump: u8,
}

/// Search bumps downward from 255 and return the first off-curve address.
pub fn derive(namespace: &str, seeds: &[&[u8]], program_id: &Pubkey) -> Result<Derived> {
    Pubkey::try_find_program_address(seeds, program_id)
        .map(|(address, bump)| Derived { address, bump })
        .ok_or_else(|| ClientError::DerivationFailure {
            namespace: namespace.to_string(),
        })
}

/// Order two mints by raw byte value, lower first.
pub fn canonical_order(mint_a: Pubkey, mint_b: Pubkey) -> (Pubkey, Pubkey) {
    match mint_a.as_ref().cmp(mint_b.as_ref()) {
        Ordering::Greater => (mint_b, mint_a),
        _ => (mint_a, mint_b),
    }
}

/// A mint and the token program that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenSide {
    pub mint: Pubkey,
    pub program: Pubkey,
}

impl TokenSide {
    pub fn new(mint: Pubkey, program: Pubkey) -> Self {
        Self { mint, program }
    }

    pub fn legacy(mint: Pubkey) -> Self {
        Self::new(mint, TOKEN_PROGRAM_ID)
    }

    pub fn extended(mint: Pubkey) -> Self {
        Self::new(mint, TOKEN_2022_PROGRAM_ID)
    }

    pub fn is_extended(&self) -> bool {
        self.program == TOKEN_2022_PROGRAM_ID
    }
}

/// Two token sides in canonical order. Construction is the only place mints get sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MintPair {
    token_0: TokenSide,
    token_1: TokenSide,
}

impl MintPair {
    pub fn new(a: TokenSide, b: TokenSide) -> Self {
        let (mint_0, _) = canonical_order(a.mint, b.mint);
        if mint_0 == a.mint {
            Self {
                token_0: a,
                token_1: b,
            }
        } else {
            Self {
                token_0: b,
                token_1: a,
            }
        }
    }

    pub fn token_0(&self) -> TokenSide {
        self.token_0
    }

    pub fn token_1(&self) -> TokenSide {
        self.token_1
    }

    pub fn sides(&self) -> [TokenSide; 2] {
        [self.token_0, self.token_1]
    }

    /// Token programs assigned after canonical ordering.
    pub fn programs(&self) -> (Pubkey, Pubkey) {
        (self.token_0.program, self.token_1.program)
    }

    /// Both mints use the legacy token program.
    pub fn is_legacy(&self) -> bool {
        !self.token_0.is_extended() && !self.token_1.is_extended()
    }

    pub fn extended_sides(&self) -> impl Iterator<Item = TokenSide> {
        self.sides().into_iter().filter(TokenSide::is_extended)
    }
}

/// Associated token account of `owner` for `mint` under `token_program`.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Result<Pubkey> {
    derive(
        "associated_token_account",
        &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|derived| derived.address)
}

/// List of extra accounts the transfer hook program declares for `mint`.
pub fn extra_account_meta_list(mint: &Pubkey, hook_program: &Pubkey) -> Result<Derived> {
    derive(
        "extra_account_metas",
        &[EXTRA_ACCOUNT_METAS_SEED, mint.as_ref()],
        hook_program,
    )
}

/// Address book for one deployment of the swap program.
#[derive(Debug)]
pub struct ProgramAddresses {
    program_id: Pubkey,
    cache: DashMap<Vec<u8>, Derived>,
}

impl Clone for ProgramAddresses {
    fn clone(&self) -> Self {
        Self::new(self.program_id)
    }
}

impl ProgramAddresses {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            cache: DashMap::new(),
        }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    fn cached(&self, namespace: &str, seeds: &[&[u8]]) -> Result<Derived> {
        let mut key = Vec::with_capacity(seeds.iter().map(|seed| seed.len() + 1).sum());
        for seed in seeds {
            key.push(seed.len() as u8);
            key.extend_from_slice(seed);
        }
        if let Some(hit) = self.cache.get(&key) {
            return Ok(*hit);
        }

        let derived = derive(namespace, seeds, &self.program_id)?;
        tracing::debug!(
            "derived {} address {} (bump {})",
            namespace,
            derived.address,
            derived.bump
        );
        self.cache.insert(key, derived);
        Ok(derived)
    }

    /// Signer for every vault and the LP mint.
    pub fn authority(&self) -> Result<Derived> {
        self.cached("authority", &[AUTH_SEED])
    }

    pub fn amm_config(&self, index: u16) -> Result<Derived> {
        self.cached("amm_config", &[AMM_CONFIG_SEED, &index.to_be_bytes()])
    }

    /// Pool for a mint pair under `amm_config`, independent of argument order.
    pub fn pool(&self, amm_config: &Pubkey, mint_a: &Pubkey, mint_b: &Pubkey) -> Result<Derived> {
        let (mint_0, mint_1) = canonical_order(*mint_a, *mint_b);
        self.cached(
            "pool",
            &[
                POOL_SEED,
                amm_config.as_ref(),
                mint_0.as_ref(),
                mint_1.as_ref(),
            ],
        )
    }

    pub fn pool_lp_mint(&self, pool: &Pubkey) -> Result<Derived> {
        self.cached("pool_lp_mint", &[POOL_LP_MINT_SEED, pool.as_ref()])
    }

    pub fn pool_vault(&self, pool: &Pubkey, mint: &Pubkey) -> Result<Derived> {
        self.cached("pool_vault", &[POOL_VAULT_SEED, pool.as_ref(), mint.as_ref()])
    }

    pub fn observation(&self, pool: &Pubkey) -> Result<Derived> {
        self.cached("observation", &[OBSERVATION_SEED, pool.as_ref()])
    }

    pub fn token_badge(&self, amm_config: &Pubkey, mint: &Pubkey) -> Result<Derived> {
        self.cached(
            "token_badge",
            &[TOKEN_BADGE_SEED, amm_config.as_ref(), mint.as_ref()],
        )
    }

    /// Every address a pool owns.
    pub fn pool_keys(&self, amm_config: &Pubkey, pair: &MintPair) -> Result<PoolKeys> {
        let pool = self.pool(amm_config, &pair.token_0().mint, &pair.token_1().mint)?;
        Ok(PoolKeys {
            amm_config: *amm_config,
            authority: self.authority()?.address,
            pool: pool.address,
            lp_mint: self.pool_lp_mint(&pool.address)?.address,
            token_0_vault: self.pool_vault(&pool.address, &pair.token_0().mint)?.address,
            token_1_vault: self.pool_vault(&pool.address, &pair.token_1().mint)?.address,
            observation: self.observation(&pool.address)?.address,
        })
    }
}

/// Addresses of one pool and the accounts created alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolKeys {
    pub amm_config: Pubkey,
    pub authority: Pubkey,
    pub pool: Pubkey,
    pub lp_mint: Pubkey,
    pub token_0_vault: Pubkey,
    pub token_1_vault: Pubkey,
    pub observation: Pubkey,
}
