//! End-to-end setups: config, fresh mints, and optionally a funded pool.

use std::fmt;

use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

use super::{PoolClient, PoolOutcome};
use crate::{
    errors::{ClientError, Result},
    instructions::{AmmConfigParams, LiquidityAmounts},
    ledger::Ledger,
    mints::{MintExtension, MintProvisioner},
    pda::MintPair,
};

/// Liquidity added on top of the initial deposit by [`PoolClient::setup_swap`].
const SWAP_SETUP_LIQUIDITY: LiquidityAmounts = LiquidityAmounts {
    lp_token_amount: 10_000_000_000,
    token_0_amount: 100_000_000_000,
    token_1_amount: 100_000_000_000,
};

/// Token programs wanted for `token_0` and `token_1` once the pair is canonically ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramPairing {
    pub token_0_program: Pubkey,
    pub token_1_program: Pubkey,
}

impl ProgramPairing {
    pub fn new(token_0_program: Pubkey, token_1_program: Pubkey) -> Self {
        Self {
            token_0_program,
            token_1_program,
        }
    }

    pub fn matches(&self, pair: &MintPair) -> bool {
        pair.programs() == (self.token_0_program, self.token_1_program)
    }
}

impl fmt::Display for ProgramPairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.token_0_program, self.token_1_program)
    }
}

impl<L: Ledger> PoolClient<'_, L> {
    /// Ensure the config and create a fresh mint pair, without creating a pool.
    pub fn setup_initialize<M: MintProvisioner>(
        &mut self,
        owner: &Keypair,
        params: &AmmConfigParams,
        mints: &M,
        extension: MintExtension,
    ) -> Result<(Pubkey, MintPair)> {
        let config = self.create_amm_config(owner, params)?;
        let pair = mints.create_mint_pair(self.ledger_mut(), owner, extension)?;
        Ok((config.address, pair))
    }

    /// Like [`Self::setup_initialize`] with the extended mint enrolled in `hook_program`.
    pub fn setup_initialize_v2<M: MintProvisioner>(
        &mut self,
        owner: &Keypair,
        params: &AmmConfigParams,
        mints: &M,
        hook_program: Pubkey,
    ) -> Result<(Pubkey, MintPair)> {
        self.setup_initialize(owner, params, mints, MintExtension::TransferHook(hook_program))
    }

    /// Ensure the config, then create a pool seeded with the configured init amounts.
    ///
    /// With `wanted` set, fresh pairs are drawn until the canonically ordered pair lands on the
    /// wanted token programs, giving up after `max_pairing_attempts` pairs.
    pub fn setup_deposit<M: MintProvisioner>(
        &mut self,
        owner: &Keypair,
        params: &AmmConfigParams,
        mints: &M,
        extension: MintExtension,
        wanted: Option<ProgramPairing>,
    ) -> Result<PoolOutcome> {
        let config = self.create_amm_config(owner, params)?.address;
        let pair = self.find_pairing(owner, mints, extension, wanted)?;
        let amounts = self.config().init_amounts;
        self.initialize_pool(owner, &config, &pair, amounts)
    }

    /// Create a pool and deposit further liquidity so swaps have depth on both sides.
    pub fn setup_swap<M: MintProvisioner>(
        &mut self,
        owner: &Keypair,
        params: &AmmConfigParams,
        mints: &M,
        extension: MintExtension,
    ) -> Result<PoolOutcome> {
        let config = self.create_amm_config(owner, params)?.address;
        let pair = mints.create_mint_pair(self.ledger_mut(), owner, extension)?;
        let amounts = self.config().init_amounts;

        let created = self.initialize_pool(owner, &config, &pair, amounts)?;
        self.deposit(owner, &created.state.amm_config, &pair, SWAP_SETUP_LIQUIDITY)
    }

    fn find_pairing<M: MintProvisioner>(
        &mut self,
        owner: &Keypair,
        mints: &M,
        extension: MintExtension,
        wanted: Option<ProgramPairing>,
    ) -> Result<MintPair> {
        let Some(wanted) = wanted else {
            return mints.create_mint_pair(self.ledger_mut(), owner, extension);
        };

        let attempts = self.config().max_pairing_attempts.max(1);
        for attempt in 1..=attempts {
            let pair = mints.create_mint_pair(self.ledger_mut(), owner, extension)?;
            if wanted.matches(&pair) {
                return Ok(pair);
            }
            tracing::warn!(
                "pair {}/{} has programs {:?}, want {} (attempt {}/{})",
                pair.token_0().mint,
                pair.token_1().mint,
                pair.programs(),
                wanted,
                attempt,
                attempts
            );
        }

        Err(ClientError::PairingNotFound {
            wanted: wanted.to_string(),
            attempts,
        })
    }
}
