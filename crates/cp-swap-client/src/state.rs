//! Decoding of the records the swap program stores on the ledger.

use anchor_lang::prelude::{AnchorDeserialize, AnchorSerialize};
use anchor_spl::token_2022::spl_token_2022::{
    extension::StateWithExtensions,
    state::Account as TokenAccount,
};
use solana_sdk::{hash::hash, pubkey::Pubkey};

use crate::errors::{ClientError, Result};

/// First 8 bytes of `sha256("account:<name>")`.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    discriminator("account", name)
}

/// First 8 bytes of `sha256("global:<name>")`.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    discriminator("global", name)
}

fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{}:{}", namespace, name);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}

/// An account owned by the swap program, prefixed with an 8-byte discriminator.
pub trait AccountRecord: AnchorDeserialize + Sized {
    /// Account type name as declared by the program.
    const NAME: &'static str;

    fn discriminator() -> [u8; 8] {
        account_discriminator(Self::NAME)
    }

    /// Check the discriminator, then decode the leading fields. Trailing padding is ignored.
    fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < 8 {
            return Err(ClientError::DecodeFailed(format!(
                "{}: {} bytes is shorter than a discriminator",
                Self::NAME,
                data.len()
            )));
        }
        if data[..8] != Self::discriminator() {
            return Err(ClientError::DecodeFailed(format!(
                "{}: discriminator mismatch",
                Self::NAME
            )));
        }

        let mut body = &data[8..];
        Self::deserialize(&mut body)
            .map_err(|e| ClientError::DecodeFailed(format!("{}: {}", Self::NAME, e)))
    }
}

/// Fee tier shared by every pool created under it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AmmConfig {
    pub bump: u8,
    pub disable_create_pool: bool,
    pub index: u16,
    /// Hundredths of a bip (10^-6)
    pub trade_fee_rate: u64,
    pub protocol_fee_rate: u64,
    pub fund_fee_rate: u64,
    /// Lamports charged to the pool creator
    pub create_pool_fee: u64,
    pub protocol_owner: Pubkey,
    pub fund_owner: Pubkey,
    /// Signer required to register token badges
    pub token_badge_authority: Pubkey,
}

impl AccountRecord for AmmConfig {
    const NAME: &'static str = "AmmConfig";
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolState {
    pub amm_config: Pubkey,
    pub pool_creator: Pubkey,
    pub token_0_vault: Pubkey,
    pub token_1_vault: Pubkey,
    pub lp_mint: Pubkey,
    pub token_0_mint: Pubkey,
    pub token_1_mint: Pubkey,
    pub token_0_program: Pubkey,
    pub token_1_program: Pubkey,
    pub observation_key: Pubkey,
    pub auth_bump: u8,
    /// Bitmask of disabled operations
    pub status: u8,
    pub lp_mint_decimals: u8,
    pub mint_0_decimals: u8,
    pub mint_1_decimals: u8,
    pub lp_supply: u64,
    pub protocol_fees_token_0: u64,
    pub protocol_fees_token_1: u64,
    pub fund_fees_token_0: u64,
    pub fund_fees_token_1: u64,
    pub open_time: u64,
    pub recent_epoch: u64,
}

impl AccountRecord for PoolState {
    const NAME: &'static str = "PoolState";
}

/// Permission for one extended-standard mint to join pools under one config.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenBadge {
    pub amm_config: Pubkey,
    pub token_mint: Pubkey,
}

impl AccountRecord for TokenBadge {
    const NAME: &'static str = "TokenBadge";
}

/// Balance of a token account under either token program.
pub fn token_amount(data: &[u8]) -> Result<u64> {
    let account = StateWithExtensions::<TokenAccount>::unpack(data)?;
    Ok(account.base.amount)
}
