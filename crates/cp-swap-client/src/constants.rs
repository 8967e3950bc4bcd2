//! Seeds and well-known program ids used by the constant-product swap program.

use solana_sdk::{pubkey, pubkey::Pubkey};

/// Seeds for program derived addresses
pub mod seeds {
    pub const AUTH_SEED: &[u8] = b"vault_and_lp_mint_auth_seed";
    pub const AMM_CONFIG_SEED: &[u8] = b"amm_config";
    pub const POOL_SEED: &[u8] = b"pool";
    pub const POOL_LP_MINT_SEED: &[u8] = b"pool_lp_mint";
    pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
    pub const OBSERVATION_SEED: &[u8] = b"observation";
    pub const TOKEN_BADGE_SEED: &[u8] = b"token_badge";
    /// Scoped to the transfer hook program, not the swap program.
    pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";
}

pub const CP_SWAP_PROGRAM_ID: Pubkey = pubkey!("CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C");

/// Receiver of the pool creation fee on the reference deployment.
pub const CREATE_POOL_FEE_RECEIVER: Pubkey =
    pubkey!("DNXgeM9EiiaAbaWvwjHj9fQQLAX5ZsfHyvmYUNRAdNC8");

pub const MEMO_PROGRAM_ID: Pubkey = pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr");

pub const TOKEN_PROGRAM_ID: Pubkey = anchor_spl::token::ID;
pub const TOKEN_2022_PROGRAM_ID: Pubkey = anchor_spl::token_2022::ID;
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = anchor_spl::associated_token::ID;
pub const SYSTEM_PROGRAM_ID: Pubkey = anchor_lang::system_program::ID;
pub const RENT_SYSVAR_ID: Pubkey = anchor_lang::solana_program::sysvar::rent::ID;

/// Log lines containing any of these markers are kept as failure diagnostics.
pub const FAILURE_LOG_MARKERS: [&str; 4] = ["Error", "failed", "Custom", "ProgramError"];

/// Most recent diagnostic lines attached to a program rejection.
pub const MAX_DIAGNOSTIC_LINES: usize = 5;
