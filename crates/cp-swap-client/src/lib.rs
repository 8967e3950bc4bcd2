pub mod config;
pub mod constants;
pub mod errors;
pub mod hooks;
pub mod idl;
pub mod instructions;
pub mod ledger;
pub mod mints;
pub mod pda;
pub mod provision;
pub mod rpc;
pub mod scenarios;
pub mod state;
pub mod transactions;

#[cfg(test)]
pub(crate) mod testing;

pub mod prelude {
    pub use crate::config::{ClientConfig, InitAmounts, SubmitOptions};
    pub use crate::constants::*;
    pub use crate::errors::*;
    pub use crate::hooks::{resolve_transfer_hook, transfer_hook_program, ResolvedHook};
    pub use crate::idl::ProgramIdl;
    pub use crate::instructions::{AmmConfigParams, InstructionBuilder, LiquidityAmounts};
    pub use crate::ledger::Ledger;
    pub use crate::mints::{MintExtension, MintProvisioner, StandardMintProvisioner};
    pub use crate::pda::{associated_token_address, Derived, MintPair, ProgramAddresses, TokenSide};
    pub use crate::provision::{ensure, Provisioned};
    pub use crate::rpc::RpcLedger;
    pub use crate::scenarios::{PoolClient, PoolOutcome, ProgramPairing};
    pub use crate::state::{AccountRecord, AmmConfig, PoolState, TokenBadge};
    pub use crate::transactions::TransactionBuilder;

    pub use solana_sdk::{
        pubkey::Pubkey,
        signature::{Keypair, Signature, Signer},
    };
}

pub use config::{ClientConfig, SubmitOptions};
pub use errors::{ClientError, Result};
pub use ledger::Ledger;
pub use pda::ProgramAddresses;
pub use scenarios::PoolClient;
