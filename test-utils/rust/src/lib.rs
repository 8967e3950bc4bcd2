pub mod builder;
pub mod core;
pub mod errors;
pub mod helpers;
pub mod ledger;

mod internal;

pub mod prelude {
    pub use crate::builder::{ProgramArtifact, VmBuilder};
    pub use crate::core::{AccountManager, Executed, TransactionBuilder, Vm};
    pub use crate::errors::*;
    pub use crate::helpers::{
        Assertions, BaseFixture, ExpectRevertResultExt, MintInfo, ProgramFixture, RevertInfo,
        TokenHelper,
    };

    pub use solana_sdk::{
        pubkey::Pubkey,
        signature::{Keypair, Signer},
        system_program,
    };

    pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
}

pub use core::{AccountManager, TransactionBuilder, Vm};
pub use errors::{Result, VmError};
pub use helpers::{BaseFixture, ProgramFixture};
