//! Instruction builders for every operation of the swap program.
//!
//! Each operation has an account struct listing every role explicitly, in the order the
//! program declares them, and an argument struct encoded as an Anchor discriminator followed
//! by borsh. Nothing is resolved implicitly at execution time.

pub mod admin;
pub mod initialize;
pub mod liquidity;
pub mod swap;

pub use admin::*;
pub use initialize::*;
pub use liquidity::*;
pub use swap::*;

use anchor_lang::{prelude::AnchorSerialize, ToAccountMetas};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::{
    config::ClientConfig,
    errors::{ClientError, Result},
    pda::ProgramAddresses,
    state::instruction_discriminator,
};

/// Accounts of one instruction with the role names the program declares.
pub trait AccountSet: ToAccountMetas {
    const ROLES: &'static [&'static str];
}

/// Arguments of one instruction.
pub trait ProgramInstruction: AnchorSerialize {
    /// Instruction name as declared by the program (snake case).
    const NAME: &'static str;
    const ARGS: &'static [&'static str];

    fn data(&self) -> Result<Vec<u8>> {
        let mut data = instruction_discriminator(Self::NAME).to_vec();
        self.serialize(&mut data)?;
        Ok(data)
    }
}

/// Static shape of one instruction, compared against the program IDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionLayout {
    pub name: &'static str,
    pub accounts: &'static [&'static str],
    pub args: &'static [&'static str],
}

impl InstructionLayout {
    pub fn of<A: AccountSet, D: ProgramInstruction>() -> Self {
        Self {
            name: D::NAME,
            accounts: A::ROLES,
            args: D::ARGS,
        }
    }
}

macro_rules! account_set {
    ($(#[$attr:meta])* $name:ident { $($role:ident: $kind:ident),* $(,)? }) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            $(pub $role: solana_sdk::pubkey::Pubkey,)*
        }

        impl anchor_lang::ToAccountMetas for $name {
            fn to_account_metas(
                &self,
                _is_signer: Option<bool>,
            ) -> Vec<solana_sdk::instruction::AccountMeta> {
                vec![$($crate::instructions::account_meta!($kind, self.$role)),*]
            }
        }

        impl $crate::instructions::AccountSet for $name {
            const ROLES: &'static [&'static str] = &[$(stringify!($role)),*];
        }
    };
}

macro_rules! account_meta {
    (payer, $key:expr) => {
        solana_sdk::instruction::AccountMeta::new($key, true)
    };
    (signer, $key:expr) => {
        solana_sdk::instruction::AccountMeta::new_readonly($key, true)
    };
    (writable, $key:expr) => {
        solana_sdk::instruction::AccountMeta::new($key, false)
    };
    (readonly, $key:expr) => {
        solana_sdk::instruction::AccountMeta::new_readonly($key, false)
    };
}

pub(crate) use account_meta;
pub(crate) use account_set;

/// Builds instructions against one deployment of the swap program.
#[derive(Debug, Clone)]
pub struct InstructionBuilder {
    addresses: ProgramAddresses,
    create_pool_fee_receiver: Pubkey,
}

impl InstructionBuilder {
    pub fn new(program_id: Pubkey, create_pool_fee_receiver: Pubkey) -> Self {
        Self {
            addresses: ProgramAddresses::new(program_id),
            create_pool_fee_receiver,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.program_id, config.create_pool_fee_receiver)
    }

    pub fn addresses(&self) -> &ProgramAddresses {
        &self.addresses
    }

    pub fn program_id(&self) -> Pubkey {
        self.addresses.program_id()
    }

    pub fn create_pool_fee_receiver(&self) -> Pubkey {
        self.create_pool_fee_receiver
    }

    /// Shapes of every instruction this builder produces.
    pub fn layouts() -> Vec<InstructionLayout> {
        vec![
            InstructionLayout::of::<CreateAmmConfig, CreateAmmConfigArgs>(),
            InstructionLayout::of::<InitializeTokenBadge, InitializeTokenBadgeArgs>(),
            InstructionLayout::of::<Initialize, InitializeArgs>(),
            InstructionLayout::of::<InitializeV2, InitializeV2Args>(),
            InstructionLayout::of::<Deposit, DepositArgs>(),
            InstructionLayout::of::<Withdraw, WithdrawArgs>(),
            InstructionLayout::of::<Swap, SwapBaseInputArgs>(),
            InstructionLayout::of::<Swap, SwapBaseOutputArgs>(),
        ]
    }

    fn build<A: AccountSet, D: ProgramInstruction>(
        &self,
        accounts: A,
        args: D,
        remaining_accounts: Vec<AccountMeta>,
    ) -> Result<Instruction> {
        let mut metas = accounts.to_account_metas(None);
        if metas.len() != A::ROLES.len() {
            return Err(ClientError::IdlMismatch(format!(
                "{}: {} account metas for {} roles",
                D::NAME,
                metas.len(),
                A::ROLES.len()
            )));
        }
        metas.extend(remaining_accounts);

        Ok(Instruction {
            program_id: self.program_id(),
            accounts: metas,
            data: args.data()?,
        })
    }
}
