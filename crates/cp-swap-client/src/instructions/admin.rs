use anchor_lang::prelude::AnchorSerialize;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use super::{account_set, InstructionBuilder, ProgramInstruction};
use crate::{constants::SYSTEM_PROGRAM_ID, errors::Result};

account_set!(
    CreateAmmConfig {
        owner: payer,
        amm_config: writable,
        system_program: readonly,
    }
);

account_set!(
    InitializeTokenBadge {
        amm_config: readonly,
        token_badge_authority: signer,
        token_mint: readonly,
        token_badge: writable,
        funder: payer,
        system_program: readonly,
    }
);

/// Fee tier parameters. Rates are in hundredths of a bip (10^-6).
#[derive(AnchorSerialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateAmmConfigArgs {
    pub index: u16,
    pub trade_fee_rate: u64,
    pub protocol_fee_rate: u64,
    pub fund_fee_rate: u64,
    pub create_pool_fee: u64,
}

pub type AmmConfigParams = CreateAmmConfigArgs;

impl ProgramInstruction for CreateAmmConfigArgs {
    const NAME: &'static str = "create_amm_config";
    const ARGS: &'static [&'static str] = &[
        "index",
        "trade_fee_rate",
        "protocol_fee_rate",
        "fund_fee_rate",
        "create_pool_fee",
    ];
}

#[derive(AnchorSerialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitializeTokenBadgeArgs {}

impl ProgramInstruction for InitializeTokenBadgeArgs {
    const NAME: &'static str = "initialize_token_badge";
    const ARGS: &'static [&'static str] = &[];
}

impl InstructionBuilder {
    /// Create the fee tier at `params.index`, paid and owned by `owner`.
    pub fn create_amm_config_ix(&self, owner: &Pubkey, params: &AmmConfigParams) -> Result<Instruction> {
        let accounts = CreateAmmConfig {
            owner: *owner,
            amm_config: self.addresses().amm_config(params.index)?.address,
            system_program: SYSTEM_PROGRAM_ID,
        };

        self.build(accounts, *params, vec![])
    }

    /// Register `mint` under `amm_config`. `badge_authority` must match the config's
    /// token badge authority.
    pub fn initialize_token_badge_ix(
        &self,
        amm_config: &Pubkey,
        badge_authority: &Pubkey,
        mint: &Pubkey,
        funder: &Pubkey,
    ) -> Result<Instruction> {
        let accounts = InitializeTokenBadge {
            amm_config: *amm_config,
            token_badge_authority: *badge_authority,
            token_mint: *mint,
            token_badge: self.addresses().token_badge(amm_config, mint)?.address,
            funder: *funder,
            system_program: SYSTEM_PROGRAM_ID,
        };

        self.build(accounts, InitializeTokenBadgeArgs {}, vec![])
    }
}
