use anchor_lang::prelude::AnchorSerialize;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use super::{account_set, InstructionBuilder, ProgramInstruction};
use crate::{
    errors::Result,
    pda::{associated_token_address, TokenSide},
};

account_set!(
    /// Shared by both swap directions. Input and output follow the caller, not pool order.
    Swap {
        payer: signer,
        authority: readonly,
        amm_config: readonly,
        pool_state: writable,
        input_token_account: writable,
        output_token_account: writable,
        input_vault: writable,
        output_vault: writable,
        input_token_program: readonly,
        output_token_program: readonly,
        input_token_mint: readonly,
        output_token_mint: readonly,
        observation_state: writable,
    }
);

#[derive(AnchorSerialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapBaseInputArgs {
    pub amount_in: u64,
    pub minimum_amount_out: u64,
}

impl ProgramInstruction for SwapBaseInputArgs {
    const NAME: &'static str = "swap_base_input";
    const ARGS: &'static [&'static str] = &["amount_in", "minimum_amount_out"];
}

#[derive(AnchorSerialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapBaseOutputArgs {
    pub max_amount_in: u64,
    pub amount_out: u64,
}

impl ProgramInstruction for SwapBaseOutputArgs {
    const NAME: &'static str = "swap_base_output";
    const ARGS: &'static [&'static str] = &["max_amount_in", "amount_out"];
}

impl InstructionBuilder {
    fn swap_accounts(
        &self,
        payer: &Pubkey,
        amm_config: &Pubkey,
        input: &TokenSide,
        output: &TokenSide,
    ) -> Result<Swap> {
        let pool = self.addresses().pool(amm_config, &input.mint, &output.mint)?.address;

        Ok(Swap {
            payer: *payer,
            authority: self.addresses().authority()?.address,
            amm_config: *amm_config,
            pool_state: pool,
            input_token_account: associated_token_address(payer, &input.mint, &input.program)?,
            output_token_account: associated_token_address(payer, &output.mint, &output.program)?,
            input_vault: self.addresses().pool_vault(&pool, &input.mint)?.address,
            output_vault: self.addresses().pool_vault(&pool, &output.mint)?.address,
            input_token_program: input.program,
            output_token_program: output.program,
            input_token_mint: input.mint,
            output_token_mint: output.mint,
            observation_state: self.addresses().observation(&pool)?.address,
        })
    }

    /// Sell exactly `amount_in` of `input`, receiving at least `minimum_amount_out` of `output`.
    pub fn swap_base_input_ix(
        &self,
        payer: &Pubkey,
        amm_config: &Pubkey,
        input: &TokenSide,
        output: &TokenSide,
        amount_in: u64,
        minimum_amount_out: u64,
    ) -> Result<Instruction> {
        let accounts = self.swap_accounts(payer, amm_config, input, output)?;
        self.build(
            accounts,
            SwapBaseInputArgs {
                amount_in,
                minimum_amount_out,
            },
            vec![],
        )
    }

    /// Buy exactly `amount_out` of `output`, spending at most `max_amount_in` of `input`.
    pub fn swap_base_output_ix(
        &self,
        payer: &Pubkey,
        amm_config: &Pubkey,
        input: &TokenSide,
        output: &TokenSide,
        max_amount_in: u64,
        amount_out: u64,
    ) -> Result<Instruction> {
        let accounts = self.swap_accounts(payer, amm_config, input, output)?;
        self.build(
            accounts,
            SwapBaseOutputArgs {
                max_amount_in,
                amount_out,
            },
            vec![],
        )
    }
}
