use anchor_lang::prelude::AnchorSerialize;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use super::{account_set, InstructionBuilder, ProgramInstruction};
use crate::{
    constants::{MEMO_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID},
    errors::Result,
    pda::{associated_token_address, MintPair},
};

account_set!(
    Deposit {
        owner: signer,
        authority: readonly,
        pool_state: writable,
        owner_lp_token: writable,
        token_0_account: writable,
        token_1_account: writable,
        token_0_vault: writable,
        token_1_vault: writable,
        token_program: readonly,
        token_program_2022: readonly,
        vault_0_mint: readonly,
        vault_1_mint: readonly,
        lp_mint: writable,
    }
);

account_set!(
    Withdraw {
        owner: signer,
        authority: readonly,
        pool_state: writable,
        owner_lp_token: writable,
        token_0_account: writable,
        token_1_account: writable,
        token_0_vault: writable,
        token_1_vault: writable,
        token_program: readonly,
        token_program_2022: readonly,
        vault_0_mint: readonly,
        vault_1_mint: readonly,
        lp_mint: writable,
        memo_program: readonly,
    }
);

/// LP amount and per-side token bound: maxima for deposits, minima for withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityAmounts {
    pub lp_token_amount: u64,
    pub token_0_amount: u64,
    pub token_1_amount: u64,
}

#[derive(AnchorSerialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositArgs {
    pub lp_token_amount: u64,
    pub maximum_token_0_amount: u64,
    pub maximum_token_1_amount: u64,
}

impl ProgramInstruction for DepositArgs {
    const NAME: &'static str = "deposit";
    const ARGS: &'static [&'static str] = &[
        "lp_token_amount",
        "maximum_token_0_amount",
        "maximum_token_1_amount",
    ];
}

#[derive(AnchorSerialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawArgs {
    pub lp_token_amount: u64,
    pub minimum_token_0_amount: u64,
    pub minimum_token_1_amount: u64,
}

impl ProgramInstruction for WithdrawArgs {
    const NAME: &'static str = "withdraw";
    const ARGS: &'static [&'static str] = &[
        "lp_token_amount",
        "minimum_token_0_amount",
        "minimum_token_1_amount",
    ];
}

impl InstructionBuilder {
    fn liquidity_accounts(&self, owner: &Pubkey, amm_config: &Pubkey, pair: &MintPair) -> Result<Deposit> {
        let keys = self.addresses().pool_keys(amm_config, pair)?;
        let (token_0, token_1) = (pair.token_0(), pair.token_1());

        Ok(Deposit {
            owner: *owner,
            authority: keys.authority,
            pool_state: keys.pool,
            owner_lp_token: associated_token_address(owner, &keys.lp_mint, &TOKEN_PROGRAM_ID)?,
            token_0_account: associated_token_address(owner, &token_0.mint, &token_0.program)?,
            token_1_account: associated_token_address(owner, &token_1.mint, &token_1.program)?,
            token_0_vault: keys.token_0_vault,
            token_1_vault: keys.token_1_vault,
            token_program: TOKEN_PROGRAM_ID,
            token_program_2022: TOKEN_2022_PROGRAM_ID,
            vault_0_mint: token_0.mint,
            vault_1_mint: token_1.mint,
            lp_mint: keys.lp_mint,
        })
    }

    /// Mint `lp_token_amount` LP tokens to `owner`, paying at most the given token amounts.
    pub fn deposit_ix(
        &self,
        owner: &Pubkey,
        amm_config: &Pubkey,
        pair: &MintPair,
        amounts: LiquidityAmounts,
    ) -> Result<Instruction> {
        let accounts = self.liquidity_accounts(owner, amm_config, pair)?;

        self.build(
            accounts,
            DepositArgs {
                lp_token_amount: amounts.lp_token_amount,
                maximum_token_0_amount: amounts.token_0_amount,
                maximum_token_1_amount: amounts.token_1_amount,
            },
            vec![],
        )
    }

    /// Burn `lp_token_amount` LP tokens, receiving at least the given token amounts.
    pub fn withdraw_ix(
        &self,
        owner: &Pubkey,
        amm_config: &Pubkey,
        pair: &MintPair,
        amounts: LiquidityAmounts,
    ) -> Result<Instruction> {
        let deposit = self.liquidity_accounts(owner, amm_config, pair)?;
        let accounts = Withdraw {
            owner: deposit.owner,
            authority: deposit.authority,
            pool_state: deposit.pool_state,
            owner_lp_token: deposit.owner_lp_token,
            token_0_account: deposit.token_0_account,
            token_1_account: deposit.token_1_account,
            token_0_vault: deposit.token_0_vault,
            token_1_vault: deposit.token_1_vault,
            token_program: deposit.token_program,
            token_program_2022: deposit.token_program_2022,
            vault_0_mint: deposit.vault_0_mint,
            vault_1_mint: deposit.vault_1_mint,
            lp_mint: deposit.lp_mint,
            memo_program: MEMO_PROGRAM_ID,
        };

        self.build(
            accounts,
            WithdrawArgs {
                lp_token_amount: amounts.lp_token_amount,
                minimum_token_0_amount: amounts.token_0_amount,
                minimum_token_1_amount: amounts.token_1_amount,
            },
            vec![],
        )
    }
}
