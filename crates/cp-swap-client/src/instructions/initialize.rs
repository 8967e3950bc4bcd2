use anchor_lang::prelude::AnchorSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::{account_set, InstructionBuilder, ProgramInstruction};
use crate::{
    config::InitAmounts,
    constants::{ASSOCIATED_TOKEN_PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID},
    errors::Result,
    hooks::ResolvedHook,
    pda::{associated_token_address, MintPair, PoolKeys},
};

account_set!(
    /// Pool creation for two legacy-standard mints.
    Initialize {
        creator: payer,
        amm_config: readonly,
        authority: readonly,
        pool_state: writable,
        token_0_mint: readonly,
        token_1_mint: readonly,
        lp_mint: writable,
        creator_token_0: writable,
        creator_token_1: writable,
        creator_lp_token: writable,
        token_0_vault: writable,
        token_1_vault: writable,
        create_pool_fee: writable,
        observation_state: writable,
        token_program: readonly,
        token_0_program: readonly,
        token_1_program: readonly,
        associated_token_program: readonly,
        system_program: readonly,
        rent: readonly,
    }
);

account_set!(
    /// Pool creation accepting extended-standard mints, gated by token badges.
    InitializeV2 {
        creator: payer,
        amm_config: readonly,
        authority: readonly,
        pool_state: writable,
        token_0_mint: readonly,
        token_1_mint: readonly,
        lp_mint: writable,
        creator_token_0: writable,
        creator_token_1: writable,
        creator_lp_token: writable,
        token_0_vault: writable,
        token_1_vault: writable,
        token_badge_0: readonly,
        token_badge_1: readonly,
        create_pool_fee: writable,
        observation_state: writable,
        token_program: readonly,
        token_0_program: readonly,
        token_1_program: readonly,
        associated_token_program: readonly,
        system_program: readonly,
        rent: readonly,
        transfer_hook_program: readonly,
        extra_account_meta_list: readonly,
    }
);

#[derive(AnchorSerialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeArgs {
    pub init_amount_0: u64,
    pub init_amount_1: u64,
    pub open_time: u64,
}

impl ProgramInstruction for InitializeArgs {
    const NAME: &'static str = "initialize";
    const ARGS: &'static [&'static str] = &["init_amount_0", "init_amount_1", "open_time"];
}

#[derive(AnchorSerialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeV2Args {
    pub init_amount_0: u64,
    pub init_amount_1: u64,
    pub open_time: u64,
}

impl ProgramInstruction for InitializeV2Args {
    const NAME: &'static str = "initialize_v2";
    const ARGS: &'static [&'static str] = &["init_amount_0", "init_amount_1", "open_time"];
}

/// Accounts both pool creation layouts share.
struct CreationAccounts {
    keys: PoolKeys,
    creator_token_0: Pubkey,
    creator_token_1: Pubkey,
    creator_lp_token: Pubkey,
}

impl InstructionBuilder {
    fn creation_accounts(
        &self,
        creator: &Pubkey,
        amm_config: &Pubkey,
        pair: &MintPair,
    ) -> Result<CreationAccounts> {
        let keys = self.addresses().pool_keys(amm_config, pair)?;
        let (token_0, token_1) = (pair.token_0(), pair.token_1());

        Ok(CreationAccounts {
            creator_token_0: associated_token_address(creator, &token_0.mint, &token_0.program)?,
            creator_token_1: associated_token_address(creator, &token_1.mint, &token_1.program)?,
            // The LP mint always belongs to the legacy token program
            creator_lp_token: associated_token_address(creator, &keys.lp_mint, &TOKEN_PROGRAM_ID)?,
            keys,
        })
    }

    /// Create a pool for two legacy-standard mints, seeding it with `amounts`.
    pub fn initialize_ix(
        &self,
        creator: &Pubkey,
        amm_config: &Pubkey,
        pair: &MintPair,
        amounts: InitAmounts,
        open_time: u64,
    ) -> Result<Instruction> {
        let created = self.creation_accounts(creator, amm_config, pair)?;
        let (token_0, token_1) = (pair.token_0(), pair.token_1());

        let accounts = Initialize {
            creator: *creator,
            amm_config: *amm_config,
            authority: created.keys.authority,
            pool_state: created.keys.pool,
            token_0_mint: token_0.mint,
            token_1_mint: token_1.mint,
            lp_mint: created.keys.lp_mint,
            creator_token_0: created.creator_token_0,
            creator_token_1: created.creator_token_1,
            creator_lp_token: created.creator_lp_token,
            token_0_vault: created.keys.token_0_vault,
            token_1_vault: created.keys.token_1_vault,
            create_pool_fee: self.create_pool_fee_receiver(),
            observation_state: created.keys.observation,
            token_program: TOKEN_PROGRAM_ID,
            token_0_program: token_0.program,
            token_1_program: token_1.program,
            associated_token_program: ASSOCIATED_TOKEN_PROGRAM_ID,
            system_program: SYSTEM_PROGRAM_ID,
            rent: RENT_SYSVAR_ID,
        };

        self.build(
            accounts,
            InitializeArgs {
                init_amount_0: amounts.init_amount_0,
                init_amount_1: amounts.init_amount_1,
                open_time,
            },
            vec![],
        )
    }

    /// Create a pool whose mints may use the extended standard.
    ///
    /// The hook slots are filled from the first entry of `hooks` (mints in canonical order),
    /// or with the program id when no mint has a hook. Every hook's resolved accounts trail
    /// the instruction, in the order given.
    pub fn initialize_v2_ix(
        &self,
        creator: &Pubkey,
        amm_config: &Pubkey,
        pair: &MintPair,
        amounts: InitAmounts,
        open_time: u64,
        hooks: &[ResolvedHook],
    ) -> Result<Instruction> {
        let created = self.creation_accounts(creator, amm_config, pair)?;
        let (token_0, token_1) = (pair.token_0(), pair.token_1());

        let (transfer_hook_program, extra_account_meta_list) = hooks
            .first()
            .map(|hook| (hook.program, hook.extra_account_meta_list))
            .unwrap_or((self.program_id(), self.program_id()));

        let accounts = InitializeV2 {
            creator: *creator,
            amm_config: *amm_config,
            authority: created.keys.authority,
            pool_state: created.keys.pool,
            token_0_mint: token_0.mint,
            token_1_mint: token_1.mint,
            lp_mint: created.keys.lp_mint,
            creator_token_0: created.creator_token_0,
            creator_token_1: created.creator_token_1,
            creator_lp_token: created.creator_lp_token,
            token_0_vault: created.keys.token_0_vault,
            token_1_vault: created.keys.token_1_vault,
            token_badge_0: self.addresses().token_badge(amm_config, &token_0.mint)?.address,
            token_badge_1: self.addresses().token_badge(amm_config, &token_1.mint)?.address,
            create_pool_fee: self.create_pool_fee_receiver(),
            observation_state: created.keys.observation,
            token_program: TOKEN_PROGRAM_ID,
            token_0_program: token_0.program,
            token_1_program: token_1.program,
            associated_token_program: ASSOCIATED_TOKEN_PROGRAM_ID,
            system_program: SYSTEM_PROGRAM_ID,
            rent: RENT_SYSVAR_ID,
            transfer_hook_program,
            extra_account_meta_list,
        };

        let remaining_accounts: Vec<AccountMeta> = hooks
            .iter()
            .flat_map(|hook| hook.accounts.iter().cloned())
            .collect();

        self.build(
            accounts,
            InitializeV2Args {
                init_amount_0: amounts.init_amount_0,
                init_amount_1: amounts.init_amount_1,
                open_time,
            },
            remaining_accounts,
        )
    }
}
