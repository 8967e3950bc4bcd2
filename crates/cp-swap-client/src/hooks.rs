//! Transfer hook discovery and extra account resolution
//!
//! A token-2022 mint may name a hook program that runs on every transfer. The hook publishes
//! the extra accounts it needs in an `ExtraAccountMetaList` stored at a PDA of the hook
//! program. The swap program moves tokens while creating a pool, so those accounts have to
//! trail the pool creation instruction in exactly the declared order.

use anchor_spl::token_2022::spl_token_2022::{
    extension::{transfer_hook, StateWithExtensions},
    state::Mint,
};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use spl_tlv_account_resolution::state::ExtraAccountMetaList;
use spl_transfer_hook_interface::instruction::{ExecuteInstruction, TransferHookInstruction};

use crate::{
    errors::{ClientError, Result},
    ledger::Ledger,
    pda::{extra_account_meta_list, TokenSide},
};

/// Hook accounts resolved for one mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHook {
    pub mint: Pubkey,
    pub program: Pubkey,
    pub extra_account_meta_list: Pubkey,
    /// Extra accounts in declared order with declared writability.
    pub accounts: Vec<AccountMeta>,
}

/// The transfer a hook will observe. Seeds may refer to any of these accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookTransfer {
    pub source: Pubkey,
    pub destination: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
}

/// Hook program named by the mint's `TransferHook` extension.
pub fn transfer_hook_program<L: Ledger>(ledger: &L, side: &TokenSide) -> Result<Option<Pubkey>> {
    if !side.is_extended() {
        return Ok(None);
    }

    let account = ledger
        .get_account(&side.mint)?
        .ok_or(ClientError::AccountNotFound(side.mint))?;
    let mint = StateWithExtensions::<Mint>::unpack(&account.data)?;
    Ok(transfer_hook::get_program_id(&mint))
}

/// Read the hook's published account list and resolve it for `transfer`.
pub fn resolve_transfer_hook<L: Ledger>(
    ledger: &L,
    mint: &Pubkey,
    hook_program: &Pubkey,
    transfer: &HookTransfer,
) -> Result<ResolvedHook> {
    let validation = extra_account_meta_list(mint, hook_program)?.address;
    let validation_data = ledger
        .get_account(&validation)?
        .map(|account| account.data)
        .filter(|data| !data.is_empty())
        .ok_or_else(|| {
            ClientError::PreconditionMissing(format!(
                "extra account meta list {} for mint {} is not initialized",
                validation, mint
            ))
        })?;

    let mut execute = Instruction {
        program_id: *hook_program,
        accounts: vec![
            AccountMeta::new_readonly(transfer.source, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(transfer.destination, false),
            AccountMeta::new_readonly(transfer.authority, false),
            AccountMeta::new_readonly(validation, false),
        ],
        data: TransferHookInstruction::Execute {
            amount: transfer.amount,
        }
        .pack(),
    };
    let fixed = execute.accounts.len();

    let fetch = |address: Pubkey| {
        std::future::ready(
            ledger
                .get_account(&address)
                .map(|account| account.map(|account| account.data))
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        )
    };

    tokio::runtime::Builder::new_current_thread()
        .build()?
        .block_on(ExtraAccountMetaList::add_to_instruction::<ExecuteInstruction, _, _>(
            &mut execute,
            fetch,
            &validation_data,
        ))?;

    let accounts = execute.accounts.split_off(fixed);
    tracing::debug!(
        "resolved {} extra account(s) for hook {} on mint {}",
        accounts.len(),
        hook_program,
        mint
    );

    Ok(ResolvedHook {
        mint: *mint,
        program: *hook_program,
        extra_account_meta_list: validation,
        accounts,
    })
}
