//! Read and submit interface to the ledger hosting the swap program.

use solana_sdk::{
    account::Account,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
};

use crate::{
    config::SubmitOptions,
    errors::{ClientError, Result},
    state::{token_amount, AccountRecord},
};

/// Connection to a ledger. Implemented over RPC by [`crate::rpc::RpcLedger`] and in-process by
/// the LiteSVM test framework.
///
/// Implementations report program failures as [`ClientError::ProgramRejection`] carrying the
/// complete execution log, and everything else that prevents a verdict as
/// [`ClientError::Transport`] or [`ClientError::ConfirmationTimeout`].
pub trait Ledger {
    /// Account at `address`, `None` when the ledger holds nothing there.
    fn get_account(&self, address: &Pubkey) -> Result<Option<Account>>;

    /// Lamports for a rent exempt account of `data_len` bytes.
    fn minimum_balance(&self, data_len: usize) -> Result<u64>;

    /// Sign `instructions` into one transaction paid by `payer`, submit it and wait for the
    /// commitment in `options`.
    fn submit_and_confirm(
        &mut self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
        options: &SubmitOptions,
    ) -> Result<Signature>;

    /// Execution log of a confirmed transaction.
    fn transaction_logs(&self, signature: &Signature) -> Result<Vec<String>>;

    /// An account with no data and no lamports counts as absent.
    fn exists(&self, address: &Pubkey) -> Result<bool> {
        Ok(self
            .get_account(address)?
            .map(|account| !account.data.is_empty() || account.lamports > 0)
            .unwrap_or(false))
    }

    fn fetch<T: AccountRecord>(&self, address: &Pubkey) -> Result<T> {
        let account = self
            .get_account(address)?
            .ok_or(ClientError::AccountNotFound(*address))?;
        T::decode(&account.data)
    }

    fn token_balance(&self, token_account: &Pubkey) -> Result<u64> {
        let account = self
            .get_account(token_account)?
            .ok_or(ClientError::AccountNotFound(*token_account))?;
        token_amount(&account.data)
    }
}
