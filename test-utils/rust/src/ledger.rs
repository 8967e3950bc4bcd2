//! The VM as a client [`Ledger`]: every client operation runs in-process against LiteSVM.

use cp_swap_client::{errors::Result as ClientResult, ClientError, Ledger, SubmitOptions};
use solana_sdk::{
    account::Account,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
};

use crate::core::{accounts::AccountManager, transactions::TransactionBuilder, vm::Vm};

impl Ledger for Vm {
    fn get_account(&self, address: &Pubkey) -> ClientResult<Option<Account>> {
        Ok(self.account(address))
    }

    fn minimum_balance(&self, data_len: usize) -> ClientResult<u64> {
        Ok(self.rent().minimum_balance(data_len))
    }

    /// Execution is synchronous, so a returned signature is already final at every commitment.
    fn submit_and_confirm(
        &mut self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
        options: &SubmitOptions,
    ) -> ClientResult<Signature> {
        let executed = TransactionBuilder::new(self)
            .instructions(instructions.to_vec())
            .signers(signers)
            .payer(*payer)
            .preflight(!options.skip_preflight)
            .execute()?;
        Ok(executed.signature)
    }

    fn transaction_logs(&self, signature: &Signature) -> ClientResult<Vec<String>> {
        self.logs_for(signature).ok_or_else(|| {
            ClientError::Transport(format!("transaction {signature} was not executed by this vm"))
        })
    }
}
