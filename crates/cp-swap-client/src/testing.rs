//! In-memory ledger used by unit tests.

use std::collections::HashMap;

use solana_sdk::{
    account::Account,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
};

use crate::{
    config::SubmitOptions,
    errors::{ClientError, Result},
    ledger::Ledger,
};

pub type Effect = fn(&[Instruction], &mut HashMap<Pubkey, Account>);

/// Records submissions and applies an optional effect to its account map.
#[derive(Default)]
pub struct MemoryLedger {
    pub accounts: HashMap<Pubkey, Account>,
    pub submissions: Vec<Vec<Instruction>>,
    pub logs: HashMap<Signature, Vec<String>>,
    pub offline: bool,
    pub rejection: Option<(String, Vec<String>)>,
    /// Submissions are broadcast but never observed at the requested commitment.
    pub unconfirmed: bool,
    pub effect: Option<Effect>,
}

impl MemoryLedger {
    pub fn put(&mut self, address: Pubkey, account: Account) {
        self.accounts.insert(address, account);
    }

    /// Ledger whose submissions materialize their writable, non-signer accounts.
    pub fn creating() -> Self {
        Self {
            effect: Some(materialize_writable as Effect),
            ..Self::default()
        }
    }
}

fn materialize_writable(instructions: &[Instruction], accounts: &mut HashMap<Pubkey, Account>) {
    for ix in instructions {
        for meta in ix.accounts.iter().filter(|m| m.is_writable && !m.is_signer) {
            accounts.entry(meta.pubkey).or_insert(Account {
                lamports: 1_000_000,
                data: vec![1; 8],
                owner: ix.program_id,
                executable: false,
                rent_epoch: 0,
            });
        }
    }
}

impl Ledger for MemoryLedger {
    fn get_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        if self.offline {
            return Err(ClientError::Transport("ledger offline".to_string()));
        }
        Ok(self.accounts.get(address).cloned())
    }

    fn minimum_balance(&self, data_len: usize) -> Result<u64> {
        Ok(((data_len as u64) + 128) * 6_960)
    }

    fn submit_and_confirm(
        &mut self,
        instructions: &[Instruction],
        _payer: &Pubkey,
        signers: &[&Keypair],
        options: &SubmitOptions,
    ) -> Result<Signature> {
        if self.offline {
            return Err(ClientError::Transport("ledger offline".to_string()));
        }
        if signers.is_empty() {
            return Err(ClientError::NoSigners);
        }
        if let Some((error, logs)) = &self.rejection {
            return Err(ClientError::rejection(error.clone(), logs.clone()));
        }
        if self.unconfirmed {
            self.submissions.push(instructions.to_vec());
            return Err(ClientError::ConfirmationTimeout {
                signature: Signature::new_unique(),
                timeout: options.confirm_timeout,
            });
        }

        self.submissions.push(instructions.to_vec());
        if let Some(effect) = self.effect {
            effect(instructions, &mut self.accounts);
        }

        let signature = Signature::new_unique();
        self.logs
            .insert(signature, vec!["Program log: success".to_string()]);
        Ok(signature)
    }

    fn transaction_logs(&self, signature: &Signature) -> Result<Vec<String>> {
        self.logs
            .get(signature)
            .cloned()
            .ok_or_else(|| ClientError::Custom(format!("unknown signature {signature}")))
    }
}
