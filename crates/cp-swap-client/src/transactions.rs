//! Transaction building and execution

use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};

use crate::{
    config::SubmitOptions,
    constants::{FAILURE_LOG_MARKERS, MAX_DIAGNOSTIC_LINES},
    errors::{ClientError, Result},
    ledger::Ledger,
    state::AccountRecord,
};

/// Collects instructions into one atomic transaction and submits it through a [`Ledger`].
///
/// Program rejections are enriched here, once: the failure lines of the execution log are
/// attached as diagnostics while the original error and the complete log are kept.
pub struct TransactionBuilder<'a, L: Ledger> {
    ledger: &'a mut L,
    instructions: Vec<Instruction>,
    signers: Vec<&'a Keypair>,
    options: SubmitOptions,
}

impl<'a, L: Ledger> TransactionBuilder<'a, L> {
    pub fn new(ledger: &'a mut L, options: SubmitOptions) -> Self {
        Self {
            ledger,
            instructions: vec![],
            signers: vec![],
            options,
        }
    }

    pub fn instruction(mut self, ix: Instruction) -> Self {
        self.instructions.push(ix);
        self
    }

    pub fn instructions(mut self, ixs: impl IntoIterator<Item = Instruction>) -> Self {
        self.instructions.extend(ixs);
        self
    }

    /// The first signer pays the fee.
    pub fn signer(mut self, keypair: &'a Keypair) -> Self {
        self.signers.push(keypair);
        self
    }

    pub fn signers(mut self, keypairs: &[&'a Keypair]) -> Self {
        for kp in keypairs {
            if !self.signers.iter().any(|s| s.pubkey() == kp.pubkey()) {
                self.signers.push(kp);
            }
        }
        self
    }

    pub fn options(mut self, options: SubmitOptions) -> Self {
        self.options = options;
        self
    }

    pub fn payer(&self) -> Option<Pubkey> {
        self.signers.first().map(|s| s.pubkey())
    }

    /// Submit and wait for confirmation.
    pub fn execute(mut self) -> Result<Signature> {
        self.submit()
    }

    /// Submit, then re-read the record at `address`.
    pub fn execute_and_fetch<T: AccountRecord>(mut self, address: &Pubkey) -> Result<(Signature, T)> {
        let signature = self.submit()?;
        let record = self.ledger.fetch::<T>(address)?;
        Ok((signature, record))
    }

    fn submit(&mut self) -> Result<Signature> {
        if self.instructions.is_empty() {
            return Err(ClientError::Custom(
                "transaction has no instructions".to_string(),
            ));
        }
        let payer = self.payer().ok_or(ClientError::NoSigners)?;

        match self
            .ledger
            .submit_and_confirm(&self.instructions, &payer, &self.signers, &self.options)
        {
            Ok(signature) => {
                tracing::info!(
                    "confirmed {} ({} instruction(s), payer {})",
                    signature,
                    self.instructions.len(),
                    payer
                );
                Ok(signature)
            }
            Err(ClientError::ProgramRejection { error, logs, .. }) => {
                let diagnostics = failure_diagnostics(&logs);
                tracing::error!(
                    "transaction rejected: {}\n{}",
                    error,
                    diagnostics.join("\n")
                );
                Err(ClientError::ProgramRejection {
                    error,
                    logs,
                    diagnostics,
                })
            }
            Err(err) => Err(err),
        }
    }
}

/// Log lines carrying a failure marker, limited to the most recent few.
pub fn failure_diagnostics(logs: &[String]) -> Vec<String> {
    let relevant: Vec<&String> = logs
        .iter()
        .filter(|line| FAILURE_LOG_MARKERS.iter().any(|marker| line.contains(marker)))
        .collect();
    let skip = relevant.len().saturating_sub(MAX_DIAGNOSTIC_LINES);
    relevant.into_iter().skip(skip).cloned().collect()
}
