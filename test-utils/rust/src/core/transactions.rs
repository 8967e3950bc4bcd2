//! Transaction building and execution

use crate::{
    core::vm::Vm,
    errors::{Result, VmError},
    internal::conversions::{from_lite_signature, to_lite_instruction, to_lite_pubkey},
};
use litesvm::types::{FailedTransactionMetadata, TransactionMetadata};
use solana_keypair::Keypair as LiteKeypair;
use solana_message::{Message, VersionedMessage};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use solana_transaction::versioned::VersionedTransaction;
use std::convert::TryFrom;

/// Outcome of a transaction the runtime accepted
#[derive(Debug, Clone)]
pub struct Executed {
    pub signature: Signature,
    pub logs: Vec<String>,
    pub compute_units: u64,
}

/// Transaction builder for constructing and executing transactions
pub struct TransactionBuilder<'vm> {
    vm: &'vm mut Vm,
    instructions: Vec<Instruction>,
    signers: Vec<Keypair>,
    payer: Option<Pubkey>,
    preflight: bool,
}

impl<'vm> TransactionBuilder<'vm> {
    pub fn new(vm: &'vm mut Vm) -> Self {
        Self {
            vm,
            instructions: vec![],
            signers: vec![],
            payer: None,
            preflight: false,
        }
    }

    pub fn instruction(mut self, ix: Instruction) -> Self {
        self.instructions.push(ix);
        self
    }

    pub fn instructions(mut self, ixs: Vec<Instruction>) -> Self {
        self.instructions.extend(ixs);
        self
    }

    /// Signers are deduplicated; the runtime wants each required key exactly once.
    pub fn signer(mut self, keypair: &Keypair) -> Self {
        if !self.signers.iter().any(|s| s.pubkey() == keypair.pubkey()) {
            self.signers.push(keypair.insecure_clone());
        }
        self
    }

    /// Add multiple signers
    pub fn signers(mut self, keypairs: &[&Keypair]) -> Self {
        for kp in keypairs {
            self = self.signer(kp);
        }
        self
    }

    /// Fee payer, the first signer when unset.
    pub fn payer(mut self, payer: Pubkey) -> Self {
        self.payer = Some(payer);
        self
    }

    /// Simulate before executing and refuse without touching state when the simulation fails.
    pub fn preflight(mut self, enabled: bool) -> Self {
        self.preflight = enabled;
        self
    }

    /// Execute the transaction and expect success
    pub fn execute(self) -> Result<Executed> {
        let preflight = self.preflight;
        let (tx, vm) = self.build_transaction()?;
        let signature = from_lite_signature(&tx.signatures[0])?;

        if preflight {
            if let Err(failed) = vm.svm.simulate_transaction(tx.clone()) {
                tracing::debug!("preflight of {} failed: {:?}", signature, failed.err);
                return Err(record_failure(vm, None, failed));
            }
        }

        match vm.svm.send_transaction(tx) {
            Ok(metadata) => {
                vm.clear_last_error_logs();
                vm.store_tx_logs(signature, metadata.logs.clone());
                Ok(executed(signature, metadata))
            }
            Err(e) => Err(record_failure(vm, Some(signature), e)),
        }
    }

    /// Build legacy transaction
    fn build_transaction(self) -> Result<(VersionedTransaction, &'vm mut Vm)> {
        if self.signers.is_empty() {
            return Err(VmError::NoSigners);
        }

        // a fresh blockhash per transaction keeps identical resubmissions distinct
        self.vm.expire_blockhash();

        let payer = self.payer.unwrap_or_else(|| self.signers[0].pubkey());
        let recent_blockhash = self.vm.svm.latest_blockhash();

        let lite_instructions: Vec<_> = self
            .instructions
            .into_iter()
            .map(to_lite_instruction)
            .collect();

        let lite_payer = to_lite_pubkey(&payer);

        let message =
            Message::new_with_blockhash(&lite_instructions, Some(&lite_payer), &recent_blockhash);
        let versioned_message = VersionedMessage::Legacy(message);

        let lite_signers = self
            .signers
            .iter()
            .map(|s| LiteKeypair::try_from(&s.to_bytes()[..]))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| VmError::BuildFailed(format!("signer: {}", e)))?;

        let lite_signer_refs: Vec<&LiteKeypair> = lite_signers.iter().collect();

        let tx = VersionedTransaction::try_new(versioned_message, &lite_signer_refs)
            .map_err(|e| VmError::BuildFailed(format!("Failed to create tx: {}", e)))?;

        Ok((tx, self.vm))
    }
}

fn executed(signature: Signature, metadata: TransactionMetadata) -> Executed {
    Executed {
        signature,
        logs: metadata.logs,
        compute_units: metadata.compute_units_consumed,
    }
}

fn record_failure(
    vm: &mut Vm,
    signature: Option<Signature>,
    failed: FailedTransactionMetadata,
) -> VmError {
    vm.store_error_logs(signature, failed.meta.logs.clone());
    tracing::debug!("{}", format_failed_transaction(&failed));
    VmError::from(failed)
}

fn format_failed_transaction(err: &FailedTransactionMetadata) -> String {
    if err.meta.logs.is_empty() {
        format!("{:?}", err.err)
    } else {
        format!("{:?}\nProgram logs:\n{}", err.err, err.meta.logs.join("\n"))
    }
}

impl Vm {
    pub fn tx(&mut self) -> TransactionBuilder<'_> {
        TransactionBuilder::new(self)
    }

    /// Execute single instruction
    pub fn execute_instruction(&mut self, ix: Instruction, signer: &Keypair) -> Result<Executed> {
        TransactionBuilder::new(self)
            .instruction(ix)
            .signer(signer)
            .execute()
    }
}
