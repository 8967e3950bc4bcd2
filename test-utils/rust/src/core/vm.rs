//! In-process ledger: program deployment, clock and per-transaction logs

use std::collections::HashMap;

use dashmap::DashMap;
use litesvm::LiteSVM;
use solana_clock::Clock;
use solana_compute_budget::compute_budget::ComputeBudget;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    errors::{Result, VmError},
    internal::conversions::to_lite_pubkey,
};

/// LiteSVM instance plus the bookkeeping the client expects from a ledger
pub struct Vm {
    /// LiteSVM instance for transaction execution
    pub svm: LiteSVM,

    /// Program names for debugging
    program_names: HashMap<Pubkey, String>,

    /// Logs of every executed transaction, failed ones included
    tx_logs: DashMap<Signature, Vec<String>>,

    /// Signature of the most recent successful transaction
    last_signature: Option<Signature>,

    /// Logs emitted by the most recent failed transaction (if any)
    last_error_logs: Option<Vec<String>>,
}

impl Vm {
    pub fn new() -> Self {
        let mut compute_budget = ComputeBudget::new_with_defaults(false);
        compute_budget.compute_unit_limit = 1_400_000; // set to solana max compute unit limit
        let mut svm = LiteSVM::new()
            .with_compute_budget(compute_budget)
            .with_transaction_history(50);

        let now = chrono::Utc::now().timestamp();
        let clock = Clock {
            slot: 1000,
            epoch_start_timestamp: now,
            epoch: 100,
            leader_schedule_epoch: 101,
            unix_timestamp: now,
        };
        svm.set_sysvar::<Clock>(&clock);

        Self {
            svm,
            program_names: HashMap::new(),
            tx_logs: DashMap::new(),
            last_signature: None,
            last_error_logs: None,
        }
    }

    /// Add program from bytecode
    pub fn add_program(&mut self, program_id: &Pubkey, bytecode: &[u8]) -> Result<()> {
        let lite_program_id = to_lite_pubkey(program_id);
        self.svm
            .add_program(lite_program_id, bytecode)
            .map_err(|e| VmError::DeploymentFailed(format!("{:?}", e)))?;
        Ok(())
    }

    /// Add program from .so file
    pub fn add_program_from_file(&mut self, program_id: &Pubkey, file_path: &str) -> Result<()> {
        let bytecode = std::fs::read(file_path)
            .map_err(|e| VmError::ProgramNotFound(format!("{file_path}: {e}")))?;
        self.add_program(program_id, &bytecode)?;
        self.program_names
            .insert(*program_id, file_path.to_string());
        tracing::debug!("deployed {} from {}", program_id, file_path);
        Ok(())
    }

    /// Set a name for a program (for debugging)
    pub fn set_program_name(&mut self, program_id: &Pubkey, name: &str) {
        self.program_names.insert(*program_id, name.to_string());
    }

    pub fn program_name(&self, program_id: &Pubkey) -> Option<&str> {
        self.program_names.get(program_id).map(String::as_str)
    }

    /// Get latest blockhash
    pub fn latest_blockhash(&self) -> solana_sdk::hash::Hash {
        let lite_hash = self.svm.latest_blockhash();
        solana_sdk::hash::Hash::from(lite_hash.to_bytes())
    }

    /// Expire current blockhash (force new one)
    pub fn expire_blockhash(&mut self) {
        self.svm.expire_blockhash();
    }

    /// Get rent sysvar
    pub fn rent(&self) -> solana_sdk::rent::Rent {
        solana_sdk::rent::Rent::default()
    }

    pub fn timestamp(&self) -> i64 {
        self.svm.get_sysvar::<Clock>().unix_timestamp
    }

    /// Move the clock forward. Pools only open for swaps after their open time has passed.
    pub fn warp_time(&mut self, seconds: i64) {
        let mut clock = self.svm.get_sysvar::<Clock>();
        clock.unix_timestamp += seconds;
        self.svm.set_sysvar::<Clock>(&clock);
    }

    /// Logs of the transaction with `signature`, whether it succeeded or not.
    pub fn logs_for(&self, signature: &Signature) -> Option<Vec<String>> {
        self.tx_logs.get(signature).map(|logs| logs.clone())
    }

    pub fn last_tx_logs(&self) -> Option<Vec<String>> {
        self.last_signature.and_then(|sig| self.logs_for(&sig))
    }

    /// Store logs of a successful transaction
    pub(crate) fn store_tx_logs(&mut self, signature: Signature, logs: Vec<String>) {
        self.tx_logs.insert(signature, logs);
        self.last_signature = Some(signature);
    }

    /// Store logs from a failed transaction
    pub(crate) fn store_error_logs(&mut self, signature: Option<Signature>, logs: Vec<String>) {
        if let Some(signature) = signature {
            self.tx_logs.insert(signature, logs.clone());
        }
        if logs.is_empty() {
            self.last_error_logs = None;
        } else {
            self.last_error_logs = Some(logs);
        }
    }

    /// Clear logs captured from the last failed transaction
    pub fn clear_last_error_logs(&mut self) {
        self.last_error_logs = None;
    }

    /// Get logs from the last failed transaction, if any
    pub fn last_error_logs(&self) -> Option<&Vec<String>> {
        self.last_error_logs.as_ref()
    }

    /// Check whether the last failure matches the expected message via error string or logs
    pub fn revert_matches(&self, expected_message: &str, err: &VmError) -> bool {
        err.to_string().contains(expected_message)
            || err.logs().iter().any(|log| log.contains(expected_message))
            || self
                .last_error_logs
                .as_ref()
                .map(|logs| logs.iter().any(|log| log.contains(expected_message)))
                .unwrap_or(false)
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}
