use std::time::Duration;

use solana_sdk::{pubkey::Pubkey, signature::Signature};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// Every bump in the nonce space produced an on-curve address.
    #[error("Address derivation failed for namespace {namespace}")]
    DerivationFailure { namespace: String },

    #[error("Transport error: {0}")]
    Transport(String),

    /// The program executed and rejected the transaction. `logs` holds the complete
    /// execution log, `diagnostics` only the failure lines picked out of it.
    #[error("Program rejected transaction: {error}{}", render_diagnostics(.diagnostics))]
    ProgramRejection {
        error: String,
        logs: Vec<String>,
        diagnostics: Vec<String>,
    },

    /// Broadcast succeeded but the commitment level was not observed in time. The transaction
    /// may still land.
    #[error("Confirmation of {signature} not observed within {timeout:?}")]
    ConfirmationTimeout {
        signature: Signature,
        timeout: Duration,
    },

    #[error("Precondition missing: {0}")]
    PreconditionMissing(String),

    #[error("No mint pair matching {wanted} found within {attempts} attempts")]
    PairingNotFound { wanted: String, attempts: usize },

    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    #[error("Deserialization failed: {0}")]
    DecodeFailed(String),

    #[error("Instruction layout does not match program IDL: {0}")]
    IdlMismatch(String),

    #[error("No signers provided")]
    NoSigners,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Custom error: {0}")]
    Custom(String),
}

fn render_diagnostics(diagnostics: &[String]) -> String {
    if diagnostics.is_empty() {
        String::new()
    } else {
        format!("\nRelevant logs:\n{}", diagnostics.join("\n"))
    }
}

impl ClientError {
    pub fn is_program_rejection(&self) -> bool {
        matches!(self, ClientError::ProgramRejection { .. })
    }

    /// Complete execution log of a rejected transaction, empty for every other error.
    pub fn logs(&self) -> &[String] {
        match self {
            ClientError::ProgramRejection { logs, .. } => logs,
            _ => &[],
        }
    }

    /// Rejection without diagnostics, filled in by the transaction orchestrator.
    pub fn rejection(error: impl Into<String>, logs: Vec<String>) -> Self {
        ClientError::ProgramRejection {
            error: error.into(),
            logs,
            diagnostics: vec![],
        }
    }
}

impl From<solana_client::client_error::ClientError> for ClientError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<anchor_lang::prelude::ProgramError> for ClientError {
    fn from(err: anchor_lang::prelude::ProgramError) -> Self {
        ClientError::DecodeFailed(err.to_string())
    }
}

pub trait ResultExt<T> {
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| ClientError::Custom(format!("{}: {}", msg, e)))
    }
}
