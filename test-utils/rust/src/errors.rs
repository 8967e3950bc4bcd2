use cp_swap_client::{transactions::failure_diagnostics, ClientError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VmError>;

/// Framework error types
#[derive(Error, Debug)]
pub enum VmError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Failed to set account: {0}")]
    SetAccountFailed(String),

    #[error("Airdrop failed: {0}")]
    AirdropFailed(String),

    /// The runtime executed the transaction and refused it. `logs` is the complete log,
    /// `diagnostics` the failure lines within it.
    #[error("Transaction failed: {error}")]
    ProgramFailed {
        error: String,
        logs: Vec<String>,
        diagnostics: Vec<String>,
    },

    #[error("Failed to build transaction: {0}")]
    BuildFailed(String),

    #[error("Program deployment failed: {0}")]
    DeploymentFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),

    #[error("No signers provided")]
    NoSigners,

    #[error("Program not found: {0}")]
    ProgramNotFound(String),

    #[error("Token operation failed: {0}")]
    TokenError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Client(ClientError),

    #[error("Custom error: {0}")]
    Custom(String),
}

impl VmError {
    /// Logs of a failed transaction, empty for every other error.
    pub fn logs(&self) -> &[String] {
        match self {
            VmError::ProgramFailed { logs, .. } => logs,
            VmError::Client(err) => err.logs(),
            _ => &[],
        }
    }
}

impl From<litesvm::types::FailedTransactionMetadata> for VmError {
    fn from(err: litesvm::types::FailedTransactionMetadata) -> Self {
        VmError::ProgramFailed {
            error: format!("{:?}", err.err),
            diagnostics: failure_diagnostics(&err.meta.logs),
            logs: err.meta.logs,
        }
    }
}

/// Program rejections keep their logs and diagnostics, everything else travels unchanged.
impl From<ClientError> for VmError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ProgramRejection {
                error,
                logs,
                diagnostics,
            } => VmError::ProgramFailed {
                error,
                logs,
                diagnostics,
            },
            other => VmError::Client(other),
        }
    }
}

/// How the in-process ledger reports back to the client: a runtime verdict is a program
/// rejection, anything that kept the runtime from reaching one is a transport failure.
impl From<VmError> for ClientError {
    fn from(err: VmError) -> Self {
        match err {
            VmError::ProgramFailed {
                error,
                logs,
                diagnostics,
            } => ClientError::ProgramRejection {
                error,
                logs,
                diagnostics,
            },
            VmError::Client(inner) => inner,
            VmError::NoSigners => ClientError::NoSigners,
            VmError::IoError(io) => ClientError::IoError(io),
            other => ClientError::Transport(other.to_string()),
        }
    }
}

pub trait ResultExt<T> {
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| VmError::Custom(format!("{}: {}", msg, e)))
    }
}
