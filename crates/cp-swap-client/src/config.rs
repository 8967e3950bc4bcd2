//! Client configuration
//!
//! Every tunable the client relies on lives in [`ClientConfig`]. Defaults are enumerated once
//! in the `Default` impls below and can be overlaid from the environment with
//! [`ClientConfig::from_env`].

use std::{str::FromStr, time::Duration};

use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::{
    constants::{CP_SWAP_PROGRAM_ID, CREATE_POOL_FEE_RECEIVER},
    errors::{ClientError, Result},
};

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

/// How a transaction is submitted and confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Skip the pre-submission simulation. Defaults to `true`.
    pub skip_preflight: bool,
    /// Commitment the orchestrator waits for. Defaults to `confirmed`.
    pub commitment: CommitmentConfig,
    /// Upper bound on waiting for `commitment`. Defaults to 30 seconds.
    pub confirm_timeout: Duration,
    /// Delay between signature status polls. Defaults to 500 milliseconds.
    pub poll_interval: Duration,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            skip_preflight: true,
            commitment: CommitmentConfig::confirmed(),
            confirm_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl SubmitOptions {
    pub fn with_preflight(mut self) -> Self {
        self.skip_preflight = false;
        self
    }

    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }
}

/// Amounts deposited by the creator when a pool is initialized, and when it opens for swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitAmounts {
    pub init_amount_0: u64,
    pub init_amount_1: u64,
    /// Unix timestamp before which swaps are refused. Past values, `0` included, open the pool
    /// at creation.
    pub open_time: u64,
}

impl Default for InitAmounts {
    fn default() -> Self {
        Self {
            init_amount_0: 10_000_000_000,
            init_amount_1: 20_000_000_000,
            open_time: 0,
        }
    }
}

impl InitAmounts {
    pub const fn new(init_amount_0: u64, init_amount_1: u64) -> Self {
        Self {
            init_amount_0,
            init_amount_1,
            open_time: 0,
        }
    }

    pub fn with_open_time(mut self, open_time: u64) -> Self {
        self.open_time = open_time;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub program_id: Pubkey,
    pub create_pool_fee_receiver: Pubkey,
    pub submit: SubmitOptions,
    pub init_amounts: InitAmounts,
    /// Bound on fresh mint pairs tried while searching for a token program pairing.
    pub max_pairing_attempts: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            program_id: CP_SWAP_PROGRAM_ID,
            create_pool_fee_receiver: CREATE_POOL_FEE_RECEIVER,
            submit: SubmitOptions::default(),
            init_amounts: InitAmounts::default(),
            max_pairing_attempts: 32,
        }
    }
}

impl ClientConfig {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            ..Self::default()
        }
    }

    /// Defaults overlaid with `CP_SWAP_*` variables from the environment or a `.env` file.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(program_id) = env_var("CP_SWAP_PROGRAM_ID") {
            config.program_id = parse_pubkey("CP_SWAP_PROGRAM_ID", &program_id)?;
        }
        if let Some(receiver) = env_var("CP_SWAP_CREATE_POOL_FEE_RECEIVER") {
            config.create_pool_fee_receiver =
                parse_pubkey("CP_SWAP_CREATE_POOL_FEE_RECEIVER", &receiver)?;
        }
        if let Some(timeout) = env_var("CP_SWAP_CONFIRM_TIMEOUT_MS") {
            let millis = timeout.parse::<u64>().map_err(|e| {
                ClientError::InvalidConfig(format!("CP_SWAP_CONFIRM_TIMEOUT_MS={timeout}: {e}"))
            })?;
            config.submit.confirm_timeout = Duration::from_millis(millis);
        }
        if let Some(attempts) = env_var("CP_SWAP_MAX_PAIRING_ATTEMPTS") {
            config.max_pairing_attempts = attempts.parse::<usize>().map_err(|e| {
                ClientError::InvalidConfig(format!("CP_SWAP_MAX_PAIRING_ATTEMPTS={attempts}: {e}"))
            })?;
        }

        if config.max_pairing_attempts == 0 {
            return Err(ClientError::InvalidConfig(
                "max_pairing_attempts must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn with_submit_options(mut self, submit: SubmitOptions) -> Self {
        self.submit = submit;
        self
    }

    pub fn with_init_amounts(mut self, init_amounts: InitAmounts) -> Self {
        self.init_amounts = init_amounts;
        self
    }

    /// At least one pair is always drawn, so `0` behaves like `1`.
    pub fn with_max_pairing_attempts(mut self, attempts: usize) -> Self {
        self.max_pairing_attempts = attempts.max(1);
        self
    }
}

/// RPC endpoint of the cluster, `ANCHOR_PROVIDER_URL` when set.
pub fn rpc_url() -> String {
    env_var("ANCHOR_PROVIDER_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string())
}

fn env_var(key: &str) -> Option<String> {
    dotenv::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_pubkey(key: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value.trim())
        .map_err(|e| ClientError::InvalidConfig(format!("{key}={value}: {e}")))
}
