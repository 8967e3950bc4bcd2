//! [`Ledger`] over a cluster RPC endpoint.

use std::{thread, time::Instant};

use solana_client::{
    client_error::{ClientError as RpcClientError, ClientErrorKind},
    rpc_client::RpcClient,
    rpc_config::{RpcSendTransactionConfig, RpcTransactionConfig},
    rpc_request::{RpcError, RpcResponseErrorData},
};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::{Transaction, TransactionError},
};

use crate::{
    config::{rpc_url, SubmitOptions},
    errors::{ClientError, Result},
    ledger::Ledger,
};

pub struct RpcLedger {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcLedger {
    pub fn new(url: impl ToString, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(url.to_string(), commitment),
            commitment,
        }
    }

    /// Endpoint from `ANCHOR_PROVIDER_URL`, reading at `confirmed`.
    pub fn from_env() -> Self {
        Self::new(rpc_url(), CommitmentConfig::confirmed())
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    fn sign(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Transaction> {
        let blockhash = self.client.get_latest_blockhash()?;
        let mut tx = Transaction::new_with_payer(instructions, Some(payer));
        tx.try_sign(signers, blockhash)
            .map_err(|e| ClientError::Transport(format!("signing failed: {e}")))?;
        Ok(tx)
    }

    /// Poll the signature until `options.commitment` is reached or the timeout elapses.
    fn confirm(&self, signature: &Signature, options: &SubmitOptions) -> Result<()> {
        let started = Instant::now();
        loop {
            match self
                .client
                .get_signature_status_with_commitment(signature, options.commitment)?
            {
                Some(Ok(())) => return Ok(()),
                Some(Err(err)) if is_program_failure(&err) => {
                    let logs = self.transaction_logs(signature).unwrap_or_else(|e| {
                        tracing::warn!("no logs for failed transaction {}: {}", signature, e);
                        vec![]
                    });
                    return Err(ClientError::rejection(err.to_string(), logs));
                }
                Some(Err(err)) => {
                    return Err(ClientError::Transport(format!("{signature} failed: {err}")));
                }
                None => {}
            }

            if started.elapsed() >= options.confirm_timeout {
                return Err(ClientError::ConfirmationTimeout {
                    signature: *signature,
                    timeout: options.confirm_timeout,
                });
            }
            thread::sleep(options.poll_interval);
        }
    }
}

/// Only an instruction failure comes from a program. Blockhash, signature and fee failures
/// are the caller's to retry.
fn is_program_failure(err: &TransactionError) -> bool {
    matches!(err, TransactionError::InstructionError(..))
}

/// A preflight simulation that failed inside an instruction is a program verdict, everything
/// else a transport problem.
fn classify_send_error(err: RpcClientError) -> ClientError {
    if let ClientErrorKind::RpcError(RpcError::RpcResponseError {
        message,
        data: RpcResponseErrorData::SendTransactionPreflightFailure(result),
        ..
    }) = err.kind()
    {
        let failure: Option<TransactionError> = result.err.clone().map(Into::into);
        if failure.as_ref().is_some_and(is_program_failure) {
            return ClientError::rejection(message.clone(), result.logs.clone().unwrap_or_default());
        }
    }
    ClientError::from(err)
}

impl Ledger for RpcLedger {
    fn get_account(&self, address: &Pubkey) -> Result<Option<Account>> {
        Ok(self
            .client
            .get_account_with_commitment(address, self.commitment)?
            .value)
    }

    fn minimum_balance(&self, data_len: usize) -> Result<u64> {
        Ok(self
            .client
            .get_minimum_balance_for_rent_exemption(data_len)?)
    }

    fn submit_and_confirm(
        &mut self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
        options: &SubmitOptions,
    ) -> Result<Signature> {
        if signers.is_empty() {
            return Err(ClientError::NoSigners);
        }
        let tx = self.sign(instructions, payer, signers)?;

        let signature = self
            .client
            .send_transaction_with_config(
                &tx,
                RpcSendTransactionConfig {
                    skip_preflight: options.skip_preflight,
                    preflight_commitment: Some(options.commitment.commitment),
                    ..RpcSendTransactionConfig::default()
                },
            )
            .map_err(classify_send_error)?;
        tracing::debug!("sent {}, awaiting {:?}", signature, options.commitment.commitment);

        self.confirm(&signature, options)?;
        Ok(signature)
    }

    fn transaction_logs(&self, signature: &Signature) -> Result<Vec<String>> {
        let tx = self.client.get_transaction_with_config(
            signature,
            RpcTransactionConfig {
                commitment: Some(self.commitment),
                max_supported_transaction_version: Some(0),
                ..RpcTransactionConfig::default()
            },
        )?;

        Ok(tx
            .transaction
            .meta
            .and_then(|meta| Option::<Vec<String>>::from(meta.log_messages))
            .unwrap_or_default())
    }
}
