//! Create-if-absent provisioning of shared prerequisite accounts.
//!
//! Concurrent callers are not serialized here: two callers that both observe the account as
//! absent will both submit, and the program rejects the second one.

use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{errors::Result, ledger::Ledger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provisioned {
    pub address: Pubkey,
    /// Creation transaction, `None` when the account already existed.
    pub signature: Option<Signature>,
}

impl Provisioned {
    pub fn created(&self) -> bool {
        self.signature.is_some()
    }
}

/// Run `create` only when nothing lives at `address` yet.
pub fn ensure<L, F>(ledger: &mut L, address: Pubkey, create: F) -> Result<Provisioned>
where
    L: Ledger,
    F: FnOnce(&mut L) -> Result<Signature>,
{
    if ledger.exists(&address)? {
        tracing::debug!("{} already provisioned", address);
        return Ok(Provisioned {
            address,
            signature: None,
        });
    }

    let signature = create(ledger)?;
    tracing::info!("provisioned {} in {}", address, signature);
    Ok(Provisioned {
        address,
        signature: Some(signature),
    })
}
