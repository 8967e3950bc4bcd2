//! Account operations including airdrop, balance checks, and data management

use crate::{
    errors::{Result, VmError},
    internal::conversions::{from_lite_account, to_lite_account, to_lite_pubkey},
};
use solana_sdk::{account::Account, pubkey::Pubkey, signature::Keypair, signer::Signer};

use super::vm::Vm;

/// Trait for managing accounts in the VM
pub trait AccountManager {
    /// Airdrop SOL to an address
    fn airdrop(&mut self, pubkey: &Pubkey, lamports: u64) -> Result<()>;

    /// Set arbitrary account data
    fn set_account(&mut self, pubkey: &Pubkey, account: Account) -> Result<()>;

    /// Account at `pubkey`, if the VM holds one
    fn account(&self, pubkey: &Pubkey) -> Option<Account>;

    /// Create and fund a new keypair
    fn make_account(&mut self, lamports: u64) -> Keypair;

    /// Get SOL balance
    fn balance(&self, pubkey: &Pubkey) -> u64;

    /// Check if account exists
    fn account_exists(&self, pubkey: &Pubkey) -> bool;
}

impl AccountManager for Vm {
    fn airdrop(&mut self, pubkey: &Pubkey, lamports: u64) -> Result<()> {
        let lite_pubkey = to_lite_pubkey(pubkey);
        self.svm
            .airdrop(&lite_pubkey, lamports)
            .map_err(|e| VmError::AirdropFailed(format!("{:?}", e.err)))?;
        Ok(())
    }

    fn set_account(&mut self, pubkey: &Pubkey, account: Account) -> Result<()> {
        let lite_pubkey = to_lite_pubkey(pubkey);
        let lite_account = to_lite_account(account);
        self.svm
            .set_account(lite_pubkey, lite_account)
            .map_err(|e| VmError::SetAccountFailed(format!("{:?}", e)))?;
        Ok(())
    }

    fn account(&self, pubkey: &Pubkey) -> Option<Account> {
        let lite_pubkey = to_lite_pubkey(pubkey);
        self.svm.get_account(&lite_pubkey).map(from_lite_account)
    }

    /// Panics when the airdrop fails; only meant for test setup.
    fn make_account(&mut self, lamports: u64) -> Keypair {
        let keypair = Keypair::new();
        self.airdrop(&keypair.pubkey(), lamports)
            .expect("airdrop to a fresh keypair");
        keypair
    }

    fn balance(&self, pubkey: &Pubkey) -> u64 {
        self.account(pubkey).map(|a| a.lamports).unwrap_or(0)
    }

    fn account_exists(&self, pubkey: &Pubkey) -> bool {
        self.account(pubkey).is_some()
    }
}
