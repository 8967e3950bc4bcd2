use crate::helpers::tokens::TokenHelper;
use crate::{
    core::{accounts::AccountManager, vm::Vm},
    errors::VmError,
};
use solana_sdk::pubkey::Pubkey;

/// Result of an `expect_revert` check, containing details about the failure
#[derive(Debug, Clone)]
pub struct RevertInfo {
    /// The error that caused the revert
    pub error: String,
    /// The logs captured from the failed transaction
    pub logs: Vec<String>,
}

impl RevertInfo {
    /// Check if the error or logs contain the expected message
    pub fn contains(&self, message: &str) -> bool {
        self.error.contains(message) || self.logs.iter().any(|log| log.contains(message))
    }

    /// Check if the revert matches an Anchor error code
    pub fn has_error_code(&self, code: u32) -> bool {
        let code_str = code.to_string();
        self.contains(&code_str)
    }
}

/// Core assertion trait
pub trait Assertions {
    /// Assert SOL balance equals expected
    fn assert_balance_eq(&self, pubkey: &Pubkey, expected: u64);

    /// Assert token balance of the owner's associated account equals expected
    fn assert_token_balance_eq(&self, owner: &Pubkey, mint: &Pubkey, expected: u64);

    /// Assert approximate equality with absolute delta
    fn assert_approx_eq(&self, actual: u128, expected: u128, delta: u128);

    /// Assert account exists
    fn assert_account_exists(&self, pubkey: &Pubkey);

    /// Assert account does not exist
    fn assert_account_not_exists(&self, pubkey: &Pubkey);
}

impl Assertions for Vm {
    fn assert_balance_eq(&self, pubkey: &Pubkey, expected: u64) {
        let actual = self.balance(pubkey);
        assert_eq!(
            actual, expected,
            "Balance mismatch for {}.\nExpected: {} lamports\nActual:   {} lamports",
            pubkey, expected, actual
        );
    }

    fn assert_token_balance_eq(&self, owner: &Pubkey, mint: &Pubkey, expected: u64) {
        let actual = self.ata_balance(owner, mint);
        assert_eq!(
            actual, expected,
            "Token balance mismatch for owner {} mint {}.\nExpected: {}\nActual:   {}",
            owner, mint, expected, actual
        );
    }

    fn assert_approx_eq(&self, actual: u128, expected: u128, delta: u128) {
        let diff = actual.abs_diff(expected);

        assert!(
            diff <= delta,
            "Values not approximately equal.\nExpected: {}\nActual:   {}\nDiff:     {} (max allowed: {})",
            expected, actual, diff, delta
        );
    }

    fn assert_account_exists(&self, pubkey: &Pubkey) {
        assert!(
            self.account_exists(pubkey),
            "Account {} should exist but does not",
            pubkey
        );
    }

    fn assert_account_not_exists(&self, pubkey: &Pubkey) {
        assert!(
            !self.account_exists(pubkey),
            "Account {} should not exist but does",
            pubkey
        );
    }
}

/// Extension trait for `Result` types to provide fluent expect_revert style assertions.
///
/// Works on client results too: a client program rejection converts into a failure that keeps
/// its logs, so matching sees the same lines the program emitted.
///
/// # Example
/// ```ignore
/// client.swap_base_input(&payer, &config, &input, &output, 0, 0)
///     .expect_revert_containing(&vm, "ZeroTradingTokens");
/// ```
pub trait ExpectRevertResultExt<T> {
    /// Assert that the result is an error containing the expected message.
    fn expect_revert_containing(self, vm: &Vm, expected_message: &str) -> RevertInfo;

    /// Assert that the result is an error containing any of the expected messages.
    fn expect_revert_containing_any(self, vm: &Vm, expected_messages: &[&str]) -> RevertInfo;

    /// Assert that the result is an error with the specified Anchor error code.
    fn expect_revert_with_code(self, vm: &Vm, error_code: u32) -> RevertInfo;

    /// Assert that the result is an error, returning the `RevertInfo` for further inspection.
    fn expect_failure(self, vm: &Vm) -> RevertInfo;
}

fn revert_info(vm: &Vm, err: &VmError) -> RevertInfo {
    let logs = if err.logs().is_empty() {
        vm.last_error_logs().cloned().unwrap_or_default()
    } else {
        err.logs().to_vec()
    };
    RevertInfo {
        error: err.to_string(),
        logs,
    }
}

impl<T, E> ExpectRevertResultExt<T> for std::result::Result<T, E>
where
    E: Into<VmError>,
{
    fn expect_revert_containing(self, vm: &Vm, expected_message: &str) -> RevertInfo {
        self.expect_revert_containing_any(vm, &[expected_message])
    }

    fn expect_revert_containing_any(self, vm: &Vm, expected_messages: &[&str]) -> RevertInfo {
        match self {
            Ok(_) => panic!(
                "Expected revert containing {:?}, but the call succeeded",
                expected_messages
            ),
            Err(err) => {
                let vm_error: VmError = err.into();
                let info = revert_info(vm, &vm_error);

                let matched = expected_messages
                    .iter()
                    .any(|expected| vm.revert_matches(expected, &vm_error));

                if !matched {
                    panic!(
                        "Expected revert containing {:?}, but got error: {}\nLogs:\n{}",
                        expected_messages,
                        vm_error,
                        info.logs.join("\n")
                    );
                }

                info
            }
        }
    }

    fn expect_revert_with_code(self, vm: &Vm, error_code: u32) -> RevertInfo {
        self.expect_revert_containing(vm, &error_code.to_string())
    }

    fn expect_failure(self, vm: &Vm) -> RevertInfo {
        match self {
            Ok(_) => panic!("Expected action to fail, but it succeeded"),
            Err(err) => revert_info(vm, &err.into()),
        }
    }
}

impl Vm {
    pub fn assert_account_owner(&self, pubkey: &Pubkey, expected_owner: &Pubkey) {
        let account = self
            .account(pubkey)
            .unwrap_or_else(|| panic!("Account {} not found", pubkey));
        assert_eq!(
            account.owner, *expected_owner,
            "Account owner mismatch for {}.\nExpected: {}\nActual:   {}",
            pubkey, expected_owner, account.owner
        );
    }

    pub fn assert_token_balance_changed(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
        before: u64,
        expected_change: i64,
    ) {
        let after = self.ata_balance(owner, mint);
        let expected = before.checked_add_signed(expected_change).unwrap_or_else(|| {
            panic!("change {} is out of range for balance {}", expected_change, before)
        });

        assert_eq!(
            after, expected,
            "Token balance change mismatch.\nBefore:    {}\nAfter:     {}\nExpected change: {}\nActual change:   {}",
            before,
            after,
            expected_change,
            after as i128 - before as i128
        );
    }
}
