//! Core VM functionality

pub mod accounts;
pub mod transactions;
pub mod vm;

pub use accounts::AccountManager;
pub use transactions::{Executed, TransactionBuilder};
pub use vm::Vm;
