//! Pool scenario tests
//!
//! Every test drives the client against the swap program and the test transfer hook program
//! loaded into one LiteSVM instance. Both artifacts come from `anchor build`.

pub mod fixture;

mod config_test;
mod idl_test;
mod initialize_test;
mod initialize_v2_test;
mod liquidity_test;
mod swap_test;
