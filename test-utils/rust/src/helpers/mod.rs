//! Testing helpers and utilities

pub mod assertions;
pub mod fixtures;
pub mod tokens;

pub use assertions::{Assertions, ExpectRevertResultExt, RevertInfo};
pub use fixtures::{BaseFixture, ProgramFixture, DEPLOY_DIR_ENV};
pub use tokens::{MintInfo, TokenHelper};
