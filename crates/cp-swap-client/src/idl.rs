//! Consistency check between the instruction builders and the program IDL.
//!
//! The builders list every account role by hand. [`ProgramIdl::verify`] compares those lists,
//! the argument names and the discriminators with what the program publishes, so a drifted
//! layout fails before anything is submitted.

use std::path::Path;

use serde::Deserialize;

use crate::{
    errors::{ClientError, Result},
    instructions::InstructionLayout,
    state::instruction_discriminator,
};

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramIdl {
    #[serde(default)]
    pub address: Option<String>,
    pub instructions: Vec<IdlInstruction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    /// Present in IDLs generated by Anchor 0.30 and later.
    #[serde(default)]
    pub discriminator: Option<Vec<u8>>,
    #[serde(default)]
    pub accounts: Vec<IdlAccountItem>,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

/// A single account or a named group of accounts flattened in place.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdlAccountItem {
    Group {
        name: String,
        accounts: Vec<IdlAccountItem>,
    },
    Single {
        name: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlField {
    pub name: String,
}

impl ProgramIdl {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ClientError::IdlMismatch(format!("invalid IDL: {e}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn instruction(&self, name: &str) -> Option<&IdlInstruction> {
        self.instructions
            .iter()
            .find(|ix| snake_case(&ix.name) == name)
    }

    /// Compare every layout with the IDL, reporting the first difference.
    pub fn verify(&self, layouts: &[InstructionLayout]) -> Result<()> {
        for layout in layouts {
            let ix = self.instruction(layout.name).ok_or_else(|| {
                ClientError::IdlMismatch(format!("{} is not declared by the program", layout.name))
            })?;

            if let Some(discriminator) = &ix.discriminator {
                if discriminator[..] != instruction_discriminator(layout.name) {
                    return Err(ClientError::IdlMismatch(format!(
                        "{}: discriminator differs",
                        layout.name
                    )));
                }
            }

            let accounts = ix.account_names();
            if accounts != layout.accounts {
                return Err(ClientError::IdlMismatch(format!(
                    "{}: accounts {:?}, builder has {:?}",
                    layout.name, accounts, layout.accounts
                )));
            }

            let args: Vec<String> = ix.args.iter().map(|arg| snake_case(&arg.name)).collect();
            if args != layout.args {
                return Err(ClientError::IdlMismatch(format!(
                    "{}: args {:?}, builder has {:?}",
                    layout.name, args, layout.args
                )));
            }

            tracing::debug!("{} matches the program IDL", layout.name);
        }
        Ok(())
    }
}

impl IdlInstruction {
    /// Account role names in declared order with groups flattened.
    pub fn account_names(&self) -> Vec<String> {
        let mut names = vec![];
        flatten(&self.accounts, &mut names);
        names
    }
}

fn flatten(items: &[IdlAccountItem], names: &mut Vec<String>) {
    for item in items {
        match item {
            IdlAccountItem::Group { accounts, .. } => flatten(accounts, names),
            IdlAccountItem::Single { name } => names.push(snake_case(name)),
        }
    }
}

/// Legacy IDLs use camel case names; `token0Vault` becomes `token_0_vault`.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        let boundary = match prev {
            Some(p) if p != '_' => {
                (c.is_ascii_uppercase() && !p.is_ascii_uppercase())
                    || (c.is_ascii_digit() && !p.is_ascii_digit())
                    || (!c.is_ascii_digit() && p.is_ascii_digit() && c != '_')
            }
            _ => false,
        };
        if boundary {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }
    out
}
