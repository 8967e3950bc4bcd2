use std::path::{Path, PathBuf};

use crate::{
    core::vm::Vm,
    errors::{Result, VmError},
    helpers::fixtures::BaseFixture,
};
use solana_sdk::pubkey::Pubkey;

/// Builder for the test environment
#[derive(Debug, Clone, Default)]
pub struct VmBuilder {
    programs: Vec<ProgramArtifact>,
}

impl VmBuilder {
    /// Start local environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a program artifact before running tests.
    pub fn with_program(mut self, artifact: ProgramArtifact) -> Self {
        self.programs.push(artifact);
        self
    }

    pub fn build(self) -> Result<Vm> {
        let mut vm = Vm::new();

        for artifact in &self.programs {
            let path = artifact.so_path.to_string_lossy().to_string();
            vm.add_program_from_file(&artifact.program_id, &path)?;
            if let Some(name) = &artifact.name {
                vm.set_program_name(&artifact.program_id, name);
            }
        }

        Ok(vm)
    }
}

/// Metadata describing a compiled BPF program artifact.
#[derive(Debug, Clone)]
pub struct ProgramArtifact {
    program_id: Pubkey,
    name: Option<String>,
    so_path: PathBuf,
}

impl ProgramArtifact {
    pub fn new(program_id: Pubkey, name: impl Into<String>, so_path: impl Into<PathBuf>) -> Self {
        Self {
            program_id,
            name: Some(name.into()),
            so_path: so_path.into(),
        }
    }

    /// Locate `<name>.so` in the deploy directories.
    pub fn locate(program_id: Pubkey, name: &str) -> Result<Self> {
        let file = format!("{name}.so");
        BaseFixture::find_program_path(&file)
            .map(|path| Self::new(program_id, name, path))
            .ok_or(VmError::ProgramNotFound(file))
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn so_path(&self) -> &Path {
        &self.so_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_reports_missing_artifact() {
        let err = ProgramArtifact::locate(Pubkey::new_unique(), "not_a_built_program").unwrap_err();
        assert!(matches!(err, VmError::ProgramNotFound(name) if name == "not_a_built_program.so"));
    }

    #[test]
    fn test_build_without_programs() {
        let vm = VmBuilder::new().build().unwrap();
        assert!(vm.timestamp() > 0);
    }

    #[test]
    fn test_build_fails_on_unreadable_artifact() {
        let artifact = ProgramArtifact::new(Pubkey::new_unique(), "ghost", "target/deploy/ghost.so");
        assert_eq!(artifact.name(), Some("ghost"));
        assert!(VmBuilder::new().with_program(artifact).build().is_err());
    }
}
