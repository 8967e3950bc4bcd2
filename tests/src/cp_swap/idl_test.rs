//! Builders against the IDL emitted by `anchor build`.

#[cfg(test)]
mod tests {
    use crate::cp_swap::fixture::{find_idl_path, CP_SWAP_ARTIFACT};
    use cp_swap_client::{idl::ProgramIdl, instructions::InstructionBuilder};

    #[test]
    #[ignore = "needs target/idl/raydium_cp_swap_token_22.json"]
    fn test_builders_match_program_idl() {
        let path = find_idl_path(&format!("{CP_SWAP_ARTIFACT}.json")).expect("IDL not built");
        let idl = ProgramIdl::from_file(path).unwrap();

        idl.verify(&InstructionBuilder::layouts()).unwrap();
    }
}
