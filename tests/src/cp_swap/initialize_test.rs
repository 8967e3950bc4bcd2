//! Pool creation on the legacy path.

#[cfg(test)]
mod tests {
    use crate::cp_swap::fixture::CpSwapFixture;
    use cp_swap_client::{
        config::InitAmounts,
        constants::TOKEN_PROGRAM_ID,
        errors::ClientError,
        mints::{MintExtension, StandardMintProvisioner},
        state::PoolState,
        Ledger,
    };
    use cp_swap_test_framework::prelude::*;

    const INIT_AMOUNT: u64 = 10_000_000_000;

    fn setup_fixture() -> CpSwapFixture {
        CpSwapFixture::new().expect("Failed to create fixture")
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_initialize_seeds_vaults() {
        let mut fixture = setup_fixture();
        let admin = fixture.admin.insecure_clone();
        let amounts = InitAmounts::new(INIT_AMOUNT, INIT_AMOUNT);

        let mut client = fixture.client();
        let (config, pair) = client
            .setup_initialize(
                &admin,
                &CpSwapFixture::default_params(),
                &StandardMintProvisioner::default(),
                MintExtension::None,
            )
            .unwrap();
        assert!(pair.is_legacy());
        let pool = client.initialize_pool(&admin, &config, &pair, amounts).unwrap();

        assert_eq!(pool.state.amm_config, config);
        assert_eq!(pool.state.token_0_mint, pair.token_0().mint);
        assert_eq!(pool.state.token_1_mint, pair.token_1().mint);
        assert_eq!(pool.state.token_0_program, pair.token_0().program);
        assert_eq!(pool.state.token_0_program, TOKEN_PROGRAM_ID);
        assert_eq!(pool.state.token_1_program, TOKEN_PROGRAM_ID);
        assert!(pool.state.lp_supply > 0);

        let ledger = client.ledger();
        assert_eq!(ledger.token_balance(&pool.state.token_0_vault).unwrap(), INIT_AMOUNT);
        assert_eq!(ledger.token_balance(&pool.state.token_1_vault).unwrap(), INIT_AMOUNT);
        assert!(ledger.ata_balance(&admin.pubkey(), &pool.state.lp_mint) > 0);

        let stored: PoolState = ledger.fetch(&pool.address).unwrap();
        assert_eq!(stored.lp_supply, pool.state.lp_supply);
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_initialize_twice_is_rejected() {
        let mut fixture = setup_fixture();
        let admin = fixture.admin.insecure_clone();

        let mut client = fixture.client();
        let (config, pair) = client
            .setup_initialize(
                &admin,
                &CpSwapFixture::default_params(),
                &StandardMintProvisioner::default(),
                MintExtension::no_fee(),
            )
            .unwrap();
        client
            .initialize_pool(&admin, &config, &pair, InitAmounts::default())
            .unwrap();

        let err = client
            .initialize_pool(&admin, &config, &pair, InitAmounts::default())
            .unwrap_err();
        assert!(err.is_program_rejection(), "got {err:?}");
        assert!(!err.logs().is_empty());
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_hooked_mint_needs_v2() {
        let mut fixture = setup_fixture();
        let admin = fixture.admin.insecure_clone();
        let hook_program = fixture.hook_program;

        let mut client = fixture.client();
        let (config, pair) = client
            .setup_initialize_v2(
                &admin,
                &CpSwapFixture::default_params(),
                &StandardMintProvisioner::default(),
                hook_program,
            )
            .unwrap();

        let err = client
            .initialize_pool(&admin, &config, &pair, InitAmounts::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::PreconditionMissing(_)), "got {err:?}");
    }
}
