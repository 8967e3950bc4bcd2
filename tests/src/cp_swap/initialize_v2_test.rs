//! Pool creation on the extended path: token badges and transfer hooks.

#[cfg(test)]
mod tests {
    use crate::cp_swap::fixture::CpSwapFixture;
    use cp_swap_client::{
        config::InitAmounts,
        errors::ClientError,
        mints::{MintExtension, StandardMintProvisioner},
        pda::extra_account_meta_list,
        Ledger,
    };
    use cp_swap_test_framework::prelude::*;

    const HOOKED_AMOUNTS: InitAmounts = InitAmounts::new(10_000_000_000, 10_000_000_000);

    fn setup_fixture() -> CpSwapFixture {
        CpSwapFixture::new().expect("Failed to create fixture")
    }

    fn vault_amount(vm: &Vm, vault: &Pubkey) -> u64 {
        vm.token_balance(vault).expect("vault holds a token account")
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_initialize_v2_with_transfer_hook() {
        let mut fixture = setup_fixture();
        let admin = fixture.admin.insecure_clone();
        let hook_program = fixture.hook_program;

        let (config, pair) = fixture
            .client()
            .setup_initialize_v2(
                &admin,
                &CpSwapFixture::default_params(),
                &StandardMintProvisioner::default(),
                hook_program,
            )
            .unwrap();

        let hooked = pair.extended_sides().next().unwrap();
        fixture.initialize_hook(&hooked.mint).unwrap();
        let meta_list = extra_account_meta_list(&hooked.mint, &hook_program).unwrap().address;
        fixture.vm.assert_account_owner(&meta_list, &hook_program);
        let counter = fixture.counter().unwrap();

        let mut client = fixture.client();
        client.create_pool_badges(&admin, &admin, &config, &pair).unwrap();
        let pool = client
            .initialize_pool_v2(&admin, &config, &pair, HOOKED_AMOUNTS)
            .unwrap();

        assert_eq!(vault_amount(client.ledger(), &pool.state.token_0_vault), HOOKED_AMOUNTS.init_amount_0);
        assert_eq!(vault_amount(client.ledger(), &pool.state.token_1_vault), HOOKED_AMOUNTS.init_amount_1);
        client.ledger().assert_account_owner(&counter, &hook_program);
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_initialize_v2_with_fee_mint() {
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
        client.create_pool_badges(&admin, &admin, &config, &pair).unwrap();
        let pool = client
            .initialize_pool_v2(&admin, &config, &pair, InitAmounts::default())
            .unwrap();

        assert_eq!(pool.state.amm_config, config);
        assert_eq!(
            vault_amount(client.ledger(), &pool.state.token_0_vault),
            InitAmounts::default().init_amount_0
        );
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_initialize_v2_without_badge_is_refused() {
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

        let err = client
            .initialize_pool_v2(&admin, &config, &pair, InitAmounts::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::PreconditionMissing(_)), "got {err:?}");

        let pool = client
            .builder()
            .addresses()
            .pool(&config, &pair.token_0().mint, &pair.token_1().mint)
            .unwrap()
            .address;
        client.ledger().assert_account_not_exists(&pool);
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_program_rejects_missing_badge() {
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
        let ix = client
            .builder()
            .initialize_v2_ix(&admin.pubkey(), &config, &pair, InitAmounts::default(), 0, &[])
            .unwrap();

        let result = client.ledger_mut().execute_instruction(ix, &admin);
        let revert = result.expect_failure(client.ledger());
        assert!(!revert.logs.is_empty(), "the program explains the refusal");
    }
}
