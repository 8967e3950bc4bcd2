//! Swaps in both directions against a pool with added depth.

#[cfg(test)]
mod tests {
    use crate::cp_swap::fixture::CpSwapFixture;
    use cp_swap_client::{
        mints::{MintExtension, StandardMintProvisioner},
        scenarios::PoolOutcome,
    };
    use cp_swap_test_framework::prelude::*;

    const AMOUNT_IN: u64 = 1_000_000_000;

    fn setup_pool() -> (CpSwapFixture, PoolOutcome) {
        let mut fixture = CpSwapFixture::new().expect("Failed to create fixture");
        let admin = fixture.admin.insecure_clone();

        let pool = fixture
            .client()
            .setup_swap(
                &admin,
                &CpSwapFixture::default_params(),
                &StandardMintProvisioner::default(),
                MintExtension::no_fee(),
            )
            .expect("Failed to set up pool");
        (fixture, pool)
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_swap_base_input() {
        let (mut fixture, pool) = setup_pool();
        let admin = fixture.admin.insecure_clone();
        let pair = CpSwapFixture::pair_of(&pool.state);
        let (input, output) = (pair.token_0(), pair.token_1());
        fixture.open_pools();

        let input_before = fixture.vm.ata_balance(&admin.pubkey(), &input.mint);
        let output_before = fixture.vm.ata_balance(&admin.pubkey(), &output.mint);

        fixture
            .client()
            .swap_base_input(&admin, &pool.state.amm_config, &input, &output, AMOUNT_IN, 0)
            .unwrap();

        fixture.vm.assert_token_balance_changed(
            &admin.pubkey(),
            &input.mint,
            input_before,
            -(AMOUNT_IN as i64),
        );
        assert!(fixture.vm.ata_balance(&admin.pubkey(), &output.mint) > output_before);
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_swap_base_output() {
        let (mut fixture, pool) = setup_pool();
        let admin = fixture.admin.insecure_clone();
        let pair = CpSwapFixture::pair_of(&pool.state);
        let (input, output) = (pair.token_1(), pair.token_0());
        fixture.open_pools();

        let output_before = fixture.vm.ata_balance(&admin.pubkey(), &output.mint);

        fixture
            .client()
            .swap_base_output(
                &admin,
                &pool.state.amm_config,
                &input,
                &output,
                100 * AMOUNT_IN,
                AMOUNT_IN,
            )
            .unwrap();

        fixture.vm.assert_token_balance_changed(
            &admin.pubkey(),
            &output.mint,
            output_before,
            AMOUNT_IN as i64,
        );
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_swap_zero_amount_is_rejected() {
        let (mut fixture, pool) = setup_pool();
        let admin = fixture.admin.insecure_clone();
        let pair = CpSwapFixture::pair_of(&pool.state);
        fixture.open_pools();

        let result = fixture.client().swap_base_input(
            &admin,
            &pool.state.amm_config,
            &pair.token_0(),
            &pair.token_1(),
            0,
            0,
        );

        assert!(matches!(&result, Err(err) if err.is_program_rejection()));
        let revert = result.expect_failure(&fixture.vm);
        assert!(!revert.logs.is_empty());
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_swap_before_open_time_is_rejected() {
        let (mut fixture, pool) = setup_pool();
        let admin = fixture.admin.insecure_clone();
        let pair = CpSwapFixture::pair_of(&pool.state);

        let err = fixture
            .client()
            .swap_base_input(
                &admin,
                &pool.state.amm_config,
                &pair.token_0(),
                &pair.token_1(),
                AMOUNT_IN,
                0,
            )
            .unwrap_err();

        assert!(err.is_program_rejection(), "got {err:?}");
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_swap_minimum_out_is_enforced() {
        let (mut fixture, pool) = setup_pool();
        let admin = fixture.admin.insecure_clone();
        let pair = CpSwapFixture::pair_of(&pool.state);
        fixture.open_pools();

        let result = fixture.client().swap_base_input(
            &admin,
            &pool.state.amm_config,
            &pair.token_0(),
            &pair.token_1(),
            AMOUNT_IN,
            u64::MAX,
        );

        result.expect_revert_containing(&fixture.vm, "ExceededSlippage");
    }
}
