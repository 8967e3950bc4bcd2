//! Deposits and withdrawals against a seeded pool.

#[cfg(test)]
mod tests {
    use crate::cp_swap::fixture::CpSwapFixture;
    use cp_swap_client::{
        constants::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID},
        instructions::LiquidityAmounts,
        mints::{MintExtension, StandardMintProvisioner},
        scenarios::ProgramPairing,
        state::PoolState,
        Ledger,
    };
    use cp_swap_test_framework::prelude::*;

    const LP_AMOUNT: u64 = 1_000_000_000;

    /// Base units either side may drift by after a deposit and withdrawal of the same LP amount.
    /// The program rounds deposits up and withdrawals down, one unit per leg.
    const ROUNDING_TOLERANCE: u128 = 2;

    fn vault_balances(vm: &Vm, state: &PoolState) -> (u64, u64) {
        (
            vm.token_balance(&state.token_0_vault).unwrap(),
            vm.token_balance(&state.token_1_vault).unwrap(),
        )
    }

    fn wallet_balances(vm: &Vm, owner: &Pubkey, state: &PoolState) -> (u64, u64) {
        (
            vm.ata_balance(owner, &state.token_0_mint),
            vm.ata_balance(owner, &state.token_1_mint),
        )
    }

    fn setup_fixture() -> CpSwapFixture {
        CpSwapFixture::new().expect("Failed to create fixture")
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_deposit_then_withdraw() {
        let mut fixture = setup_fixture();
        let admin = fixture.admin.insecure_clone();

        let mut client = fixture.client();
        let created = client
            .setup_deposit(
                &admin,
                &CpSwapFixture::default_params(),
                &StandardMintProvisioner::default(),
                MintExtension::no_fee(),
                None,
            )
            .unwrap();
        let pair = CpSwapFixture::pair_of(&created.state);
        let config = created.state.amm_config;
        let vaults_before = vault_balances(client.ledger(), &created.state);
        let wallet_before = wallet_balances(client.ledger(), &admin.pubkey(), &created.state);

        let deposited = client
            .deposit(
                &admin,
                &config,
                &pair,
                LiquidityAmounts {
                    lp_token_amount: LP_AMOUNT,
                    token_0_amount: 100_000_000_000,
                    token_1_amount: 100_000_000_000,
                },
            )
            .unwrap();
        assert_eq!(deposited.address, created.address);
        assert_eq!(deposited.state.lp_supply, created.state.lp_supply + LP_AMOUNT);
        let vaults_deposited = vault_balances(client.ledger(), &created.state);
        assert!(vaults_deposited.0 > vaults_before.0);
        assert!(vaults_deposited.1 > vaults_before.1);

        let withdrawn = client
            .withdraw(
                &admin,
                &config,
                &pair,
                LiquidityAmounts {
                    lp_token_amount: LP_AMOUNT,
                    token_0_amount: 0,
                    token_1_amount: 0,
                },
            )
            .unwrap();
        assert_eq!(withdrawn.state.lp_supply, created.state.lp_supply);

        let ledger = client.ledger();
        let vaults_after = vault_balances(ledger, &created.state);
        ledger.assert_approx_eq(vaults_after.0 as u128, vaults_before.0 as u128, ROUNDING_TOLERANCE);
        ledger.assert_approx_eq(vaults_after.1 as u128, vaults_before.1 as u128, ROUNDING_TOLERANCE);
        assert!(vaults_after.0 >= vaults_before.0, "withdrawal never drains past the deposit");
        assert!(vaults_after.1 >= vaults_before.1, "withdrawal never drains past the deposit");

        let wallet_after = wallet_balances(ledger, &admin.pubkey(), &created.state);
        ledger.assert_approx_eq(wallet_after.0 as u128, wallet_before.0 as u128, ROUNDING_TOLERANCE);
        ledger.assert_approx_eq(wallet_after.1 as u128, wallet_before.1 as u128, ROUNDING_TOLERANCE);
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_deposit_respects_maximum_amounts() {
        let mut fixture = setup_fixture();
        let admin = fixture.admin.insecure_clone();

        let mut client = fixture.client();
        let created = client
            .setup_deposit(
                &admin,
                &CpSwapFixture::default_params(),
                &StandardMintProvisioner::default(),
                MintExtension::no_fee(),
                None,
            )
            .unwrap();
        let pair = CpSwapFixture::pair_of(&created.state);

        let err = client
            .deposit(
                &admin,
                &created.state.amm_config,
                &pair,
                LiquidityAmounts {
                    lp_token_amount: LP_AMOUNT,
                    token_0_amount: 1,
                    token_1_amount: 1,
                },
            )
            .unwrap_err();
        assert!(err.is_program_rejection(), "got {err:?}");
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_setup_deposit_with_pairing() {
        let mut fixture = setup_fixture();
        let admin = fixture.admin.insecure_clone();
        let wanted = ProgramPairing::new(TOKEN_PROGRAM_ID, TOKEN_2022_PROGRAM_ID);

        let created = fixture
            .client()
            .setup_deposit(
                &admin,
                &CpSwapFixture::default_params(),
                &StandardMintProvisioner::default(),
                MintExtension::no_fee(),
                Some(wanted),
            )
            .unwrap();

        assert_eq!(created.state.token_0_program, TOKEN_PROGRAM_ID);
        assert_eq!(created.state.token_1_program, TOKEN_2022_PROGRAM_ID);
    }
}
