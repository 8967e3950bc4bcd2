//! Fee tier and token badge provisioning.

#[cfg(test)]
mod tests {
    use crate::cp_swap::fixture::CpSwapFixture;
    use cp_swap_client::mints::{MintExtension, StandardMintProvisioner};
    use cp_swap_test_framework::prelude::*;

    fn setup_fixture() -> CpSwapFixture {
        CpSwapFixture::new().expect("Failed to create fixture")
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_create_amm_config_is_idempotent() {
        let mut fixture = setup_fixture();
        let admin = fixture.admin.insecure_clone();
        let params = CpSwapFixture::default_params();

        let mut client = fixture.client();
        let first = client.create_amm_config(&admin, &params).unwrap();
        let second = client.create_amm_config(&admin, &params).unwrap();

        assert!(first.created());
        assert!(!second.created(), "existing config is reused");
        assert_eq!(first.address, second.address);

        let config = client.amm_config(&first.address).unwrap();
        assert_eq!(config.index, params.index);
        assert_eq!(config.trade_fee_rate, params.trade_fee_rate);
        assert_eq!(config.protocol_fee_rate, params.protocol_fee_rate);
        assert_eq!(config.fund_fee_rate, params.fund_fee_rate);
        assert_eq!(config.create_pool_fee, params.create_pool_fee);
        assert!(!config.disable_create_pool);
    }

    #[test]
    #[ignore = "needs anchor build artifacts and the admin wallet"]
    fn test_badges_cover_extended_mints_only() {
        let mut fixture = setup_fixture();
        let admin = fixture.admin.insecure_clone();
        let params = CpSwapFixture::default_params();

        let mut client = fixture.client();
        let (config, pair) = client
            .setup_initialize(&admin, &params, &StandardMintProvisioner::default(), MintExtension::no_fee())
            .unwrap();

        let badges = client.create_pool_badges(&admin, &admin, &config, &pair).unwrap();
        assert_eq!(badges.len(), 1, "one extended mint per fresh pair");
        assert!(badges[0].created());

        let again = client.create_pool_badges(&admin, &admin, &config, &pair).unwrap();
        assert!(!again[0].created());
        assert_eq!(again[0].address, badges[0].address);

        let program_id = client.config().program_id;
        client.ledger().assert_account_owner(&badges[0].address, &program_id);
    }
}
