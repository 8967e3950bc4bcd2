//! Pool test fixture
//!
//! Loads the swap program and the test transfer hook program into one VM, funds the admin
//! wallet the swap program was built for, and seeds the pool creation fee receiver.

use cp_swap_client::{
    constants::TOKEN_2022_PROGRAM_ID,
    instructions::AmmConfigParams,
    pda::{derive, extra_account_meta_list, MintPair, TokenSide},
    state::{instruction_discriminator, PoolState},
    ClientConfig, PoolClient, ProgramAddresses,
};
use cp_swap_test_framework::{prelude::*, Result as VmResult};
use solana_sdk::{
    account::Account,
    instruction::{AccountMeta, Instruction},
    signature::read_keypair_file,
};
use spl_token::{
    solana_program::{program_option::COption, program_pack::Pack},
    state::{Account as TokenAccount, AccountState},
};

pub const CP_SWAP_ARTIFACT: &str = "raydium_cp_swap_token_22";
pub const HOOK_ARTIFACT: &str = "test_transfer_hook_program";

/// Path of the keypair the swap program accepts as admin, like Anchor's provider wallet.
pub const ADMIN_KEYPAIR_ENV: &str = "ANCHOR_WALLET";

/// Seconds the clock is moved past pool creation so the pool accepts swaps.
pub const OPEN_DELAY: i64 = 60;

pub mod seeds {
    pub const COUNTER: &[u8] = b"counter";
}

pub struct CpSwapFixture {
    pub vm: Vm,
    pub admin: Keypair,
    pub alice: Keypair,
    pub hook_program: Pubkey,
    pub config: ClientConfig,
}

impl CpSwapFixture {
    pub fn new() -> VmResult<Self> {
        let program_id = declared_address(CP_SWAP_ARTIFACT)?;
        let hook_program = declared_address(HOOK_ARTIFACT)?;

        let mut vm = VmBuilder::new()
            .with_program(ProgramArtifact::locate(program_id, CP_SWAP_ARTIFACT)?)
            .with_program(ProgramArtifact::locate(hook_program, HOOK_ARTIFACT)?)
            .build()?;

        let admin = admin_keypair()?;
        vm.airdrop(&admin.pubkey(), 10_000 * LAMPORTS_PER_SOL)?;
        let alice = vm.make_account(10_000 * LAMPORTS_PER_SOL);

        let config = ClientConfig::new(program_id);
        seed_fee_receiver(&mut vm, &config.create_pool_fee_receiver)?;

        Ok(Self {
            vm,
            admin,
            alice,
            hook_program,
            config,
        })
    }

    pub fn client(&mut self) -> PoolClient<'_, Vm> {
        PoolClient::new(&mut self.vm, self.config.clone())
    }

    pub fn addresses(&self) -> ProgramAddresses {
        ProgramAddresses::new(self.config.program_id)
    }

    /// Fee tier used across the scenarios: 0.1% trade fee, 0.1 SOL creation fee.
    pub fn default_params() -> AmmConfigParams {
        AmmConfigParams {
            index: 0,
            trade_fee_rate: 10,
            protocol_fee_rate: 1000,
            fund_fee_rate: 25000,
            create_pool_fee: 100_000_000,
        }
    }

    /// Side `0` and side `1` of an existing pool.
    pub fn pair_of(state: &PoolState) -> MintPair {
        MintPair::new(
            TokenSide::new(state.token_0_mint, state.token_0_program),
            TokenSide::new(state.token_1_mint, state.token_1_program),
        )
    }

    pub fn counter(&self) -> VmResult<Pubkey> {
        Ok(derive("counter", &[seeds::COUNTER], &self.hook_program)?.address)
    }

    pub fn initialize_extra_account_meta_list_ix(
        &self,
        payer: &Pubkey,
        mint: &Pubkey,
    ) -> VmResult<Instruction> {
        let meta_list = extra_account_meta_list(mint, &self.hook_program)?.address;

        Ok(Instruction {
            program_id: self.hook_program,
            accounts: vec![
                AccountMeta::new(*payer, true),
                AccountMeta::new(meta_list, false),
                AccountMeta::new_readonly(*mint, false),
                AccountMeta::new(self.counter()?, false),
                AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
                AccountMeta::new_readonly(spl_associated_token_account::ID, false),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            data: instruction_discriminator("initialize_extra_account_meta_list").to_vec(),
        })
    }

    /// Enroll `mint` in the test hook program, paid by the admin.
    pub fn initialize_hook(&mut self, mint: &Pubkey) -> VmResult<Executed> {
        let ix = self.initialize_extra_account_meta_list_ix(&self.admin.pubkey(), mint)?;
        let admin = self.admin.insecure_clone();
        self.vm.execute_instruction(ix, &admin)
    }

    /// Move past the pool open time.
    pub fn open_pools(&mut self) {
        self.vm.warp_time(OPEN_DELAY);
    }
}

/// Program id published in `target/idl/<name>.json`.
fn declared_address(name: &str) -> VmResult<Pubkey> {
    let file = format!("{name}.json");
    let path = find_idl_path(&file).ok_or(VmError::ProgramNotFound(file))?;
    let idl = cp_swap_client::idl::ProgramIdl::from_file(&path)?;

    idl.address
        .as_deref()
        .ok_or_else(|| VmError::DeserializeFailed(format!("{path} declares no address")))?
        .parse::<Pubkey>()
        .map_err(|e| VmError::DeserializeFailed(format!("{path}: {e}")))
}

pub fn find_idl_path(file: &str) -> Option<String> {
    ["../", "", "../../", "./"]
        .iter()
        .map(|prefix| format!("{}target/idl/{}", prefix, file))
        .find(|path| std::path::Path::new(path).exists())
}

fn admin_keypair() -> VmResult<Keypair> {
    let path = dotenv::var(ADMIN_KEYPAIR_ENV).unwrap_or_else(|_| {
        let home = dotenv::var("HOME").unwrap_or_default();
        format!("{home}/.config/solana/id.json")
    });
    read_keypair_file(&path).map_err(|e| VmError::Custom(format!("admin keypair {path}: {e}")))
}

/// The creation fee is paid into a wrapped SOL account at a fixed address.
fn seed_fee_receiver(vm: &mut Vm, receiver: &Pubkey) -> VmResult<()> {
    let rent = vm.rent().minimum_balance(TokenAccount::LEN);
    let state = TokenAccount {
        mint: spl_token::native_mint::ID,
        owner: Pubkey::new_unique(),
        amount: 0,
        delegate: COption::None,
        state: AccountState::Initialized,
        is_native: COption::Some(rent),
        delegated_amount: 0,
        close_authority: COption::None,
    };

    let mut data = vec![0u8; TokenAccount::LEN];
    TokenAccount::pack(state, &mut data)
        .map_err(|e| VmError::SetAccountFailed(format!("fee receiver: {e}")))?;

    vm.set_account(
        receiver,
        Account {
            lamports: rent,
            data,
            owner: spl_token::ID,
            executable: false,
            rent_epoch: 0,
        },
    )
}
