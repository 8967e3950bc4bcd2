//! Pool operations composed from provisioning, instruction building and submission.
//!
//! A pool moves through `config ready -> badges ready (extended path) -> pool ready`. Every
//! step awaits confirmation before the next one is submitted. Once a pool exists, deposits,
//! withdrawals and swaps repeat without changing that state, and creating it again is left to
//! the program to reject.

mod setup;

pub use setup::ProgramPairing;

use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};

use crate::{
    config::{ClientConfig, InitAmounts},
    errors::{ClientError, Result},
    hooks::{resolve_transfer_hook, transfer_hook_program, HookTransfer, ResolvedHook},
    instructions::{AmmConfigParams, InstructionBuilder, LiquidityAmounts},
    ledger::Ledger,
    pda::{associated_token_address, MintPair, TokenSide},
    provision::{ensure, Provisioned},
    state::{AmmConfig, PoolState},
    transactions::TransactionBuilder,
};

/// Pool address, its state re-read after confirmation and the confirming transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolOutcome {
    pub address: Pubkey,
    pub state: PoolState,
    pub signature: Signature,
}

/// Entry point for pool scenarios against one ledger connection.
pub struct PoolClient<'l, L: Ledger> {
    ledger: &'l mut L,
    config: ClientConfig,
    builder: InstructionBuilder,
}

impl<'l, L: Ledger> PoolClient<'l, L> {
    pub fn new(ledger: &'l mut L, config: ClientConfig) -> Self {
        let builder = InstructionBuilder::from_config(&config);
        Self {
            ledger,
            config,
            builder,
        }
    }

    pub fn ledger(&self) -> &L {
        &*self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut *self.ledger
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn builder(&self) -> &InstructionBuilder {
        &self.builder
    }

    fn transaction(&mut self) -> TransactionBuilder<'_, L> {
        TransactionBuilder::new(&mut *self.ledger, self.config.submit)
    }

    /// Create the fee tier at `params.index` unless it already exists.
    pub fn create_amm_config(&mut self, owner: &Keypair, params: &AmmConfigParams) -> Result<Provisioned> {
        let address = self.builder.addresses().amm_config(params.index)?.address;
        let ix = self.builder.create_amm_config_ix(&owner.pubkey(), params)?;
        self.ensure_account(address, ix, &[owner])
    }

    pub fn amm_config(&self, address: &Pubkey) -> Result<AmmConfig> {
        self.ledger.fetch(address)
    }

    /// Register `mint` under `amm_config` unless a badge already exists.
    pub fn create_token_badge(
        &mut self,
        badge_authority: &Keypair,
        funder: &Keypair,
        amm_config: &Pubkey,
        mint: &Pubkey,
    ) -> Result<Provisioned> {
        let address = self.builder.addresses().token_badge(amm_config, mint)?.address;
        let ix = self.builder.initialize_token_badge_ix(
            amm_config,
            &badge_authority.pubkey(),
            mint,
            &funder.pubkey(),
        )?;
        self.ensure_account(address, ix, &[funder, badge_authority])
    }

    /// Badges for every extended-standard mint of `pair`.
    pub fn create_pool_badges(
        &mut self,
        badge_authority: &Keypair,
        funder: &Keypair,
        amm_config: &Pubkey,
        pair: &MintPair,
    ) -> Result<Vec<Provisioned>> {
        pair.extended_sides()
            .map(|side| self.create_token_badge(badge_authority, funder, amm_config, &side.mint))
            .collect()
    }

    /// Submit `ix` only when nothing lives at `address`. The first signer pays.
    pub fn ensure_account(
        &mut self,
        address: Pubkey,
        ix: Instruction,
        signers: &[&Keypair],
    ) -> Result<Provisioned> {
        let options = self.config.submit;
        ensure(&mut *self.ledger, address, |ledger| {
            TransactionBuilder::new(ledger, options)
                .instruction(ix)
                .signers(signers)
                .execute()
        })
    }

    /// Create a pool without badge or hook accounts.
    ///
    /// Mints with a transfer hook need the hook's accounts and are refused here.
    pub fn initialize_pool(
        &mut self,
        creator: &Keypair,
        amm_config: &Pubkey,
        pair: &MintPair,
        amounts: InitAmounts,
    ) -> Result<PoolOutcome> {
        for side in pair.extended_sides() {
            if let Some(hook) = transfer_hook_program(&*self.ledger, &side)? {
                return Err(ClientError::PreconditionMissing(format!(
                    "mint {} has transfer hook {}, create the pool with initialize_pool_v2",
                    side.mint, hook
                )));
            }
        }

        let pool = self.pool_address(amm_config, pair)?;
        let ix = self
            .builder
            .initialize_ix(&creator.pubkey(), amm_config, pair, amounts, amounts.open_time)?;
        self.execute_pool_ix(ix, creator, pool)
    }

    /// Create a pool on the extended path. Every extended-standard mint needs a badge under
    /// `amm_config`, and every hooked mint an initialized extra account meta list.
    pub fn initialize_pool_v2(
        &mut self,
        creator: &Keypair,
        amm_config: &Pubkey,
        pair: &MintPair,
        amounts: InitAmounts,
    ) -> Result<PoolOutcome> {
        for side in pair.extended_sides() {
            let badge = self.builder.addresses().token_badge(amm_config, &side.mint)?.address;
            if !self.ledger.exists(&badge)? {
                return Err(ClientError::PreconditionMissing(format!(
                    "token badge {} for mint {} under config {}",
                    badge, side.mint, amm_config
                )));
            }
        }

        let hooks = self.resolve_hooks(&creator.pubkey(), amm_config, pair, amounts)?;
        let pool = self.pool_address(amm_config, pair)?;
        let ix = self
            .builder
            .initialize_v2_ix(
                &creator.pubkey(),
                amm_config,
                pair,
                amounts,
                amounts.open_time,
                &hooks,
            )?;
        self.execute_pool_ix(ix, creator, pool)
    }

    /// Hook accounts for each hooked mint, resolved against the creator's initial deposit.
    fn resolve_hooks(
        &self,
        creator: &Pubkey,
        amm_config: &Pubkey,
        pair: &MintPair,
        amounts: InitAmounts,
    ) -> Result<Vec<ResolvedHook>> {
        let keys = self.builder.addresses().pool_keys(amm_config, pair)?;
        let deposits = [
            (pair.token_0(), keys.token_0_vault, amounts.init_amount_0),
            (pair.token_1(), keys.token_1_vault, amounts.init_amount_1),
        ];

        let mut hooks = vec![];
        for (side, vault, amount) in deposits {
            let Some(program) = transfer_hook_program(&*self.ledger, &side)? else {
                continue;
            };
            let transfer = HookTransfer {
                source: associated_token_address(creator, &side.mint, &side.program)?,
                destination: vault,
                authority: *creator,
                amount,
            };
            hooks.push(resolve_transfer_hook(&*self.ledger, &side.mint, &program, &transfer)?);
        }
        Ok(hooks)
    }

    pub fn deposit(
        &mut self,
        owner: &Keypair,
        amm_config: &Pubkey,
        pair: &MintPair,
        amounts: LiquidityAmounts,
    ) -> Result<PoolOutcome> {
        let pool = self.pool_address(amm_config, pair)?;
        let ix = self.builder.deposit_ix(&owner.pubkey(), amm_config, pair, amounts)?;
        self.execute_pool_ix(ix, owner, pool)
    }

    pub fn withdraw(
        &mut self,
        owner: &Keypair,
        amm_config: &Pubkey,
        pair: &MintPair,
        amounts: LiquidityAmounts,
    ) -> Result<PoolOutcome> {
        let pool = self.pool_address(amm_config, pair)?;
        let ix = self.builder.withdraw_ix(&owner.pubkey(), amm_config, pair, amounts)?;
        self.execute_pool_ix(ix, owner, pool)
    }

    pub fn swap_base_input(
        &mut self,
        payer: &Keypair,
        amm_config: &Pubkey,
        input: &TokenSide,
        output: &TokenSide,
        amount_in: u64,
        minimum_amount_out: u64,
    ) -> Result<PoolOutcome> {
        let pool = self.builder.addresses().pool(amm_config, &input.mint, &output.mint)?.address;
        let ix = self.builder.swap_base_input_ix(
            &payer.pubkey(),
            amm_config,
            input,
            output,
            amount_in,
            minimum_amount_out,
        )?;
        self.execute_pool_ix(ix, payer, pool)
    }

    pub fn swap_base_output(
        &mut self,
        payer: &Keypair,
        amm_config: &Pubkey,
        input: &TokenSide,
        output: &TokenSide,
        max_amount_in: u64,
        amount_out: u64,
    ) -> Result<PoolOutcome> {
        let pool = self.builder.addresses().pool(amm_config, &input.mint, &output.mint)?.address;
        let ix = self.builder.swap_base_output_ix(
            &payer.pubkey(),
            amm_config,
            input,
            output,
            max_amount_in,
            amount_out,
        )?;
        self.execute_pool_ix(ix, payer, pool)
    }

    pub fn pool_state(&self, pool: &Pubkey) -> Result<PoolState> {
        self.ledger.fetch(pool)
    }

    fn pool_address(&self, amm_config: &Pubkey, pair: &MintPair) -> Result<Pubkey> {
        Ok(self
            .builder
            .addresses()
            .pool(amm_config, &pair.token_0().mint, &pair.token_1().mint)?
            .address)
    }

    fn execute_pool_ix(&mut self, ix: Instruction, signer: &Keypair, pool: Pubkey) -> Result<PoolOutcome> {
        let (signature, state) = self
            .transaction()
            .instruction(ix)
            .signer(signer)
            .execute_and_fetch::<PoolState>(&pool)?;
        Ok(PoolOutcome {
            address: pool,
            state,
            signature,
        })
    }
}
