//! Mint pair provisioning for pool scenarios
//!
//! A pair holds one legacy mint and one extended mint, or two legacy mints when no extension
//! is requested. Which of them becomes `token_0` depends on the randomly generated mint
//! addresses.

use anchor_spl::token_2022::spl_token_2022::{
    self,
    extension::{transfer_fee, transfer_hook, ExtensionType},
    state::Mint as ExtendedMint,
};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
};
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use spl_token::{solana_program::program_pack::Pack, state::Mint as LegacyMint};

use crate::{
    config::SubmitOptions,
    constants::{TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID},
    errors::{ClientError, Result},
    ledger::Ledger,
    pda::{associated_token_address, MintPair, TokenSide},
    transactions::TransactionBuilder,
};

pub const DEFAULT_DECIMALS: u8 = 9;
pub const DEFAULT_INITIAL_SUPPLY: u64 = 100_000_000_000_000;

/// Extension carried by the extended mint of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintExtension {
    /// No extended mint: both sides are legacy mints.
    None,
    TransferFee { basis_points: u16, maximum_fee: u64 },
    TransferHook(Pubkey),
}

impl MintExtension {
    /// Zero fee, as used by pool scenarios that do not exercise fees.
    pub fn no_fee() -> Self {
        MintExtension::TransferFee {
            basis_points: 0,
            maximum_fee: 0,
        }
    }
}

/// Creates fresh mint pairs funded to `funder`.
pub trait MintProvisioner {
    fn create_mint_pair<L: Ledger>(
        &self,
        ledger: &mut L,
        funder: &Keypair,
        extension: MintExtension,
    ) -> Result<MintPair>;
}

/// Creates a legacy mint and an extended mint, each with the funder as authority, opens the
/// funder's associated accounts and mints the initial supply into them.
#[derive(Debug, Clone, Copy)]
pub struct StandardMintProvisioner {
    pub decimals: u8,
    pub initial_supply: u64,
    pub options: SubmitOptions,
}

impl Default for StandardMintProvisioner {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            initial_supply: DEFAULT_INITIAL_SUPPLY,
            options: SubmitOptions::default(),
        }
    }
}

impl StandardMintProvisioner {
    pub fn new(options: SubmitOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    fn create_legacy_mint<L: Ledger>(&self, ledger: &mut L, funder: &Keypair) -> Result<TokenSide> {
        let mint = Keypair::new();
        let authority = funder.pubkey();
        let lamports = ledger.minimum_balance(LegacyMint::LEN)?;

        let mut ixs = vec![
            system_instruction::create_account(
                &authority,
                &mint.pubkey(),
                lamports,
                LegacyMint::LEN as u64,
                &TOKEN_PROGRAM_ID,
            ),
            spl_token::instruction::initialize_mint2(
                &TOKEN_PROGRAM_ID,
                &mint.pubkey(),
                &authority,
                None,
                self.decimals,
            )?,
        ];
        ixs.extend(self.fund(&authority, &mint.pubkey(), &TOKEN_PROGRAM_ID)?);

        let signature = self.submit(ledger, ixs, funder, &mint)?;
        tracing::info!("created legacy mint {} in {}", mint.pubkey(), signature);
        Ok(TokenSide::legacy(mint.pubkey()))
    }

    fn create_extended_mint<L: Ledger>(
        &self,
        ledger: &mut L,
        funder: &Keypair,
        extension: MintExtension,
    ) -> Result<TokenSide> {
        let mint = Keypair::new();
        let authority = funder.pubkey();

        let (extension_type, extension_ix) = match extension {
            MintExtension::None => {
                return Err(ClientError::PreconditionMissing(
                    "an extended mint needs an extension".to_string(),
                ))
            }
            MintExtension::TransferFee {
                basis_points,
                maximum_fee,
            } => (
                ExtensionType::TransferFeeConfig,
                transfer_fee::instruction::initialize_transfer_fee_config(
                    &TOKEN_2022_PROGRAM_ID,
                    &mint.pubkey(),
                    Some(&authority),
                    Some(&authority),
                    basis_points,
                    maximum_fee,
                )?,
            ),
            MintExtension::TransferHook(hook_program) => (
                ExtensionType::TransferHook,
                transfer_hook::instruction::initialize(
                    &TOKEN_2022_PROGRAM_ID,
                    &mint.pubkey(),
                    Some(authority),
                    Some(hook_program),
                )?,
            ),
        };
        let space = ExtensionType::try_calculate_account_len::<ExtendedMint>(&[extension_type])?;
        let lamports = ledger.minimum_balance(space)?;

        let mut ixs = vec![
            system_instruction::create_account(
                &authority,
                &mint.pubkey(),
                lamports,
                space as u64,
                &TOKEN_2022_PROGRAM_ID,
            ),
            extension_ix,
            spl_token_2022::instruction::initialize_mint2(
                &TOKEN_2022_PROGRAM_ID,
                &mint.pubkey(),
                &authority,
                None,
                self.decimals,
            )?,
        ];
        ixs.extend(self.fund(&authority, &mint.pubkey(), &TOKEN_2022_PROGRAM_ID)?);

        let signature = self.submit(ledger, ixs, funder, &mint)?;
        tracing::info!(
            "created extended mint {} ({:?}) in {}",
            mint.pubkey(),
            extension,
            signature
        );
        Ok(TokenSide::extended(mint.pubkey()))
    }

    /// Open the funder's associated account and mint the initial supply into it.
    fn fund(&self, owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Result<Vec<Instruction>> {
        let ata = associated_token_address(owner, mint, token_program)?;
        let mint_to = if *token_program == TOKEN_PROGRAM_ID {
            spl_token::instruction::mint_to(token_program, mint, &ata, owner, &[], self.initial_supply)?
        } else {
            spl_token_2022::instruction::mint_to(
                token_program,
                mint,
                &ata,
                owner,
                &[],
                self.initial_supply,
            )?
        };

        Ok(vec![
            create_associated_token_account_idempotent(owner, owner, mint, token_program),
            mint_to,
        ])
    }

    fn submit<L: Ledger>(
        &self,
        ledger: &mut L,
        ixs: Vec<Instruction>,
        funder: &Keypair,
        mint: &Keypair,
    ) -> Result<Signature> {
        TransactionBuilder::new(ledger, self.options)
            .instructions(ixs)
            .signer(funder)
            .signer(mint)
            .execute()
    }
}

impl MintProvisioner for StandardMintProvisioner {
    fn create_mint_pair<L: Ledger>(
        &self,
        ledger: &mut L,
        funder: &Keypair,
        extension: MintExtension,
    ) -> Result<MintPair> {
        let legacy = self.create_legacy_mint(ledger, funder)?;
        let other = match extension {
            MintExtension::None => self.create_legacy_mint(ledger, funder)?,
            extension => self.create_extended_mint(ledger, funder, extension)?,
        };
        Ok(MintPair::new(legacy, other))
    }
}
