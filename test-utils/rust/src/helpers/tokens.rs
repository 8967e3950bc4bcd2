use crate::core::{accounts::AccountManager, vm::Vm};
use crate::errors::{Result, VmError};
use anchor_spl::token_2022::spl_token_2022::{
    extension::StateWithExtensions,
    state::{Account as TokenAccount, Mint},
};
use solana_sdk::{
    account::Account,
    program_option::COption,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use spl_associated_token_account::get_associated_token_address_with_program_id;
use spl_token::solana_program::program_pack::Pack;

/// Token management trait, aware of both token programs.
///
/// Mints and accounts written here carry no extensions, which both programs accept. Mints that
/// need extensions go through the client's mint provisioner instead.
pub trait TokenHelper {
    /// Write an initialized mint owned by `token_program`
    fn create_mint(
        &mut self,
        authority: &Pubkey,
        decimals: u8,
        token_program: &Pubkey,
    ) -> Result<Pubkey>;

    /// Set the balance of the owner's associated account, creating it if needed
    fn mint_tokens(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u64) -> Result<()>;

    /// Balance of the owner's associated account, 0 when missing
    fn ata_balance(&self, owner: &Pubkey, mint: &Pubkey) -> u64;

    /// Associated account address under the program that owns `mint`
    fn ata(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey>;

    /// Check if ATA exists
    fn ata_exists(&self, owner: &Pubkey, mint: &Pubkey) -> bool;

    /// Get mint info
    fn mint_info(&self, mint: &Pubkey) -> Result<MintInfo>;
}

/// Mint information
#[derive(Debug, Clone)]
pub struct MintInfo {
    pub supply: u64,
    pub decimals: u8,
    pub mint_authority: Option<Pubkey>,
    pub token_program: Pubkey,
    /// Bytes beyond the base mint layout, non-zero when extensions are present
    pub extension_bytes: usize,
}

impl Vm {
    fn token_program_of(&self, mint: &Pubkey) -> Result<Pubkey> {
        self.account(mint)
            .map(|account| account.owner)
            .ok_or_else(|| VmError::AccountNotFound(mint.to_string()))
    }
}

impl TokenHelper for Vm {
    fn create_mint(
        &mut self,
        authority: &Pubkey,
        decimals: u8,
        token_program: &Pubkey,
    ) -> Result<Pubkey> {
        let mint_pubkey = Keypair::new().pubkey();

        let mut data = vec![0u8; Mint::LEN];
        let mint = Mint {
            mint_authority: COption::Some(*authority),
            supply: 0,
            decimals,
            is_initialized: true,
            freeze_authority: COption::None,
        };
        Mint::pack(mint, &mut data).map_err(|e| VmError::TokenError(e.to_string()))?;

        let account = Account {
            lamports: self.rent().minimum_balance(data.len()),
            data,
            owner: *token_program,
            executable: false,
            rent_epoch: 0,
        };

        self.set_account(&mint_pubkey, account)?;
        Ok(mint_pubkey)
    }

    fn mint_tokens(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u64) -> Result<()> {
        let token_program = self.token_program_of(mint)?;
        let ata = get_associated_token_address_with_program_id(owner, mint, &token_program);
        let previous = self.ata_balance(owner, mint);

        let mut data = vec![0u8; TokenAccount::LEN];
        let token_account = TokenAccount {
            mint: *mint,
            owner: *owner,
            amount,
            delegate: COption::None,
            state: anchor_spl::token_2022::spl_token_2022::state::AccountState::Initialized,
            is_native: COption::None,
            delegated_amount: 0,
            close_authority: COption::None,
        };
        TokenAccount::pack(token_account, &mut data)
            .map_err(|e| VmError::TokenError(e.to_string()))?;

        let account = Account {
            lamports: self.rent().minimum_balance(data.len()),
            data,
            owner: token_program,
            executable: false,
            rent_epoch: 0,
        };
        self.set_account(&ata, account)?;

        // keep the mint supply consistent with the balance change
        let mut mint_account = self
            .account(mint)
            .ok_or_else(|| VmError::AccountNotFound(mint.to_string()))?;
        let mut base = Mint::unpack_unchecked(&mint_account.data[..Mint::LEN])
            .map_err(|e| VmError::TokenError(e.to_string()))?;
        base.supply = base.supply.saturating_sub(previous).saturating_add(amount);
        Mint::pack(base, &mut mint_account.data[..Mint::LEN])
            .map_err(|e| VmError::TokenError(e.to_string()))?;
        self.set_account(mint, mint_account)
    }

    fn ata_balance(&self, owner: &Pubkey, mint: &Pubkey) -> u64 {
        self.ata(owner, mint)
            .ok()
            .and_then(|ata| self.account(&ata))
            .and_then(|account| {
                StateWithExtensions::<TokenAccount>::unpack(&account.data)
                    .ok()
                    .map(|state| state.base.amount)
            })
            .unwrap_or(0)
    }

    fn ata(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
        let token_program = self.token_program_of(mint)?;
        Ok(get_associated_token_address_with_program_id(
            owner,
            mint,
            &token_program,
        ))
    }

    fn ata_exists(&self, owner: &Pubkey, mint: &Pubkey) -> bool {
        self.ata(owner, mint)
            .map(|ata| self.account_exists(&ata))
            .unwrap_or(false)
    }

    fn mint_info(&self, mint: &Pubkey) -> Result<MintInfo> {
        let account = self
            .account(mint)
            .ok_or_else(|| VmError::AccountNotFound(mint.to_string()))?;

        let state = StateWithExtensions::<Mint>::unpack(&account.data)
            .map_err(|e| VmError::TokenError(e.to_string()))?;

        Ok(MintInfo {
            supply: state.base.supply,
            decimals: state.base.decimals,
            mint_authority: state.base.mint_authority.into(),
            token_program: account.owner,
            extension_bytes: account.data.len().saturating_sub(Mint::LEN),
        })
    }
}
