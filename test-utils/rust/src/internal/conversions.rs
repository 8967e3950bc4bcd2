//! Type conversions between solana-sdk and litesvm

use solana_account::Account as LiteAccount;
use solana_instruction::{AccountMeta as LiteInstructionMeta, Instruction as LiteInstruction};
use solana_pubkey::Pubkey as LitePubkey;
use solana_sdk::{
    account::Account, instruction::Instruction as SdkInstruction, pubkey::Pubkey,
    signature::Signature,
};
use solana_signature::Signature as LiteSignature;

use crate::errors::{Result, VmError};

pub fn to_lite_pubkey(pubkey: &Pubkey) -> LitePubkey {
    LitePubkey::from(pubkey.to_bytes())
}

pub fn from_lite_pubkey(pubkey: &LitePubkey) -> Pubkey {
    Pubkey::from(pubkey.to_bytes())
}

pub fn to_lite_account(account: Account) -> LiteAccount {
    LiteAccount {
        lamports: account.lamports,
        data: account.data,
        owner: to_lite_pubkey(&account.owner),
        executable: account.executable,
        rent_epoch: account.rent_epoch,
    }
}

pub fn from_lite_account(account: LiteAccount) -> Account {
    Account {
        lamports: account.lamports,
        data: account.data,
        owner: from_lite_pubkey(&account.owner),
        executable: account.executable,
        rent_epoch: account.rent_epoch,
    }
}

pub fn from_lite_signature(signature: &LiteSignature) -> Result<Signature> {
    Signature::try_from(signature.as_ref())
        .map_err(|e| VmError::DeserializeFailed(format!("signature: {e}")))
}

pub fn to_lite_instruction(ix: SdkInstruction) -> LiteInstruction {
    LiteInstruction {
        program_id: to_lite_pubkey(&ix.program_id),
        accounts: ix
            .accounts
            .into_iter()
            .map(|acc| LiteInstructionMeta {
                pubkey: to_lite_pubkey(&acc.pubkey),
                is_signer: acc.is_signer,
                is_writable: acc.is_writable,
            })
            .collect(),
        data: ix.data,
    }
}
