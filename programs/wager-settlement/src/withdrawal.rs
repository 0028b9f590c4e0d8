use anchor_lang::prelude::*;

use crate::codec::WithdrawalApproval;
use crate::error::ErrorCode;
use crate::ledger::checked_debit;
use crate::signature::{SignatureVerifier, SIGNATURE_LEN};
use crate::state::{AuthorityConfig, UserVault};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawArgs {
    pub amount: u64,
    /// Must exceed every nonce previously consumed for this player.
    pub attestation_nonce: u64,
    pub signature: [u8; SIGNATURE_LEN],
}

/// Debits a player's vault against a single-use oracle approval.
///
/// The nonce check and the nonce update live in the same vault record as the
/// balance, so the approval is consumed in the same write as the debit.
pub fn request_withdraw<V: SignatureVerifier>(
    user_vault: &mut UserVault,
    authority: &AuthorityConfig,
    program_id: &Pubkey,
    player: &Pubkey,
    args: &WithdrawArgs,
    verifier: &V,
) -> Result<u64> {
    require!(args.amount > 0, ErrorCode::InvalidAmount);
    user_vault.require_owner(player)?;

    let approval = WithdrawalApproval {
        program_id: *program_id,
        player: *player,
        amount: args.amount,
        attestation_nonce: args.attestation_nonce,
    };
    require!(
        approval.verify(&args.signature, &authority.current_oracle(), verifier),
        ErrorCode::BadSignature
    );
    require!(
        args.attestation_nonce > user_vault.last_withdraw_nonce,
        ErrorCode::NonceReused
    );

    let balance = checked_debit(user_vault.balance, args.amount)?;
    user_vault.balance = balance;
    user_vault.last_withdraw_nonce = args.attestation_nonce;
    Ok(balance)
}
