use anchor_lang::prelude::*;
use solana_program::sysvar::instructions::ID as SYSVAR_INSTRUCTIONS_ID;

use super::move_lamports;
use crate::constants::{AUTHORITY_SEED, USER_VAULT_SEED};
use crate::events::Withdrawn;
use crate::signature::load_precompiled_signatures;
use crate::state::{AuthorityConfig, UserVault};
use crate::withdrawal::{self, WithdrawArgs};

/// Accounts required to withdraw from a player vault against an oracle
/// approval.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// The vault owner, who also receives the lamports.
    #[account(mut)]
    pub player: Signer<'info>,

    /// The player's vault.
    #[account(
        mut,
        seeds = [USER_VAULT_SEED, player.key().as_ref()],
        bump = user_vault.bump
    )]
    pub user_vault: Account<'info, UserVault>,

    /// Singleton authority config naming the oracle key.
    #[account(
        seeds = [AUTHORITY_SEED],
        bump = authority.bump
    )]
    pub authority: Account<'info, AuthorityConfig>,

    /// CHECK: address is pinned to the instructions sysvar.
    #[account(address = SYSVAR_INSTRUCTIONS_ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,
}

/// Pays `args.amount` out of the player's vault once the oracle has approved
/// exactly that amount under a fresh nonce.
///
/// # Arguments
/// * `ctx` - Context holding the Withdraw accounts
/// * `args` - Amount, approval nonce and oracle signature
pub fn process_withdraw(ctx: Context<Withdraw>, args: WithdrawArgs) -> Result<()> {
    let verifier = load_precompiled_signatures(&ctx.accounts.instructions_sysvar.to_account_info())?;
    let player = ctx.accounts.player.key();
    let accounts = &mut *ctx.accounts;

    let balance = withdrawal::request_withdraw(
        &mut accounts.user_vault,
        &accounts.authority,
        &crate::ID,
        &player,
        &args,
        &verifier,
    )?;
    move_lamports(
        &accounts.user_vault.to_account_info(),
        &accounts.player.to_account_info(),
        args.amount,
    )?;

    msg!("Withdrawal of {} lamports by {}, balance {}", args.amount, player, balance);
    emit!(Withdrawn {
        player,
        amount: args.amount,
        attestation_nonce: args.attestation_nonce,
    });
    Ok(())
}
