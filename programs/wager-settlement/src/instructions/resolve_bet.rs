use anchor_lang::prelude::*;
use solana_program::sysvar::instructions::ID as SYSVAR_INSTRUCTIONS_ID;

use super::move_lamports;
use crate::constants::{AUTHORITY_SEED, BET_SEED, HOUSE_VAULT_SEED, USER_VAULT_SEED};
use crate::events::BetResolved;
use crate::lifecycle::{self, MessageDomain, ResolveBetArgs};
use crate::signature::load_precompiled_signatures;
use crate::state::{AuthorityConfig, HouseVault, PendingBet, UserVault};

/// Accounts required to settle a locked bet.
///
/// Anyone may submit the settlement; only the oracle's attestation, verified
/// by an ed25519 precompile instruction earlier in the same transaction,
/// authorizes it.
#[derive(Accounts)]
pub struct ResolveBet<'info> {
    /// The bet being settled.
    #[account(
        mut,
        seeds = [BET_SEED, pending_bet.player.as_ref(), &pending_bet.nonce.to_le_bytes()],
        bump = pending_bet.bump
    )]
    pub pending_bet: Account<'info, PendingBet>,

    /// The vault of the player who placed the bet.
    #[account(
        mut,
        seeds = [USER_VAULT_SEED, pending_bet.player.as_ref()],
        bump = user_vault.bump
    )]
    pub user_vault: Account<'info, UserVault>,

    /// House bankroll PDA that pays out.
    #[account(
        mut,
        seeds = [HOUSE_VAULT_SEED],
        bump = house_vault.bump
    )]
    pub house_vault: Account<'info, HouseVault>,

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

/// Settles a locked bet with the oracle-attested outcome and pays the
/// recomputed payout from the house to the player's vault.
///
/// # Arguments
/// * `ctx` - Context holding the ResolveBet accounts
/// * `args` - Attested outcome, claimed payout and oracle signature
pub fn process_resolve_bet(ctx: Context<ResolveBet>, args: ResolveBetArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let verifier = load_precompiled_signatures(&ctx.accounts.instructions_sysvar.to_account_info())?;
    let domain = MessageDomain {
        program_id: crate::ID,
        vault: ctx.accounts.house_vault.key(),
    };

    let accounts = &mut *ctx.accounts;
    let settlement = lifecycle::resolve_bet(
        &mut accounts.pending_bet,
        &mut accounts.user_vault,
        &mut accounts.house_vault,
        &accounts.authority,
        &domain,
        &args,
        &verifier,
        now,
    )?;

    move_lamports(
        &accounts.house_vault.to_account_info(),
        &accounts.user_vault.to_account_info(),
        settlement.payout,
    )?;

    let player = accounts.pending_bet.player;
    let nonce = accounts.pending_bet.nonce;
    msg!(
        "Bet {} of {} resolved: roll {}, payout {}",
        nonce,
        player,
        args.outcome,
        settlement.payout
    );
    emit!(BetResolved {
        player,
        nonce,
        win: settlement.win,
        outcome: args.outcome,
        payout: settlement.payout,
    });
    Ok(())
}
