use anchor_lang::prelude::*;

use super::move_lamports;
use crate::constants::{BET_SEED, HOUSE_VAULT_SEED, USER_VAULT_SEED};
use crate::events::BetReclaimed;
use crate::lifecycle;
use crate::state::{HouseVault, PendingBet, UserVault};

/// Accounts required to refund an expired bet. No signer is needed: the
/// refund can only ever go to the player's own vault.
#[derive(Accounts)]
pub struct ReclaimBet<'info> {
    /// The expired bet being refunded.
    #[account(
        mut,
        seeds = [BET_SEED, pending_bet.player.as_ref(), &pending_bet.nonce.to_le_bytes()],
        bump = pending_bet.bump
    )]
    pub pending_bet: Account<'info, PendingBet>,

    /// The vault of the player who placed the bet. Receives the refund.
    #[account(
        mut,
        seeds = [USER_VAULT_SEED, pending_bet.player.as_ref()],
        bump = user_vault.bump
    )]
    pub user_vault: Account<'info, UserVault>,

    /// House bankroll PDA still holding the stake.
    #[account(
        mut,
        seeds = [HOUSE_VAULT_SEED],
        bump = house_vault.bump
    )]
    pub house_vault: Account<'info, HouseVault>,
}

/// Refunds the full stake of a bet whose expiry has passed without a
/// resolution and marks it `Expired`.
///
/// # Arguments
/// * `ctx` - Context holding the ReclaimBet accounts
pub fn process_reclaim_bet(ctx: Context<ReclaimBet>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let settlement = lifecycle::reclaim_bet(
        &mut accounts.pending_bet,
        &mut accounts.user_vault,
        &mut accounts.house_vault,
        now,
    )?;
    move_lamports(
        &accounts.house_vault.to_account_info(),
        &accounts.user_vault.to_account_info(),
        settlement.payout,
    )?;

    let player = accounts.pending_bet.player;
    let nonce = accounts.pending_bet.nonce;
    msg!("Bet {} of {} expired, refunded {}", nonce, player, settlement.payout);
    emit!(BetReclaimed {
        player,
        nonce,
        refund: settlement.payout,
    });
    Ok(())
}
