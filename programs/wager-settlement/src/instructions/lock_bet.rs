use anchor_lang::prelude::*;

use super::move_lamports;
use crate::constants::{BET_SEED, HOUSE_VAULT_SEED, USER_VAULT_SEED};
use crate::events::BetLocked;
use crate::lifecycle::{self, LockBetArgs};
use crate::state::{HouseVault, PendingBet, UserVault};

/// Accounts required to open a bet.
///
/// The bet record lives at `[BET_SEED, player, nonce]`. It is created on first
/// use and never closed, so a nonce that has ever been recorded stays burnt.
#[derive(Accounts)]
#[instruction(args: LockBetArgs)]
pub struct LockBet<'info> {
    /// The player placing the bet. Pays rent for the bet record.
    #[account(mut)]
    pub player: Signer<'info>,

    /// The player's vault the stake is taken from.
    #[account(
        mut,
        seeds = [USER_VAULT_SEED, player.key().as_ref()],
        bump = user_vault.bump
    )]
    pub user_vault: Account<'info, UserVault>,

    /// House bankroll PDA that holds the stake until settlement.
    #[account(
        mut,
        seeds = [HOUSE_VAULT_SEED],
        bump = house_vault.bump
    )]
    pub house_vault: Account<'info, HouseVault>,

    /// The bet record for this nonce.
    #[account(
        init_if_needed,
        payer = player,
        space = 8 + PendingBet::INIT_SPACE,
        seeds = [BET_SEED, player.key().as_ref(), &args.nonce.to_le_bytes()],
        bump
    )]
    pub pending_bet: Account<'info, PendingBet>,

    /// System program to create the bet record.
    pub system_program: Program<'info, System>,
}

/// Locks a bet's stake: debits the player's vault, moves the lamports into
/// the house and records the bet as `Locked`.
///
/// # Arguments
/// * `ctx` - Context holding the LockBet accounts
/// * `args` - Stake, side, target, nonce and expiry of the bet
pub fn process_lock_bet(ctx: Context<LockBet>, args: LockBetArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.pending_bet;
    let player = ctx.accounts.player.key();
    let accounts = &mut *ctx.accounts;

    let existing = accounts
        .pending_bet
        .is_recorded()
        .then_some(&*accounts.pending_bet);
    let mut record = lifecycle::lock_bet(
        existing,
        &mut accounts.user_vault,
        &mut accounts.house_vault,
        &player,
        &args,
        now,
    )?;
    record.bump = bump;

    move_lamports(
        &accounts.user_vault.to_account_info(),
        &accounts.house_vault.to_account_info(),
        args.entry_amount,
    )?;
    accounts.pending_bet.set_inner(record);

    msg!(
        "Bet {} locked for {}: {} lamports, side {}, target {}",
        args.nonce,
        player,
        args.entry_amount,
        args.side_or_type,
        args.target
    );
    emit!(BetLocked {
        player,
        entry_amount: args.entry_amount,
        side_or_type: args.side_or_type,
        target: args.target,
        nonce: args.nonce,
        expiry: args.expiry,
    });
    Ok(())
}
