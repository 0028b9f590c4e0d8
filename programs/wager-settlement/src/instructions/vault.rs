use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{HOUSE_VAULT_SEED, USER_VAULT_SEED};
use crate::state::{HouseVault, UserVault};

/// Accounts required to create the singleton house vault.
#[derive(Accounts)]
pub struct InitializeHouseVault<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// House bankroll PDA.
    #[account(
        init,
        payer = payer,
        space = 8 + HouseVault::INIT_SPACE,
        seeds = [HOUSE_VAULT_SEED],
        bump
    )]
    pub house_vault: Account<'info, HouseVault>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Accounts required to open a player's custodial vault.
#[derive(Accounts)]
pub struct InitializeUserVault<'info> {
    /// The player the vault is created for.
    #[account(mut)]
    pub player: Signer<'info>,

    /// Player vault PDA, one per player.
    #[account(
        init,
        payer = player,
        space = 8 + UserVault::INIT_SPACE,
        seeds = [USER_VAULT_SEED, player.key().as_ref()],
        bump
    )]
    pub user_vault: Account<'info, UserVault>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Accounts required for a player to fund their own vault.
#[derive(Accounts)]
pub struct DepositUser<'info> {
    /// The player paying in.
    #[account(mut)]
    pub player: Signer<'info>,

    /// The player's vault.
    #[account(
        mut,
        seeds = [USER_VAULT_SEED, player.key().as_ref()],
        bump = user_vault.bump
    )]
    pub user_vault: Account<'info, UserVault>,

    /// System program for the lamport transfer.
    pub system_program: Program<'info, System>,
}

/// Accounts required to add liquidity to the house.
#[derive(Accounts)]
pub struct DepositHouse<'info> {
    /// Whoever is funding the house.
    #[account(mut)]
    pub depositor: Signer<'info>,

    /// House bankroll PDA.
    #[account(
        mut,
        seeds = [HOUSE_VAULT_SEED],
        bump = house_vault.bump
    )]
    pub house_vault: Account<'info, HouseVault>,

    /// System program for the lamport transfer.
    pub system_program: Program<'info, System>,
}

pub fn process_init_vault(ctx: Context<InitializeHouseVault>) -> Result<()> {
    let house_vault = &mut ctx.accounts.house_vault;
    house_vault.balance = 0;
    house_vault.locked_stakes = 0;
    house_vault.bump = ctx.bumps.house_vault;
    msg!("House vault created at {}", house_vault.key());
    Ok(())
}

pub fn process_init_user_vault(ctx: Context<InitializeUserVault>) -> Result<()> {
    let user_vault = &mut ctx.accounts.user_vault;
    user_vault.owner = ctx.accounts.player.key();
    user_vault.balance = 0;
    user_vault.last_withdraw_nonce = 0;
    user_vault.bump = ctx.bumps.user_vault;
    Ok(())
}

/// Transfers `amount` lamports from the player into their vault and
/// credits the vault's ledger balance.
///
/// # Arguments
/// * `ctx` - Context holding the DepositUser accounts
/// * `amount` - Lamports to deposit, must be non-zero
pub fn process_deposit_user(ctx: Context<DepositUser>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    let balance = ctx.accounts.user_vault.deposit(&player, amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.user_vault.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!("Deposit of {} lamports by {}, balance {}", amount, player, balance);
    Ok(())
}

/// Transfers `amount` lamports from the depositor into the house vault.
///
/// # Arguments
/// * `ctx` - Context holding the DepositHouse accounts
/// * `amount` - Lamports to deposit, must be non-zero
pub fn process_deposit_house(ctx: Context<DepositHouse>, amount: u64) -> Result<()> {
    let balance = ctx.accounts.house_vault.deposit(amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.depositor.to_account_info(),
                to: ctx.accounts.house_vault.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!("House funded with {} lamports, balance {}", amount, balance);
    Ok(())
}
