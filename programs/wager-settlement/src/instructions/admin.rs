use anchor_lang::prelude::*;

use super::move_lamports;
use crate::constants::{AUTHORITY_SEED, HOUSE_VAULT_SEED};
use crate::error::ErrorCode;
use crate::events::{AdminRotated, HouseSwept, OracleRotated};
use crate::ledger;
use crate::state::{AuthorityConfig, HouseVault};

/// Accounts required to register the admin and the oracle key.
/// The config is a singleton; once written it can only change through rotation.
#[derive(Accounts)]
pub struct InitializeAuthority<'info> {
    /// The admin being registered. Pays for the config account.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Singleton authority config.
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + AuthorityConfig::INIT_SPACE,
        seeds = [AUTHORITY_SEED],
        bump
    )]
    pub authority: Account<'info, AuthorityConfig>,

    /// System program to create the config account.
    pub system_program: Program<'info, System>,
}

/// Accounts shared by the admin-only key rotations.
#[derive(Accounts)]
pub struct RotateAuthority<'info> {
    /// Must be the currently registered admin.
    pub admin: Signer<'info>,

    /// Singleton authority config.
    #[account(
        mut,
        seeds = [AUTHORITY_SEED],
        bump = authority.bump
    )]
    pub authority: Account<'info, AuthorityConfig>,
}

/// Accounts required to move house profit out of the vault.
#[derive(Accounts)]
pub struct SweepHouse<'info> {
    /// Must be the currently registered admin.
    pub admin: Signer<'info>,

    /// Singleton authority config.
    #[account(
        seeds = [AUTHORITY_SEED],
        bump = authority.bump
    )]
    pub authority: Account<'info, AuthorityConfig>,

    /// The house vault being swept.
    #[account(
        mut,
        seeds = [HOUSE_VAULT_SEED],
        bump = house_vault.bump
    )]
    pub house_vault: Account<'info, HouseVault>,

    /// CHECK: any account may receive swept lamports; it is never read.
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,
}

/// Registers the admin and the oracle whose attestations settle bets.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeAuthority accounts
/// * `admin` - Key allowed to rotate keys and sweep; must be the signer
/// * `oracle_pubkey` - ed25519 key that signs bet attestations and withdrawals
pub fn process_init_authority(
    ctx: Context<InitializeAuthority>,
    admin: Pubkey,
    oracle_pubkey: Pubkey,
) -> Result<()> {
    require_keys_eq!(ctx.accounts.payer.key(), admin, ErrorCode::Unauthorized);

    let authority = &mut ctx.accounts.authority;
    authority.init(admin, oracle_pubkey)?;
    authority.bump = ctx.bumps.authority;

    msg!("Authority initialized: admin {}, oracle {}", admin, oracle_pubkey);
    Ok(())
}

/// Replaces the oracle key. Bets still locked must be attested by the new key.
pub fn process_rotate_oracle(ctx: Context<RotateAuthority>, new_oracle: Pubkey) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let authority = &mut ctx.accounts.authority;
    let previous = authority.current_oracle();
    let epoch = authority.rotate_oracle(new_oracle, &admin)?;

    emit!(OracleRotated {
        admin,
        previous,
        current: new_oracle,
        epoch,
    });
    Ok(())
}

/// Hands the admin role to another key.
pub fn process_rotate_admin(ctx: Context<RotateAuthority>, new_admin: Pubkey) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    ctx.accounts.authority.rotate_admin(new_admin, &admin)?;

    msg!("Admin rotated from {} to {}", admin, new_admin);
    emit!(AdminRotated {
        previous: admin,
        current: new_admin,
    });
    Ok(())
}

/// Moves `amount` lamports of house profit to `destination`.
/// Stakes of bets still locked stay in the vault.
pub fn process_sweep_house(ctx: Context<SweepHouse>, amount: u64) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let destination = ctx.accounts.destination.key();

    ledger::sweep_house(
        &mut ctx.accounts.house_vault,
        &ctx.accounts.authority,
        &admin,
        &destination,
        amount,
    )?;
    move_lamports(
        &ctx.accounts.house_vault.to_account_info(),
        &ctx.accounts.destination.to_account_info(),
        amount,
    )?;

    emit!(HouseSwept {
        admin,
        destination,
        amount,
    });
    Ok(())
}
