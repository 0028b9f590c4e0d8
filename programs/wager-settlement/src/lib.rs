use anchor_lang::prelude::*;

pub mod authority;
pub mod codec;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod lifecycle;
pub mod payout;
pub mod signature;
pub mod state;
pub mod withdrawal;

pub use instructions::*;
pub use lifecycle::{LockBetArgs, ResolveBetArgs};
pub use withdrawal::WithdrawArgs;

declare_id!("JC5kDbzHXbkdyjFj6CTsBHdK9EvCkD1a35CG2z4v1sZk");

#[program]
pub mod wager_settlement {
    use super::*;

    pub fn init_authority(
        ctx: Context<InitializeAuthority>,
        admin: Pubkey,
        oracle_pubkey: Pubkey,
    ) -> Result<()> {
        process_init_authority(ctx, admin, oracle_pubkey)
    }

    pub fn init_vault(ctx: Context<InitializeHouseVault>) -> Result<()> {
        process_init_vault(ctx)
    }

    pub fn init_user_vault(ctx: Context<InitializeUserVault>) -> Result<()> {
        process_init_user_vault(ctx)
    }

    pub fn deposit_user(ctx: Context<DepositUser>, amount: u64) -> Result<()> {
        process_deposit_user(ctx, amount)
    }

    pub fn deposit_house(ctx: Context<DepositHouse>, amount: u64) -> Result<()> {
        process_deposit_house(ctx, amount)
    }

    pub fn lock_bet(ctx: Context<LockBet>, args: LockBetArgs) -> Result<()> {
        process_lock_bet(ctx, args)
    }

    pub fn resolve_bet(ctx: Context<ResolveBet>, args: ResolveBetArgs) -> Result<()> {
        process_resolve_bet(ctx, args)
    }

    pub fn reclaim_bet(ctx: Context<ReclaimBet>) -> Result<()> {
        process_reclaim_bet(ctx)
    }

    pub fn withdraw(ctx: Context<Withdraw>, args: WithdrawArgs) -> Result<()> {
        process_withdraw(ctx, args)
    }

    pub fn rotate_oracle(ctx: Context<RotateAuthority>, new_oracle: Pubkey) -> Result<()> {
        process_rotate_oracle(ctx, new_oracle)
    }

    pub fn rotate_admin(ctx: Context<RotateAuthority>, new_admin: Pubkey) -> Result<()> {
        process_rotate_admin(ctx, new_admin)
    }

    pub fn sweep_house(ctx: Context<SweepHouse>, amount: u64) -> Result<()> {
        process_sweep_house(ctx, amount)
    }
}
