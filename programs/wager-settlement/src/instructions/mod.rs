use anchor_lang::prelude::*;

use crate::error::ErrorCode;

pub mod admin;
pub mod lock_bet;
pub mod reclaim_bet;
pub mod resolve_bet;
pub mod vault;
pub mod withdraw;

pub use admin::*;
pub use lock_bet::*;
pub use reclaim_bet::*;
pub use resolve_bet::*;
pub use vault::*;
pub use withdraw::*;

/// Moves lamports directly between two accounts. `from` must be owned by
/// this program; the runtime rejects the transaction otherwise.
pub(crate) fn move_lamports(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let mut from_lamports = from.try_borrow_mut_lamports()?;
    let mut to_lamports = to.try_borrow_mut_lamports()?;
    let debited = from_lamports
        .checked_sub(amount)
        .ok_or_else(|| error!(ErrorCode::InsufficientFunds))?;
    let credited = to_lamports
        .checked_add(amount)
        .ok_or_else(|| error!(ErrorCode::ArithmeticOverflow))?;
    **from_lamports = debited;
    **to_lamports = credited;
    Ok(())
}
