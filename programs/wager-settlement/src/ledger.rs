//! Balance bookkeeping for the house vault and player vaults.
//!
//! Every mutation is checked: subtraction below zero is `InsufficientFunds`,
//! addition past `u64::MAX` is `ArithmeticOverflow`. Compound operations use the
//! `checked_*` helpers to compute all new balances before assigning any of them.

use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::state::{AuthorityConfig, HouseVault, UserVault};

pub fn checked_credit(balance: u64, amount: u64) -> Result<u64> {
    balance
        .checked_add(amount)
        .ok_or_else(|| error!(ErrorCode::ArithmeticOverflow))
}

pub fn checked_debit(balance: u64, amount: u64) -> Result<u64> {
    balance
        .checked_sub(amount)
        .ok_or_else(|| error!(ErrorCode::InsufficientFunds))
}

impl HouseVault {
    pub fn deposit(&mut self, amount: u64) -> Result<u64> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        self.credit(amount)
    }

    pub fn credit(&mut self, amount: u64) -> Result<u64> {
        self.balance = checked_credit(self.balance, amount)?;
        Ok(self.balance)
    }

    pub fn debit(&mut self, amount: u64) -> Result<u64> {
        self.balance = checked_debit(self.balance, amount)?;
        Ok(self.balance)
    }

    /// Balance not committed to refunding locked stakes.
    pub fn available(&self) -> u64 {
        self.balance.saturating_sub(self.locked_stakes)
    }
}

impl UserVault {
    pub fn deposit(&mut self, player: &Pubkey, amount: u64) -> Result<u64> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        self.require_owner(player)?;
        self.credit(amount)
    }

    pub fn credit(&mut self, amount: u64) -> Result<u64> {
        self.balance = checked_credit(self.balance, amount)?;
        Ok(self.balance)
    }

    pub fn require_owner(&self, player: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *player, ErrorCode::VaultMismatch);
        Ok(())
    }
}

/// Moves `amount` out of the house vault to an external destination.
/// Only the registered admin may sweep.
pub fn sweep_house(
    house: &mut HouseVault,
    authority: &AuthorityConfig,
    requester: &Pubkey,
    to: &Pubkey,
    amount: u64,
) -> Result<u64> {
    require!(authority.is_admin(requester), ErrorCode::Unauthorized);
    require!(amount > 0, ErrorCode::InvalidAmount);
    require!(amount <= house.available(), ErrorCode::InsufficientFunds);
    let remaining = house.debit(amount)?;
    msg!("House sweep by {}: {} lamports to {}", requester, amount, to);
    Ok(remaining)
}
