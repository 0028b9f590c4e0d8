use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::state::AuthorityConfig;

impl AuthorityConfig {
    /// An uninitialized config account is all zeroes, and `init` never stores
    /// the default key as admin.
    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }

    pub fn init(&mut self, admin: Pubkey, oracle_pubkey: Pubkey) -> Result<()> {
        require!(!self.is_initialized(), ErrorCode::AlreadyInitialized);
        require!(
            admin != Pubkey::default() && oracle_pubkey != Pubkey::default(),
            ErrorCode::InvalidParameter
        );
        self.admin = admin;
        self.oracle_pubkey = oracle_pubkey;
        self.oracle_epoch = 0;
        Ok(())
    }

    /// Replaces the oracle key. Attestations signed by the previous key stop
    /// verifying immediately.
    pub fn rotate_oracle(&mut self, new_pubkey: Pubkey, requester: &Pubkey) -> Result<u64> {
        require!(self.is_admin(requester), ErrorCode::Unauthorized);
        require!(new_pubkey != Pubkey::default(), ErrorCode::InvalidParameter);
        let epoch = self
            .oracle_epoch
            .checked_add(1)
            .ok_or_else(|| error!(ErrorCode::ArithmeticOverflow))?;
        msg!(
            "Oracle rotated by {}: {} -> {} (epoch {})",
            requester,
            self.oracle_pubkey,
            new_pubkey,
            epoch
        );
        self.oracle_pubkey = new_pubkey;
        self.oracle_epoch = epoch;
        Ok(epoch)
    }

    pub fn rotate_admin(&mut self, new_admin: Pubkey, requester: &Pubkey) -> Result<()> {
        require!(self.is_admin(requester), ErrorCode::Unauthorized);
        require!(new_admin != Pubkey::default(), ErrorCode::InvalidParameter);
        msg!("Admin rotated by {}: {} -> {}", requester, self.admin, new_admin);
        self.admin = new_admin;
        Ok(())
    }

    pub fn current_oracle(&self) -> Pubkey {
        self.oracle_pubkey
    }

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.is_initialized() && self.admin == *key
    }
}
