use anchor_lang::prelude::*;

#[event]
pub struct BetLocked {
    pub player: Pubkey,
    pub entry_amount: u64,
    pub side_or_type: u8,
    pub target: u8,
    pub nonce: u64,
    pub expiry: i64,
}

#[event]
pub struct BetResolved {
    pub player: Pubkey,
    pub nonce: u64,
    pub win: bool,
    pub outcome: u8,
    pub payout: u64,
}

#[event]
pub struct BetReclaimed {
    pub player: Pubkey,
    pub nonce: u64,
    pub refund: u64,
}

#[event]
pub struct Withdrawn {
    pub player: Pubkey,
    pub amount: u64,
    pub attestation_nonce: u64,
}

#[event]
pub struct HouseSwept {
    pub admin: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}

#[event]
pub struct OracleRotated {
    pub admin: Pubkey,
    pub previous: Pubkey,
    pub current: Pubkey,
    pub epoch: u64,
}

#[event]
pub struct AdminRotated {
    pub previous: Pubkey,
    pub current: Pubkey,
}
