/// Seed of the singleton house vault PDA.
pub const HOUSE_VAULT_SEED: &[u8] = b"vault";

/// Seed prefix of a player's vault PDA: `[USER_VAULT_SEED, player]`.
pub const USER_VAULT_SEED: &[u8] = b"user_vault";

/// Seed of the singleton authority config PDA.
pub const AUTHORITY_SEED: &[u8] = b"authority";

/// Seed prefix of a pending bet PDA: `[BET_SEED, player, nonce_le]`.
pub const BET_SEED: &[u8] = b"bet";

/// Domain tag leading every bet attestation the oracle signs.
pub const DICE_DOMAIN_TAG: &[u8; 7] = b"DICE_V1";

/// Domain tag leading every withdrawal approval the oracle signs.
pub const WITHDRAW_DOMAIN_TAG: &[u8; 11] = b"WITHDRAW_V1";

/// Return-to-player rate applied to every winning bet (99.00%).
pub const RTP_BPS: u64 = 9_900;

pub const BPS_DENOMINATOR: u64 = 10_000;

// 0.00005 SOL
pub const MIN_BET_LAMPORTS: u64 = 50_000;
// 5 SOL
pub const MAX_BET_LAMPORTS: u64 = 5_000_000_000;

/// Longest a stake may stay locked. A bet whose expiry lies further out
/// could pin `locked_stakes` indefinitely.
pub const MAX_LOCK_WINDOW_SECS: i64 = 86_400;

pub const SIDE_UNDER: u8 = 0;
pub const SIDE_OVER: u8 = 1;

pub const MIN_TARGET: u8 = 2;
pub const MAX_TARGET: u8 = 98;

pub const MIN_ROLL: u8 = 1;
pub const MAX_ROLL: u8 = 100;
