use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Amount must be non-zero and within the allowed bet range")]
    InvalidAmount,
    #[msg("Bet parameter or outcome outside the game's domain")]
    InvalidParameter,
    #[msg("Nonce already used for this player")]
    NonceReused,
    #[msg("Expiry must be in the future")]
    ExpiryInPast,
    #[msg("Bet expired")]
    Expired,
    #[msg("Bet has not expired yet")]
    NotExpired,
    #[msg("No locked bet for this reference")]
    NotFound,
    #[msg("Attestation signature invalid")]
    BadSignature,
    #[msg("Payout does not match the recomputed payout")]
    PayoutMismatch,
    #[msg("Insufficient funds")]
    InsufficientFunds,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Already initialized")]
    AlreadyInitialized,
    #[msg("Vault does not belong to this player")]
    VaultMismatch,
    #[msg("Malformed ed25519 precompile instruction")]
    InvalidEd25519Instruction,
}
