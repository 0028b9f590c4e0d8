use anchor_lang::prelude::*;

/// The house bankroll. Stakes flow in at lock time and payouts flow out at resolution.
#[account]
#[derive(InitSpace, Debug)]
pub struct HouseVault {
    /// Spendable lamports tracked by the ledger.
    /// The account's rent-exempt reserve is not part of this figure.
    pub balance: u64,

    /// Sum of the stakes of all bets still `Locked`. The house may not sweep
    /// or pay out below this floor, so every locked bet stays refundable.
    pub locked_stakes: u64,

    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,
}

/// A player's custodial balance, keyed by `owner`.
#[account]
#[derive(InitSpace, Debug)]
pub struct UserVault {
    /// The player this vault belongs to.
    pub owner: Pubkey,

    /// Spendable lamports tracked by the ledger, excluding rent.
    pub balance: u64,

    /// Highest withdrawal approval nonce consumed so far.
    /// Approvals must carry a strictly greater nonce.
    pub last_withdraw_nonce: u64,

    pub bump: u8,
}

/// Who may administer the program and whose signature settles bets.
#[account]
#[derive(InitSpace, Debug)]
pub struct AuthorityConfig {
    /// May rotate either key and sweep the house vault.
    pub admin: Pubkey,

    /// The only ed25519 key whose attestations are accepted.
    pub oracle_pubkey: Pubkey,

    /// Number of oracle rotations performed since initialization.
    pub oracle_epoch: u64,

    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum BetStatus {
    Locked,
    Resolved,
    Expired,
}

/// A wager whose stake is held by the house until the oracle attests an outcome
/// or the expiry passes.
#[account]
#[derive(InitSpace, Debug)]
pub struct PendingBet {
    pub player: Pubkey,

    /// Stake debited from the player's vault at lock time.
    pub entry_amount: u64,

    /// 0 = under, 1 = over.
    pub side_or_type: u8,

    /// Threshold the roll is compared against.
    pub target: u8,

    /// Per-player unique value; part of the PDA seeds.
    pub nonce: u64,

    /// Unix timestamp after which the bet can no longer be resolved.
    pub expiry: i64,

    pub status: BetStatus,

    /// Attested roll, set on resolution.
    pub outcome: u8,

    /// Amount credited to the player on resolution or refunded on reclaim.
    pub payout: u64,

    pub bump: u8,
}

impl PendingBet {
    /// A freshly allocated bet account is all zeroes; a recorded bet always
    /// carries its player's key.
    pub fn is_recorded(&self) -> bool {
        self.player != Pubkey::default()
    }

    pub fn is_locked(&self) -> bool {
        self.is_recorded() && self.status == BetStatus::Locked
    }
}
