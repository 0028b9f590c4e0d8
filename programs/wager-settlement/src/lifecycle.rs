//! The pending-bet state machine: `Locked -> Resolved | Expired`.
//!
//! Each transition validates everything it needs, computes every new balance,
//! and only then writes. A failed call leaves all records exactly as they were.

use anchor_lang::prelude::*;

use crate::codec::BetAttestation;
use crate::constants::{MAX_BET_LAMPORTS, MAX_LOCK_WINDOW_SECS, MIN_BET_LAMPORTS, RTP_BPS};
use crate::error::ErrorCode;
use crate::ledger::{checked_credit, checked_debit};
use crate::payout::{compute_payout, validate_bet_params, validate_outcome};
use crate::signature::{SignatureVerifier, SIGNATURE_LEN};
use crate::state::{AuthorityConfig, BetStatus, HouseVault, PendingBet, UserVault};

/// Identifiers bound into every attestation so a signature for one
/// deployment or vault cannot settle bets on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageDomain {
    pub program_id: Pubkey,
    pub vault: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockBetArgs {
    pub entry_amount: u64,
    pub side_or_type: u8,
    pub target: u8,
    pub nonce: u64,
    pub expiry: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveBetArgs {
    pub outcome: u8,
    pub payout: u64,
    pub signature: [u8; SIGNATURE_LEN],
}

/// Balances after a bet leaves `Locked`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub status: BetStatus,
    pub win: bool,
    pub payout: u64,
    pub user_balance: u64,
    pub house_balance: u64,
}

/// Rebuilds the message the oracle must have signed for `bet`.
pub fn attestation_for(
    bet: &PendingBet,
    domain: &MessageDomain,
    outcome: u8,
    payout: u64,
) -> BetAttestation {
    BetAttestation {
        program_id: domain.program_id,
        vault: domain.vault,
        player: bet.player,
        entry_amount: bet.entry_amount,
        side_or_type: bet.side_or_type,
        target: bet.target,
        outcome,
        payout,
        nonce: bet.nonce,
        expiry: bet.expiry,
    }
}

/// Opens a bet and moves its stake from the player's vault into the house.
///
/// `existing` is whatever is already recorded under `(player, nonce)`.
/// Any record there, whatever its status, makes the nonce unusable.
pub fn lock_bet(
    existing: Option<&PendingBet>,
    user_vault: &mut UserVault,
    house: &mut HouseVault,
    player: &Pubkey,
    args: &LockBetArgs,
    now: i64,
) -> Result<PendingBet> {
    require!(
        (MIN_BET_LAMPORTS..=MAX_BET_LAMPORTS).contains(&args.entry_amount),
        ErrorCode::InvalidAmount
    );
    validate_bet_params(args.side_or_type, args.target)?;
    require!(
        !existing.is_some_and(PendingBet::is_recorded),
        ErrorCode::NonceReused
    );
    require!(args.expiry > now, ErrorCode::ExpiryInPast);
    require!(
        args.expiry.saturating_sub(now) <= MAX_LOCK_WINDOW_SECS,
        ErrorCode::InvalidParameter
    );
    user_vault.require_owner(player)?;

    let user_balance = checked_debit(user_vault.balance, args.entry_amount)?;
    let house_balance = checked_credit(house.balance, args.entry_amount)?;
    let locked_stakes = checked_credit(house.locked_stakes, args.entry_amount)?;

    user_vault.balance = user_balance;
    house.balance = house_balance;
    house.locked_stakes = locked_stakes;

    Ok(PendingBet {
        player: *player,
        entry_amount: args.entry_amount,
        side_or_type: args.side_or_type,
        target: args.target,
        nonce: args.nonce,
        expiry: args.expiry,
        status: BetStatus::Locked,
        outcome: 0,
        payout: 0,
        bump: 0,
    })
}

/// Settles a locked bet against an oracle attestation.
///
/// The payout carried in `args` is never trusted: it must equal the payout
/// recomputed here, and it must be part of the signed message.
#[allow(clippy::too_many_arguments)]
pub fn resolve_bet<V: SignatureVerifier>(
    bet: &mut PendingBet,
    user_vault: &mut UserVault,
    house: &mut HouseVault,
    authority: &AuthorityConfig,
    domain: &MessageDomain,
    args: &ResolveBetArgs,
    verifier: &V,
    now: i64,
) -> Result<Settlement> {
    require!(bet.is_locked(), ErrorCode::NotFound);
    require!(now <= bet.expiry, ErrorCode::Expired);
    user_vault.require_owner(&bet.player)?;

    let attestation = attestation_for(bet, domain, args.outcome, args.payout);
    require!(
        attestation.verify(&args.signature, &authority.current_oracle(), verifier),
        ErrorCode::BadSignature
    );

    validate_outcome(args.outcome)?;
    let expected = compute_payout(
        bet.entry_amount,
        bet.side_or_type,
        bet.target,
        args.outcome,
        RTP_BPS,
    );
    require!(args.payout == expected, ErrorCode::PayoutMismatch);

    let locked_stakes = checked_debit(house.locked_stakes, bet.entry_amount)?;
    let house_balance = checked_debit(house.balance, expected)?;
    require!(house_balance >= locked_stakes, ErrorCode::InsufficientFunds);
    let user_balance = checked_credit(user_vault.balance, expected)?;

    house.balance = house_balance;
    house.locked_stakes = locked_stakes;
    user_vault.balance = user_balance;
    bet.status = BetStatus::Resolved;
    bet.outcome = args.outcome;
    bet.payout = expected;

    Ok(Settlement {
        status: bet.status,
        win: expected > 0,
        payout: expected,
        user_balance,
        house_balance,
    })
}

/// Refunds the stake of a bet nobody resolved before its expiry.
pub fn reclaim_bet(
    bet: &mut PendingBet,
    user_vault: &mut UserVault,
    house: &mut HouseVault,
    now: i64,
) -> Result<Settlement> {
    require!(bet.is_locked(), ErrorCode::NotFound);
    require!(now > bet.expiry, ErrorCode::NotExpired);
    user_vault.require_owner(&bet.player)?;

    let locked_stakes = checked_debit(house.locked_stakes, bet.entry_amount)?;
    let house_balance = checked_debit(house.balance, bet.entry_amount)?;
    let user_balance = checked_credit(user_vault.balance, bet.entry_amount)?;

    house.balance = house_balance;
    house.locked_stakes = locked_stakes;
    user_vault.balance = user_balance;
    bet.status = BetStatus::Expired;
    bet.payout = bet.entry_amount;

    Ok(Settlement {
        status: bet.status,
        win: false,
        payout: bet.entry_amount,
        user_balance,
        house_balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SIDE_UNDER;
    use crate::signature::DalekVerifier;
    use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer};

    const NOW: i64 = 1_700_000_000;

    struct Fixture {
        oracle: Keypair,
        authority: AuthorityConfig,
        domain: MessageDomain,
        player: Pubkey,
        user: UserVault,
        house: HouseVault,
    }

    fn keypair(seed: u8) -> Keypair {
        let secret = SecretKey::from_bytes(&[seed; 32]).unwrap();
        let public = PublicKey::from(&secret);
        Keypair { secret, public }
    }

    fn fixture() -> Fixture {
        let oracle = keypair(11);
        let player = Pubkey::new_unique();
        Fixture {
            authority: AuthorityConfig {
                admin: Pubkey::new_unique(),
                oracle_pubkey: Pubkey::new_from_array(oracle.public.to_bytes()),
                oracle_epoch: 0,
                bump: 0,
            },
            oracle,
            domain: MessageDomain {
                program_id: crate::ID,
                vault: Pubkey::new_unique(),
            },
            player,
            user: UserVault {
                owner: player,
                balance: 5_000_000,
                last_withdraw_nonce: 0,
                bump: 0,
            },
            house: HouseVault {
                balance: 50_000_000,
                locked_stakes: 0,
                bump: 0,
            },
        }
    }

    fn lock_args(nonce: u64) -> LockBetArgs {
        LockBetArgs {
            entry_amount: 1_000_000,
            side_or_type: SIDE_UNDER,
            target: 10,
            nonce,
            expiry: NOW + 60,
        }
    }

    fn signed(f: &Fixture, bet: &PendingBet, outcome: u8, payout: u64) -> ResolveBetArgs {
        let message = attestation_for(bet, &f.domain, outcome, payout).encode();
        ResolveBetArgs {
            outcome,
            payout,
            signature: f.oracle.sign(&message).to_bytes(),
        }
    }

    #[test]
    fn lock_moves_stake_into_house() {
        let mut f = fixture();
        let bet = lock_bet(None, &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW).unwrap();

        assert_eq!(bet.status, BetStatus::Locked);
        assert_eq!(bet.player, f.player);
        assert_eq!(f.user.balance, 4_000_000);
        assert_eq!(f.house.balance, 51_000_000);
        assert_eq!(f.house.locked_stakes, 1_000_000);
    }

    #[test]
    fn lock_rejections_leave_balances_untouched() {
        let mut f = fixture();
        let cases = [
            (LockBetArgs { entry_amount: 0, ..lock_args(1) }, ErrorCode::InvalidAmount),
            (LockBetArgs { entry_amount: MAX_BET_LAMPORTS + 1, ..lock_args(1) }, ErrorCode::InvalidAmount),
            (LockBetArgs { side_or_type: 9, ..lock_args(1) }, ErrorCode::InvalidParameter),
            (LockBetArgs { target: 99, ..lock_args(1) }, ErrorCode::InvalidParameter),
            (LockBetArgs { expiry: NOW, ..lock_args(1) }, ErrorCode::ExpiryInPast),
            (LockBetArgs { expiry: NOW + MAX_LOCK_WINDOW_SECS + 1, ..lock_args(1) }, ErrorCode::InvalidParameter),
            (LockBetArgs { expiry: i64::MAX, ..lock_args(1) }, ErrorCode::InvalidParameter),
            (LockBetArgs { entry_amount: 5_000_001, ..lock_args(1) }, ErrorCode::InsufficientFunds),
        ];
        for (args, code) in cases {
            let err = lock_bet(None, &mut f.user, &mut f.house, &f.player, &args, NOW).unwrap_err();
            assert_eq!(err, error!(code), "{:?}", args);
        }
        assert_eq!(f.user.balance, 5_000_000);
        assert_eq!(f.house.balance, 50_000_000);
        assert_eq!(f.house.locked_stakes, 0);
    }

    #[test]
    fn lock_window_edge_is_accepted_and_reclaimable() {
        let mut f = fixture();
        let args = LockBetArgs { expiry: NOW + MAX_LOCK_WINDOW_SECS, ..lock_args(1) };
        let mut bet = lock_bet(None, &mut f.user, &mut f.house, &f.player, &args, NOW).unwrap();

        let settlement =
            reclaim_bet(&mut bet, &mut f.user, &mut f.house, NOW + MAX_LOCK_WINDOW_SECS + 1).unwrap();
        assert_eq!(settlement.payout, 1_000_000);
        assert_eq!(f.house.locked_stakes, 0);
    }

    #[test]
    fn lock_over_existing_record_is_nonce_reuse() {
        let mut f = fixture();
        let mut bet = lock_bet(None, &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW).unwrap();
        let err = lock_bet(Some(&bet), &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW)
            .unwrap_err();
        assert_eq!(err, error!(ErrorCode::NonceReused));

        reclaim_bet(&mut bet, &mut f.user, &mut f.house, NOW + 61).unwrap();
        let err = lock_bet(Some(&bet), &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW)
            .unwrap_err();
        assert_eq!(err, error!(ErrorCode::NonceReused));
    }

    #[test]
    fn lock_into_foreign_vault_is_rejected() {
        let mut f = fixture();
        let stranger = Pubkey::new_unique();
        let err = lock_bet(None, &mut f.user, &mut f.house, &stranger, &lock_args(1), NOW).unwrap_err();
        assert_eq!(err, error!(ErrorCode::VaultMismatch));
    }

    #[test]
    fn winning_resolution_pays_recomputed_amount() {
        let mut f = fixture();
        let mut bet = lock_bet(None, &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW).unwrap();
        let args = signed(&f, &bet, 5, 110_000);

        let settlement = resolve_bet(
            &mut bet, &mut f.user, &mut f.house, &f.authority, &f.domain, &args, &DalekVerifier, NOW + 10,
        )
        .unwrap();

        assert!(settlement.win);
        assert_eq!(settlement.payout, 110_000);
        assert_eq!(bet.status, BetStatus::Resolved);
        assert_eq!(bet.outcome, 5);
        assert_eq!(f.user.balance, 4_110_000);
        assert_eq!(f.house.balance, 50_890_000);
        assert_eq!(f.house.locked_stakes, 0);
    }

    #[test]
    fn losing_resolution_keeps_stake_in_house() {
        let mut f = fixture();
        let mut bet = lock_bet(None, &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW).unwrap();
        let args = signed(&f, &bet, 77, 0);

        let settlement = resolve_bet(
            &mut bet, &mut f.user, &mut f.house, &f.authority, &f.domain, &args, &DalekVerifier, NOW,
        )
        .unwrap();

        assert!(!settlement.win);
        assert_eq!(f.user.balance, 4_000_000);
        assert_eq!(f.house.balance, 51_000_000);
    }

    #[test]
    fn signed_but_wrong_payout_is_tamper_evidence() {
        let mut f = fixture();
        let mut bet = lock_bet(None, &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW).unwrap();
        let args = signed(&f, &bet, 5, 2_000_000);

        let err = resolve_bet(
            &mut bet, &mut f.user, &mut f.house, &f.authority, &f.domain, &args, &DalekVerifier, NOW,
        )
        .unwrap_err();
        assert_eq!(err, error!(ErrorCode::PayoutMismatch));
        assert_eq!(bet.status, BetStatus::Locked);
        assert_eq!(f.user.balance, 4_000_000);
    }

    #[test]
    fn signed_out_of_range_outcome_is_rejected() {
        let mut f = fixture();
        let mut bet = lock_bet(None, &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW).unwrap();
        let args = signed(&f, &bet, 0, 0);

        let err = resolve_bet(
            &mut bet, &mut f.user, &mut f.house, &f.authority, &f.domain, &args, &DalekVerifier, NOW,
        )
        .unwrap_err();
        assert_eq!(err, error!(ErrorCode::InvalidParameter));
    }

    #[test]
    fn signature_from_other_key_is_rejected() {
        let mut f = fixture();
        let mut bet = lock_bet(None, &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW).unwrap();
        let message = attestation_for(&bet, &f.domain, 5, 110_000).encode();
        let args = ResolveBetArgs {
            outcome: 5,
            payout: 110_000,
            signature: keypair(99).sign(&message).to_bytes(),
        };

        let err = resolve_bet(
            &mut bet, &mut f.user, &mut f.house, &f.authority, &f.domain, &args, &DalekVerifier, NOW,
        )
        .unwrap_err();
        assert_eq!(err, error!(ErrorCode::BadSignature));
    }

    #[test]
    fn expiry_gates_resolve_and_reclaim() {
        let mut f = fixture();
        let mut bet = lock_bet(None, &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW).unwrap();
        let args = signed(&f, &bet, 5, 110_000);

        assert_eq!(
            reclaim_bet(&mut bet, &mut f.user, &mut f.house, NOW + 60).unwrap_err(),
            error!(ErrorCode::NotExpired)
        );
        assert_eq!(
            resolve_bet(
                &mut bet, &mut f.user, &mut f.house, &f.authority, &f.domain, &args, &DalekVerifier, NOW + 61,
            )
            .unwrap_err(),
            error!(ErrorCode::Expired)
        );

        let settlement = reclaim_bet(&mut bet, &mut f.user, &mut f.house, NOW + 61).unwrap();
        assert_eq!(settlement.status, BetStatus::Expired);
        assert_eq!(f.user.balance, 5_000_000);
        assert_eq!(f.house.balance, 50_000_000);
        assert_eq!(f.house.locked_stakes, 0);
    }

    #[test]
    fn terminal_bets_are_not_found() {
        let mut f = fixture();
        let mut bet = lock_bet(None, &mut f.user, &mut f.house, &f.player, &lock_args(1), NOW).unwrap();
        let args = signed(&f, &bet, 5, 110_000);
        resolve_bet(
            &mut bet, &mut f.user, &mut f.house, &f.authority, &f.domain, &args, &DalekVerifier, NOW,
        )
        .unwrap();

        assert_eq!(
            resolve_bet(
                &mut bet, &mut f.user, &mut f.house, &f.authority, &f.domain, &args, &DalekVerifier, NOW,
            )
            .unwrap_err(),
            error!(ErrorCode::NotFound)
        );
        assert_eq!(
            reclaim_bet(&mut bet, &mut f.user, &mut f.house, NOW + 61).unwrap_err(),
            error!(ErrorCode::NotFound)
        );
        assert_eq!(f.user.balance, 4_110_000);
    }
}
