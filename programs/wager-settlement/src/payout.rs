use anchor_lang::prelude::*;

use crate::constants::{
    BPS_DENOMINATOR, MAX_ROLL, MAX_TARGET, MIN_ROLL, MIN_TARGET, SIDE_OVER, SIDE_UNDER,
};
use crate::error::ErrorCode;

pub fn validate_bet_params(side_or_type: u8, target: u8) -> Result<()> {
    require!(
        side_or_type == SIDE_UNDER || side_or_type == SIDE_OVER,
        ErrorCode::InvalidParameter
    );
    require!(
        (MIN_TARGET..=MAX_TARGET).contains(&target),
        ErrorCode::InvalidParameter
    );
    Ok(())
}

pub fn validate_outcome(outcome: u8) -> Result<()> {
    require!(
        (MIN_ROLL..=MAX_ROLL).contains(&outcome),
        ErrorCode::InvalidParameter
    );
    Ok(())
}

/// Under wins below the target, over wins above it. A roll equal to the
/// target always loses.
pub fn is_win(side_or_type: u8, target: u8, outcome: u8) -> bool {
    match side_or_type {
        SIDE_UNDER => outcome < target,
        SIDE_OVER => outcome > target,
        _ => false,
    }
}

/// Size of the winning range for a side and target.
pub fn winning_odds(side_or_type: u8, target: u8) -> u64 {
    match side_or_type {
        SIDE_UNDER => u64::from(target.saturating_sub(1)),
        SIDE_OVER => u64::from(MAX_ROLL.saturating_sub(target)),
        _ => 0,
    }
}

/// `floor(entry_amount * rtp_bps / (10000 * odds))` on a win, 0 on a loss.
///
/// The product is taken in `u128` so no input can overflow before the
/// division. A quotient wider than `u64` saturates.
pub fn compute_payout(
    entry_amount: u64,
    side_or_type: u8,
    target: u8,
    outcome: u8,
    rtp_bps: u64,
) -> u64 {
    if !is_win(side_or_type, target, outcome) {
        return 0;
    }
    let odds = winning_odds(side_or_type, target);
    if odds == 0 {
        return 0;
    }
    let numerator = u128::from(entry_amount) * u128::from(rtp_bps);
    let denominator = u128::from(BPS_DENOMINATOR) * u128::from(odds);
    u64::try_from(numerator / denominator).unwrap_or(u64::MAX)
}
