//! Linked business-goal sliders.
//!
//! Moving one goal to `v` hands `100 - v` to the other two in proportion to
//! their current values. The first partner gets `round(old * scale)`, the
//! second takes whatever is left so the total lands on exactly 100.
//!
//! | dragged        | rounded        | absorbs remainder |
//! |----------------|----------------|-------------------|
//! | time to market | cost           | flexibility       |
//! | cost           | time to market | flexibility       |
//! | flexibility    | time to market | cost              |
//!
//! When both partners are 0 the scale falls back to 0.5, which still rounds
//! the first partner to 0 and leaves the whole remainder to the second.

use crate::answers::{check_percent, BusinessGoal, BusinessWeights, BUSINESS_TOTAL};
use crate::error::EngineError;

/// Scale used when the two partner goals are both zero.
pub const EMPTY_PARTNERS_SCALE: f64 = 0.5;

/// The (rounded, absorbing) partners of a dragged goal.
pub fn partners(goal: BusinessGoal) -> (BusinessGoal, BusinessGoal) {
    match goal {
        BusinessGoal::TimeToMarket => (BusinessGoal::Cost, BusinessGoal::Flexibility),
        BusinessGoal::Cost => (BusinessGoal::TimeToMarket, BusinessGoal::Flexibility),
        BusinessGoal::Flexibility => (BusinessGoal::TimeToMarket, BusinessGoal::Cost),
    }
}

/// Set `goal` to `value` and redistribute the rest.
pub fn rebalance(
    weights: BusinessWeights,
    goal: BusinessGoal,
    value: u8,
) -> Result<BusinessWeights, EngineError> {
    let value = check_percent(goal.key(), u32::from(value))?;
    let remaining = BUSINESS_TOTAL - u32::from(value);

    let (rounded_goal, absorbing_goal) = partners(goal);
    let rounded_old = f64::from(weights.get(rounded_goal));
    let other_sum = u32::from(weights.get(rounded_goal)) + u32::from(weights.get(absorbing_goal));

    let scale = if other_sum > 0 {
        f64::from(remaining) / f64::from(other_sum)
    } else {
        EMPTY_PARTNERS_SCALE
    };

    // rounded_old <= other_sum, so this never exceeds `remaining`.
    let rounded = ((rounded_old * scale).round() as u32).min(remaining);
    let absorbed = remaining - rounded;

    let mut next = weights;
    set(&mut next, goal, value);
    set(&mut next, rounded_goal, rounded as u8);
    set(&mut next, absorbing_goal, absorbed as u8);

    log::trace!(
        "rebalance {} -> {}: {:?} => {:?}",
        goal.key(),
        value,
        weights,
        next
    );
    Ok(next)
}

fn set(weights: &mut BusinessWeights, goal: BusinessGoal, value: u8) {
    match goal {
        BusinessGoal::TimeToMarket => weights.time_to_market = value,
        BusinessGoal::Cost => weights.cost = value,
        BusinessGoal::Flexibility => weights.flexibility = value,
    }
}
