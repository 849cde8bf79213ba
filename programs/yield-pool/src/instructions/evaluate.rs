use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{Allocation, Pool, Registry, RebalanceProposal};

/// Outcome of one decision-engine pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    Skip(SkipReason),
    Ready(RebalanceProposal),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SkipReason {
    IntervalNotElapsed,
    NoActiveProtocols,
    NothingDeployed,
    NoBetterRate,
    ImprovementTooSmall,
    CostExceedsProfit,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::IntervalNotElapsed => "interval not elapsed",
            SkipReason::NoActiveProtocols => "no active protocols",
            SkipReason::NothingDeployed => "nothing deployed",
            SkipReason::NoBetterRate => "no better rate available",
            SkipReason::ImprovementTooSmall => "improvement below threshold",
            SkipReason::CostExceedsProfit => "expected profit does not cover costs",
        }
    }
}

/// Fixed cost model: base work units at the current unit cost, plus a flat
/// safety buffer against cost volatility.
pub fn estimate_execution_cost(cost_per_unit: u64) -> u64 {
    REBALANCE_COST_UNITS
        .saturating_mul(cost_per_unit)
        .saturating_add(COST_SAFETY_BUFFER)
}

/// Pure, read-only evaluation of whether moving the pooled capital is worth
/// it. Idempotent for unchanged inputs; the checks run in a fixed order and
/// the first failing one wins.
pub fn evaluate(pool: &Pool, registry: &Registry, allocation: &Allocation, now: i64) -> Decision {
    if !pool.rebalance_due(now) {
        return Decision::Skip(SkipReason::IntervalNotElapsed);
    }

    let Some(best) = registry.best_protocol() else {
        return Decision::Skip(SkipReason::NoActiveProtocols);
    };

    if !allocation.is_deployed() || allocation.deployed_amount == 0 {
        return Decision::Skip(SkipReason::NothingDeployed);
    }

    // Freshest registry rate for the current venue; the allocation snapshot
    // only backstops a deactivated-and-pruned entry.
    let current_rate = registry
        .find(&allocation.protocol_id)
        .map(|e| e.rate_bps)
        .unwrap_or(allocation.last_rate_bps);

    if best.protocol_id == allocation.protocol_id || best.rate_bps <= current_rate {
        return Decision::Skip(SkipReason::NoBetterRate);
    }

    // A venue reporting zero while a positive-rate alternative exists is a
    // maximal relative improvement.
    let improvement = if current_rate == 0 {
        RATE_SCALE
    } else {
        ((best.rate_bps - current_rate) as u128 * RATE_SCALE as u128 / current_rate as u128) as u64
    };

    if improvement < MIN_IMPROVEMENT_BPS {
        return Decision::Skip(SkipReason::ImprovementTooSmall);
    }

    let estimated_cost = estimate_execution_cost(pool.cost_per_unit);
    let expected_profit =
        (allocation.deployed_amount as u128 * improvement as u128 / RATE_SCALE as u128) as u64;

    if expected_profit as u128 <= PROFIT_COST_MULTIPLIER as u128 * estimated_cost as u128 {
        return Decision::Skip(SkipReason::CostExceedsProfit);
    }

    let amount = allocation.deployed_amount;
    let min_amount_out =
        (amount as u128 * (RATE_SCALE - DEFAULT_MAX_SLIPPAGE_BPS) as u128 / RATE_SCALE as u128) as u64;

    Decision::Ready(RebalanceProposal {
        source: allocation.protocol_id,
        destination: best.protocol_id,
        amount,
        min_amount_out,
        estimated_cost,
    })
}
