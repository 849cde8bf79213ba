//! Fixed-point scales and pool-wide limits.

/// Basis-point scale shared by rates, improvements and slippage tolerances.
pub const RATE_SCALE: u64 = 10_000;

/// Smallest accepted deposit (1 USDC at 6 decimals).
pub const MIN_DEPOSIT: u64 = 1_000_000;

/// Yield rates above 500% are treated as reporting errors.
pub const MAX_RATE_BPS: u64 = 50_000;

/// Hard cap on registry entries; protocols are deactivated, never removed.
pub const MAX_PROTOCOLS: usize = 16;

/// Minimum relative improvement (0.5%) before a move is considered.
pub const MIN_IMPROVEMENT_BPS: u64 = 50;

/// Default slippage tolerance applied to the executor's minimum-amount-out.
pub const DEFAULT_MAX_SLIPPAGE_BPS: u64 = 50;

/// Expected profit must exceed this multiple of the estimated execution cost.
pub const PROFIT_COST_MULTIPLIER: u64 = 2;

/// Base work units consumed by a full withdraw-and-redeposit cycle.
pub const REBALANCE_COST_UNITS: u64 = 5;

/// Flat buffer added on top of the unit cost model.
pub const COST_SAFETY_BUFFER: u64 = 100;

/// Rebalance intervals under one day are refused.
pub const MIN_REBALANCE_INTERVAL: i64 = 86_400;

/// Interval used when the operator has no stronger opinion.
pub const DEFAULT_REBALANCE_INTERVAL: i64 = 7 * 86_400;

/// Adapter exit fees above 10% are assumed to be misconfigured.
pub const MAX_EXIT_FEE_BPS: u16 = 1_000;
