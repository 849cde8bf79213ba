use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::events::{ExecutionCostUpdated, PauseToggled, RebalanceIntervalChanged};
use crate::state::Pool;

#[derive(Accounts)]
pub struct Configure<'info> {
    #[account(
        mut,
        seeds = [b"pool", pool.operator.as_ref()],
        bump = pool.bump,
        has_one = operator @ ErrorCode::Unauthorized
    )]
    pub pool: Account<'info, Pool>,

    pub operator: Signer<'info>,
}

pub fn set_rebalance_interval(ctx: Context<Configure>, interval: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    Pool::validate_interval(interval)?;

    let pool = &mut ctx.accounts.pool;
    let old_interval = pool.rebalance_interval;
    pool.rebalance_interval = interval;

    emit!(RebalanceIntervalChanged {
        pool: pool.key(),
        old_interval,
        new_interval: interval,
        timestamp: now,
    });

    Ok(())
}

pub fn set_cost_per_unit(ctx: Context<Configure>, cost_per_unit: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.pool;
    let old_cost = pool.cost_per_unit;
    pool.cost_per_unit = cost_per_unit;

    emit!(ExecutionCostUpdated {
        pool: pool.key(),
        old_cost_per_unit: old_cost,
        new_cost_per_unit: cost_per_unit,
        timestamp: now,
    });

    Ok(())
}

pub fn set_paused(ctx: Context<Configure>, paused: bool) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.pool;
    pool.paused = paused;

    emit!(PauseToggled {
        pool: pool.key(),
        paused,
        timestamp: now,
    });
    msg!("pool paused = {}", paused);

    Ok(())
}
