use anchor_lang::prelude::*;

use crate::adapter::YieldSource;
use crate::error::ErrorCode;
use crate::events::CapitalDeployed;
use crate::state::{Allocation, Pool, Registry};

#[derive(Accounts)]
pub struct DeployCapital<'info> {
    #[account(
        seeds = [b"pool", pool.operator.as_ref()],
        bump = pool.bump,
        has_one = operator @ ErrorCode::Unauthorized
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [b"registry", pool.key().as_ref()],
        bump = registry.bump
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        mut,
        seeds = [b"allocation", pool.key().as_ref()],
        bump = allocation.bump
    )]
    pub allocation: Account<'info, Allocation>,

    pub operator: Signer<'info>,
}

/// Initial deployment of the pooled capital. Rebalancing takes over from
/// here; this only runs while nothing is deployed.
pub fn deploy_capital(ctx: Context<DeployCapital>, protocol_id: Pubkey) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let allocation = &mut ctx.accounts.allocation;
    require!(!allocation.is_deployed(), ErrorCode::AlreadyDeployed);

    let amount = ctx.accounts.pool.total_deposits;
    require!(amount > 0, ErrorCode::PoolEmpty);

    let registry = &mut ctx.accounts.registry;
    let entry = registry
        .find_mut(&protocol_id)
        .ok_or(ErrorCode::ProtocolNotFound)?;
    require!(entry.active, ErrorCode::ProtocolNotActive);

    entry.deposit(amount)?;
    let rate_bps = entry.rate_bps;

    allocation.protocol_id = protocol_id;
    allocation.deployed_amount = amount;
    allocation.last_rate_bps = rate_bps;
    allocation.updated_at = now;

    emit!(CapitalDeployed {
        pool: ctx.accounts.pool.key(),
        protocol_id,
        amount,
        rate_bps,
        timestamp: now,
    });
    msg!("deployed {} to protocol {}", amount, protocol_id);

    Ok(())
}
