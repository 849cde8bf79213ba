use anchor_lang::prelude::*;

use crate::constants::MAX_RATE_BPS;
use crate::error::ErrorCode;
use crate::events::RateRefreshed;
use crate::state::{Pool, Registry};

#[derive(Accounts)]
pub struct UpdateRate<'info> {
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

    pub operator: Signer<'info>,
}

pub fn update_rate(ctx: Context<UpdateRate>, protocol_id: Pubkey, new_rate: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    require!(new_rate <= MAX_RATE_BPS, ErrorCode::ExcessiveRate);

    let registry = &mut ctx.accounts.registry;
    let entry = registry
        .find_mut(&protocol_id)
        .ok_or(ErrorCode::ProtocolNotActive)?;
    require!(entry.active, ErrorCode::ProtocolNotActive);

    let old_rate = entry.rate_bps;
    entry.rate_bps = new_rate;
    entry.last_update = now;

    emit!(RateRefreshed {
        pool: ctx.accounts.pool.key(),
        protocol_id,
        old_rate_bps: old_rate,
        new_rate_bps: new_rate,
        timestamp: now,
    });
    msg!(
        "rate refreshed: protocol={}, {} -> {} bps",
        protocol_id,
        old_rate,
        new_rate
    );

    Ok(())
}
