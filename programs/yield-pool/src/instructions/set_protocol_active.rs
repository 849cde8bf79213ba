use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::events::ProtocolStatusChanged;
use crate::state::{Pool, Registry};

#[derive(Accounts)]
pub struct SetProtocolActive<'info> {
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

/// Deactivation removes a protocol from best-rate selection but keeps its
/// entry and history readable.
pub fn set_protocol_active(
    ctx: Context<SetProtocolActive>,
    protocol_id: Pubkey,
    active: bool,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let registry = &mut ctx.accounts.registry;
    let entry = registry
        .find_mut(&protocol_id)
        .ok_or(ErrorCode::ProtocolNotFound)?;
    entry.active = active;
    entry.last_update = now;

    emit!(ProtocolStatusChanged {
        pool: ctx.accounts.pool.key(),
        protocol_id,
        active,
        timestamp: now,
    });

    Ok(())
}
