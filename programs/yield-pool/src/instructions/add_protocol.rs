use anchor_lang::prelude::*;

use crate::adapter::AdapterKind;
use crate::constants::MAX_PROTOCOLS;
use crate::error::ErrorCode;
use crate::events::ProtocolRegistered;
use crate::state::{Pool, ProtocolEntry, Registry};

#[derive(Accounts)]
pub struct AddProtocol<'info> {
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

pub fn add_protocol(ctx: Context<AddProtocol>, protocol_id: Pubkey, adapter: AdapterKind) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let registry = &mut ctx.accounts.registry;

    require!(protocol_id != Pubkey::default(), ErrorCode::InvalidProtocolId);
    adapter.validate()?;
    require!(registry.find(&protocol_id).is_none(), ErrorCode::DuplicateProtocol);
    require!(registry.entries.len() < MAX_PROTOCOLS, ErrorCode::RegistryFull);

    registry.entries.push(ProtocolEntry {
        protocol_id,
        adapter,
        rate_bps: 0,
        tvl_estimate: 0,
        pool_balance: 0,
        last_update: now,
        active: true,
    });

    emit!(ProtocolRegistered {
        pool: ctx.accounts.pool.key(),
        protocol_id,
        venue: adapter.venue(),
        timestamp: now,
    });
    msg!(
        "protocol registered: id={}, kind={}",
        protocol_id,
        adapter.name()
    );

    Ok(())
}
