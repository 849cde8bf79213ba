use anchor_lang::prelude::*;

use crate::events::GuardrailsUpdated;
use crate::state::{Guardrails, Pool};

#[derive(Accounts)]
pub struct SetGuardrails<'info> {
    #[account(
        seeds = [b"pool", pool.operator.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = 8 + Guardrails::INIT_SPACE,
        seeds = [b"guardrails", pool.key().as_ref(), depositor.key().as_ref()],
        bump
    )]
    pub guardrails: Account<'info, Guardrails>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn set_guardrails(
    ctx: Context<SetGuardrails>,
    min_yield_bps: u64,
    max_slippage_bps: u64,
    max_cost_ceiling: u64,
    active: bool,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    Guardrails::validate(min_yield_bps, max_slippage_bps)?;

    let guardrails = &mut ctx.accounts.guardrails;
    guardrails.pool = ctx.accounts.pool.key();
    guardrails.depositor = ctx.accounts.depositor.key();
    guardrails.min_yield_bps = min_yield_bps;
    guardrails.max_slippage_bps = max_slippage_bps;
    guardrails.max_cost_ceiling = max_cost_ceiling;
    guardrails.active = active;
    guardrails.updated_at = now;
    guardrails.bump = ctx.bumps.guardrails;

    emit!(GuardrailsUpdated {
        pool: guardrails.pool,
        depositor: guardrails.depositor,
        min_yield_bps,
        max_slippage_bps,
        max_cost_ceiling,
        active,
        timestamp: now,
    });

    Ok(())
}
