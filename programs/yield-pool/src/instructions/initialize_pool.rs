use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::events::PoolInitialized;
use crate::state::{Allocation, Pool, Registry};

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = operator,
        space = 8 + Pool::INIT_SPACE,
        seeds = [b"pool", operator.key().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = operator,
        space = 8 + Registry::INIT_SPACE,
        seeds = [b"registry", pool.key().as_ref()],
        bump
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        init,
        payer = operator,
        space = 8 + Allocation::INIT_SPACE,
        seeds = [b"allocation", pool.key().as_ref()],
        bump
    )]
    pub allocation: Account<'info, Allocation>,

    pub asset_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = operator,
        seeds = [b"pool_vault", pool.key().as_ref()],
        bump,
        token::mint = asset_mint,
        token::authority = pool,
        token::token_program = token_program
    )]
    pub pool_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn initialize_pool(
    ctx: Context<InitializePool>,
    rebalance_interval: i64,
    cost_per_unit: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    Pool::validate_interval(rebalance_interval)?;

    let pool = &mut ctx.accounts.pool;
    pool.operator = ctx.accounts.operator.key();
    pool.asset_mint = ctx.accounts.asset_mint.key();
    pool.vault_token_account = ctx.accounts.pool_vault.key();
    pool.total_deposits = 0;
    pool.total_shares = 0;
    pool.rebalance_interval = rebalance_interval;
    pool.last_rebalance = now;
    pool.rebalance_count = 0;
    pool.cost_per_unit = cost_per_unit;
    pool.paused = false;
    pool.created_at = now;
    pool.bump = ctx.bumps.pool;

    let registry = &mut ctx.accounts.registry;
    registry.pool = pool.key();
    registry.entries = Vec::new();
    registry.bump = ctx.bumps.registry;

    let allocation = &mut ctx.accounts.allocation;
    allocation.pool = pool.key();
    allocation.protocol_id = Pubkey::default();
    allocation.deployed_amount = 0;
    allocation.last_rate_bps = 0;
    allocation.updated_at = now;
    allocation.bump = ctx.bumps.allocation;

    emit!(PoolInitialized {
        pool: pool.key(),
        operator: pool.operator,
        asset_mint: pool.asset_mint,
        rebalance_interval,
        timestamp: now,
    });
    msg!(
        "pool initialized: operator={}, interval={}s",
        pool.operator,
        rebalance_interval
    );

    Ok(())
}
