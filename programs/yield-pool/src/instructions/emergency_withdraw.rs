use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::error::ErrorCode;
use crate::events::EmergencyWithdrawal;
use crate::instructions::withdraw::transfer_from_vault;
use crate::state::{Pool, Position};

#[derive(Accounts)]
pub struct EmergencyWithdraw<'info> {
    #[account(
        mut,
        seeds = [b"pool", pool.operator.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        seeds = [b"position", pool.key().as_ref(), depositor.key().as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,

    #[account(address = pool.asset_mint @ ErrorCode::InvalidAssetMint)]
    pub asset_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = asset_mint,
        token::authority = depositor,
        token::token_program = token_program
    )]
    pub depositor_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, address = pool.vault_token_account)]
    pub pool_vault: InterfaceAccount<'info, TokenAccount>,

    pub depositor: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Redeems 100% of the caller's shares unconditionally. Works while paused
/// and regardless of any pending rebalance state.
pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let shares = ctx.accounts.position.shares;
    require!(shares > 0, ErrorCode::NoPosition);

    let amount = ctx.accounts.pool.amount_for_shares(shares)?;

    transfer_from_vault(
        &ctx.accounts.pool,
        &ctx.accounts.pool_vault,
        &ctx.accounts.asset_mint,
        &ctx.accounts.depositor_token_account,
        &ctx.accounts.token_program,
        amount,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.record_withdrawal(amount, shares)?;
    ctx.accounts.position.apply_withdrawal(shares, now)?;

    emit!(EmergencyWithdrawal {
        pool: pool.key(),
        depositor: ctx.accounts.depositor.key(),
        shares_burned: shares,
        amount_out: amount,
        timestamp: now,
    });
    msg!(
        "emergency withdraw: depositor={}, shares={}, amount={}",
        ctx.accounts.depositor.key(),
        shares,
        amount
    );

    Ok(())
}
