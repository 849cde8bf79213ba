use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::error::ErrorCode;
use crate::events::SharesRedeemed;
use crate::state::{Pool, Position};

#[derive(Accounts)]
pub struct Withdraw<'info> {
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

/// Transfers pool funds out, signed with the pool PDA seeds.
pub(crate) fn transfer_from_vault<'info>(
    pool: &Account<'info, Pool>,
    pool_vault: &InterfaceAccount<'info, TokenAccount>,
    asset_mint: &InterfaceAccount<'info, Mint>,
    destination: &InterfaceAccount<'info, TokenAccount>,
    token_program: &Interface<'info, TokenInterface>,
    amount: u64,
) -> Result<()> {
    let operator = pool.operator;
    let seeds: &[&[u8]] = &[b"pool", operator.as_ref(), &[pool.bump]];
    transfer_checked(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            TransferChecked {
                from: pool_vault.to_account_info(),
                mint: asset_mint.to_account_info(),
                to: destination.to_account_info(),
                authority: pool.to_account_info(),
            },
            &[seeds],
        ),
        amount,
        asset_mint.decimals,
    )
}

pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    require!(shares > 0, ErrorCode::InvalidAmount);
    require!(
        shares <= ctx.accounts.position.shares,
        ErrorCode::InsufficientShares
    );

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

    emit!(SharesRedeemed {
        pool: pool.key(),
        depositor: ctx.accounts.depositor.key(),
        shares_burned: shares,
        amount_out: amount,
        total_deposits: pool.total_deposits,
        total_shares: pool.total_shares,
        timestamp: now,
    });
    msg!(
        "withdraw: depositor={}, shares={}, amount={}",
        ctx.accounts.depositor.key(),
        shares,
        amount
    );

    Ok(())
}
