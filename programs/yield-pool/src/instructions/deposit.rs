use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::MIN_DEPOSIT;
use crate::error::ErrorCode;
use crate::events::DepositReceived;
use crate::state::{Guardrails, Pool, Position};

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        mut,
        seeds = [b"pool", pool.operator.as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [b"guardrails", pool.key().as_ref(), depositor.key().as_ref()],
        bump = guardrails.bump,
        constraint = guardrails.active @ ErrorCode::GuardrailsNotSet
    )]
    pub guardrails: Account<'info, Guardrails>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = 8 + Position::INIT_SPACE,
        seeds = [b"position", pool.key().as_ref(), depositor.key().as_ref()],
        bump
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

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    require!(amount >= MIN_DEPOSIT, ErrorCode::InvalidAmount);

    let shares = ctx.accounts.pool.shares_for_deposit(amount)?;
    require!(shares > 0, ErrorCode::InvalidAmount);

    transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.depositor_token_account.to_account_info(),
                mint: ctx.accounts.asset_mint.to_account_info(),
                to: ctx.accounts.pool_vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.asset_mint.decimals,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.record_deposit(amount, shares)?;

    let position = &mut ctx.accounts.position;
    if position.depositor == Pubkey::default() {
        position.pool = pool.key();
        position.depositor = ctx.accounts.depositor.key();
        position.bump = ctx.bumps.position;
    }
    position.apply_deposit(amount, shares, now)?;

    emit!(DepositReceived {
        pool: pool.key(),
        depositor: ctx.accounts.depositor.key(),
        amount,
        shares_minted: shares,
        total_deposits: pool.total_deposits,
        total_shares: pool.total_shares,
        timestamp: now,
    });
    msg!(
        "deposit: depositor={}, amount={}, shares={}",
        ctx.accounts.depositor.key(),
        amount,
        shares
    );

    Ok(())
}
