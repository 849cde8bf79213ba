pub mod adapter;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;

pub use adapter::*;
pub use instructions::*;
pub use state::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod yield_pool {
    use super::*;

    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        rebalance_interval: i64,
        cost_per_unit: u64,
    ) -> Result<()> {
        instructions::initialize_pool(ctx, rebalance_interval, cost_per_unit)
    }

    pub fn set_guardrails(
        ctx: Context<SetGuardrails>,
        min_yield_bps: u64,
        max_slippage_bps: u64,
        max_cost_ceiling: u64,
        active: bool,
    ) -> Result<()> {
        instructions::set_guardrails(ctx, min_yield_bps, max_slippage_bps, max_cost_ceiling, active)
    }

    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
        instructions::withdraw(ctx, shares)
    }

    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>) -> Result<()> {
        instructions::emergency_withdraw(ctx)
    }

    pub fn add_protocol(
        ctx: Context<AddProtocol>,
        protocol_id: Pubkey,
        adapter: AdapterKind,
    ) -> Result<()> {
        instructions::add_protocol(ctx, protocol_id, adapter)
    }

    pub fn update_rate(ctx: Context<UpdateRate>, protocol_id: Pubkey, new_rate: u64) -> Result<()> {
        instructions::update_rate(ctx, protocol_id, new_rate)
    }

    pub fn set_protocol_active(
        ctx: Context<SetProtocolActive>,
        protocol_id: Pubkey,
        active: bool,
    ) -> Result<()> {
        instructions::set_protocol_active(ctx, protocol_id, active)
    }

    pub fn set_rebalance_interval(ctx: Context<Configure>, interval: i64) -> Result<()> {
        instructions::set_rebalance_interval(ctx, interval)
    }

    pub fn set_cost_per_unit(ctx: Context<Configure>, cost_per_unit: u64) -> Result<()> {
        instructions::set_cost_per_unit(ctx, cost_per_unit)
    }

    pub fn set_paused(ctx: Context<Configure>, paused: bool) -> Result<()> {
        instructions::set_paused(ctx, paused)
    }

    pub fn deploy_capital(ctx: Context<DeployCapital>, protocol_id: Pubkey) -> Result<()> {
        instructions::deploy_capital(ctx, protocol_id)
    }

    pub fn poll(ctx: Context<Poll>) -> Result<()> {
        instructions::poll(ctx)
    }
}
