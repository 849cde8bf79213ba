use anchor_lang::prelude::*;

use crate::events::RebalanceExecuted;
use crate::instructions::evaluate::{evaluate, Decision};
use crate::instructions::execute_rebalance::execute;
use crate::state::{Allocation, Pool, Registry, RebalanceProposal};

#[derive(Accounts)]
pub struct Poll<'info> {
    #[account(
        mut,
        seeds = [b"pool", pool.operator.as_ref()],
        bump = pool.bump
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

    /// Any keeper may drive the control loop; the profitability and interval
    /// gates make the call safe to spam.
    pub caller: Signer<'info>,
}

/// One control-loop pass: evaluate, and execute when a proposal is ready.
/// While paused this is a no-op, never an error.
pub fn poll_once(
    pool: &mut Pool,
    registry: &mut Registry,
    allocation: &mut Allocation,
    now: i64,
) -> Result<Option<(RebalanceProposal, u64)>> {
    if pool.paused {
        return Ok(None);
    }

    match evaluate(pool, registry, allocation, now) {
        Decision::Skip(reason) => {
            msg!("rebalance skipped: {}", reason.as_str());
            Ok(None)
        }
        Decision::Ready(proposal) => {
            let received = execute(pool, registry, allocation, &proposal, now)?;
            Ok(Some((proposal, received)))
        }
    }
}

pub fn poll(ctx: Context<Poll>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool_key = ctx.accounts.pool.key();

    if ctx.accounts.pool.paused {
        msg!("pool paused, nothing to do");
        return Ok(());
    }

    let outcome = poll_once(
        &mut ctx.accounts.pool,
        &mut ctx.accounts.registry,
        &mut ctx.accounts.allocation,
        now,
    )?;

    if let Some((proposal, received)) = outcome {
        let pool = &ctx.accounts.pool;
        emit!(RebalanceExecuted {
            pool: pool_key,
            source: proposal.source,
            destination: proposal.destination,
            amount_withdrawn: proposal.amount,
            amount_received: received,
            estimated_cost: proposal.estimated_cost,
            rebalance_count: pool.rebalance_count,
            timestamp: now,
        });
        msg!(
            "rebalanced {} -> {}: moved {}, received {}",
            proposal.source,
            proposal.destination,
            proposal.amount,
            received
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterKind;
    use crate::constants::DEFAULT_REBALANCE_INTERVAL;
    use crate::state::ProtocolEntry;

    fn entry(id: Pubkey, rate: u64, pool_balance: u64) -> ProtocolEntry {
        ProtocolEntry {
            protocol_id: id,
            adapter: AdapterKind::Lending {
                market: Pubkey::new_unique(),
                reserve: Pubkey::new_unique(),
                withdraw_fee_bps: 0,
            },
            rate_bps: rate,
            tvl_estimate: pool_balance,
            pool_balance,
            last_update: 0,
            active: true,
        }
    }

    fn profitable_setup() -> (Pool, Registry, Allocation, Pubkey, Pubkey) {
        let src_id = Pubkey::new_unique();
        let dst_id = Pubkey::new_unique();
        let pool = Pool {
            operator: Pubkey::new_unique(),
            asset_mint: Pubkey::new_unique(),
            vault_token_account: Pubkey::new_unique(),
            total_deposits: 100_000_000,
            total_shares: 100_000_000,
            rebalance_interval: DEFAULT_REBALANCE_INTERVAL,
            last_rebalance: 0,
            rebalance_count: 0,
            cost_per_unit: 0,
            paused: false,
            created_at: 0,
            bump: 255,
        };
        let registry = Registry {
            pool: Pubkey::new_unique(),
            entries: vec![entry(src_id, 500, 100_000_000), entry(dst_id, 600, 0)],
            bump: 254,
        };
        let allocation = Allocation {
            pool: Pubkey::new_unique(),
            protocol_id: src_id,
            deployed_amount: 100_000_000,
            last_rate_bps: 500,
            updated_at: 0,
            bump: 253,
        };
        (pool, registry, allocation, src_id, dst_id)
    }

    #[test]
    fn paused_polling_changes_nothing() {
        let (mut pool, mut registry, mut allocation, src_id, _) = profitable_setup();
        pool.paused = true;

        for tick in 0..5 {
            let outcome = poll_once(
                &mut pool,
                &mut registry,
                &mut allocation,
                DEFAULT_REBALANCE_INTERVAL + tick,
            )
            .unwrap();
            assert!(outcome.is_none());
        }

        assert_eq!(pool.last_rebalance, 0);
        assert_eq!(pool.rebalance_count, 0);
        assert_eq!(allocation.protocol_id, src_id);
        assert_eq!(allocation.deployed_amount, 100_000_000);
    }

    #[test]
    fn poll_executes_once_then_waits_for_the_interval() {
        let (mut pool, mut registry, mut allocation, _, dst_id) = profitable_setup();

        let first = poll_once(
            &mut pool,
            &mut registry,
            &mut allocation,
            DEFAULT_REBALANCE_INTERVAL,
        )
        .unwrap();
        assert!(first.is_some());
        assert_eq!(allocation.protocol_id, dst_id);
        assert_eq!(pool.last_rebalance, DEFAULT_REBALANCE_INTERVAL);

        // A second poll inside the fresh window can never produce another
        // execution, even if rates still look attractive.
        registry.find_mut(&dst_id).unwrap().rate_bps = 400;
        let second = poll_once(
            &mut pool,
            &mut registry,
            &mut allocation,
            DEFAULT_REBALANCE_INTERVAL + 1,
        )
        .unwrap();
        assert!(second.is_none());
        assert_eq!(pool.rebalance_count, 1);
    }

    #[test]
    fn unpausing_resumes_normal_operation() {
        let (mut pool, mut registry, mut allocation, _, dst_id) = profitable_setup();
        pool.paused = true;
        assert!(poll_once(
            &mut pool,
            &mut registry,
            &mut allocation,
            DEFAULT_REBALANCE_INTERVAL
        )
        .unwrap()
        .is_none());

        pool.paused = false;
        let outcome = poll_once(
            &mut pool,
            &mut registry,
            &mut allocation,
            DEFAULT_REBALANCE_INTERVAL,
        )
        .unwrap();
        assert!(outcome.is_some());
        assert_eq!(allocation.protocol_id, dst_id);
    }
}
