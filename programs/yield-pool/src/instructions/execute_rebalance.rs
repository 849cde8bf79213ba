use anchor_lang::prelude::*;

use crate::adapter::YieldSource;
use crate::error::ErrorCode;
use crate::state::{Allocation, Pool, Registry, RebalanceProposal};

/// Moves capital between two adapters with the slippage check in between.
/// Returns the amount actually received at the destination.
pub fn transfer_between<S: YieldSource, D: YieldSource>(
    source: &mut S,
    destination: &mut D,
    amount: u64,
    min_amount_out: u64,
) -> Result<u64> {
    let received = source.withdraw(amount)?;
    require!(received >= min_amount_out, ErrorCode::SlippageExceeded);
    destination.deposit(received)?;
    Ok(received)
}

/// Runs both adapter legs, then commits the allocation. The commit is
/// strictly ordered after the legs so an error on either one leaves the
/// allocation tracker at the pre-execution protocol.
pub fn execute_move<S: YieldSource, D: YieldSource>(
    allocation: &mut Allocation,
    source: &mut S,
    destination: &mut D,
    proposal: &RebalanceProposal,
    now: i64,
) -> Result<u64> {
    let received = transfer_between(source, destination, proposal.amount, proposal.min_amount_out)?;

    allocation.protocol_id = proposal.destination;
    allocation.deployed_amount = received;
    allocation.last_rate_bps = destination.current_rate();
    allocation.updated_at = now;

    Ok(received)
}

/// Full execution against the registry. Both protocols are re-validated here
/// because registry state may have changed since evaluation.
pub fn execute(
    pool: &mut Pool,
    registry: &mut Registry,
    allocation: &mut Allocation,
    proposal: &RebalanceProposal,
    now: i64,
) -> Result<u64> {
    let source_active = registry.find(&proposal.source).map(|e| e.active);
    let destination_active = registry.find(&proposal.destination).map(|e| e.active);
    require!(source_active == Some(true), ErrorCode::ProtocolNotActive);
    require!(destination_active == Some(true), ErrorCode::ProtocolNotActive);

    let (source, destination) = registry.entry_pair_mut(&proposal.source, &proposal.destination)?;
    let received = execute_move(allocation, source, destination, proposal, now)?;

    pool.last_rebalance = now;
    pool.rebalance_count = pool
        .rebalance_count
        .checked_add(1)
        .ok_or(ErrorCode::AmountOverflow)?;

    Ok(received)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterKind;
    use crate::constants::DEFAULT_REBALANCE_INTERVAL;
    use crate::state::ProtocolEntry;

    struct FailingVenue;

    impl YieldSource for FailingVenue {
        fn deposit(&mut self, _amount: u64) -> Result<u64> {
            Err(ErrorCode::AdapterInsufficientBalance.into())
        }
        fn withdraw(&mut self, _amount: u64) -> Result<u64> {
            Err(ErrorCode::AdapterInsufficientBalance.into())
        }
        fn current_rate(&self) -> u64 {
            0
        }
        fn balance_of(&self, _owner: &Pubkey) -> u64 {
            0
        }
        fn total_value_locked(&self) -> u64 {
            0
        }
    }

    fn entry(id: Pubkey, rate: u64, fee_bps: u16, pool_balance: u64) -> ProtocolEntry {
        ProtocolEntry {
            protocol_id: id,
            adapter: AdapterKind::Lending {
                market: Pubkey::new_unique(),
                reserve: Pubkey::new_unique(),
                withdraw_fee_bps: fee_bps,
            },
            rate_bps: rate,
            tvl_estimate: pool_balance,
            pool_balance,
            last_update: 0,
            active: true,
        }
    }

    fn allocation_on(protocol_id: Pubkey, amount: u64, rate: u64) -> Allocation {
        Allocation {
            pool: Pubkey::new_unique(),
            protocol_id,
            deployed_amount: amount,
            last_rate_bps: rate,
            updated_at: 0,
            bump: 253,
        }
    }

    fn test_pool() -> Pool {
        Pool {
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
        }
    }

    fn proposal(source: Pubkey, destination: Pubkey, amount: u64) -> RebalanceProposal {
        RebalanceProposal {
            source,
            destination,
            amount,
            min_amount_out: amount - amount / 200,
            estimated_cost: 400,
        }
    }

    #[test]
    fn successful_execution_moves_the_allocation() {
        let src_id = Pubkey::new_unique();
        let dst_id = Pubkey::new_unique();
        let mut pool = test_pool();
        let mut registry = Registry {
            pool: Pubkey::new_unique(),
            entries: vec![entry(src_id, 500, 0, 100_000_000), entry(dst_id, 510, 0, 0)],
            bump: 254,
        };
        let mut allocation = allocation_on(src_id, 100_000_000, 500);

        let received = execute(
            &mut pool,
            &mut registry,
            &mut allocation,
            &proposal(src_id, dst_id, 100_000_000),
            1_000,
        )
        .unwrap();

        assert_eq!(received, 100_000_000);
        assert_eq!(allocation.protocol_id, dst_id);
        assert_eq!(allocation.deployed_amount, 100_000_000);
        assert_eq!(allocation.last_rate_bps, 510);
        assert_eq!(pool.last_rebalance, 1_000);
        assert_eq!(pool.rebalance_count, 1);
        assert_eq!(registry.find(&src_id).unwrap().pool_balance, 0);
        assert_eq!(registry.find(&dst_id).unwrap().pool_balance, 100_000_000);
    }

    #[test]
    fn slippage_breach_aborts_without_allocation_change() {
        let src_id = Pubkey::new_unique();
        let dst_id = Pubkey::new_unique();
        let mut pool = test_pool();
        // 1% exit fee against a 0.5% tolerance.
        let mut registry = Registry {
            pool: Pubkey::new_unique(),
            entries: vec![entry(src_id, 500, 100, 100_000_000), entry(dst_id, 510, 0, 0)],
            bump: 254,
        };
        let mut allocation = allocation_on(src_id, 100_000_000, 500);

        let result = execute(
            &mut pool,
            &mut registry,
            &mut allocation,
            &proposal(src_id, dst_id, 100_000_000),
            1_000,
        );

        assert!(result.is_err());
        assert_eq!(allocation.protocol_id, src_id);
        assert_eq!(allocation.deployed_amount, 100_000_000);
        assert_eq!(pool.last_rebalance, 0);
        assert_eq!(pool.rebalance_count, 0);
    }

    #[test]
    fn destination_failure_after_withdrawal_keeps_prior_allocation() {
        let src_id = Pubkey::new_unique();
        let dst_id = Pubkey::new_unique();
        let mut source = entry(src_id, 500, 0, 100_000_000);
        let mut destination = FailingVenue;
        let mut allocation = allocation_on(src_id, 100_000_000, 500);

        let result = execute_move(
            &mut allocation,
            &mut source,
            &mut destination,
            &proposal(src_id, dst_id, 100_000_000),
            1_000,
        );

        assert!(result.is_err());
        assert_eq!(allocation.protocol_id, src_id);
        assert_eq!(allocation.deployed_amount, 100_000_000);
        assert_eq!(allocation.last_rate_bps, 500);
    }

    #[test]
    fn execution_revalidates_registry_state() {
        let src_id = Pubkey::new_unique();
        let dst_id = Pubkey::new_unique();
        let mut pool = test_pool();
        let mut registry = Registry {
            pool: Pubkey::new_unique(),
            entries: vec![entry(src_id, 500, 0, 100_000_000), entry(dst_id, 510, 0, 0)],
            bump: 254,
        };
        // Destination deactivated between evaluation and execution.
        registry.find_mut(&dst_id).unwrap().active = false;
        let mut allocation = allocation_on(src_id, 100_000_000, 500);

        let result = execute(
            &mut pool,
            &mut registry,
            &mut allocation,
            &proposal(src_id, dst_id, 100_000_000),
            1_000,
        );

        assert!(result.is_err());
        assert_eq!(allocation.protocol_id, src_id);
        assert_eq!(registry.find(&src_id).unwrap().pool_balance, 100_000_000);
    }
}
