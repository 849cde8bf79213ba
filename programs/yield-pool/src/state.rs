use anchor_lang::prelude::*;

use crate::adapter::AdapterKind;
use crate::constants::*;
use crate::error::ErrorCode;

/// Pool-wide share ledger and control-loop configuration.
#[account]
#[derive(InitSpace, Debug)]
pub struct Pool {
    /// Operator authority for registry admission, configuration and pause.
    pub operator: Pubkey,
    /// The single fungible asset this pool accepts.
    pub asset_mint: Pubkey,
    /// Token account holding undeployed pool funds, owned by the pool PDA.
    pub vault_token_account: Pubkey,
    /// Current redeemable value held by the pool.
    pub total_deposits: u64,
    /// Sum of all issued shares.
    pub total_shares: u64,
    /// Minimum seconds between executed rebalances.
    pub rebalance_interval: i64,
    /// Unix timestamp of the last executed rebalance.
    pub last_rebalance: i64,
    /// Lifetime count of executed rebalances.
    pub rebalance_count: u64,
    /// Current cost-per-unit input to the execution cost model.
    pub cost_per_unit: u64,
    /// While paused, polling is a no-op; depositor operations stay open.
    pub paused: bool,
    pub created_at: i64,
    pub bump: u8,
}

impl Pool {
    pub fn validate_interval(interval: i64) -> Result<()> {
        require!(interval >= MIN_REBALANCE_INTERVAL, ErrorCode::InvalidRebalanceInterval);
        Ok(())
    }

    pub fn rebalance_due(&self, now: i64) -> bool {
        now.saturating_sub(self.last_rebalance) >= self.rebalance_interval
    }

    /// Shares minted for a deposit. First deposit bootstraps 1:1; later
    /// deposits truncate toward zero so no depositor can mint above their
    /// proportional claim.
    pub fn shares_for_deposit(&self, amount: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(amount);
        }
        let shares = (amount as u128)
            .checked_mul(self.total_shares as u128)
            .ok_or(ErrorCode::AmountOverflow)?
            .checked_div(self.total_deposits as u128)
            .ok_or(ErrorCode::PoolEmpty)?;
        Ok(shares as u64)
    }

    /// Redeemable value for a share count, truncating toward zero to match
    /// the deposit path.
    pub fn amount_for_shares(&self, shares: u64) -> Result<u64> {
        let amount = (shares as u128)
            .checked_mul(self.total_deposits as u128)
            .ok_or(ErrorCode::AmountOverflow)?
            .checked_div(self.total_shares as u128)
            .ok_or(ErrorCode::PoolEmpty)?;
        Ok(amount as u64)
    }

    pub fn record_deposit(&mut self, amount: u64, shares: u64) -> Result<()> {
        self.total_deposits = self
            .total_deposits
            .checked_add(amount)
            .ok_or(ErrorCode::AmountOverflow)?;
        self.total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(ErrorCode::AmountOverflow)?;
        Ok(())
    }

    pub fn record_withdrawal(&mut self, amount: u64, shares: u64) -> Result<()> {
        self.total_deposits = self
            .total_deposits
            .checked_sub(amount)
            .ok_or(ErrorCode::AmountOverflow)?;
        self.total_shares = self
            .total_shares
            .checked_sub(shares)
            .ok_or(ErrorCode::InsufficientShares)?;
        Ok(())
    }
}

/// Per-depositor claim on the pool.
#[account]
#[derive(InitSpace, Debug)]
pub struct Position {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    /// Net principal attributed to this position; zero iff `shares` is zero.
    pub principal_deposited: u64,
    pub shares: u64,
    pub last_deposit: i64,
    pub last_updated: i64,
    pub bump: u8,
}

impl Position {
    pub fn apply_deposit(&mut self, amount: u64, shares: u64, now: i64) -> Result<()> {
        self.principal_deposited = self
            .principal_deposited
            .checked_add(amount)
            .ok_or(ErrorCode::AmountOverflow)?;
        self.shares = self
            .shares
            .checked_add(shares)
            .ok_or(ErrorCode::AmountOverflow)?;
        self.last_deposit = now;
        self.last_updated = now;
        Ok(())
    }

    /// Burns shares and reduces principal proportionally; a full redemption
    /// zeroes the position.
    pub fn apply_withdrawal(&mut self, shares_burned: u64, now: i64) -> Result<()> {
        let remaining = self
            .shares
            .checked_sub(shares_burned)
            .ok_or(ErrorCode::InsufficientShares)?;
        self.principal_deposited = if remaining == 0 {
            0
        } else {
            (self.principal_deposited as u128 * remaining as u128 / self.shares as u128) as u64
        };
        self.shares = remaining;
        self.last_updated = now;
        Ok(())
    }
}

/// Per-depositor risk parameters. Recorded and gated at deposit time, but
/// deliberately not consulted by the pool-wide decision engine.
#[account]
#[derive(InitSpace, Debug)]
pub struct Guardrails {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub min_yield_bps: u64,
    pub max_slippage_bps: u64,
    pub max_cost_ceiling: u64,
    pub active: bool,
    pub updated_at: i64,
    pub bump: u8,
}

impl Guardrails {
    pub fn validate(min_yield_bps: u64, max_slippage_bps: u64) -> Result<()> {
        require!(min_yield_bps <= MAX_RATE_BPS, ErrorCode::InvalidGuardrails);
        require!(max_slippage_bps <= RATE_SCALE, ErrorCode::InvalidGuardrails);
        Ok(())
    }
}

/// One whitelisted yield source with its cached observations.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Debug)]
pub struct ProtocolEntry {
    pub protocol_id: Pubkey,
    pub adapter: AdapterKind,
    pub rate_bps: u64,
    pub tvl_estimate: u64,
    /// Amount this pool currently holds at the venue.
    pub pool_balance: u64,
    pub last_update: i64,
    pub active: bool,
}

/// Whitelist of yield sources, insertion order preserved for tie-breaking.
#[account]
#[derive(InitSpace, Debug)]
pub struct Registry {
    pub pool: Pubkey,
    #[max_len(16)]
    pub entries: Vec<ProtocolEntry>,
    pub bump: u8,
}

impl Registry {
    pub fn find(&self, protocol_id: &Pubkey) -> Option<&ProtocolEntry> {
        self.entries.iter().find(|e| e.protocol_id == *protocol_id)
    }

    pub fn find_mut(&mut self, protocol_id: &Pubkey) -> Option<&mut ProtocolEntry> {
        self.entries.iter_mut().find(|e| e.protocol_id == *protocol_id)
    }

    /// Active protocol with the strictly highest rate. Ties go to the entry
    /// registered first; `None` when no active protocols exist.
    pub fn best_protocol(&self) -> Option<&ProtocolEntry> {
        let mut best: Option<&ProtocolEntry> = None;
        for entry in self.entries.iter().filter(|e| e.active) {
            match best {
                Some(current) if entry.rate_bps <= current.rate_bps => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// Mutable access to a distinct (source, destination) pair.
    pub fn entry_pair_mut(
        &mut self,
        source: &Pubkey,
        destination: &Pubkey,
    ) -> Result<(&mut ProtocolEntry, &mut ProtocolEntry)> {
        require!(source != destination, ErrorCode::InvalidProtocolId);
        let src_idx = self
            .entries
            .iter()
            .position(|e| e.protocol_id == *source)
            .ok_or(ErrorCode::ProtocolNotFound)?;
        let dst_idx = self
            .entries
            .iter()
            .position(|e| e.protocol_id == *destination)
            .ok_or(ErrorCode::ProtocolNotFound)?;
        if src_idx < dst_idx {
            let (left, right) = self.entries.split_at_mut(dst_idx);
            Ok((&mut left[src_idx], &mut right[0]))
        } else {
            let (left, right) = self.entries.split_at_mut(src_idx);
            Ok((&mut right[0], &mut left[dst_idx]))
        }
    }
}

/// The single current assignment of pooled capital to one yield source.
/// `protocol_id == Pubkey::default()` means nothing is deployed.
#[account]
#[derive(InitSpace, Debug)]
pub struct Allocation {
    pub pool: Pubkey,
    pub protocol_id: Pubkey,
    pub deployed_amount: u64,
    /// Rate observed at the venue when the allocation was last updated.
    pub last_rate_bps: u64,
    pub updated_at: i64,
    pub bump: u8,
}

impl Allocation {
    pub fn is_deployed(&self) -> bool {
        self.protocol_id != Pubkey::default()
    }
}

/// Ephemeral output of the decision engine, consumed immediately by the
/// executor and never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct RebalanceProposal {
    pub source: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub min_amount_out: u64,
    pub estimated_cost: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_pool() -> Pool {
        Pool {
            operator: Pubkey::new_unique(),
            asset_mint: Pubkey::new_unique(),
            vault_token_account: Pubkey::new_unique(),
            total_deposits: 0,
            total_shares: 0,
            rebalance_interval: DEFAULT_REBALANCE_INTERVAL,
            last_rebalance: 0,
            rebalance_count: 0,
            cost_per_unit: 0,
            paused: false,
            created_at: 0,
            bump: 255,
        }
    }

    fn empty_position(pool: &Pool) -> Position {
        Position {
            pool: Pubkey::new_unique(),
            depositor: Pubkey::new_unique(),
            principal_deposited: 0,
            shares: 0,
            last_deposit: 0,
            last_updated: 0,
            bump: pool.bump,
        }
    }

    fn deposit(pool: &mut Pool, position: &mut Position, amount: u64) -> u64 {
        let shares = pool.shares_for_deposit(amount).unwrap();
        pool.record_deposit(amount, shares).unwrap();
        position.apply_deposit(amount, shares, 1).unwrap();
        shares
    }

    fn withdraw(pool: &mut Pool, position: &mut Position, shares: u64) -> u64 {
        let amount = pool.amount_for_shares(shares).unwrap();
        pool.record_withdrawal(amount, shares).unwrap();
        position.apply_withdrawal(shares, 2).unwrap();
        amount
    }

    #[test]
    fn first_deposit_bootstraps_one_to_one() {
        let pool = empty_pool();
        assert_eq!(pool.shares_for_deposit(5_000_000).unwrap(), 5_000_000);
    }

    #[test]
    fn share_conservation_across_operations() {
        let mut pool = empty_pool();
        let mut a = empty_position(&pool);
        let mut b = empty_position(&pool);

        deposit(&mut pool, &mut a, 10_000_000);
        deposit(&mut pool, &mut b, 3_333_333);
        withdraw(&mut pool, &mut a, 4_000_000);
        deposit(&mut pool, &mut b, 1_000_001);
        let b_shares = b.shares;
        withdraw(&mut pool, &mut b, b_shares);

        assert_eq!(pool.total_shares, a.shares + b.shares);
        assert_eq!(b.shares, 0);
        assert_eq!(b.principal_deposited, 0);
    }

    #[test]
    fn proportionality_never_exceeds_claim() {
        let mut pool = empty_pool();
        let mut a = empty_position(&pool);
        let mut b = empty_position(&pool);
        deposit(&mut pool, &mut a, 7_000_000);
        deposit(&mut pool, &mut b, 2_999_999);

        // Realized yield lands in the pool through the executor path.
        pool.total_deposits += 1_234_567;

        let exact = b.shares as u128 * pool.total_deposits as u128 / pool.total_shares as u128;
        let redeemable = pool.amount_for_shares(b.shares).unwrap();
        assert!(redeemable as u128 <= exact);
    }

    #[test]
    fn round_trip_returns_at_most_the_deposit() {
        let mut pool = empty_pool();
        let mut seed = empty_position(&pool);
        deposit(&mut pool, &mut seed, 9_999_999);

        let mut p = empty_position(&pool);
        let shares = deposit(&mut pool, &mut p, 1_234_567);
        let back = withdraw(&mut pool, &mut p, shares);
        assert!(back <= 1_234_567);
        assert_eq!(p.shares, 0);
        assert_eq!(p.principal_deposited, 0);
    }

    #[test]
    fn round_trip_on_empty_pool_drains_everything() {
        let mut pool = empty_pool();
        let mut p = empty_position(&pool);
        let shares = deposit(&mut pool, &mut p, 2_000_000);
        let back = withdraw(&mut pool, &mut p, shares);
        assert_eq!(back, 2_000_000);
        assert_eq!(pool.total_shares, 0);
        assert_eq!(pool.total_deposits, 0);
    }

    fn entry(id: Pubkey, rate: u64, active: bool) -> ProtocolEntry {
        ProtocolEntry {
            protocol_id: id,
            adapter: AdapterKind::Lending {
                market: Pubkey::new_unique(),
                reserve: Pubkey::new_unique(),
                withdraw_fee_bps: 0,
            },
            rate_bps: rate,
            tvl_estimate: 0,
            pool_balance: 0,
            last_update: 0,
            active,
        }
    }

    #[test]
    fn best_protocol_breaks_ties_by_insertion_order() {
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        let registry = Registry {
            pool: Pubkey::new_unique(),
            entries: vec![entry(first, 700, true), entry(second, 700, true)],
            bump: 254,
        };
        assert_eq!(registry.best_protocol().unwrap().protocol_id, first);
    }

    #[test]
    fn best_protocol_skips_inactive_and_handles_empty() {
        let live = Pubkey::new_unique();
        let registry = Registry {
            pool: Pubkey::new_unique(),
            entries: vec![
                entry(Pubkey::new_unique(), 900, false),
                entry(live, 400, true),
            ],
            bump: 254,
        };
        assert_eq!(registry.best_protocol().unwrap().protocol_id, live);

        let none = Registry {
            pool: Pubkey::new_unique(),
            entries: vec![],
            bump: 254,
        };
        assert!(none.best_protocol().is_none());
    }
}
