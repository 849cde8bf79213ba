use anchor_lang::prelude::*;

use crate::constants::{MAX_EXIT_FEE_BPS, RATE_SCALE};
use crate::error::ErrorCode;
use crate::state::ProtocolEntry;

/// Contract every yield source sits behind. The core never looks past these
/// five methods; venue mechanics stay opaque. Test code supplies its own
/// implementations for fault injection.
pub trait YieldSource {
    /// Deploys `amount` into the venue and returns the deposit receipt.
    fn deposit(&mut self, amount: u64) -> Result<u64>;
    /// Pulls `amount` out of the venue and returns the amount actually
    /// received after venue-side haircuts.
    fn withdraw(&mut self, amount: u64) -> Result<u64>;
    fn current_rate(&self) -> u64;
    fn balance_of(&self, owner: &Pubkey) -> u64;
    fn total_value_locked(&self) -> u64;
}

/// Closed set of supported venue integrations. The registry controls which
/// adapters exist at any time; there is no open-ended plugin loading.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, PartialEq)]
pub enum AdapterKind {
    Lending {
        market: Pubkey,
        reserve: Pubkey,
        withdraw_fee_bps: u16,
    },
    AmmFarm {
        pair: Pubkey,
        fee_tier_bps: u16,
    },
    Staking {
        stake_pool: Pubkey,
        commission_bps: u16,
    },
}

impl AdapterKind {
    pub fn validate(&self) -> Result<()> {
        match self {
            AdapterKind::Lending { market, reserve, withdraw_fee_bps } => {
                require!(*market != Pubkey::default(), ErrorCode::InvalidAdapter);
                require!(*reserve != Pubkey::default(), ErrorCode::InvalidAdapter);
                require!(*withdraw_fee_bps <= MAX_EXIT_FEE_BPS, ErrorCode::InvalidAdapter);
            }
            AdapterKind::AmmFarm { pair, fee_tier_bps } => {
                require!(*pair != Pubkey::default(), ErrorCode::InvalidAdapter);
                require!(*fee_tier_bps <= MAX_EXIT_FEE_BPS, ErrorCode::InvalidAdapter);
            }
            AdapterKind::Staking { stake_pool, commission_bps } => {
                require!(*stake_pool != Pubkey::default(), ErrorCode::InvalidAdapter);
                require!(*commission_bps <= MAX_EXIT_FEE_BPS, ErrorCode::InvalidAdapter);
            }
        }
        Ok(())
    }

    /// Primary on-chain address of the venue, used in audit events.
    pub fn venue(&self) -> Pubkey {
        match self {
            AdapterKind::Lending { market, .. } => *market,
            AdapterKind::AmmFarm { pair, .. } => *pair,
            AdapterKind::Staking { stake_pool, .. } => *stake_pool,
        }
    }

    /// Haircut applied by the venue on the way out.
    pub fn exit_fee_bps(&self) -> u64 {
        match self {
            AdapterKind::Lending { withdraw_fee_bps, .. } => *withdraw_fee_bps as u64,
            AdapterKind::AmmFarm { fee_tier_bps, .. } => *fee_tier_bps as u64,
            AdapterKind::Staking { commission_bps, .. } => *commission_bps as u64,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AdapterKind::Lending { .. } => "Lending",
            AdapterKind::AmmFarm { .. } => "AMM Farm",
            AdapterKind::Staking { .. } => "Staking",
        }
    }
}

impl YieldSource for ProtocolEntry {
    fn deposit(&mut self, amount: u64) -> Result<u64> {
        self.pool_balance = self
            .pool_balance
            .checked_add(amount)
            .ok_or(ErrorCode::AmountOverflow)?;
        self.tvl_estimate = self
            .tvl_estimate
            .checked_add(amount)
            .ok_or(ErrorCode::AmountOverflow)?;
        Ok(amount)
    }

    fn withdraw(&mut self, amount: u64) -> Result<u64> {
        require!(amount <= self.pool_balance, ErrorCode::AdapterInsufficientBalance);
        let fee = (amount as u128 * self.adapter.exit_fee_bps() as u128 / RATE_SCALE as u128) as u64;
        self.pool_balance -= amount;
        self.tvl_estimate = self.tvl_estimate.saturating_sub(amount);
        Ok(amount - fee)
    }

    fn current_rate(&self) -> u64 {
        self.rate_bps
    }

    // The pool is the only depositor this program tracks at the venue.
    fn balance_of(&self, _owner: &Pubkey) -> u64 {
        self.pool_balance
    }

    fn total_value_locked(&self) -> u64 {
        self.tvl_estimate
    }
}
