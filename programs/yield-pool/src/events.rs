use anchor_lang::prelude::*;

// Pool lifecycle events
#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub operator: Pubkey,
    pub asset_mint: Pubkey,
    pub rebalance_interval: i64,
    pub timestamp: i64,
}

#[event]
pub struct PauseToggled {
    pub pool: Pubkey,
    pub paused: bool,
    pub timestamp: i64,
}

#[event]
pub struct RebalanceIntervalChanged {
    pub pool: Pubkey,
    pub old_interval: i64,
    pub new_interval: i64,
    pub timestamp: i64,
}

#[event]
pub struct ExecutionCostUpdated {
    pub pool: Pubkey,
    pub old_cost_per_unit: u64,
    pub new_cost_per_unit: u64,
    pub timestamp: i64,
}

// Depositor events
#[event]
pub struct DepositReceived {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub shares_minted: u64,
    pub total_deposits: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct SharesRedeemed {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub shares_burned: u64,
    pub amount_out: u64,
    pub total_deposits: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct EmergencyWithdrawal {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub shares_burned: u64,
    pub amount_out: u64,
    pub timestamp: i64,
}

#[event]
pub struct GuardrailsUpdated {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub min_yield_bps: u64,
    pub max_slippage_bps: u64,
    pub max_cost_ceiling: u64,
    pub active: bool,
    pub timestamp: i64,
}

// Registry events
#[event]
pub struct ProtocolRegistered {
    pub pool: Pubkey,
    pub protocol_id: Pubkey,
    pub venue: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RateRefreshed {
    pub pool: Pubkey,
    pub protocol_id: Pubkey,
    pub old_rate_bps: u64,
    pub new_rate_bps: u64,
    pub timestamp: i64,
}

#[event]
pub struct ProtocolStatusChanged {
    pub pool: Pubkey,
    pub protocol_id: Pubkey,
    pub active: bool,
    pub timestamp: i64,
}

// Allocation events
#[event]
pub struct CapitalDeployed {
    pub pool: Pubkey,
    pub protocol_id: Pubkey,
    pub amount: u64,
    pub rate_bps: u64,
    pub timestamp: i64,
}

#[event]
pub struct RebalanceExecuted {
    pub pool: Pubkey,
    pub source: Pubkey,
    pub destination: Pubkey,
    pub amount_withdrawn: u64,
    pub amount_received: u64,
    pub estimated_cost: u64,
    pub rebalance_count: u64,
    pub timestamp: i64,
}
