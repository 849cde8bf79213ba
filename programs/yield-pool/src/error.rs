use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Validation errors: rejected before any mutation
    #[msg("Amount is below the pool minimum deposit")]
    InvalidAmount,

    #[msg("Requested shares exceed the depositor's holdings")]
    InsufficientShares,

    #[msg("Caller holds no shares in the pool")]
    NoPosition,

    #[msg("Protocol ID cannot be the default pubkey")]
    InvalidProtocolId,

    #[msg("Adapter configuration is invalid")]
    InvalidAdapter,

    #[msg("Guardrail parameters are out of range")]
    InvalidGuardrails,

    #[msg("Rebalance interval must be at least one day")]
    InvalidRebalanceInterval,

    #[msg("Yield rate exceeds maximum allowed (500%)")]
    ExcessiveRate,

    #[msg("Arithmetic overflow in pool accounting")]
    AmountOverflow,

    #[msg("Protocol registry is full")]
    RegistryFull,

    #[msg("Protocol is already registered")]
    DuplicateProtocol,

    #[msg("Token account mint does not match the pool asset")]
    InvalidAssetMint,

    // Authorization errors
    #[msg("Unauthorized: caller is not the pool operator")]
    Unauthorized,

    // State errors: valid input, wrong pool state
    #[msg("Depositor has no active guardrails")]
    GuardrailsNotSet,

    #[msg("Protocol is not registered")]
    ProtocolNotFound,

    #[msg("Protocol is not active")]
    ProtocolNotActive,

    #[msg("Pool capital is already deployed")]
    AlreadyDeployed,

    #[msg("Pool holds no deposits to deploy")]
    PoolEmpty,

    // Execution errors: rebalance aborts, no state change is observable
    #[msg("Amount received is below the minimum acceptable amount out")]
    SlippageExceeded,

    #[msg("Adapter balance is insufficient for the requested withdrawal")]
    AdapterInsufficientBalance,
}
