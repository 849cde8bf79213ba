pub mod add_protocol;
pub mod configure;
pub mod deploy_capital;
pub mod deposit;
pub mod emergency_withdraw;
pub mod evaluate;
pub mod execute_rebalance;
pub mod initialize_pool;
pub mod poll;
pub mod set_guardrails;
pub mod set_protocol_active;
pub mod update_rate;
pub mod withdraw;

pub use add_protocol::*;
pub use configure::*;
pub use deploy_capital::*;
pub use deposit::*;
pub use emergency_withdraw::*;
pub use evaluate::*;
pub use execute_rebalance::*;
pub use initialize_pool::*;
pub use poll::*;
pub use set_guardrails::*;
pub use set_protocol_active::*;
pub use update_rate::*;
pub use withdraw::*;
