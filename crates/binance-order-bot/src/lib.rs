/*
[INPUT]:  Public API exports for binance-order-bot crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod logging;
pub mod orders;
pub mod validation;

// Re-export main types for convenience
pub use config::BotConfig;
pub use orders::{
    ConfirmPrompt, FlowOptions, FlowOutcome, OrderManager, OrderResult, ResultStatus,
};
pub use validation::{ValidationError, validate_order};
