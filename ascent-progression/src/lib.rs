//! Progression rules: passive exp ticks, level and rank transitions,
//! daily check-ins and redeem codes.

pub mod check_in;
pub mod clock;
pub mod engine;
pub mod error;
pub mod redeem;
pub mod rules;
pub mod service;
pub mod titles;

#[cfg(test)]
mod testing;

pub use check_in::CheckInOutcome;
pub use clock::ProgressionClock;
pub use engine::TickOutcome;
pub use error::ProgressionError;
pub use redeem::RedeemOutcome;
pub use rules::ProgressionRules;
pub use service::Progression;
