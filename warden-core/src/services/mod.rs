//! Services coordinating the lockout policy with the account store and notifier.

pub mod lockout;

pub use lockout::{LockoutOutcome, LockoutService};
