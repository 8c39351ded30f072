//! Repository traits for the data the lockout policy touches.
//!
//! Account persistence belongs to the host application; it plugs in by implementing
//! [`AccountRepository`]. [`InMemoryAccountRepository`] is provided for tests and
//! single-process use.

pub mod account;
pub mod memory;

pub use account::AccountRepository;
pub use memory::InMemoryAccountRepository;
