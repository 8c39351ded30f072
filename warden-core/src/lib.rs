//! Core functionality for warden
//!
//! Warden locks an account once its failed authentication attempts reach a configured
//! threshold and notifies an administrator by email.
//!
//! The pieces are usable on their own:
//!
//! - [`LockoutPolicyEvaluator`] makes the pure lock / no-action [`Decision`]
//! - [`NotificationRenderer`] substitutes placeholders in the notification templates
//! - [`LockoutService`] is the call site for the authentication code path; it reads the
//!   account from an [`AccountRepository`], persists the lock and sends the notification
//!   through a [`LockoutNotifier`]
//!
//! Configuration is a plain [`LockoutConfig`] value loaded once at startup.
pub mod account;
pub mod config;
pub mod error;
pub mod events;
pub mod notification;
pub mod policy;
pub mod repositories;
pub mod request;
pub mod services;

pub use account::AccountAuthState;
pub use config::{LockoutConfig, MailSender, NotificationMailConfig};
pub use error::Error;
pub use events::{Event, EventBus, EventHandler};
pub use notification::{
    LockoutNotifier, NotificationContext, NotificationMail, NotificationOutcome,
    NotificationRenderer, SkipReason,
};
pub use policy::{Decision, LockoutPolicyEvaluator, NoActionReason};
pub use repositories::{AccountRepository, InMemoryAccountRepository};
pub use request::RequestContext;
pub use services::{LockoutOutcome, LockoutService};

#[cfg(feature = "mailer")]
pub use notification::MailerNotifier;
