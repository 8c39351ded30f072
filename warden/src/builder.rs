//! Builder pattern for constructing Warden instances
//!
//! This module provides a type-safe builder for creating [`Warden`] instances with
//! compile-time validation that an account repository has been supplied.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use warden::{InMemoryAccountRepository, WardenBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let warden = WardenBuilder::new()
//!         .with_repository(Arc::new(InMemoryAccountRepository::new()))
//!         .with_config_from_env()?
//!         .with_mailer_from_env()
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use warden_core::{
    AccountRepository, EventBus, EventHandler, LockoutConfig, LockoutNotifier,
    services::LockoutService,
};

use crate::Warden;

#[cfg(feature = "mailer")]
use crate::MailerConfig;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when building a Warden instance.
#[derive(Debug, thiserror::Error)]
pub enum WardenBuilderError {
    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Failed to configure mailer
    #[cfg(feature = "mailer")]
    #[error("Mailer configuration failed: {0}")]
    MailerConfiguration(String),
}

// ============================================================================
// Type-State Markers
// ============================================================================

/// Marker type indicating no repository has been configured yet.
///
/// This is the initial state of [`WardenBuilder`].
pub struct NoRepository;

/// Marker type indicating the account repository has been configured.
pub struct WithRepository<R: AccountRepository> {
    repository: Arc<R>,
}

#[cfg(feature = "mailer")]
enum MailerSource {
    Config(MailerConfig),
    Env,
}

// ============================================================================
// Builder Implementation
// ============================================================================

/// A type-safe builder for constructing [`Warden`] instances.
///
/// # Type States
///
/// - [`NoRepository`]: Initial state, a repository must be configured
/// - [`WithRepository<R>`]: Repository configured, ready to build
pub struct WardenBuilder<Repository> {
    repository: Repository,
    config: LockoutConfig,
    notifier: Option<Arc<dyn LockoutNotifier>>,
    event_handlers: Vec<Arc<dyn EventHandler>>,
    #[cfg(feature = "mailer")]
    mailer: Option<MailerSource>,
}

impl Default for WardenBuilder<NoRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl WardenBuilder<NoRepository> {
    /// Create a new builder with default configuration.
    ///
    /// # Defaults
    ///
    /// - Lockout: disabled (threshold 0)
    /// - Notifier: None
    pub fn new() -> Self {
        Self {
            repository: NoRepository,
            config: LockoutConfig::default(),
            notifier: None,
            event_handlers: Vec::new(),
            #[cfg(feature = "mailer")]
            mailer: None,
        }
    }

    /// Configure the account store.
    pub fn with_repository<R: AccountRepository>(
        self,
        repository: Arc<R>,
    ) -> WardenBuilder<WithRepository<R>> {
        WardenBuilder {
            repository: WithRepository { repository },
            config: self.config,
            notifier: self.notifier,
            event_handlers: self.event_handlers,
            #[cfg(feature = "mailer")]
            mailer: self.mailer,
        }
    }
}

// ============================================================================
// Configuration Methods (available in any state)
// ============================================================================

impl<Repository> WardenBuilder<Repository> {
    pub fn with_config(mut self, config: LockoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the lockout configuration from `WARDEN_*` environment variables.
    pub fn with_config_from_env(mut self) -> Result<Self, WardenBuilderError> {
        self.config = LockoutConfig::from_env()
            .map_err(|e| WardenBuilderError::InvalidConfiguration(e.to_string()))?;
        Ok(self)
    }

    /// Parse the lockout configuration from a JSON settings document.
    ///
    /// ```json
    /// {
    ///   "failedAttemptsThreshold": 5,
    ///   "notificationMail": {
    ///     "to": ["admin@example.com"],
    ///     "from": { "email": "noreply@{domain}", "name": "{domain}" },
    ///     "subject": "Account {accountIdentifier} locked",
    ///     "message": "Locked from {ip} at {time}"
    ///   }
    /// }
    /// ```
    pub fn with_config_json(mut self, json: &str) -> Result<Self, WardenBuilderError> {
        self.config = serde_json::from_str(json)
            .map_err(|e| WardenBuilderError::InvalidConfiguration(e.to_string()))?;
        Ok(self)
    }

    /// Use a custom notifier. Takes precedence over any mailer configuration.
    pub fn with_notifier(mut self, notifier: Arc<dyn LockoutNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handlers.push(handler);
        self
    }

    /// Deliver notifications through the given mail transport configuration.
    #[cfg(feature = "mailer")]
    pub fn with_mailer(mut self, config: MailerConfig) -> Self {
        self.mailer = Some(MailerSource::Config(config));
        self
    }

    /// Deliver notifications through the transport described by `MAILER_*` variables.
    #[cfg(feature = "mailer")]
    pub fn with_mailer_from_env(mut self) -> Self {
        self.mailer = Some(MailerSource::Env);
        self
    }
}

// ============================================================================
// Build Method (only available with repository)
// ============================================================================

impl<R: AccountRepository> WardenBuilder<WithRepository<R>> {
    /// Build the Warden instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the mail transport cannot be constructed.
    pub async fn build(self) -> Result<Warden<R>, WardenBuilderError> {
        let events = EventBus::new();
        for handler in self.event_handlers {
            events.register(handler).await;
        }

        let notifier = match self.notifier {
            Some(notifier) => Some(notifier),
            #[cfg(feature = "mailer")]
            None => match self.mailer {
                Some(source) => Some(build_mailer_notifier(source)?),
                None => None,
            },
            #[cfg(not(feature = "mailer"))]
            None => None,
        };

        if self.config.is_enabled() && self.config.notification_enabled() && notifier.is_none() {
            tracing::warn!(
                "Notification recipients are configured but no notifier is set; lockout notifications will be skipped"
            );
        }

        let mut service = LockoutService::new(self.repository.repository, self.config)
            .with_event_bus(events);
        if let Some(notifier) = notifier {
            service = service.with_notifier(notifier);
        }

        Ok(Warden::from_service(service))
    }
}

#[cfg(feature = "mailer")]
fn build_mailer_notifier(
    source: MailerSource,
) -> Result<Arc<dyn LockoutNotifier>, WardenBuilderError> {
    let notifier = match source {
        MailerSource::Config(config) => crate::MailerNotifier::from_config(&config),
        MailerSource::Env => crate::MailerNotifier::from_env(),
    }
    .map_err(|e| WardenBuilderError::MailerConfiguration(e.to_string()))?;

    Ok(Arc::new(notifier))
}
