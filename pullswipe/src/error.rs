//! Error types.

use thiserror::Error;

/// Misuse of the setup contract. These are programming errors in the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// An adapter is already attached to this list.
    #[error("an adapter is already attached to this list")]
    AdapterAlreadyAttached,

    /// A setup-only option was configured after the adapter was attached.
    #[error("cannot set {what}, the adapter has already been attached")]
    ConfiguredAfterAdapter {
        /// The option being configured.
        what: &'static str,
    },

    /// The operation needs an attached adapter.
    #[error("no adapter is attached to this list")]
    NoAdapter,
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("touch slop must be at least 1 pixel")]
    ZeroSlop,

    #[error("settle threshold must be in (0, 1], got {0}")]
    SettleThreshold(f32),
}
