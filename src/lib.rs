/// Account balance and transaction history, with savings and current withdrawal policies.
/// State is modified using events, which are created by validating requests
pub mod account;

/// Account commands that later are executed by [`account`] through a [`processor`].
pub mod command;

/// Account opening defaults and limits for a session.
pub mod config;

/// Transaction processor interface, plus "in memory" session implementation.
/// Owns the accounts of one session and routes commands to them.
pub mod processor;

/// CSV batch runner used by the binary and by integration tests.
pub mod bin_utils;
