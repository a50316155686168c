use thiserror::Error;

/// Errors surfaced by the RentFuse connector.
///
/// Malformed ledger data never shows up here: the record decoder is total and
/// reports shape mismatches as absent records instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied an argument that cannot be marshalled for the contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The wallet reported an error while submitting a transaction
    #[error("An error occurred invoking contract function: {0}")]
    Invocation(String),

    /// Ledger RPC collaborator failure
    #[error("Ledger RPC failed: {0}")]
    Rpc(String),

    /// Wallet collaborator failure (transport, not a contract-level rejection)
    #[error("Wallet request failed: {0}")]
    Wallet(String),

    /// Notification index collaborator failure
    #[error("Notification lookup failed: {0}")]
    Notification(String),

    /// Invalid script hash or address text
    #[error("Invalid script hash: {0}")]
    InvalidScriptHash(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
