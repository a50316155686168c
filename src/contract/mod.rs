//! Contract access sub-system.
//!
//! Sub-modules:
//! - [`executor`] — Public façade ([`RentFuseContract`]); coordinates the rest.
//! - [`handle`]   — Invocation target bound to the configured contract.
//! - [`invoker`]  — Read path: simulated calls and stack decoding.
//! - [`writer`]   — Write path: wallet submission and price scaling.

pub mod executor;
pub mod handle;
pub mod invoker;
pub mod writer;

pub use executor::RentFuseContract;
pub use handle::ContractHandle;
