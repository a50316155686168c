//! Client-side connector for the RentFuse NFT rental contract.
//!
//! Reads go through simulated execution on a ledger node and are decoded into
//! [`Rent`] records; writes are relayed by the user's wallet and confirmed by
//! looking for the contract's event in the notification index. Transport,
//! signing and indexing are supplied by the caller through the traits in
//! [`collab`].

pub mod cli;
pub mod collab;
pub mod config;
pub mod confirm;
pub mod contract;
pub mod decode;
pub mod error;
pub mod hash;
pub mod param;
pub mod rent;
pub mod stack;

pub use collab::{
    InvokeResult, LedgerRpc, Notification, NotificationIndex, TxId, VmState, WalletProvider,
    WalletResponse, WalletResult,
};
pub use config::ContractConfig;
pub use confirm::{ConfirmationPolicy, TOKEN_CREATED_EVENT};
pub use contract::{ContractHandle, RentFuseContract};
pub use decode::{decode_rent, decode_rent_list, RentDecoder};
pub use error::{Error, Result};
pub use hash::{Address, ScriptHash};
pub use param::ContractParam;
pub use rent::{Rent, RentState};
pub use stack::StackItem;
