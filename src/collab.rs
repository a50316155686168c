//! External collaborators the connector talks to.
//!
//! The connector never owns transport, keys or indexing. It reaches the ledger
//! node, the user's wallet and the notification index through these traits, so
//! any RPC client or wallet bridge can be plugged in.

use crate::contract::ContractHandle;
use crate::hash::ScriptHash;
use crate::param::ContractParam;
use crate::stack::StackItem;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger node exposing simulated (read-only) execution.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Run `method` against the contract bound in `target` without
    /// committing anything to the ledger.
    async fn invoke_function(
        &self,
        target: &ContractHandle,
        method: &str,
        params: &[ContractParam],
    ) -> Result<InvokeResult>;
}

/// Wallet able to sign and relay a contract call.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn invoke_function(
        &self,
        contract: &ScriptHash,
        method: &str,
        params: &[ContractParam],
    ) -> Result<WalletResponse>;
}

/// Index of notifications emitted by executed transactions.
#[async_trait]
pub trait NotificationIndex: Send + Sync {
    async fn notifications_for_tx(&self, tx_id: &TxId) -> Result<Vec<Notification>>;
}

/// Final VM state of a simulated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VmState {
    #[default]
    None,
    Halt,
    Fault,
    Break,
}

/// Outcome of a simulated call, as returned by `invokefunction`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeResult {
    #[serde(default)]
    pub state: VmState,
    #[serde(default, rename = "gasconsumed", alias = "gasConsumed")]
    pub gas_consumed: String,
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default)]
    pub stack: Vec<StackItem>,
}

impl InvokeResult {
    pub fn from_stack(stack: Vec<StackItem>) -> Self {
        Self {
            state: VmState::Halt,
            stack,
            ..Default::default()
        }
    }

    /// Stack slot `index`, or `Any` when the VM left fewer items.
    pub fn slot(&self, index: usize) -> &StackItem {
        const EMPTY: &StackItem = &StackItem::Any;
        self.stack.get(index).unwrap_or(EMPTY)
    }
}

/// Transaction identifier returned by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wallet reply to an invocation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletResponse {
    pub result: WalletResult,
}

impl WalletResponse {
    pub fn submitted(tx_id: impl Into<String>) -> Self {
        Self {
            result: WalletResult::TxId(TxId::new(tx_id)),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            result: WalletResult::Failure {
                error: Some(WalletError {
                    message: Some(message.into()),
                }),
            },
        }
    }
}

/// Either the relayed transaction id or an error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WalletResult {
    TxId(TxId),
    Failure {
        #[serde(default)]
        error: Option<WalletError>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletError {
    #[serde(default)]
    pub message: Option<String>,
}

impl WalletResult {
    /// Error message carried by a failure payload, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            WalletResult::Failure {
                error: Some(WalletError { message: Some(m) }),
            } => Some(m),
            _ => None,
        }
    }
}

/// Event emitted by a contract during transaction execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub contract: String,
    pub eventname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
}

impl Notification {
    pub fn new(contract: impl Into<String>, eventname: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            eventname: eventname.into(),
            state: None,
        }
    }

    /// Whether this event is `event` emitted by `contract`.
    ///
    /// The contract is compared as a parsed script hash so `0x` prefixes and
    /// hex case do not matter.
    pub fn matches(&self, contract: &ScriptHash, event: &str) -> bool {
        self.eventname == event
            && self
                .contract
                .parse::<ScriptHash>()
                .map(|hash| &hash == contract)
                .unwrap_or(false)
    }
}
