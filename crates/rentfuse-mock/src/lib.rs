//! Recording mock collaborators for RentFuse connector tests.
//!
//! Each mock answers from a canned reply and records every call it receives,
//! so tests can assert on the exact arguments sent downstream and on how many
//! times a collaborator was reached.

use async_trait::async_trait;
use rentfuse::{
    ContractHandle, ContractParam, Error, InvokeResult, LedgerRpc, Notification,
    NotificationIndex, Result, ScriptHash, StackItem, TxId, WalletProvider, WalletResponse,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// One recorded contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub contract: ScriptHash,
    pub method: String,
    pub params: Vec<ContractParam>,
}

/// Ledger node answering simulated calls per method name.
#[derive(Default)]
pub struct MockLedger {
    replies: Mutex<HashMap<String, InvokeResult>>,
    failure: Mutex<Option<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` with a HALT result whose stack is `stack`.
    pub fn with_stack(self, method: &str, stack: Vec<StackItem>) -> Self {
        self.with_result(method, InvokeResult::from_stack(stack))
    }

    pub fn with_result(self, method: &str, result: InvokeResult) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(method.to_string(), result);
        self
    }

    /// Fail every call with an RPC error.
    pub fn failing(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn invoke_function(
        &self,
        target: &ContractHandle,
        method: &str,
        params: &[ContractParam],
    ) -> Result<InvokeResult> {
        self.calls.lock().unwrap().push(RecordedCall {
            contract: *target.script_hash(),
            method: method.to_string(),
            params: params.to_vec(),
        });
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::Rpc(message));
        }
        Ok(self
            .replies
            .lock()
            .unwrap()
            .get(method)
            .cloned()
            .unwrap_or_default())
    }
}

/// Wallet replying with a fixed response.
pub struct MockWallet {
    response: WalletResponse,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockWallet {
    pub fn new(response: WalletResponse) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn submitted(tx_id: &str) -> Self {
        Self::new(WalletResponse::submitted(tx_id))
    }

    pub fn failed(message: &str) -> Self {
        Self::new(WalletResponse::failed(message))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn invoke_function(
        &self,
        contract: &ScriptHash,
        method: &str,
        params: &[ContractParam],
    ) -> Result<WalletResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            contract: *contract,
            method: method.to_string(),
            params: params.to_vec(),
        });
        Ok(self.response.clone())
    }
}

/// Notification index serving a queue of answers.
///
/// Answers are consumed in order; the last one repeats.
pub struct MockNotificationIndex {
    answers: Mutex<Vec<Vec<Notification>>>,
    lookups: Mutex<Vec<TxId>>,
}

impl MockNotificationIndex {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self::sequence(vec![notifications])
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn sequence(answers: Vec<Vec<Notification>>) -> Self {
        assert!(!answers.is_empty(), "at least one answer is required");
        Self {
            answers: Mutex::new(answers),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<TxId> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationIndex for MockNotificationIndex {
    async fn notifications_for_tx(&self, tx_id: &TxId) -> Result<Vec<Notification>> {
        self.lookups.lock().unwrap().push(tx_id.clone());
        let mut answers = self.answers.lock().unwrap();
        if answers.len() > 1 {
            Ok(answers.remove(0))
        } else {
            Ok(answers[0].clone())
        }
    }
}
