use crate::collab::{InvokeResult, LedgerRpc, VmState};
use crate::config::ContractConfig;
use crate::hash::ScriptHash;
use crate::param::ContractParam;
use crate::Result;
use tracing::{debug, warn};

/// Invocation target bound to the configured contract and network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractHandle {
    script_hash: ScriptHash,
    network_magic: u32,
    rpc_address: String,
}

impl ContractHandle {
    pub fn from_config(config: &ContractConfig) -> Self {
        Self {
            script_hash: config.script_hash,
            network_magic: config.network_magic,
            rpc_address: config.rpc_address.clone(),
        }
    }

    pub fn script_hash(&self) -> &ScriptHash {
        &self.script_hash
    }

    pub fn network_magic(&self) -> u32 {
        self.network_magic
    }

    pub fn rpc_address(&self) -> &str {
        &self.rpc_address
    }

    /// Simulate `method` on the node; nothing is committed.
    ///
    /// A faulted VM is not an error here: the (usually empty) stack is
    /// returned and decodes to an absent result.
    pub async fn test_invoke<R: LedgerRpc + ?Sized>(
        &self,
        rpc: &R,
        method: &str,
        params: &[ContractParam],
    ) -> Result<InvokeResult> {
        debug!(
            "testInvoke {} on {} via {} with {} argument(s)",
            method,
            self.script_hash,
            self.rpc_address,
            params.len()
        );
        let result = rpc.invoke_function(self, method, params).await?;
        if result.state == VmState::Fault {
            warn!(
                "{} faulted: {}",
                method,
                result.exception.as_deref().unwrap_or("no exception message")
            );
        }
        Ok(result)
    }
}
