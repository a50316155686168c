use crate::collab::{LedgerRpc, NotificationIndex, TxId, WalletProvider};
use crate::config::ContractConfig;
use crate::confirm::{ConfirmationResolver, TOKEN_CREATED_EVENT};
use crate::contract::invoker::{self, invoke_and_decode};
use crate::contract::writer;
use crate::contract::ContractHandle;
use crate::decode::RentDecoder;
use crate::rent::Rent;
use crate::Result;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Connector to the RentFuse contract.
///
/// Holds the immutable configuration and the ledger collaborators; the
/// wallet is supplied per write call since it belongs to the signing user.
pub struct RentFuseContract<R: ?Sized, N: ?Sized> {
    config: ContractConfig,
    decoder: RentDecoder,
    rpc: Arc<R>,
    notifications: Arc<N>,
}

impl<R, N> RentFuseContract<R, N>
where
    R: LedgerRpc + ?Sized,
    N: NotificationIndex + ?Sized,
{
    pub fn new(config: ContractConfig, rpc: Arc<R>, notifications: Arc<N>) -> Self {
        info!(
            "Connecting to RentFuse contract {} (network {})",
            config.script_hash, config.network_magic
        );
        Self {
            decoder: RentDecoder::new(config.address_version),
            config,
            rpc,
            notifications,
        }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Fresh invocation target for the configured contract.
    pub fn contract(&self) -> ContractHandle {
        ContractHandle::from_config(&self.config)
    }

    /// Fetch one rental by token id.
    #[tracing::instrument(skip(self))]
    pub async fn get_rent(&self, token_id: &str) -> Result<Option<Rent>> {
        let params = invoker::get_rent_params(token_id)?;
        invoke_and_decode(
            self.rpc.as_ref(),
            &self.contract(),
            invoker::GET_RENT,
            &params,
            |item| self.decoder.decode(item),
        )
        .await
    }

    /// List rentals starting at `from_index` (default 0).
    #[tracing::instrument(skip(self))]
    pub async fn get_rent_list(&self, from_index: Option<u64>) -> Result<Vec<Rent>> {
        let params = invoker::get_rent_list_params(from_index);
        self.list(invoker::GET_RENT_LIST, &params).await
    }

    /// List rentals owned by `address`.
    #[tracing::instrument(skip(self))]
    pub async fn get_rent_list_as_owner(
        &self,
        address: &str,
        from_index: Option<u64>,
    ) -> Result<Vec<Rent>> {
        let params =
            invoker::account_list_params(address, from_index, self.config.address_version)?;
        self.list(invoker::GET_RENT_LIST_AS_OWNER, &params).await
    }

    /// List rentals rented by `address`.
    #[tracing::instrument(skip(self))]
    pub async fn get_rent_list_as_tenant(
        &self,
        address: &str,
        from_index: Option<u64>,
    ) -> Result<Vec<Rent>> {
        let params =
            invoker::account_list_params(address, from_index, self.config.address_version)?;
        self.list(invoker::GET_RENT_LIST_AS_TENANT, &params).await
    }

    /// Put an NFT up for rent and report whether `TokenCreated` was emitted.
    ///
    /// `price` is in whole GAS and is scaled up to integer fractions;
    /// `duration` is in milliseconds.
    #[tracing::instrument(skip(self, price, wallet))]
    pub async fn create_token<W: WalletProvider + ?Sized>(
        &self,
        nft_script_hash: &str,
        nft_token_id: &str,
        price: Decimal,
        duration: u64,
        wallet: &W,
    ) -> Result<bool> {
        match self
            .submit_create_token(nft_script_hash, nft_token_id, price, duration, wallet)
            .await?
        {
            Some(tx_id) => self.confirm_token_created(&tx_id).await,
            None => Ok(false),
        }
    }

    /// Relay `createToken` without waiting for confirmation.
    pub async fn submit_create_token<W: WalletProvider + ?Sized>(
        &self,
        nft_script_hash: &str,
        nft_token_id: &str,
        price: Decimal,
        duration: u64,
        wallet: &W,
    ) -> Result<Option<TxId>> {
        let params = writer::create_token_params(
            nft_script_hash,
            nft_token_id,
            price,
            duration,
            self.config.gas_precision,
            self.config.address_version,
        )?;
        writer::submit(wallet, &self.config.script_hash, writer::CREATE_TOKEN, &params).await
    }

    /// Check the notification index for this contract's `TokenCreated` event.
    pub async fn confirm_token_created(&self, tx_id: &TxId) -> Result<bool> {
        ConfirmationResolver::new(
            self.notifications.as_ref(),
            self.config.script_hash,
            self.config.confirmation,
        )
        .confirm(tx_id, TOKEN_CREATED_EVENT)
        .await
    }

    async fn list(
        &self,
        method: &str,
        params: &[crate::param::ContractParam],
    ) -> Result<Vec<Rent>> {
        invoke_and_decode(
            self.rpc.as_ref(),
            &self.contract(),
            method,
            params,
            |item| self.decoder.decode_list(item),
        )
        .await
    }
}
