//! Implements the `Requests` trait over an in-memory `Store`.

use crate::api::{
    PaginatedRequestParams, RequestByEmployeeParams, Requests, SetTransactionApprovalParams,
};
use crate::model::{Dataset, Employee, PaginatedResponse, SuccessResponse, Transaction};
use crate::store::Store;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::trace;

/// An implementation of `Requests` that serves data from a `Store` it owns. Each request can be
/// delayed by a fixed latency to imitate a remote backend.
#[derive(Debug, Clone)]
pub struct StoreRequests {
    store: Arc<Mutex<Store>>,
    latency: Option<Duration>,
}

impl StoreRequests {
    /// Create a new `StoreRequests` owning a `Store` built from `dataset`.
    pub fn new(dataset: Dataset, page_size: usize) -> Result<Self> {
        Ok(Self::from_store(Store::new(dataset, page_size)?))
    }

    pub fn from_store(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            latency: None,
        }
    }

    /// Delay every request by `latency`.
    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait::async_trait]
impl Requests for StoreRequests {
    async fn employees(&self) -> Result<Vec<Employee>> {
        trace!("employees");
        self.delay().await;
        Ok(self.store.lock().await.employees().to_vec())
    }

    async fn paginated_transactions(
        &self,
        params: PaginatedRequestParams,
    ) -> Result<PaginatedResponse<Vec<Transaction>>> {
        trace!("paginated_transactions {params:?}");
        self.delay().await;
        self.store
            .lock()
            .await
            .transactions_paginated(params.display_pages)
    }

    async fn transactions_by_employee(
        &self,
        params: RequestByEmployeeParams,
    ) -> Result<Vec<Transaction>> {
        trace!("transactions_by_employee {params:?}");
        self.delay().await;
        self.store
            .lock()
            .await
            .transactions_by_employee(&params.employee_id)
    }

    async fn set_transaction_approval(
        &self,
        params: SetTransactionApprovalParams,
    ) -> Result<SuccessResponse> {
        trace!("set_transaction_approval {params:?}");
        self.delay().await;
        let success = self
            .store
            .lock()
            .await
            .set_transaction_approval(&params.transaction_id, params.value);
        Ok(SuccessResponse { success })
    }
}
