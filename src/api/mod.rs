//! The request facade. Everything outside of the `store` reaches the data through the `Requests`
//! trait, which gives us one place to add latency or swap in a test double.

mod store_client;

use crate::model::{Employee, PaginatedResponse, SuccessResponse, Transaction};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use store_client::StoreRequests;

/// Parameters for `Requests::paginated_transactions`.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedRequestParams {
    /// How many pages the cumulative window should span. `None` means one page.
    pub display_pages: Option<u32>,
}

impl PaginatedRequestParams {
    pub fn new(display_pages: u32) -> Self {
        Self {
            display_pages: Some(display_pages),
        }
    }
}

/// Parameters for `Requests::transactions_by_employee`.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestByEmployeeParams {
    pub employee_id: String,
}

impl RequestByEmployeeParams {
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
        }
    }
}

/// Parameters for `Requests::set_transaction_approval`.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTransactionApprovalParams {
    pub transaction_id: String,
    pub value: bool,
}

impl SetTransactionApprovalParams {
    pub fn new(transaction_id: impl Into<String>, value: bool) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            value,
        }
    }
}

/// The asynchronous operations available over the expense data.
#[async_trait::async_trait]
pub trait Requests: Send + Sync {
    /// All employees.
    async fn employees(&self) -> Result<Vec<Employee>>;

    /// The cumulative window of transactions described by `params`.
    async fn paginated_transactions(
        &self,
        params: PaginatedRequestParams,
    ) -> Result<PaginatedResponse<Vec<Transaction>>>;

    /// Every transaction of one employee. Fails with `InvalidArgument` for an empty id.
    async fn transactions_by_employee(
        &self,
        params: RequestByEmployeeParams,
    ) -> Result<Vec<Transaction>>;

    /// Sets a transaction's approval flag. An unknown id is reported with `success: false`.
    async fn set_transaction_approval(
        &self,
        params: SetTransactionApprovalParams,
    ) -> Result<SuccessResponse>;
}

/// Builds the `Requests` implementation described by `config`: a store seeded from the configured
/// dataset file, with the configured latency.
pub async fn requests(config: &Config) -> Result<Arc<dyn Requests>> {
    let dataset = config.load_dataset().await?;
    let requests = StoreRequests::new(dataset, config.page_size())?.with_latency(config.latency());
    Ok(Arc::new(requests))
}
