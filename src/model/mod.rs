//! Types that represent the core data model, such as `Employee` and `Transaction`.
mod amount;
mod employee;
mod transaction;

pub use amount::{Amount, AmountError};
pub use employee::{Employee, ALL_EMPLOYEES_ID};
use serde::{Deserialize, Serialize};
pub use transaction::Transaction;

/// The static dataset a `Store` is seeded from: two named top-level arrays.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub employees: Vec<Employee>,
    pub transactions: Vec<Transaction>,
}

/// A cumulative window of results starting at index 0.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// The items in the window.
    pub data: T,
    /// True iff more items exist beyond the end of the window.
    pub has_more: bool,
}

/// The outcome of an operation that reports failure with a flag instead of an error.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
