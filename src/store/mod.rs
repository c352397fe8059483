//! The in-memory data store holding employees and their expense transactions.
//!
//! A `Store` is built once from a `Dataset` and lives as long as whatever owns it. The only
//! mutation it supports is flipping the approval flag of a transaction.

use crate::error::{Error, ErrorType, IntoResult, Res};
use crate::model::{Dataset, Employee, PaginatedResponse, Transaction, ALL_EMPLOYEES_ID};
use crate::Result;
use anyhow::{bail, ensure, Context};
use std::collections::HashSet;
use tracing::{debug, trace};

/// The number of transactions in one page of the cumulative window.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// The dataset compiled into the binary, used when no dataset file is configured.
const SEED_DATA: &str = include_str!("seed.json");

/// Owns the employees and transactions.
#[derive(Debug, Clone)]
pub struct Store {
    employees: Vec<Employee>,
    transactions: Vec<Transaction>,
    page_size: usize,
}

impl Store {
    /// Creates a `Store` from `dataset`, checking that ids are unique and that no employee uses the
    /// sentinel id.
    pub fn new(dataset: Dataset, page_size: usize) -> Result<Self> {
        validate(&dataset, page_size).pub_result(ErrorType::Dataset)?;
        debug!(
            "Store created with {} employees and {} transactions, page size {page_size}",
            dataset.employees.len(),
            dataset.transactions.len()
        );
        Ok(Self {
            employees: dataset.employees,
            transactions: dataset.transactions,
            page_size,
        })
    }

    /// Creates a `Store` from the seed dataset compiled into this crate.
    pub fn seed(page_size: usize) -> Result<Self> {
        Self::new(seed_dataset()?, page_size)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// All employees, in dataset order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns the first `display_pages * page_size` transactions, clamped to the number of
    /// transactions. `None` means one page.
    ///
    /// The window is cumulative: asking for 2 pages returns the first two pages together, not the
    /// second page alone.
    ///
    /// # Errors
    /// - `InvalidArgument` if `display_pages` is `Some(0)`.
    pub fn transactions_paginated(
        &self,
        display_pages: Option<u32>,
    ) -> Result<PaginatedResponse<Vec<Transaction>>> {
        let pages = match display_pages {
            None => 1,
            Some(0) => {
                return Err(Error::invalid_argument(
                    "The number of pages to display must be at least 1",
                ))
            }
            Some(n) => n as usize,
        };
        let total = self.transactions.len();
        let end = pages.saturating_mul(self.page_size);
        trace!("Paginated window of {pages} pages ends at {end} of {total}");
        Ok(PaginatedResponse {
            data: self.transactions[..end.min(total)].to_vec(),
            has_more: end < total,
        })
    }

    /// Returns every transaction belonging to `employee_id`. An id with no transactions yields an
    /// empty list.
    ///
    /// # Errors
    /// - `InvalidArgument` if `employee_id` is empty.
    pub fn transactions_by_employee(&self, employee_id: &str) -> Result<Vec<Transaction>> {
        require_employee_id(employee_id)?;
        Ok(self
            .transactions
            .iter()
            .filter(|txn| txn.belongs_to(employee_id))
            .cloned()
            .collect())
    }

    /// Sets the approval flag of the transaction with `transaction_id` to `value`. Returns `false`,
    /// and changes nothing, when no such transaction exists.
    pub fn set_transaction_approval(&mut self, transaction_id: &str, value: bool) -> bool {
        match self
            .transactions
            .iter_mut()
            .find(|txn| txn.id() == transaction_id)
        {
            Some(txn) => {
                txn.set_approved(value);
                debug!("Transaction {transaction_id} approved set to {value}");
                true
            }
            None => {
                debug!("Transaction {transaction_id} not found, approval unchanged");
                false
            }
        }
    }
}

/// Rejects an empty employee id with `InvalidArgument`.
pub(crate) fn require_employee_id(employee_id: &str) -> Result<()> {
    if employee_id.is_empty() {
        return Err(Error::invalid_argument("Employee id cannot be empty"));
    }
    Ok(())
}

/// Parses the seed dataset compiled into this crate.
pub fn seed_dataset() -> Result<Dataset> {
    parse_dataset(SEED_DATA)
        .context("The built-in seed dataset is invalid")
        .pub_result(ErrorType::Internal)
}

/// The seed dataset as JSON text, used to write a starter `dataset.json`.
pub(crate) fn seed_json() -> &'static str {
    SEED_DATA
}

pub(crate) fn parse_dataset(json: &str) -> Res<Dataset> {
    serde_json::from_str(json).context("Unable to parse dataset JSON")
}

fn validate(dataset: &Dataset, page_size: usize) -> Res<()> {
    ensure!(page_size > 0, "The page size must be greater than zero");

    let mut employee_ids = HashSet::new();
    for employee in &dataset.employees {
        if employee.id() == ALL_EMPLOYEES_ID {
            bail!("The employee id '{ALL_EMPLOYEES_ID}' is reserved");
        }
        if !employee_ids.insert(employee.id()) {
            bail!("Duplicate employee id '{}'", employee.id());
        }
    }

    let mut transaction_ids = HashSet::new();
    for txn in &dataset.transactions {
        if !transaction_ids.insert(txn.id()) {
            bail!("Duplicate transaction id '{}'", txn.id());
        }
    }
    Ok(())
}
