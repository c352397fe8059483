//! The view-state controller.
//!
//! `Controller` decides what transaction list is on screen. It has two mutually exclusive modes:
//! the cumulative paged window over all transactions, and the full list of one employee. Picking
//! one mode throws away the other's result before anything is awaited, so a response that arrives
//! for an abandoned mode can never be shown.
//!
//! Intents take `&self` and may run concurrently on one task, e.g. the user picks an employee
//! while "view more" is still loading. Every intent bumps a generation counter, and responses are
//! only stored when their generation is still the current one.

mod state;

use crate::api::{
    PaginatedRequestParams, RequestByEmployeeParams, Requests, SetTransactionApprovalParams,
};
use crate::model::{Employee, PaginatedResponse, Transaction};
use crate::store::require_employee_id;
use crate::Result;
use serde::{Deserialize, Serialize};
use state::{lock, Loading, LoadingGuard, TransactionsView, ViewState};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

pub use state::Mode;

/// A point-in-time copy of everything the presentation layer needs.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: Option<Mode>,
    pub pages_accumulated: u32,
    pub employees_loading: bool,
    pub transactions_loading: bool,
    /// The employee selector entries: the "All Employees" sentinel followed by every employee.
    pub employee_options: Vec<Employee>,
    /// `None` while nothing has been loaded, which is different from an empty list.
    pub transactions: Option<Vec<Transaction>>,
    pub show_view_more: bool,
}

/// Holds the view state and carries out the user's intents through a `Requests` implementation.
pub struct Controller {
    requests: Arc<dyn Requests>,
    state: Mutex<ViewState>,
}

impl Controller {
    pub fn new(requests: Arc<dyn Requests>) -> Self {
        Self {
            requests,
            state: Mutex::new(ViewState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        lock(&self.state)
    }

    /// Loads the first page on first use. Only fires if no employees are loaded and none are
    /// loading, and only ever once per controller. Returns whether it fired.
    pub async fn initialize(&self) -> Result<bool> {
        {
            let mut state = self.state();
            if state.initialized || state.employees.is_some() || state.employees_loading > 0 {
                return Ok(false);
            }
            state.initialized = true;
        }
        debug!("Initializing view");
        self.select_all().await?;
        Ok(true)
    }

    /// Shows all transactions. When already showing all transactions this grows the window by one
    /// page ("view more"), otherwise it starts over at one page.
    pub async fn select_all(&self) -> Result<()> {
        let (generation, pages) = self.state().begin_all_paged();
        debug!("select_all: generation {generation}, {pages} pages");
        let transactions_loading = LoadingGuard::new(&self.state, Loading::Transactions);

        let employees_loading = LoadingGuard::new(&self.state, Loading::Employees);
        let employees = self.requests.employees().await?;
        self.state().employees = Some(employees);
        drop(employees_loading);

        let page = self
            .requests
            .paginated_transactions(PaginatedRequestParams::new(pages))
            .await?;
        self.state().finish_all_paged(generation, page);
        drop(transactions_loading);
        Ok(())
    }

    /// Selecting the "All Employees" entry behaves exactly like `select_all`.
    pub async fn select_sentinel_all(&self) -> Result<()> {
        self.select_all().await
    }

    /// Shows every transaction of the employee with `employee_id`, without paging.
    ///
    /// # Errors
    /// - `InvalidArgument` if `employee_id` is empty. The view is left untouched in that case.
    pub async fn select_employee(&self, employee_id: &str) -> Result<()> {
        require_employee_id(employee_id)?;
        let generation = self.state().begin_by_employee();
        debug!("select_employee {employee_id}: generation {generation}");
        let _loading = LoadingGuard::new(&self.state, Loading::Transactions);

        let txns = self
            .requests
            .transactions_by_employee(RequestByEmployeeParams::new(employee_id))
            .await?;
        self.state().finish_by_employee(generation, txns);
        Ok(())
    }

    /// Handles a pick in the employee selector: the sentinel shows everyone, anything else shows
    /// that employee.
    pub async fn choose(&self, employee: &Employee) -> Result<()> {
        if employee.is_all() {
            self.select_sentinel_all().await
        } else {
            self.select_employee(employee.id()).await
        }
    }

    /// Sets the approval flag of a transaction. On success the change is mirrored into the
    /// transactions on screen. Returns `false` if the transaction does not exist.
    pub async fn set_transaction_approval(
        &self,
        transaction_id: &str,
        value: bool,
    ) -> Result<bool> {
        let response = self
            .requests
            .set_transaction_approval(SetTransactionApprovalParams::new(transaction_id, value))
            .await?;
        if response.success {
            self.state().set_approved(transaction_id, value);
        } else {
            info!("Transaction {transaction_id} was not found, approval not changed");
        }
        Ok(response.success)
    }

    /// The transactions to render, or `None` if a loading indicator should be shown instead.
    pub fn transactions(&self) -> Option<Vec<Transaction>> {
        self.state().transactions.transactions().map(|t| t.to_vec())
    }

    /// Whether the "View More" control should be rendered.
    pub fn show_view_more(&self) -> bool {
        self.state().show_view_more()
    }

    /// The paged result, if that is what the view currently holds.
    pub fn paged_result(&self) -> Option<PaginatedResponse<Vec<Transaction>>> {
        match &self.state().transactions {
            TransactionsView::AllPaged(page) => Some(page.clone()),
            _ => None,
        }
    }

    /// The by-employee result, if that is what the view currently holds.
    pub fn by_employee_result(&self) -> Option<Vec<Transaction>> {
        match &self.state().transactions {
            TransactionsView::ByEmployee(txns) => Some(txns.clone()),
            _ => None,
        }
    }

    pub fn mode(&self) -> Option<Mode> {
        self.state().mode
    }

    pub fn pages_accumulated(&self) -> u32 {
        self.state().pages_accumulated
    }

    pub fn employees(&self) -> Option<Vec<Employee>> {
        self.state().employees.clone()
    }

    /// The employee selector entries. Empty until employees have been loaded.
    pub fn employee_options(&self) -> Vec<Employee> {
        employee_options(&self.state())
    }

    pub fn employees_loading(&self) -> bool {
        self.state().employees_loading > 0
    }

    pub fn transactions_loading(&self) -> bool {
        self.state().transactions_loading > 0
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.state();
        Snapshot {
            mode: state.mode,
            pages_accumulated: state.pages_accumulated,
            employees_loading: state.employees_loading > 0,
            transactions_loading: state.transactions_loading > 0,
            employee_options: employee_options(&state),
            transactions: state.transactions.transactions().map(|t| t.to_vec()),
            show_view_more: state.show_view_more(),
        }
    }
}

fn employee_options(state: &ViewState) -> Vec<Employee> {
    match &state.employees {
        None => Vec::new(),
        Some(employees) => std::iter::once(Employee::all())
            .chain(employees.iter().cloned())
            .collect(),
    }
}
