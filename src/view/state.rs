use crate::model::{Employee, PaginatedResponse, Transaction};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Which kind of transaction list the view is showing.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The cumulative window over all transactions.
    AllPaged,
    /// Every transaction of a single employee.
    ByEmployee,
}

serde_plain::derive_display_from_serialize!(Mode);
serde_plain::derive_fromstr_from_deserialize!(Mode);

/// The transactions held by the view. At most one of the two modes has a result at a time.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub(crate) enum TransactionsView {
    /// Nothing has arrived yet, or the last result was invalidated.
    #[default]
    Empty,
    AllPaged(PaginatedResponse<Vec<Transaction>>),
    ByEmployee(Vec<Transaction>),
}

impl TransactionsView {
    pub(crate) fn transactions(&self) -> Option<&[Transaction]> {
        match self {
            TransactionsView::Empty => None,
            TransactionsView::AllPaged(page) => Some(&page.data),
            TransactionsView::ByEmployee(txns) => Some(txns),
        }
    }

    fn transactions_mut(&mut self) -> Option<&mut Vec<Transaction>> {
        match self {
            TransactionsView::Empty => None,
            TransactionsView::AllPaged(page) => Some(&mut page.data),
            TransactionsView::ByEmployee(txns) => Some(txns),
        }
    }
}

/// Everything the controller tracks between intents.
#[derive(Debug, Clone)]
pub(crate) struct ViewState {
    pub(crate) mode: Option<Mode>,
    pub(crate) pages_accumulated: u32,
    pub(crate) display_view_more: bool,
    pub(crate) employees: Option<Vec<Employee>>,
    pub(crate) transactions: TransactionsView,
    /// Number of in-flight employee requests.
    pub(crate) employees_loading: usize,
    /// Number of in-flight transaction requests.
    pub(crate) transactions_loading: usize,
    /// Bumped by every intent. A response is only stored if the generation it was requested under
    /// is still current.
    pub(crate) generation: u64,
    pub(crate) initialized: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: None,
            pages_accumulated: 1,
            display_view_more: true,
            employees: None,
            transactions: TransactionsView::Empty,
            employees_loading: 0,
            transactions_loading: 0,
            generation: 0,
            initialized: false,
        }
    }
}

impl ViewState {
    /// Enters (or stays in) the paged mode. Returns the generation and the number of pages to
    /// request.
    pub(crate) fn begin_all_paged(&mut self) -> (u64, u32) {
        if self.mode == Some(Mode::AllPaged) {
            self.pages_accumulated = self.pages_accumulated.saturating_add(1);
        } else {
            self.pages_accumulated = 1;
            self.mode = Some(Mode::AllPaged);
            // the by-employee result is dropped here, before anything is awaited
            self.transactions = TransactionsView::Empty;
        }
        self.display_view_more = true;
        self.generation += 1;
        (self.generation, self.pages_accumulated)
    }

    /// Enters the by-employee mode. Returns the generation.
    pub(crate) fn begin_by_employee(&mut self) -> u64 {
        self.mode = Some(Mode::ByEmployee);
        self.pages_accumulated = 1;
        self.display_view_more = false;
        self.transactions = TransactionsView::Empty;
        self.generation += 1;
        self.generation
    }

    pub(crate) fn finish_all_paged(
        &mut self,
        generation: u64,
        page: PaginatedResponse<Vec<Transaction>>,
    ) {
        if self.is_current(generation, Mode::AllPaged) {
            self.transactions = TransactionsView::AllPaged(page);
        } else {
            debug!("Discarding stale paginated response from generation {generation}");
        }
    }

    pub(crate) fn finish_by_employee(&mut self, generation: u64, txns: Vec<Transaction>) {
        if self.is_current(generation, Mode::ByEmployee) {
            self.transactions = TransactionsView::ByEmployee(txns);
        } else {
            debug!("Discarding stale by-employee response from generation {generation}");
        }
    }

    /// Reflects an approval change in whatever transactions are currently held.
    pub(crate) fn set_approved(&mut self, transaction_id: &str, value: bool) {
        if let Some(txns) = self.transactions.transactions_mut() {
            txns.iter_mut()
                .filter(|txn| txn.id() == transaction_id)
                .for_each(|txn| txn.set_approved(value));
        }
    }

    pub(crate) fn show_view_more(&self) -> bool {
        match &self.transactions {
            TransactionsView::AllPaged(page) => self.display_view_more && page.has_more,
            _ => false,
        }
    }

    fn is_current(&self, generation: u64, mode: Mode) -> bool {
        self.generation == generation && self.mode == Some(mode)
    }
}

/// Locks `state`, recovering the data if a previous holder panicked. The lock is never held
/// across an await.
pub(crate) fn lock(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Which loading counter a `LoadingGuard` holds.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Loading {
    Employees,
    Transactions,
}

/// Marks a request as in flight for as long as it is alive. Dropping it, on success, on error or
/// on cancellation, clears the mark.
pub(crate) struct LoadingGuard<'a> {
    state: &'a Mutex<ViewState>,
    loading: Loading,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn new(state: &'a Mutex<ViewState>, loading: Loading) -> Self {
        *counter(&mut lock(state), loading) += 1;
        Self { state, loading }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        let count = counter(&mut state, self.loading);
        *count = count.saturating_sub(1);
    }
}

fn counter(state: &mut ViewState, loading: Loading) -> &mut usize {
    match loading {
        Loading::Employees => &mut state.employees_loading,
        Loading::Transactions => &mut state.transactions_loading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize, has_more: bool) -> PaginatedResponse<Vec<Transaction>> {
        PaginatedResponse {
            data: vec![Transaction::default(); n],
            has_more,
        }
    }

    #[test]
    fn test_begin_all_paged_increments_only_when_already_paged() {
        let mut state = ViewState::default();
        assert_eq!(state.begin_all_paged().1, 1);
        assert_eq!(state.begin_all_paged().1, 2);
        state.begin_by_employee();
        assert_eq!(state.pages_accumulated, 1);
        assert_eq!(state.begin_all_paged().1, 1);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut state = ViewState::default();
        let (old, _) = state.begin_all_paged();
        let (new, _) = state.begin_all_paged();
        state.finish_all_paged(old, page(5, true));
        assert_eq!(state.transactions, TransactionsView::Empty);
        state.finish_all_paged(new, page(10, true));
        assert_eq!(state.transactions.transactions().map(|t| t.len()), Some(10));
    }

    #[test]
    fn test_paged_response_after_mode_switch_is_discarded() {
        let mut state = ViewState::default();
        let (generation, _) = state.begin_all_paged();
        let _ = state.begin_by_employee();
        state.finish_all_paged(generation, page(5, true));
        assert_eq!(state.transactions, TransactionsView::Empty);
    }

    #[test]
    fn test_show_view_more_needs_both_flags() {
        let mut state = ViewState::default();
        let (generation, _) = state.begin_all_paged();
        state.finish_all_paged(generation, page(5, true));
        assert!(state.show_view_more());
        state.display_view_more = false;
        assert!(!state.show_view_more());
        state.display_view_more = true;
        state.finish_all_paged(generation, page(12, false));
        assert!(!state.show_view_more());
    }

    #[test]
    fn test_loading_guard_releases_on_drop() {
        let state = Mutex::new(ViewState::default());
        {
            let _a = LoadingGuard::new(&state, Loading::Transactions);
            let _b = LoadingGuard::new(&state, Loading::Transactions);
            assert_eq!(lock(&state).transactions_loading, 2);
            assert_eq!(lock(&state).employees_loading, 0);
        }
        assert_eq!(lock(&state).transactions_loading, 0);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::AllPaged.to_string(), "all_paged");
        assert_eq!("by_employee".parse::<Mode>().unwrap(), Mode::ByEmployee);
    }
}
