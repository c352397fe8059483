//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Amount, Dataset, Employee, Transaction};
use crate::Config;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Which employee owns each of the twelve scenario transactions, in order. Employee "3" owns two of
/// them, one inside the first two pages and one beyond them.
const OWNERS: [&str; 12] = ["1", "2", "3", "4", "1", "2", "4", "1", "2", "4", "3", "1"];

/// Four employees and twelve unapproved transactions with ids `txn-01` through `txn-12`.
pub(crate) fn scenario_dataset() -> Dataset {
    let employees = vec![
        Employee::new("1", "James", "Smith"),
        Employee::new("2", "Mary", "Jones"),
        Employee::new("3", "Robert", "Brown"),
        Employee::new("4", "Patricia", "Miller"),
    ];
    let transactions = OWNERS
        .iter()
        .enumerate()
        .map(|(ix, owner)| {
            let employee = employees
                .iter()
                .find(|e| e.id() == *owner)
                .cloned()
                .unwrap();
            Transaction::new(
                format!("txn-{:02}", ix + 1),
                Amount::new(Decimal::new(1000 + ix as i64 * 125, 2)),
                employee,
                format!("Merchant {}", ix + 1),
                format!("2022-01-{:02}", ix + 1),
            )
        })
        .collect();
    Dataset {
        employees,
        transactions,
    }
}

/// Test environment that sets up an expenses home directory with a Config and seed dataset.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment whose dataset is the scenario dataset.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("expenses");
        let config = Config::create(&root).await.unwrap();
        let json = serde_json::to_string_pretty(&scenario_dataset()).unwrap();
        std::fs::write(config.dataset_path(), json).unwrap();
        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }
}
