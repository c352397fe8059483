//! Read-only commands that go straight through the request facade.

use crate::api::{self, PaginatedRequestParams, RequestByEmployeeParams};
use crate::args::TransactionsArgs;
use crate::commands::Out;
use crate::model::{Employee, Transaction};
use crate::{Config, Result};

/// Lists all employees.
pub async fn employees(config: Config) -> Result<Out<Vec<Employee>>> {
    let employees = api::requests(&config).await?.employees().await?;
    let message = employees
        .iter()
        .map(|e| format!("{}\t{}", e.id(), e.label()))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(
        format!("{} employees\n{message}", employees.len()),
        employees,
    ))
}

/// Lists the cumulative window of `args.pages()` pages, or every transaction of
/// `args.employee()` when that is given.
///
/// # Errors
/// - `InvalidArgument` if the employee id is empty or the page count is zero.
pub async fn transactions(config: Config, args: TransactionsArgs) -> Result<Out<Vec<Transaction>>> {
    let requests = api::requests(&config).await?;
    let (txns, has_more) = match args.employee() {
        Some(employee_id) => {
            let txns = requests
                .transactions_by_employee(RequestByEmployeeParams::new(employee_id))
                .await?;
            (txns, false)
        }
        None => {
            let page = requests
                .paginated_transactions(PaginatedRequestParams {
                    display_pages: args.pages(),
                })
                .await?;
            (page.data, page.has_more)
        }
    };
    let mut message = format_transactions(&txns);
    if has_more {
        message.push_str("\n(more transactions available)");
    }
    Ok(Out::new(message, txns))
}

/// Renders one line per transaction, e.g. `[x] txn-01  2022-01-04  $10.00  Delta  James Smith`.
pub(crate) fn format_transactions(txns: &[Transaction]) -> String {
    if txns.is_empty() {
        return "No transactions".to_string();
    }
    txns.iter()
        .map(|t| {
            format!(
                "[{}] {}\t{}\t{}\t{}\t{}",
                if t.approved() { "x" } else { " " },
                t.id(),
                t.date(),
                t.amount(),
                t.merchant(),
                t.employee().label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_employees() {
        let env = TestEnv::new().await;
        let out = employees(env.config()).await.unwrap();
        assert_eq!(out.structure().unwrap().len(), 4);
        assert!(out.message().contains("Robert Brown"));
    }

    #[tokio::test]
    async fn test_transactions_pages() {
        let env = TestEnv::new().await;
        let out = transactions(env.config(), TransactionsArgs::new(Some(2), None))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().len(), 10);
        assert!(out.message().ends_with("(more transactions available)"));
    }

    #[tokio::test]
    async fn test_transactions_by_employee() {
        let env = TestEnv::new().await;
        let out = transactions(env.config(), TransactionsArgs::new(None, Some("3".into())))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_transactions_empty_employee_id() {
        let env = TestEnv::new().await;
        let err = transactions(env.config(), TransactionsArgs::new(None, Some(String::new())))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidArgument);
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_transactions(&[]), "No transactions");
    }
}
