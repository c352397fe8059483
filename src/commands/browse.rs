//! The `browse` command drives the view-state controller and prints what a user would see.

use crate::api;
use crate::args::{BrowseArgs, Intent};
use crate::commands::list::format_transactions;
use crate::commands::Out;
use crate::model::Employee;
use crate::view::{Controller, Snapshot};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::debug;

/// The view after one step of a browse session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// The intent that led to this view, `None` for the initial load.
    pub intent: Option<String>,
    /// For approvals, whether the transaction was found.
    pub success: Option<bool>,
    pub view: Snapshot,
}

/// Loads the initial view, then applies each intent in `args` in order.
pub async fn browse(config: Config, args: BrowseArgs) -> Result<Out<Vec<Step>>> {
    let controller = Controller::new(api::requests(&config).await?);
    let mut steps = Vec::with_capacity(args.intents().len() + 1);

    controller.initialize().await?;
    steps.push(Step {
        intent: None,
        success: None,
        view: controller.snapshot(),
    });

    for intent in args.intents() {
        debug!("Applying intent {intent}");
        let success = match intent {
            Intent::All => {
                controller.select_all().await?;
                None
            }
            Intent::Employee(id) => {
                let employee = find_employee(&controller, id);
                controller.choose(&employee).await?;
                None
            }
            Intent::Approve(id, value) => {
                Some(controller.set_transaction_approval(id, *value).await?)
            }
        };
        steps.push(Step {
            intent: Some(intent.to_string()),
            success,
            view: controller.snapshot(),
        });
    }

    let message = steps.iter().map(render).collect::<Vec<_>>().join("\n\n");
    Ok(Out::new(message, steps))
}

/// Finds the selector entry for `id`. Ids that are not in the list are passed through as is, so
/// the controller decides what they mean.
fn find_employee(controller: &Controller, id: &str) -> Employee {
    controller
        .employee_options()
        .into_iter()
        .find(|e| e.id() == id)
        .unwrap_or_else(|| Employee::new(id, "", ""))
}

fn render(step: &Step) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "== {}",
        step.intent.as_deref().unwrap_or("initial load")
    );
    if step.success == Some(false) {
        let _ = writeln!(s, "(transaction not found)");
    }
    let view = &step.view;
    let mode = view
        .mode
        .map(|m| m.to_string())
        .unwrap_or_else(|| "none".to_string());
    let _ = writeln!(s, "mode: {mode}, pages: {}", view.pages_accumulated);
    match &view.transactions {
        None => s.push_str("Loading..."),
        Some(txns) => s.push_str(&format_transactions(txns)),
    }
    if view.show_view_more {
        s.push_str("\n[View More]");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use crate::view::Mode;

    fn lens(out: &Out<Vec<Step>>) -> Vec<Option<usize>> {
        out.structure()
            .unwrap()
            .iter()
            .map(|step| step.view.transactions.as_ref().map(|t| t.len()))
            .collect()
    }

    #[tokio::test]
    async fn test_browse_paging_and_filter() {
        let env = TestEnv::new().await;
        let intents = vec![
            Intent::All,
            Intent::Employee("3".to_string()),
            Intent::All,
        ];
        let out = browse(env.config(), BrowseArgs::new(intents)).await.unwrap();
        assert_eq!(lens(&out), vec![Some(5), Some(10), Some(2), Some(5)]);

        let steps = out.structure().unwrap();
        assert!(steps[1].view.show_view_more);
        assert!(!steps[2].view.show_view_more);
        assert_eq!(steps[2].view.mode, Some(Mode::ByEmployee));
        assert_eq!(steps[3].view.pages_accumulated, 1);
    }

    #[tokio::test]
    async fn test_browse_sentinel_employee() {
        let env = TestEnv::new().await;
        let intents = vec![
            Intent::Employee("1".to_string()),
            Intent::Employee("All".to_string()),
        ];
        let out = browse(env.config(), BrowseArgs::new(intents)).await.unwrap();
        assert_eq!(lens(&out), vec![Some(5), Some(4), Some(5)]);
        assert_eq!(out.structure().unwrap()[2].view.mode, Some(Mode::AllPaged));
    }

    #[tokio::test]
    async fn test_browse_approvals() {
        let env = TestEnv::new().await;
        let intents = vec![
            Intent::Approve("txn-01".to_string(), true),
            Intent::Approve("txn-42".to_string(), true),
        ];
        let out = browse(env.config(), BrowseArgs::new(intents)).await.unwrap();
        let steps = out.structure().unwrap();
        assert_eq!(steps[1].success, Some(true));
        assert!(steps[1].view.transactions.as_ref().unwrap()[0].approved());
        assert_eq!(steps[2].success, Some(false));
        assert!(out.message().contains("(transaction not found)"));
    }

    #[tokio::test]
    async fn test_browse_renders_view_more() {
        let env = TestEnv::new().await;
        let out = browse(env.config(), BrowseArgs::default()).await.unwrap();
        assert!(out.message().starts_with("== initial load"));
        assert!(out.message().ends_with("[View More]"));
    }
}
