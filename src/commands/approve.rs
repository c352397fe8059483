use crate::api::{self, SetTransactionApprovalParams};
use crate::args::ApproveArgs;
use crate::commands::Out;
use crate::model::SuccessResponse;
use crate::{Config, Result};

/// Sets the approval flag of one transaction. An unknown transaction id is not an error; it is
/// reported through `success: false` and the message.
///
/// The dataset file is not modified, the change only lasts for this run.
pub async fn approve(config: Config, args: ApproveArgs) -> Result<Out<SuccessResponse>> {
    let response = api::requests(&config)
        .await?
        .set_transaction_approval(SetTransactionApprovalParams::new(
            args.transaction_id(),
            args.value(),
        ))
        .await?;
    let message = if response.success {
        format!(
            "Transaction {} is now {}",
            args.transaction_id(),
            if args.value() { "approved" } else { "not approved" }
        )
    } else {
        format!("Transaction {} was not found", args.transaction_id())
    };
    Ok(Out::new(message, response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_approve() {
        let env = TestEnv::new().await;
        let out = approve(env.config(), ApproveArgs::new("txn-04", true))
            .await
            .unwrap();
        assert!(out.structure().unwrap().success);
        assert_eq!(out.message(), "Transaction txn-04 is now approved");
    }

    #[tokio::test]
    async fn test_approve_unknown() {
        let env = TestEnv::new().await;
        let out = approve(env.config(), ApproveArgs::new("txn-99", false))
            .await
            .unwrap();
        assert!(!out.structure().unwrap().success);
        assert_eq!(out.message(), "Transaction txn-99 was not found");
    }
}
