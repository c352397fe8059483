use crate::model::{Amount, Employee};
use serde::{Deserialize, Serialize};

/// A single expense transaction.
///
/// The `employee` is an embedded copy taken when the dataset was built, not a reference into the
/// employee list.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub(crate) id: String,
    pub(crate) amount: Amount,
    pub(crate) employee: Employee,
    pub(crate) merchant: String,
    pub(crate) date: String,
    #[serde(default)]
    pub(crate) approved: bool,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        amount: Amount,
        employee: Employee,
        merchant: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            employee,
            merchant: merchant.into(),
            date: date.into(),
            approved: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn approved(&self) -> bool {
        self.approved
    }

    pub(crate) fn set_approved(&mut self, value: bool) {
        self.approved = value;
    }

    /// Whether this transaction was submitted by the employee with `employee_id`.
    pub fn belongs_to(&self, employee_id: &str) -> bool {
        self.employee.id == employee_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "id": "a1b2",
            "amount": 431.19,
            "employee": {"id": "3", "firstName": "Mary", "lastName": "Jones"},
            "merchant": "Delta Air Lines",
            "date": "2022-01-04",
            "approved": true
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.id(), "a1b2");
        assert_eq!(txn.amount(), Amount::from_str("431.19").unwrap());
        assert!(txn.belongs_to("3"));
        assert!(!txn.belongs_to("4"));
        assert!(txn.approved());
    }

    #[test]
    fn test_approved_defaults_to_false() {
        let json = r#"{
            "id": "a1b2",
            "amount": 5,
            "employee": {"id": "3", "firstName": "Mary", "lastName": "Jones"},
            "merchant": "Blue Bottle",
            "date": "2022-01-04"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert!(!txn.approved());
    }
}
