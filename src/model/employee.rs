use serde::{Deserialize, Serialize};

/// The id of the sentinel employee that stands for "no employee filter".
pub const ALL_EMPLOYEES_ID: &str = "All";

/// An employee who submits expense transactions.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub(crate) id: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// The sentinel "All Employees" entry that heads the employee selector.
    pub fn all() -> Self {
        Self::new(ALL_EMPLOYEES_ID, "All", "Employees")
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Whether this is the "All Employees" sentinel rather than a real employee.
    pub fn is_all(&self) -> bool {
        self.id == ALL_EMPLOYEES_ID
    }

    /// The label shown in the employee selector, e.g. `James Smith`.
    pub fn label(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(Employee::new("1", "James", "Smith").label(), "James Smith");
        assert_eq!(Employee::all().label(), "All Employees");
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"id":"7","firstName":"Ada","lastName":"Byron"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee, Employee::new("7", "Ada", "Byron"));
        assert!(!employee.is_all());
    }
}
