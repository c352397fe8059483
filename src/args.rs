//! These structs provide the CLI interface for the expenses CLI.

use clap::{ArgAction, Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: Review employee expense transactions.
///
/// Lists employees and their expense transactions, pages through all transactions a few at a
/// time, filters them by employee, and approves or un-approves individual transactions.
///
/// All data lives in memory for the duration of one run. It is seeded from the dataset file in
/// the home directory, which `expenses init` creates.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory with a default config.json and a seed dataset.json.
    Init,
    /// List all employees.
    Employees,
    /// List transactions, either a cumulative page window or those of one employee.
    Transactions(TransactionsArgs),
    /// Set the approval flag of a transaction.
    Approve(ApproveArgs),
    /// Walk through the transaction view the way a user would, printing the view after each step.
    ///
    /// The view first loads one page of all transactions, then applies each INTENT in order:
    ///
    /// - `more` or `all`: show all transactions; repeating it shows one more page each time
    ///
    /// - `employee=ID`: show every transaction of one employee (`employee=All` shows everyone)
    ///
    /// - `approve=ID` / `unapprove=ID`: set or clear the approval flag of a transaction
    Browse(BrowseArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the configuration and dataset are held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `expenses transactions` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct TransactionsArgs {
    /// How many pages of transactions to show, counted from the first.
    #[arg(long, conflicts_with = "employee")]
    pages: Option<u32>,

    /// Show every transaction of the employee with this id instead of a page window.
    #[arg(long)]
    employee: Option<String>,
}

impl TransactionsArgs {
    pub fn new(pages: Option<u32>, employee: Option<String>) -> Self {
        Self { pages, employee }
    }

    pub fn pages(&self) -> Option<u32> {
        self.pages
    }

    pub fn employee(&self) -> Option<&str> {
        self.employee.as_deref()
    }
}

/// Args for the `expenses approve` command.
#[derive(Debug, Parser, Clone)]
pub struct ApproveArgs {
    /// The id of the transaction.
    transaction_id: String,

    /// The approval flag to set.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    value: bool,
}

impl ApproveArgs {
    pub fn new(transaction_id: impl Into<String>, value: bool) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            value,
        }
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

/// Args for the `expenses browse` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct BrowseArgs {
    /// The steps to take after the initial load.
    intents: Vec<Intent>,
}

impl BrowseArgs {
    pub fn new(intents: Vec<Intent>) -> Self {
        Self { intents }
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }
}

/// One user action in `expenses browse`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Intent {
    /// Show all transactions, or one more page of them.
    All,
    /// Pick an entry in the employee selector.
    Employee(String),
    /// Set the approval flag of a transaction.
    Approve(String, bool),
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = match s.split_once('=') {
            Some((verb, arg)) => (verb.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };
        match (verb, arg) {
            ("all" | "more", None) => Ok(Intent::All),
            ("employee", Some(id)) if !id.is_empty() => Ok(Intent::Employee(id.to_string())),
            ("approve", Some(id)) if !id.is_empty() => Ok(Intent::Approve(id.to_string(), true)),
            ("unapprove", Some(id)) if !id.is_empty() => {
                Ok(Intent::Approve(id.to_string(), false))
            }
            _ => Err(format!(
                "Invalid intent '{s}', expected one of: more, all, employee=ID, approve=ID, \
                unapprove=ID"
            )),
        }
    }
}

impl Display for Intent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::All => write!(f, "more"),
            Intent::Employee(id) => write!(f, "employee={id}"),
            Intent::Approve(id, true) => write!(f, "approve={id}"),
            Intent::Approve(id, false) => write!(f, "unapprove={id}"),
        }
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or EXPENSES_HOME instead of relying on the default \
                home directory.",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intents() {
        assert_eq!("more".parse::<Intent>().unwrap(), Intent::All);
        assert_eq!("all".parse::<Intent>().unwrap(), Intent::All);
        assert_eq!(
            "employee=3".parse::<Intent>().unwrap(),
            Intent::Employee("3".to_string())
        );
        assert_eq!(
            "unapprove=txn-01".parse::<Intent>().unwrap(),
            Intent::Approve("txn-01".to_string(), false)
        );
    }

    #[test]
    fn test_parse_bad_intents() {
        assert!("employee=".parse::<Intent>().is_err());
        assert!("employee".parse::<Intent>().is_err());
        assert!("more=2".parse::<Intent>().is_err());
        assert!("dance".parse::<Intent>().is_err());
    }

    #[test]
    fn test_intent_display_parses_back() {
        let intent = Intent::Approve("txn-07".to_string(), true);
        assert_eq!(intent.to_string().parse::<Intent>().unwrap(), intent);
    }

    #[test]
    fn test_cli_parses() {
        let args = Args::try_parse_from([
            "expenses",
            "--home",
            "/tmp/expenses",
            "browse",
            "more",
            "employee=3",
        ])
        .unwrap();
        assert_eq!(args.common().home().path(), Path::new("/tmp/expenses"));
        match args.command() {
            Command::Browse(browse) => assert_eq!(browse.intents().len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_pages_conflicts_with_employee() {
        let res = Args::try_parse_from([
            "expenses",
            "transactions",
            "--pages",
            "2",
            "--employee",
            "3",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_approve_value_defaults_to_true() {
        let args = Args::try_parse_from(["expenses", "approve", "txn-01"]).unwrap();
        match args.command() {
            Command::Approve(approve) => assert!(approve.value()),
            other => panic!("unexpected command {other:?}"),
        }
        let args =
            Args::try_parse_from(["expenses", "approve", "txn-01", "--value", "false"]).unwrap();
        match args.command() {
            Command::Approve(approve) => assert!(!approve.value()),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
