use crate::core::PoolConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Apply account-to-account transfers concurrently and print final balances
#[derive(Parser, Debug)]
#[command(name = "transfer-ledger")]
#[command(about = "Apply account-to-account transfers concurrently and print final balances", long_about = None)]
pub struct CliArgs {
    /// Accounts CSV file (id,name,balance)
    #[arg(
        long = "accounts",
        value_name = "ACCOUNTS",
        help = "Path to the accounts CSV file (id,name,balance)"
    )]
    pub accounts_file: PathBuf,

    /// Transfers CSV file (from,to,amount)
    #[arg(value_name = "TRANSFERS", help = "Path to the transfers CSV file")]
    pub transfers_file: PathBuf,

    /// Worker pool implementation
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "threads",
        help = "Worker pool: 'threads' for OS threads or 'async' for tokio tasks"
    )]
    pub strategy: StrategyType,

    /// Number of concurrent workers
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of concurrent workers (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Work queue capacity
    #[arg(
        long = "queue-capacity",
        value_name = "SIZE",
        help = "Maximum number of transfers waiting for a worker (default: 1000)"
    )]
    pub queue_capacity: Option<usize>,
}

/// Available worker pool implementations
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Threads,
    Async,
}

impl CliArgs {
    /// Create a PoolConfig from CLI arguments
    ///
    /// Missing values use the defaults; zero values fall back to the defaults
    /// with a warning.
    pub fn to_pool_config(&self) -> PoolConfig {
        let default = PoolConfig::default();
        PoolConfig::new(
            self.workers.unwrap_or(default.workers),
            self.queue_capacity.unwrap_or(default.queue_capacity),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_QUEUE_CAPACITY;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "--accounts", "a.csv", "t.csv"], StrategyType::Threads)]
    #[case::explicit_threads(&["program", "--accounts", "a.csv", "--strategy", "threads", "t.csv"], StrategyType::Threads)]
    #[case::explicit_async(&["program", "--strategy", "async", "--accounts", "a.csv", "t.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[test]
    fn test_file_arguments() {
        let parsed =
            CliArgs::try_parse_from(["program", "t.csv", "--accounts", "a.csv"]).unwrap();

        assert_eq!(parsed.accounts_file, PathBuf::from("a.csv"));
        assert_eq!(parsed.transfers_file, PathBuf::from("t.csv"));
    }

    #[rstest]
    #[case::all_defaults(&["program", "--accounts", "a.csv", "t.csv"], num_cpus::get(), DEFAULT_QUEUE_CAPACITY)]
    #[case::custom_workers(&["program", "--accounts", "a.csv", "--workers", "3", "t.csv"], 3, DEFAULT_QUEUE_CAPACITY)]
    #[case::custom_capacity(&["program", "--accounts", "a.csv", "--queue-capacity", "8", "t.csv"], num_cpus::get(), 8)]
    #[case::all_custom(
        &["program", "--accounts", "a.csv", "--workers", "3", "--queue-capacity", "8", "t.csv"],
        3,
        8
    )]
    #[case::zero_workers(&["program", "--accounts", "a.csv", "--workers", "0", "t.csv"], num_cpus::get(), DEFAULT_QUEUE_CAPACITY)]
    #[case::zero_capacity(&["program", "--accounts", "a.csv", "--queue-capacity", "0", "t.csv"], num_cpus::get(), DEFAULT_QUEUE_CAPACITY)]
    fn test_pool_config_conversion(
        #[case] args: &[&str],
        #[case] expected_workers: usize,
        #[case] expected_capacity: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_pool_config();

        assert_eq!(config.workers, expected_workers);
        assert_eq!(config.queue_capacity, expected_capacity);
    }

    #[rstest]
    #[case::missing_transfers(&["program", "--accounts", "a.csv"])]
    #[case::missing_accounts(&["program", "t.csv"])]
    #[case::invalid_strategy(&["program", "--accounts", "a.csv", "--strategy", "sync", "t.csv"])]
    #[case::negative_workers(&["program", "--accounts", "a.csv", "--workers", "-1", "t.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
