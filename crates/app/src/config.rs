use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use engine::{BudgetConfig, MonthKey};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/fintrack.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub api_prefix: String,
    pub level: String,
    pub session_path: String,
    pub timeout_secs: u64,
    pub rates_url: String,
    pub budget: BudgetConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:8443".to_string(),
            api_prefix: "/api/v1".to_string(),
            level: "info".to_string(),
            session_path: "config/fintrack_session.json".to_string(),
            timeout_secs: 15,
            rates_url: client::DEFAULT_RATES_URL.to_string(),
            budget: BudgetConfig::default(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Budgets, reports and portfolio of a FinTrack account"
)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override base URL (e.g. https://localhost:8443).
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Override log level.
    #[arg(long, global = true)]
    level: Option<String>,
    /// Override the file the session is kept in.
    #[arg(long, global = true)]
    session_path: Option<String>,
    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

/// Salary and rate of the offline views.
#[derive(Debug, Clone, clap::Args)]
pub struct BudgetArgs {
    /// Net monthly salary in USD.
    #[arg(long, default_value_t = 1_190.0)]
    pub salary_usd: f64,
    /// USD/TRY rate; fetched from the public feed when omitted.
    #[arg(long)]
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Monthly budgets of the bundled sample data.
    Budgets(BudgetArgs),
    /// Report over the bundled sample data.
    Report(BudgetArgs),
    /// Sample transactions of one month, installments expanded.
    Installments {
        #[arg(long)]
        month: MonthKey,
    },
    #[command(flatten)]
    Online(OnlineCommand),
}

/// Commands that need the server.
#[derive(Debug, Clone, Subcommand)]
pub enum OnlineCommand {
    /// Sign in; the password is read from FINTRACK_PASSWORD.
    Login {
        #[arg(long)]
        username: String,
    },
    Logout,
    /// Create an account; the password is read from FINTRACK_PASSWORD.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        salary_usd: String,
    },
    /// Transactions of a month (yyyy-mm).
    Transactions {
        #[arg(long)]
        month: MonthKey,
        #[arg(long, default_value_t = 50)]
        size: u32,
    },
    /// Server report over a date range (yyyy-mm-dd).
    Summary {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    /// Investments with portfolio totals.
    Portfolio,
    /// Current USD/TRY rate.
    Rate {
        /// Read the public feed instead of the server.
        #[arg(long)]
        public: bool,
    },
}

#[derive(Debug)]
pub struct Cli {
    pub settings: AppConfig,
    pub command: Command,
    pub json: bool,
}

pub fn load() -> Result<Cli> {
    from_args(Args::parse())
}

pub fn from_args(args: Args) -> Result<Cli> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINTRACK"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }
    if let Some(session_path) = args.session_path {
        settings.session_path = session_path;
    }

    Ok(Cli {
        settings,
        command: args.command,
        json: args.json,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Cli {
        let args = Args::try_parse_from(argv.iter().copied()).unwrap();
        from_args(args).unwrap()
    }

    #[test]
    fn defaults_without_file() {
        let cli = parse(&["fintrack", "--config", "missing/nowhere", "budgets"]);
        assert_eq!(cli.settings.api_prefix, "/api/v1");
        assert_eq!(cli.settings.timeout_secs, 15);
        assert_eq!(cli.settings.budget.months.len(), 5);
        assert!(matches!(cli.command, Command::Budgets(BudgetArgs { rate: None, .. })));
    }

    #[test]
    fn flags_override_settings() {
        let cli = parse(&[
            "fintrack",
            "--config",
            "missing/nowhere",
            "transactions",
            "--month",
            "2026-03",
            "--base-url",
            "http://127.0.0.1:9000",
            "--json",
        ]);
        assert_eq!(cli.settings.base_url, "http://127.0.0.1:9000");
        assert!(cli.json);
        match cli.command {
            Command::Online(OnlineCommand::Transactions { month, size }) => {
                assert_eq!(month.to_string(), "2026-03");
                assert_eq!(size, 50);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_month() {
        assert!(Args::try_parse_from(["fintrack", "installments", "--month", "March"]).is_err());
    }
}
