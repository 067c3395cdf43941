use crate::config::toml_config::{DEFAULT_CURRENCY, DEFAULT_POLL_INTERVAL_SECONDS};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, Parser)]
#[command(name = "peerpay")]
#[command(about = "Command-line client for the PeerPay student freelancer marketplace")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, env = "PEERPAY_API_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Bearer token from a previous login
    #[arg(long, env = "PEERPAY_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Current user id
    #[arg(long, env = "PEERPAY_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Currency code used when displaying amounts
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Unread-count polling interval in seconds
    #[arg(long, global = true)]
    pub poll_interval: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Disable colored transaction amounts
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Escrow fee calculator (no network)
    Fees {
        #[command(subcommand)]
        action: FeesCommand,
    },
    /// Sign in and print the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PEERPAY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Browse jobs
    Jobs {
        #[command(subcommand)]
        action: JobsCommand,
    },
    /// Show the wallet balance
    Balance,
    /// Show wallet transaction history
    Transactions {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Create, inspect, release or refund escrows
    Escrow {
        #[command(subcommand)]
        action: EscrowCommand,
    },
    /// Notifications
    Notifications {
        #[command(subcommand)]
        action: NotificationsCommand,
    },
    /// Wallet top-ups and withdrawals
    Payment {
        #[command(subcommand)]
        action: PaymentCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum FeesCommand {
    /// Platform fee and total for a job amount
    Deposit { amount: Decimal },
    /// What the student receives when an escrow is released
    Release { escrowed: Decimal, fee: Decimal },
}

#[derive(Debug, Clone, Subcommand)]
pub enum JobsCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Show {
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum EscrowCommand {
    Create {
        #[arg(long)]
        job: String,
        #[arg(long)]
        student: String,
        /// Defaults to the current user
        #[arg(long)]
        employer: Option<String>,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        description: Option<String>,
        /// Agree to the escrow terms
        #[arg(long)]
        agree: bool,
    },
    Show {
        id: String,
    },
    Release {
        id: String,
        /// Confirm the work is complete; release cannot be undone
        #[arg(long)]
        confirm: bool,
    },
    Refund {
        id: String,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum NotificationsCommand {
    List,
    Unread,
    Read { id: String },
    ReadAll,
    /// Poll the unread count until interrupted
    Watch,
}

#[derive(Debug, Clone, Subcommand)]
pub enum PaymentCommand {
    Deposit {
        amount: Decimal,
        #[arg(long, default_value = "card")]
        method: String,
    },
    Withdraw {
        amount: Decimal,
        #[arg(long, default_value = "bank")]
        method: String,
    },
}

impl Command {
    /// Short name used in logs and notices.
    pub fn label(&self) -> &'static str {
        match self {
            Command::Fees { .. } => "Fee calculation",
            Command::Login { .. } => "Sign in",
            Command::Jobs { .. } => "Load jobs",
            Command::Balance => "Load wallet",
            Command::Transactions { .. } => "Load transactions",
            Command::Escrow { action } => match action {
                EscrowCommand::Create { .. } => "Create escrow",
                EscrowCommand::Show { .. } => "Load escrow",
                EscrowCommand::Release { .. } => "Release escrow",
                EscrowCommand::Refund { .. } => "Refund escrow",
            },
            Command::Notifications { .. } => "Notifications",
            Command::Payment { action } => match action {
                PaymentCommand::Deposit { .. } => "Wallet deposit",
                PaymentCommand::Withdraw { .. } => "Withdrawal",
            },
        }
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn poll_interval_seconds(&self) -> u64 {
        self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS)
    }

    fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", self.base_url())?;
        if let Some(timeout) = self.timeout {
            validation::validate_positive_number("timeout", timeout, 1)?;
        }
        validation::validate_positive_number("poll_interval", self.poll_interval_seconds(), 1)?;
        validation::validate_non_empty_string("currency", self.currency())?;
        Ok(())
    }
}
