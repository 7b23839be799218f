//! CLI interface for foodtrack

pub mod commands;
mod output;
pub mod prompts;
pub mod state;

pub use output::*;

use crate::auth::Role;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "foodtrack")]
#[command(version = "1.0.0")]
#[command(about = "Terminal client for the Food Tracker API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a foodtrack.toml configuration file
    Init,

    /// Sign in and store the session
    Login {
        /// Email to sign in with (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Create an account and sign in
    Register,

    /// Clear the stored session
    Logout,

    /// Show who is currently signed in (offline)
    Whoami,

    /// Show the dashboard for your role
    Dashboard,

    /// Track foods
    Foods {
        #[command(subcommand)]
        action: FoodsAction,
    },

    /// Track meals
    Meals {
        #[command(subcommand)]
        action: MealsAction,
    },

    /// View or update your profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Administrator screens
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
pub enum FoodsAction {
    /// List foods with a calorie total
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a food
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        calories: i64,
    },

    /// Update a food; omitted fields keep their current value
    Update {
        /// Id of the food to update
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        calories: Option<i64>,
    },

    /// Delete a food
    Delete {
        /// Id of the food to delete
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum MealsAction {
    /// List meals with calorie and protein totals
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Log a meal
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        calories: i64,

        /// Protein in grams
        #[arg(short, long)]
        protein: Option<f64>,

        /// Date of the meal (YYYY-MM-DD, defaults to the server's today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete a meal
    Delete {
        /// Id of the meal to delete
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show your profile
    Show,

    /// Update name and/or email
    Update {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Entity counts across the system
    Dashboard,

    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: AdminUsersAction,
    },

    /// Manage the food catalog
    Foods {
        #[command(subcommand)]
        action: FoodsAction,
    },

    /// Review and prune logged meals
    Meals {
        #[command(subcommand)]
        action: AdminMealsAction,
    },

    /// Calorie reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },
}

#[derive(Subcommand)]
pub enum AdminUsersAction {
    /// List all accounts
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Change an account's role
    SetRole {
        /// Id of the account
        id: i64,

        #[arg(short, long)]
        role: RoleArg,
    },

    /// Delete an account
    Delete {
        /// Id of the account to delete
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum AdminMealsAction {
    /// List all logged meals
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Delete a logged meal
    Delete {
        /// Id of the meal to delete
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Daily calorie report
    Daily {
        /// Day to report on (YYYY-MM-DD, defaults to the server's today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Monthly calorie report
    Monthly {
        /// Month to report on (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Admin,
    User,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Admin => Role::Admin,
            RoleArg::User => Role::User,
        }
    }
}
