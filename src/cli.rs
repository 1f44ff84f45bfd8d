use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::analytics::TimeWindow;
use crate::sampler::SESSION_QUESTION_LIMIT;

/// Children's practice levels with a parent progress dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "Star Practice")]
#[command(about = "Practice math and reading levels, track progress", long_about = None)]
#[command(version)]
pub struct Args {
    /// Use in-memory database for testing
    #[arg(long, help = "Use in-memory database for testing")]
    pub test: bool,

    /// Custom database file path
    #[arg(long, value_name = "PATH", help = "Use custom database file path")]
    pub db_path: Option<PathBuf>,

    /// Override current date for testing (YYYY-MM-DD format)
    #[arg(
        long,
        value_name = "DATE",
        help = "Override current date (YYYY-MM-DD format)"
    )]
    pub override_date: Option<String>,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the parent dashboard for a child
    Dashboard {
        #[arg(long, value_name = "ID")]
        child: i64,
        #[arg(
            long,
            default_value = "week",
            help = "Time window: today, week, month, or all"
        )]
        window: String,
    },
    /// Run a practice session on a level
    Practice {
        #[arg(long, value_name = "ID")]
        child: i64,
        #[arg(long, value_name = "ID")]
        level: i64,
        #[arg(long, default_value_t = SESSION_QUESTION_LIMIT)]
        limit: usize,
    },
    /// Load demo children, levels, and questions
    Seed,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the override_date argument if provided
    pub fn validate_override_date(&self) -> Result<Option<NaiveDate>, String> {
        match &self.override_date {
            Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    format!(
                        "Invalid date format for --override-date: '{}'. Expected YYYY-MM-DD",
                        date_str
                    )
                }),
            None => Ok(None),
        }
    }
}

/// Parses a dashboard window name from the CLI.
pub fn parse_window(raw: &str) -> Result<TimeWindow, String> {
    TimeWindow::from_str(raw).ok_or_else(|| {
        format!("Unknown window '{raw}'. Expected one of: today, week, month, all")
    })
}
