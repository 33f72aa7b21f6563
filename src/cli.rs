use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_TASKS_FILE: &str = "tasks.txt";

/// Fill a task-tracker API with randomly generated users and tasks.
#[derive(Debug, Clone, Parser)]
#[command(name = "db-fill", version, about)]
pub struct Cli {
    /// Host of the target service, with or without a scheme
    #[arg(long, short, default_value = "localhost")]
    pub url: String,
    #[arg(long, short, default_value_t = 3000)]
    pub port: u16,
    /// Number of users to create
    #[arg(long, short = 'n', default_value_t = 20)]
    pub users: usize,
    /// Number of tasks to create
    #[arg(long, short, default_value_t = 100)]
    pub tasks: usize,
    /// Newline-separated task names to pick from
    #[arg(long, default_value = DEFAULT_TASKS_FILE)]
    pub tasks_file: PathBuf,
    /// Seed the random generator for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    pub fn target(&self) -> String {
        format!("{}:{}", self.url, self.port)
    }
}
