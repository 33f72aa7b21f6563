use anyhow::Result;
use clap::Parser;
use db_fill::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let summary = db_fill::run(&cli).await?;
    println!("{summary}");
    Ok(())
}
