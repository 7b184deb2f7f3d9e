use clap::Parser;
use semantic_memo::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Reverse(args) => cli::reverse::run(args, cli.provider).await,
        Command::FormatName(args) => cli::format_name::run(args, cli.provider).await,
    }
}
