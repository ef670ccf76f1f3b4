use clap::Parser;
use ghflow::cli::{Cli, Commands};
use ghflow::commands;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Start { issue } => commands::run_start(issue),
        Commands::New { title } => commands::run_new(title),
        Commands::CreatePr { base } => commands::run_create_pr(base),
        Commands::PushAndPr { base } => commands::run_push_and_pr(base),
        Commands::Info => commands::run_info(),
        Commands::Status => commands::run_status(),
        Commands::ImportCard { card, kind } => commands::run_import_card(card, &kind),
        Commands::DeployNotes { from, to } => commands::run_deploy_notes(from, to),
        Commands::Cleanup => commands::run_cleanup(),
        Commands::Reviews => commands::run_reviews(),
    }
}
