use clap::Parser;
use genai_stack_config::cli::{self, Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve(args) => cli::resolve::run(args),
        Command::Validate(args) => cli::validate::run(args),
        Command::Profiles => cli::profiles::run(),
    }
}
