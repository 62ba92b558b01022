mod cli;
mod commands;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, ColorMode, Commands};
use glossbot_core::config::CommentEnv;
use output::{OutputMode, Reporter};

fn main() {
    let cli = Cli::parse();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Human
    };

    match cli.color {
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Auto => {}
    }

    let mut reporter = Reporter::new(mode);

    let success = match cli.command {
        Commands::Comment { no_commit } => {
            let env = CommentEnv::from_env();
            commands::comment::run_comment(&env, !no_commit, &mut reporter)
        }
        Commands::Render { no_commit } => {
            let env = CommentEnv::from_env();
            commands::render::run_render(&env, !no_commit, &mut reporter)
        }
        Commands::Sha => commands::sha::run_sha(&mut reporter),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "glossbot",
                &mut std::io::stdout(),
            );
            true
        }
    };

    reporter.finish();

    if !success {
        std::process::exit(1);
    }
}
