use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "glossbot",
    version,
    about = "Post glossary validation results on GitHub pull requests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Color mode
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or update the validation comment on the current pull request
    Comment {
        /// Leave the commit line out of the comment
        #[arg(long)]
        no_commit: bool,
    },

    /// Print the comment body without posting it
    Render {
        /// Leave the commit line out of the comment
        #[arg(long)]
        no_commit: bool,
    },

    /// Print the short hash of HEAD
    Sha,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
