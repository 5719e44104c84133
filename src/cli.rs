use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "relnotes")]
#[command(about = "Generate release notes from Linear issues", version)]
#[command(after_help = "EXAMPLES:
    relnotes generate 106.5.0             Write changelog-106.5.0.md
    relnotes generate 106.5.0 --publish   Also create/update the Notion page
    relnotes labels                       List release labels (newest first)
    relnotes views                        List teams usable as views")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Show error cause chain on failure
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate release notes for a release label or a view
    #[command(after_help = "EXAMPLES:
    relnotes generate 106.5.0
    relnotes generate 106.5.0 --output ./docs
    relnotes generate 106.5.0 --stdout
    relnotes generate --view abc123-view-id
    relnotes generate 106.5.0 --publish")]
    Generate(GenerateArgs),
    /// List release labels (versions like 106.5.0, newest first)
    #[command(after_help = "EXAMPLES:
    relnotes labels
    relnotes labels --json")]
    Labels,
    /// List teams that can be used as views
    #[command(after_help = "EXAMPLES:
    relnotes views")]
    Views,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    relnotes completions bash > ~/.bash_completion.d/relnotes
    relnotes completions zsh > ~/.zfunc/_relnotes
    relnotes completions fish > ~/.config/fish/completions/relnotes.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    relnotes init")]
    Init,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Release label to collect issues for (e.g., 106.5.0)
    #[arg(required_unless_present = "view")]
    pub label: Option<String>,

    /// Generate from a saved view id instead of a release label
    #[arg(long, conflicts_with = "label")]
    pub view: Option<String>,

    /// Directory to write the changelog file into (default: current dir)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the document instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Publish to Notion (creates the page, or updates it if one exists)
    #[arg(long)]
    pub publish: bool,
}
