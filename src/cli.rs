use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Scene Outliner - browse and rearrange a scene graph as a tree
#[derive(Parser, Debug)]
#[command(name = "scene-outliner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the outline of a project file
    Show(ShowArgs),

    /// Launch the interactive outliner
    Tui(TuiArgs),

    /// Write a sample project file
    New(NewArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Generate a man page
    Man,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project file to read
    pub path: PathBuf,

    /// Print rows hidden under folded objects too
    #[arg(short, long)]
    pub all: bool,

    /// Print the object type after each label
    #[arg(short = 't', long)]
    pub types: bool,
}

#[derive(Args, Debug)]
pub struct TuiArgs {
    /// Project file to open
    pub path: PathBuf,

    /// Disable mouse capture
    #[arg(long)]
    pub no_mouse: bool,
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Where to write the project file
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}
