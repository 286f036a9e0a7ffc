//! Command-line interface for `taskdash`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use taskdash_core::{MoveDirection, Priority, SectionEdge, SortDirection};

use crate::logging;

/// `taskdash` (td) - Marker-based task dashboard.
#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(
    author,
    version,
    about = "Markdown task dashboard (the document text is the database)",
    long_about = None,
    after_help = "Issue blocks between the %% markers are managed by td; edit issue files freely."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a taskdash workspace in the current directory
    Init(InitArgs),

    /// Create a new issue (alias: create)
    #[command(alias = "create")]
    Add(AddArgs),

    /// Move an issue to the Archive section
    Archive(IdArgs),

    /// Move an archived issue back to Active (alias: unarchive)
    #[command(alias = "unarchive")]
    Restore(IdArgs),

    /// Remove an issue block from the dashboard
    Remove(RemoveArgs),

    /// Reorder an issue within the Active section
    Move(MoveArgs),

    /// Sort the Active section
    Sort(SortArgs),

    /// Set an issue's priority
    Priority(PriorityArgs),

    /// Attach a GitHub link to an issue
    Link(LinkArgs),

    /// Regenerate the dashboard from the issue files
    Rebuild,

    /// List issues (alias: ls)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Dashboard id embedded in every issue block
    #[arg(default_value = "tasks")]
    pub id: String,

    /// Dashboard document path, relative to the workspace root
    #[arg(long, default_value = "Dashboard.md")]
    pub path: String,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Issue name (the id is a slug of this)
    pub name: String,

    /// Priority level
    #[arg(short, long, value_enum, default_value_t = PriorityLevel::Medium)]
    pub priority: PriorityLevel,

    /// Initial body for the issue file
    #[arg(long)]
    pub body: Option<String>,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Issue id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Issue id
    pub id: String,

    /// Also delete the backing issue file
    #[arg(long)]
    pub delete_file: bool,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Issue id
    pub id: String,

    /// Where to move it
    #[arg(value_enum)]
    pub target: MoveTarget,
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Sort key
    #[arg(value_enum, default_value_t = SortKey::Priority)]
    pub key: SortKey,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,
}

#[derive(Args, Debug)]
pub struct PriorityArgs {
    /// Issue id
    pub id: String,

    /// New priority level
    #[arg(value_enum)]
    pub level: PriorityLevel,
}

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Issue id
    pub id: String,

    /// GitHub issue or pull request URL
    pub url: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List the Archive section instead of Active
    #[arg(long)]
    pub archived: bool,
}

/// Priority levels accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    Top,
    High,
    Medium,
    Low,
}

impl From<PriorityLevel> for Priority {
    fn from(level: PriorityLevel) -> Self {
        match level {
            PriorityLevel::Top => Self::Top,
            PriorityLevel::High => Self::High,
            PriorityLevel::Medium => Self::Medium,
            PriorityLevel::Low => Self::Low,
        }
    }
}

/// Move targets accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    Up,
    Down,
    Top,
    Bottom,
}

impl MoveTarget {
    /// Split into the writer's two move flavors.
    #[must_use]
    pub const fn resolve(self) -> MoveKind {
        match self {
            Self::Up => MoveKind::Adjacent(MoveDirection::Up),
            Self::Down => MoveKind::Adjacent(MoveDirection::Down),
            Self::Top => MoveKind::Edge(SectionEdge::Top),
            Self::Bottom => MoveKind::Edge(SectionEdge::Bottom),
        }
    }
}

/// A resolved move request.
#[derive(Debug, Clone, Copy)]
pub enum MoveKind {
    Adjacent(MoveDirection),
    Edge(SectionEdge),
}

/// Sort keys accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Priority,
    Created,
    Edited,
}

impl SortArgs {
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    match cli.command {
        Some(Commands::Init(args)) => commands::init::execute(&args),
        Some(Commands::Add(args)) => commands::add::execute(&args, cli.json),
        Some(Commands::Archive(args)) => commands::archive::execute(&args),
        Some(Commands::Restore(args)) => commands::restore::execute(&args),
        Some(Commands::Remove(args)) => commands::remove::execute(&args),
        Some(Commands::Move(args)) => commands::move_issue::execute(&args),
        Some(Commands::Sort(args)) => commands::sort::execute(&args),
        Some(Commands::Priority(args)) => commands::priority::execute(&args),
        Some(Commands::Link(args)) => commands::link::execute(&args),
        Some(Commands::Rebuild) => commands::rebuild::execute(cli.json),
        Some(Commands::List(args)) => commands::list::execute(&args, cli.json),
        Some(Commands::Version) => {
            println!("td {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("td - Markdown task dashboard. Use --help for usage.");
            Ok(())
        }
    }
}
