pub mod commands;
pub mod output;
pub mod selector;
pub mod workspace;

use crate::errors::Result;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "gt")]
#[command(about = "Stacked branches on top of plain git")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a branch on top of the current (or given) branch and check it out
    Create {
        /// Name of the new branch
        name: String,

        /// Parent branch (defaults to the current branch)
        #[arg(long, short)]
        parent: Option<String>,
    },

    /// Record the parent of an existing branch
    Track {
        /// Parent branch
        parent: String,

        /// Branch to track (defaults to the current branch)
        #[arg(long, short)]
        branch: Option<String>,
    },

    /// Forget the parent of a branch
    Untrack {
        /// Branch to untrack (defaults to the current branch)
        branch: Option<String>,
    },

    /// Delete a branch and reattach its children to its parent
    Delete {
        branch: String,

        /// Delete even if the branch is not merged (git branch -D)
        #[arg(long, short)]
        force: bool,
    },

    /// Rebase a branch onto a new parent
    Move {
        /// New parent (prompted for when omitted)
        #[arg(long, short)]
        onto: Option<String>,

        /// Branch to move (defaults to the current branch)
        #[arg(long, short)]
        branch: Option<String>,

        /// Restack the moved branch's descendants afterwards
        #[arg(long)]
        restack: bool,
    },

    /// Rebase every branch above the current (or given) branch onto its parent
    Restack {
        /// Branch to start from (defaults to the current branch)
        branch: Option<String>,
    },

    /// Push the stack and open pull requests for it
    Submit {
        /// Branch to start from (defaults to the current branch)
        branch: Option<String>,

        /// Choose normal/draft/skip for every branch
        #[arg(long, short)]
        interactive: bool,

        /// Open new pull requests as drafts
        #[arg(long)]
        draft: bool,
    },

    /// Merge the open pull request of a branch
    Merge {
        /// Branch whose PR to merge (defaults to the current branch)
        branch: Option<String>,

        /// Merge strategy
        #[arg(long, value_enum, default_value_t = MergeMethodArg::Merge)]
        method: MergeMethodArg,
    },

    /// Check out a child of the current branch
    Up,

    /// Check out the parent of the current branch
    Down,

    /// Continue a rebase stopped on conflicts and record the pending move
    Cont,

    /// Abort a rebase stopped on conflicts and drop the pending move
    Abort,

    /// Show the tracked branch tree
    Log {
        /// Root of the tree (defaults to the configured trunk)
        root: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

/// Configuration actions
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., github.token)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// List all configuration values
    List,

    /// Reset a configuration value to its default
    Unset {
        /// Configuration key
        key: String,
    },
}

/// Merge strategies accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergeMethodArg {
    Merge,
    Squash,
    Rebase,
}

impl From<MergeMethodArg> for crate::github::MergeMethod {
    fn from(arg: MergeMethodArg) -> Self {
        match arg {
            MergeMethodArg::Merge => Self::Merge,
            MergeMethodArg::Squash => Self::Squash,
            MergeMethodArg::Rebase => Self::Rebase,
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        self.setup_logging();

        match self.command {
            Commands::Create { name, parent } => commands::branch::create(name, parent).await,
            Commands::Track { parent, branch } => commands::branch::track(branch, parent).await,
            Commands::Untrack { branch } => commands::branch::untrack(branch).await,
            Commands::Delete { branch, force } => commands::branch::delete(branch, force).await,
            Commands::Move {
                onto,
                branch,
                restack,
            } => commands::stack::move_branch(branch, onto, restack).await,
            Commands::Restack { branch } => commands::stack::restack(branch).await,
            Commands::Submit {
                branch,
                interactive,
                draft,
            } => commands::stack::submit(branch, interactive, draft).await,
            Commands::Merge { branch, method } => {
                commands::stack::merge(branch, method.into()).await
            }
            Commands::Up => commands::navigate::up().await,
            Commands::Down => commands::navigate::down().await,
            Commands::Cont => commands::stack::cont().await,
            Commands::Abort => commands::stack::abort().await,
            Commands::Log { root } => commands::stack::log(root).await,
            Commands::Config { action } => commands::config::run(action).await,
            Commands::Completions { shell } => commands::completions::generate_completions(shell),
            Commands::Version => commands::version::run().await,
        }
    }

    fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .without_time();

        if self.no_color {
            subscriber.with_ansi(false).init();
        } else {
            subscriber.init();
        }
    }
}
