//! CLI definition and mode dispatch

use clap::Parser;

pub mod context;
pub mod hierarchy;
pub mod list;

pub use context::CommandContext;

use crate::error::Result;

/// glids - look up GitLab group and project IDs by path
#[derive(Parser, Debug)]
#[command(name = "glids")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Search term (overrides --search)
    #[arg(value_name = "SEARCH")]
    pub search_term: Option<String>,

    /// Search term to filter projects or groups
    #[arg(short, long)]
    pub search: Option<String>,

    /// Show groups only
    #[arg(short, long)]
    pub groups: bool,

    /// Show projects only
    #[arg(short, long)]
    pub projects: bool,

    /// Show groups, subgroups and projects as a tree
    #[arg(short = 't', long)]
    pub hierarchy: bool,

    /// Include items with no activity in the last 30 days
    #[arg(short, long)]
    pub all: bool,

    /// GitLab server host, e.g. gitlab.example.com
    #[arg(long, env = "GITLAB_HOST")]
    pub host: Option<String>,

    /// Use plain HTTP instead of HTTPS
    #[arg(long)]
    pub nohttps: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// What to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Hierarchy,
    Groups,
    Projects,
    Both,
}

impl Cli {
    /// Selected mode; the tree wins over groups, groups over projects.
    pub fn mode(&self) -> Mode {
        if self.hierarchy {
            Mode::Hierarchy
        } else if self.groups {
            Mode::Groups
        } else if self.projects {
            Mode::Projects
        } else {
            Mode::Both
        }
    }

    /// Effective search term; the positional argument wins over `--search`.
    pub fn search_term(&self) -> &str {
        self.search_term
            .as_deref()
            .or(self.search.as_deref())
            .unwrap_or("")
    }
}

impl Mode {
    /// Status message shown while the first fetch runs.
    pub fn status_message(&self) -> &'static str {
        match self {
            Mode::Hierarchy => "Fetching initial groups for hierarchy",
            Mode::Groups => "Fetching groups",
            Mode::Projects => "Fetching projects",
            Mode::Both => "Fetching groups and projects",
        }
    }
}

/// Run the selected mode.
pub async fn run(cli: &Cli) -> Result<()> {
    let mut ctx = CommandContext::new(cli)?;
    let search = cli.search_term();

    ctx.status.show(cli.mode().status_message()).await;
    let result = match cli.mode() {
        Mode::Hierarchy => hierarchy::run(&mut ctx, search).await,
        Mode::Groups => list::run_groups(&mut ctx, search).await,
        Mode::Projects => list::run_projects(&mut ctx, search).await,
        Mode::Both => list::run_both(&mut ctx, search).await,
    };
    ctx.status.clear().await;
    result
}
