use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "folio",
    about = concat!(
        "\u{25B6} folio v",
        env!("CARGO_PKG_VERSION"),
        " - your project portfolio, in the terminal"
    ),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different site directory
    #[arg(short = 'C', long = "site-dir", global = true)]
    pub site_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create folio.toml and a sample projects file in the site directory
    Init(InitArgs),
    /// List projects, optionally filtered by tag and search text
    List(ListArgs),
    /// Show how many projects carry each tag
    Tags,
    /// Show one project's details
    Show(ShowArgs),
    /// Fetch star and fork counts for the configured account's repositories
    Stats(StatsArgs),
    /// Show or change the saved theme
    Theme(ThemeArgs),
    /// Read or write a folio.toml setting
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Site name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// GitHub account whose repositories get star/fork counts
    #[arg(long)]
    pub account: Option<String>,
    /// Overwrite an existing folio.toml and projects file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only projects with this tag ("All" for every project)
    #[arg(long)]
    pub tag: Option<String>,
    /// Only projects whose title or description contains this text
    #[arg(long, short = 'q')]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Project number (1-based, as printed by `list`) or title
    pub project: String,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Only projects with this tag
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// New theme; prints the current one when omitted
    #[arg(value_parser = ["dark", "light", "toggle"])]
    pub mode: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Setting name, e.g. stats.account_name
    pub key: String,
    /// New value; prints the current one when omitted
    pub value: Option<String>,
}
