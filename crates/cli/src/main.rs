mod commands;
mod logging;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jmlog")]
#[command(version, about = "Static blog generator with a sitemap and a light/dark theme switch", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Create a new blog directory
    Init {
        /// Path to create blog directory
        path: PathBuf,

        /// Site title
        #[arg(long)]
        title: Option<String>,

        /// Author name shown in the footer
        #[arg(long)]
        author: Option<String>,
    },

    /// Validate blog configuration and posts
    Validate {
        /// Path to blog directory
        path: PathBuf,
    },

    /// Preview site locally with hot reload
    Preview {
        /// Path to blog directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Build the static site
    Build {
        /// Path to blog directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the sitemap
    Sitemap {
        /// Path to blog directory
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "xml")]
        format: SitemapFormat,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SitemapFormat {
    Xml,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Command::Init {
            path,
            title,
            author,
        } => commands::init::run(path, title, author).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Preview { path, port } => commands::preview::run(path, port).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Sitemap { path, format } => commands::sitemap::run(path, format).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "jmlog", &mut io::stdout());
            Ok(())
        }
    }
}
