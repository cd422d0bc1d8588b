//! CLI entry point for noteme

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "noteme")]
#[command(version)]
#[command(about = "Search, filter and page through a static blog's posts", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, filtered and paginated
    #[command(alias = "ls")]
    List {
        /// Category to show (all by default)
        #[arg(long)]
        category: Option<String>,

        /// Search in titles, excerpts, categories and tags
        #[arg(short, long)]
        query: Option<String>,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Print the render instruction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the latest posts
    Latest,

    /// Show a single post
    Post {
        /// Post id
        id: Option<String>,

        /// Print the rendered HTML page
        #[arg(long)]
        html: bool,
    },

    /// Browse the listing interactively
    Browse,

    /// Start a local server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "noteme=debug,tower_http=debug,info"
    } else {
        "noteme=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List {
            category,
            query,
            page,
            json,
        } => {
            let blog = noteme::Blog::new(&base_dir)?;
            noteme::commands::list::run(&blog, category.as_deref(), query.as_deref(), page, json)
                .await?;
        }

        Commands::Latest => {
            let blog = noteme::Blog::new(&base_dir)?;
            noteme::commands::latest::run(&blog).await?;
        }

        Commands::Post { id, html } => {
            let blog = noteme::Blog::new(&base_dir)?;
            noteme::commands::post::run(&blog, id.as_deref(), html).await?;
        }

        Commands::Browse => {
            let blog = noteme::Blog::new(&base_dir)?;
            noteme::commands::browse::run(&blog).await?;
        }

        Commands::Serve { port, ip } => {
            let blog = noteme::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            noteme::server::start(&blog, &ip, port).await?;
        }

        Commands::Version => {
            println!("noteme version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
