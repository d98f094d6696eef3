use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use grove_core::config::GroveConfig;
use grove_core::graph::{GraphDb, GraphStore, HierarchyIndexer};
use grove_core::identity::IdentityResolver;

mod discover;

#[derive(Parser)]
#[command(name = "grove")]
#[command(about = "Source-tree hierarchy indexing into a knowledge graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the graph store and write a default grove.toml
    Init,
    /// Index a workspace into the hierarchy graph
    Index {
        /// Workspace root to index
        root: PathBuf,

        /// Project name (defaults to the root directory name)
        #[arg(long)]
        project: Option<String>,
    },
    /// Show statistics for an indexed project
    Stats {
        /// Project name
        project: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = GroveConfig::load()?;

    match cli.command {
        Commands::Init => {
            let store = open_store(&config).await?;
            store.ensure_schema().await?;

            if !Path::new("grove.toml").exists() {
                std::fs::write("grove.toml", GroveConfig::default_config_string())?;
                println!("Wrote default grove.toml");
            }
            println!("Graph store ready at {}", config.storage.data_dir);
        }
        Commands::Index { root, project } => {
            let root = std::fs::canonicalize(&root)?;
            let project = project.unwrap_or_else(|| {
                root.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("workspace")
                    .to_string()
            });

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner());
            spinner.set_message(format!("Discovering files in {}", root.display()));
            let files = discover::discover_files(&root, &config.index);
            spinner.finish_with_message(format!("Discovered {} files", files.len()));

            let store = open_store(&config).await?;
            if !store.is_initialized().await? {
                store.ensure_schema().await?;
            }

            let resolver = IdentityResolver::new(
                config.identity.file_hash_len,
                config.identity.entity_hash_len,
            )?;
            let indexer = HierarchyIndexer::new(store, resolver)
                .with_concurrency(config.index.max_concurrent_writes);

            let stats = indexer
                .index_hierarchy(&project, &root.to_string_lossy(), &files, None)
                .await?;

            println!("Indexed project '{project}'");
            println!("  Directories:   {}", stats.directories);
            println!("  Files:         {}", stats.files);
            println!("  Relationships: {}", stats.relationships);
        }
        Commands::Stats { project } => {
            let store = open_store(&config).await?;
            let indexer = HierarchyIndexer::new(store, IdentityResolver::default());

            let stats = indexer.project_statistics(&project).await;
            println!("Project '{project}'");
            println!("  Directories: {}", stats.directories);
            println!("  Files:       {}", stats.files);
            println!("  Total nodes: {}", stats.total_nodes);
        }
    }

    Ok(())
}

async fn open_store(config: &GroveConfig) -> Result<Arc<GraphDb>, Box<dyn std::error::Error>> {
    let data_dir = Path::new(&config.storage.data_dir);
    if let Some(parent) = data_dir.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(Arc::new(GraphDb::open(data_dir).await?))
}
