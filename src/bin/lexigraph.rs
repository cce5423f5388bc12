//! Lexigraph CLI — per-year token frequency indexing jobs.
//!
//! Usage:
//!   lexigraph index-counts --corpus DIR --whitelist FILE [--db PATH]
//!   lexigraph index-anchored ANCHOR --corpus DIR --whitelist FILE [--db PATH]
//!   lexigraph graph TOKEN --corpus DIR [--out DIR]
//!   lexigraph series TOKEN [--db PATH]

use clap::{Parser, Subcommand};
use lexigraph::{
    build_token_graph, build_year_token_graphs, Corpus, IndexOptions, Indexer, OpenStore,
    SqliteStore, Whitelist, YearGraphs,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "lexigraph",
    version,
    about = "Per-year token frequency indexing and co-occurrence graphs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index per-year token counts across a corpus
    IndexCounts {
        /// Corpus root directory
        #[arg(long)]
        corpus: PathBuf,
        /// Whitelist file, one token per line
        #[arg(long)]
        whitelist: PathBuf,
        /// Path to SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
        /// Maximum concurrent extraction workers
        #[arg(long, default_value_t = 12)]
        workers: usize,
        /// Volumes per batch; one flush per full batch
        #[arg(long, default_value_t = 1000)]
        batch_size: usize,
    },
    /// Index counts of tokens co-occurring with an anchor token,
    /// bucketed by the anchor's per-page count
    IndexAnchored {
        /// The anchor token
        anchor: String,
        /// Corpus root directory
        #[arg(long)]
        corpus: PathBuf,
        /// Whitelist file, one token per line
        #[arg(long)]
        whitelist: PathBuf,
        /// Path to SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
        /// Maximum concurrent extraction workers
        #[arg(long, default_value_t = 12)]
        workers: usize,
        /// Volumes per batch; one flush per full batch
        #[arg(long, default_value_t = 1000)]
        batch_size: usize,
    },
    /// Build the co-occurrence graph for pages containing a token
    Graph {
        /// The query token
        token: String,
        /// Corpus root directory
        #[arg(long)]
        corpus: PathBuf,
        /// Directory for per-year graph files; omit to print a summary only
        #[arg(long)]
        out: Option<PathBuf>,
        /// Maximum concurrent extraction workers
        #[arg(long, default_value_t = 12)]
        workers: usize,
    },
    /// Print the per-year count series for a token
    Series {
        /// The token to look up
        token: String,
        /// Path to SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

/// Get the default database path (~/.local/share/lexigraph/counts.db)
fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("lexigraph").join("counts.db")
}

fn open_store(db: Option<PathBuf>) -> Result<Arc<SqliteStore>, String> {
    let db_path = db.unwrap_or_else(default_db_path);
    let store = SqliteStore::open(&db_path)
        .map_err(|e| format!("Failed to open database: {}", e))?;
    Ok(Arc::new(store))
}

fn build_indexer(
    db: Option<PathBuf>,
    whitelist: &PathBuf,
    workers: usize,
    batch_size: usize,
) -> Result<Indexer, String> {
    let store = open_store(db)?;
    let whitelist = Whitelist::from_path(whitelist)
        .map_err(|e| format!("Failed to read whitelist: {}", e))?;
    let options = IndexOptions::new()
        .with_workers(workers)
        .with_batch_size(batch_size);
    Indexer::new(store, whitelist, options).map_err(|e| e.to_string())
}

async fn cmd_index_counts(indexer: &Indexer, corpus: &Corpus) -> i32 {
    match indexer.index_counts(corpus).await {
        Ok(stats) => {
            println!(
                "Indexed {} volumes ({} skipped, {} rows committed)",
                stats.volumes, stats.skipped, stats.rows_flushed
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_index_anchored(indexer: &Indexer, corpus: &Corpus, anchor: &str) -> i32 {
    match indexer.index_anchored(corpus, anchor).await {
        Ok(stats) => {
            println!(
                "Indexed {} volumes against '{}' ({} skipped, {} rows committed)",
                stats.volumes, anchor, stats.skipped, stats.rows_flushed
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_graph(corpus: &Corpus, token: &str, out: Option<PathBuf>, workers: usize) -> i32 {
    match out {
        Some(root) => {
            let graphs = match build_year_token_graphs(corpus, token, workers).await {
                Ok(graphs) => graphs,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return 1;
                }
            };
            let store = YearGraphs::new(root);
            for (year, graph) in &graphs {
                if let Err(e) = store.save(*year, graph) {
                    eprintln!("Error: failed to save graph for {}: {}", year, e);
                    return 1;
                }
            }
            println!(
                "Wrote {} per-year graphs to {}",
                graphs.len(),
                store.root().display()
            );
            0
        }
        None => match build_token_graph(corpus, token, workers).await {
            Ok(graph) => {
                println!(
                    "Graph for '{}': {} nodes, {} edges",
                    token,
                    graph.node_count(),
                    graph.edge_count()
                );
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    }
}

fn cmd_series(db: Option<PathBuf>, token: &str) -> i32 {
    let store = match open_store(db) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    use lexigraph::CountStore;
    match store.time_series(token) {
        Ok(series) => {
            if series.is_empty() {
                println!("No years indexed.");
                return 0;
            }
            for (year, count) in series {
                println!("{:<6} {:>12}", year, count);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::IndexCounts {
            corpus,
            whitelist,
            db,
            workers,
            batch_size,
        } => match build_indexer(db, &whitelist, workers, batch_size) {
            Ok(indexer) => cmd_index_counts(&indexer, &Corpus::new(corpus)).await,
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Commands::IndexAnchored {
            anchor,
            corpus,
            whitelist,
            db,
            workers,
            batch_size,
        } => match build_indexer(db, &whitelist, workers, batch_size) {
            Ok(indexer) => cmd_index_anchored(&indexer, &Corpus::new(corpus), &anchor).await,
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Commands::Graph {
            token,
            corpus,
            out,
            workers,
        } => cmd_graph(&Corpus::new(corpus), &token, out, workers).await,
        Commands::Series { token, db } => cmd_series(db, &token),
    };
    std::process::exit(code);
}
