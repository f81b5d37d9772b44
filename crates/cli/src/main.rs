use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read};

use find_libraries_core::book::BookQuery;
use find_libraries_core::cascade::Cascade;
use find_libraries_core::config::{config_path, load_config, AppConfig};
use find_libraries_core::export;
use find_libraries_core::shelf::resolve_shelf;

#[derive(Parser)]
#[command(name = "find-libraries")]
#[command(about = "Find where the books on your reading list can be borrowed or read online")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every book on a shelf export
    Shelf {
        /// Goodreads CSV export (stdin when omitted)
        input: Option<String>,

        /// Comma-separated OverDrive subdomains to try (overrides config)
        #[arg(long)]
        subdomains: Option<String>,

        /// Comma-separated bookshelves to surface as tags (overrides config)
        #[arg(long)]
        tag_shelves: Option<String>,

        /// Bookshelf that marks a row as wanted (overrides config)
        #[arg(long)]
        shelf: Option<String>,
    },

    /// Resolve a single title/author pair
    Lookup {
        /// Shelf title, series annotation and all
        #[arg(long)]
        title: String,

        #[arg(long)]
        author: String,

        /// Tags to carry onto the output records (repeatable)
        #[arg(long)]
        tag: Vec<String>,

        /// Comma-separated OverDrive subdomains to try (overrides config)
        #[arg(long)]
        subdomains: Option<String>,
    },

    /// Convert a JSON result array on stdin to CSV
    ExportCsv {
        /// Columns to emit, in order (defaults to the record fields)
        columns: Vec<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize default config file
    Init,
    /// Show current configuration
    Show,
}

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn main() {
    let cli = Cli::parse();

    // Progress and warnings go to stderr so stdout stays clean JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Shelf {
            input,
            subdomains,
            tag_shelves,
            shelf,
        } => run_shelf(
            input.as_deref(),
            subdomains.as_deref(),
            tag_shelves.as_deref(),
            shelf.as_deref(),
        ),
        Commands::Lookup {
            title,
            author,
            tag,
            subdomains,
        } => run_lookup(title, author, tag, subdomains.as_deref()),
        Commands::ExportCsv { columns } => run_export_csv(columns),
        Commands::Config { action } => run_config(action, cli.json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure(subdomains: Option<&str>, tag_shelves: Option<&str>, shelf: Option<&str>) -> AppConfig {
    let mut config = load_config();
    if let Some(list) = subdomains {
        config.providers.overdrive_subdomains = split_list(list);
    }
    if let Some(list) = tag_shelves {
        config.shelf.tag_shelves = split_list(list);
    }
    if let Some(name) = shelf {
        config.shelf.shelf = name.to_string();
    }
    config
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn run_shelf(
    input: Option<&str>,
    subdomains: Option<&str>,
    tag_shelves: Option<&str>,
    shelf: Option<&str>,
) -> CliResult {
    let config = configure(subdomains, tag_shelves, shelf);

    let records = match input {
        Some(path) => resolve_shelf(File::open(path)?, &config)?,
        None => resolve_shelf(io::stdin().lock(), &config)?,
    };

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn run_lookup(title: &str, author: &str, tags: &[String], subdomains: Option<&str>) -> CliResult {
    let config = configure(subdomains, None, None);
    let cascade = Cascade::from_config(&config.providers)?;

    let query = BookQuery {
        title: title.to_string(),
        author: author.to_string(),
        tags: tags.iter().cloned().collect::<BTreeSet<String>>(),
    };
    let records = cascade.resolve(&query);

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn run_export_csv(columns: &[String]) -> CliResult {
    let mut body = String::new();
    io::stdin().lock().read_to_string(&mut body)?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&body)?;

    let columns: Vec<&str> = if columns.is_empty() {
        export::DEFAULT_COLUMNS.to_vec()
    } else {
        columns.iter().map(String::as_str).collect()
    };

    print!("{}", export::to_csv(&columns, &rows));
    Ok(())
}

fn run_config(action: &ConfigAction, json: bool) -> CliResult {
    match action {
        ConfigAction::Init => {
            let path = config_path().ok_or("Could not determine config directory")?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, toml::to_string(&AppConfig::default())?)?;
            println!("Wrote: {}", path.display());
        }
        ConfigAction::Show => {
            let config = load_config();
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string(&config)?);
            }
        }
    }
    Ok(())
}
