use anyhow::Context;
use bookmarks_core::{
    Bookmark, BookmarkId, BookmarkManager, Category, Command, Config, Outcome, TabCache,
};
use bookmarks_store::BookmarkStore;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bookmarks")]
#[command(version, about = "Store URLs and sort them into categories automatically", long_about = None)]
struct Cli {
    /// SQLite database to use (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a bookmark; its category is picked from the URL
    Add {
        /// URL to store
        url: String,
    },
    /// Show bookmarks, one tab per category
    List {
        /// Only show this category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Change a bookmark's URL and/or category
    Edit {
        /// Bookmark id (see `list`)
        id: i64,

        /// New URL
        #[arg(long)]
        url: Option<String>,

        /// New category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Remove a bookmark
    Delete {
        /// Bookmark id (see `list`)
        id: i64,
    },
    /// Show which category a URL would land in, without storing it
    Classify {
        url: String,
    },
    /// List the available categories
    Categories,
    /// Write a starter config file with an empty keyword list per category
    InitConfig {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse::<Category>().map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so listings stay pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookmarks=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Handled before loading so a broken config can be replaced
    if let Some(Commands::InitConfig { force }) = cli.command {
        match Config::init(force)? {
            Some(path) => println!("Wrote {}", path.display()),
            None => println!("Config already exists; use --force to replace it"),
        }
        return Ok(());
    }

    let config = Config::load().context("Failed to load config")?;

    match cli.command {
        Some(Commands::Add { url }) => {
            tracing::info!("Adding: {}", url);
            let mut manager = open_manager(cli.db, &config)?;
            let outcome = manager.execute(Command::Add { url })?;
            report(&outcome);
            if let Outcome::Added { bookmark, .. } = &outcome {
                print_tab(manager.tabs(), bookmark.category);
            }
        }
        Some(Commands::List { category, json }) => {
            let mut manager = open_manager(cli.db, &config)?;
            let tabs = match category {
                Some(c) => vec![c],
                None => Category::ALL.to_vec(),
            };
            for c in &tabs {
                manager.refresh(*c)?;
            }
            if json {
                let rows: Vec<&Bookmark> = tabs
                    .iter()
                    .flat_map(|c| manager.tabs().tab(*c))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for c in tabs {
                    print_tab(manager.tabs(), c);
                }
            }
        }
        Some(Commands::Edit { id, url, category }) => {
            let mut manager = open_manager(cli.db, &config)?;
            let outcome = manager.execute(Command::Edit {
                id: BookmarkId(id),
                url,
                category,
            })?;
            report(&outcome);
            if let Outcome::Edited { refreshed, .. } = &outcome {
                for c in refreshed {
                    print_tab(manager.tabs(), *c);
                }
            }
        }
        Some(Commands::Delete { id }) => {
            let mut manager = open_manager(cli.db, &config)?;
            let outcome = manager.execute(Command::Delete { id: BookmarkId(id) })?;
            report(&outcome);
        }
        Some(Commands::Classify { url }) => {
            println!("{}", config.classifier()?.classify(&url));
        }
        Some(Commands::Categories) => {
            for category in Category::ALL {
                println!("{}", category);
            }
        }
        Some(Commands::InitConfig { .. }) => {}
        None => {
            println!("No command specified. Try --help");
        }
    }

    Ok(())
}

/// Open the store once for this run; it closes when the manager drops
fn open_manager(
    db: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<BookmarkManager<BookmarkStore>> {
    let db_path = match db {
        Some(path) => path,
        None => config.database_path()?,
    };
    let store = BookmarkStore::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    Ok(BookmarkManager::with_classifier(store, config.classifier()?))
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Added { bookmark, .. } => println!(
            "Added #{} {} -> {}",
            bookmark.id, bookmark.title, bookmark.category
        ),
        Outcome::Edited { bookmark, .. } => println!(
            "Updated #{} {} -> {}",
            bookmark.id, bookmark.url, bookmark.category
        ),
        Outcome::Deleted { id, .. } => println!("Deleted #{}", id),
        // stale selection: nothing to do, nothing to complain about
        Outcome::Stale { id } => tracing::debug!("Bookmark #{} no longer exists", id),
    }
}

fn print_tab(tabs: &TabCache, category: Category) {
    let rows = tabs.tab(category);
    println!("\n== {} ({}) ==", category, rows.len());
    if rows.is_empty() {
        return;
    }
    println!("{:>5}  {:<40}  {:<25}  {}", "ID", "URL", "Title", "Date Added");
    for b in rows {
        println!(
            "{:>5}  {:<40}  {:<25}  {}",
            b.id,
            b.url,
            b.title,
            b.added_date_display()
        );
    }
}
