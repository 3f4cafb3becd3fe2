use bookstore::api::{BookstoreApi, ConfigAction, NewBook};
use bookstore::error::{BookstoreError, Result};
use bookstore::model::{parse_id, parse_price, parse_quantity, BookPatch};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod print;

use args::{Cli, Commands};
use print::{print_books, print_config, print_full_books, print_messages, print_stats};

const HOME_ENV: &str = "BOOKSTORE_HOME";
const LOG_ENV: &str = "BOOKSTORE_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bookstore=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "bookstore", "bookstore")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| BookstoreError::Config("Could not determine data directory".into()))
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(&cli)?;
    let mut api = BookstoreApi::open(data_dir)?;

    match cli.command {
        Some(Commands::Add {
            title,
            author,
            price,
            quantity,
        }) => handle_add(&mut api, title, author, &price, &quantity),
        Some(Commands::List) | None => handle_list(&api),
        Some(Commands::View { ids }) => handle_view(&api, &ids),
        Some(Commands::Search { term }) => handle_search(&api, &term),
        Some(Commands::Update {
            id,
            title,
            author,
            price,
            quantity,
        }) => handle_update(&mut api, &id, title, author, price, quantity),
        Some(Commands::Delete { ids }) => handle_delete(&mut api, &ids),
        Some(Commands::Stats) => handle_stats(&api),
        Some(Commands::Export { format, path }) => {
            let result = api.export(format, path.as_deref())?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Import { format, path }) => {
            let result = api.import(format, path.as_deref())?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Config { key, value }) => handle_config(&mut api, key, value),
    }
}

fn handle_add(
    api: &mut BookstoreApi,
    title: String,
    author: String,
    price: &str,
    quantity: &str,
) -> Result<()> {
    let new_book = NewBook::new(title, author, parse_price(price)?, parse_quantity(quantity)?);
    let result = api.add_book(new_book)?;
    print_full_books(&result.affected_books, api.config());
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(api: &BookstoreApi) -> Result<()> {
    let result = api.list_books()?;
    print_books(&result.listed_books, api.config());
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(api: &BookstoreApi, ids: &[String]) -> Result<()> {
    let ids = parse_ids(ids)?;
    let result = api.view_books(&ids)?;
    print_full_books(&result.listed_books, api.config());
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(api: &BookstoreApi, term: &str) -> Result<()> {
    let result = api.search_books(term)?;
    print_books(&result.listed_books, api.config());
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    api: &mut BookstoreApi,
    id: &str,
    title: Option<String>,
    author: Option<String>,
    price: Option<String>,
    quantity: Option<String>,
) -> Result<()> {
    let id = parse_id(id)?;
    let patch = BookPatch {
        title,
        author,
        price: price.as_deref().map(parse_price).transpose()?,
        quantity: quantity.as_deref().map(parse_quantity).transpose()?,
    };
    let result = api.update_book(id, &patch)?;
    print_full_books(&result.affected_books, api.config());
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(api: &mut BookstoreApi, ids: &[String]) -> Result<()> {
    let ids = parse_ids(ids)?;
    let result = api.delete_books(&ids)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(api: &BookstoreApi) -> Result<()> {
    let result = api.stats()?;
    if let Some(stats) = &result.stats {
        print_stats(stats, api.config());
    }
    Ok(())
}

fn handle_config(api: &mut BookstoreApi, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.config_action(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn parse_ids(ids: &[String]) -> Result<Vec<u64>> {
    ids.iter().map(|s| parse_id(s)).collect()
}
