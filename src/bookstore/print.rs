use bookstore::api::{CmdMessage, MessageLevel};
use bookstore::config::{BookstoreConfig, KEYS};
use bookstore::model::Book;
use bookstore::store::CatalogStats;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE_WIDTH: usize = 36;
const AUTHOR_WIDTH: usize = 24;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per book in its canonical display form.
pub(crate) fn print_full_books(books: &[Book], config: &BookstoreConfig) {
    for book in books {
        println!("{}", book.display_with(&config.currency, &config.unit));
    }
}

/// Aligned table: id, title, author, price, quantity.
pub(crate) fn print_books(books: &[Book], config: &BookstoreConfig) {
    if books.is_empty() {
        return;
    }

    let id_width = books
        .iter()
        .map(|b| b.id().to_string().len())
        .max()
        .unwrap_or(1);

    println!("{}", format!("Books ({})", books.len()).bold());
    for book in books {
        let id = format!("{:>width$}.", book.id(), width = id_width);
        let title = pad_to_width(book.title(), TITLE_WIDTH);
        let author = pad_to_width(book.author(), AUTHOR_WIDTH);
        println!(
            "  {} {} {} {} {}",
            id.yellow(),
            title.bold(),
            author,
            format!("{} {}", book.price(), config.currency),
            format!("{} {}", book.quantity(), config.unit).dimmed()
        );
    }
}

pub(crate) fn print_stats(stats: &CatalogStats, config: &BookstoreConfig) {
    println!("Titles:         {}", stats.distinct_count);
    println!("Copies:         {} {}", stats.total_quantity, config.unit);
    println!("Stock value:    {} {}", stats.total_value, config.currency);
}

pub(crate) fn print_config(config: &BookstoreConfig) {
    for key in KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key.bold(), value);
        }
    }
}

/// Truncates with an ellipsis or pads with spaces to exactly `width` columns.
fn pad_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        let padding = width - s.width();
        return format!("{}{}", s, " ".repeat(padding));
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    current_width += 1;
    result.push_str(&" ".repeat(width.saturating_sub(current_width)));
    result
}
