use crate::error::{BookstoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CURRENCY: &str = "руб.";
pub const DEFAULT_UNIT: &str = "шт.";

/// A single catalog entry.
///
/// Every `Book` in existence has passed field validation: fields are private
/// and the only ways to obtain one are [`Book::new`] and [`Book::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: u64,
    title: String,
    author: String,
    price: f64,
    quantity: u64,
}

impl Book {
    /// Validates and builds a book.
    ///
    /// Checks run in field order (id, title, author, price, quantity) and the
    /// first failure is returned.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Result<Self> {
        let id = validate_id(id)?;
        let title = validate_text("title", title.into())?;
        let author = validate_text("author", author.into())?;
        let price = validate_price(price)?;
        let quantity = validate_quantity(quantity)?;
        Ok(Self {
            id,
            title,
            author,
            price,
            quantity,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Stock value of this entry (`price * quantity`).
    pub fn value(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Returns a copy of this book with the patch applied.
    ///
    /// Supplied fields are validated like at construction; `self` is never
    /// touched, so a failed patch leaves the original intact.
    pub fn apply(&self, patch: &BookPatch) -> Result<Self> {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = validate_text("title", title.clone())?;
        }
        if let Some(author) = &patch.author {
            next.author = validate_text("author", author.clone())?;
        }
        if let Some(price) = patch.price {
            next.price = validate_price(price)?;
        }
        if let Some(quantity) = patch.quantity {
            next.quantity = validate_quantity(quantity)?;
        }
        Ok(next)
    }

    /// Canonical display form with explicit currency and unit labels.
    pub fn display_with(&self, currency: &str, unit: &str) -> String {
        format!(
            "ID: {}, '{}' - {}, {} {}, {} {}",
            self.id, self.title, self.author, self.price, currency, self.quantity, unit
        )
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(DEFAULT_CURRENCY, DEFAULT_UNIT))
    }
}

/// Field-for-field map form of a book as it appears in a snapshot.
///
/// Integers are signed so that out-of-range values written by hand still
/// decode and get reported by validation instead of by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub quantity: i64,
}

impl From<&Book> for BookRecord {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id as i64,
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price,
            quantity: book.quantity as i64,
        }
    }
}

impl TryFrom<BookRecord> for Book {
    type Error = BookstoreError;

    fn try_from(record: BookRecord) -> Result<Self> {
        Book::new(
            record.id,
            record.title,
            record.author,
            record.price,
            record.quantity,
        )
    }
}

/// A partial update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }
}

fn validate_id(id: i64) -> Result<u64> {
    u64::try_from(id).map_err(|_| BookstoreError::validation("id", id))
}

fn validate_text(field: &'static str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(BookstoreError::validation(field, value));
    }
    Ok(value)
}

fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(BookstoreError::validation("price", price));
    }
    Ok(price)
}

fn validate_quantity(quantity: i64) -> Result<u64> {
    u64::try_from(quantity).map_err(|_| BookstoreError::validation("quantity", quantity))
}

// --- Text input parsing ---
//
// UIs collect fields as text. These turn text into field values and report
// malformed input as a validation failure of the field, so "2.5" for a
// quantity is rejected the same way as "-3".

pub fn parse_id(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let id: i64 = trimmed
        .parse()
        .map_err(|_| BookstoreError::validation("id", trimmed))?;
    validate_id(id)
}

pub fn parse_price(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let price: f64 = trimmed
        .parse()
        .map_err(|_| BookstoreError::validation("price", trimmed))?;
    validate_price(price)
}

/// Parses a quantity; the result is still signed so it can feed a [`BookPatch`].
pub fn parse_quantity(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let quantity: i64 = trimmed
        .parse()
        .map_err(|_| BookstoreError::validation("quantity", trimmed))?;
    validate_quantity(quantity)?;
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: BookstoreError) -> &'static str {
        match err {
            BookstoreError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn builds_valid_book() {
        let book = Book::new(1, "Dune", "Herbert", 15.5, 3).unwrap();
        assert_eq!(book.id(), 1);
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.author(), "Herbert");
        assert_eq!(book.price(), 15.5);
        assert_eq!(book.quantity(), 3);
        assert_eq!(book.value(), 46.5);
    }

    #[test]
    fn zero_values_are_valid() {
        let book = Book::new(0, "Free", "Anon", 0.0, 0).unwrap();
        assert_eq!(book.value(), 0.0);
    }

    #[test]
    fn rejects_each_field() {
        assert_eq!(field_of(Book::new(-1, "T", "A", 1.0, 1).unwrap_err()), "id");
        assert_eq!(field_of(Book::new(1, "", "A", 1.0, 1).unwrap_err()), "title");
        assert_eq!(field_of(Book::new(1, "T", "", 1.0, 1).unwrap_err()), "author");
        assert_eq!(field_of(Book::new(1, "T", "A", -0.5, 1).unwrap_err()), "price");
        assert_eq!(
            field_of(Book::new(1, "T", "A", f64::NAN, 1).unwrap_err()),
            "price"
        );
        assert_eq!(field_of(Book::new(1, "T", "A", 1.0, -2).unwrap_err()), "quantity");
    }

    #[test]
    fn reports_first_failing_field() {
        let err = Book::new(-1, "", "", -1.0, -1).unwrap_err();
        assert_eq!(field_of(err), "id");

        let err = Book::new(1, "T", "", -1.0, -1).unwrap_err();
        assert_eq!(field_of(err), "author");
    }

    #[test]
    fn validation_error_carries_value() {
        let err = Book::new(1, "T", "A", 1.0, -7).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value '-7' for field 'quantity'");
    }

    #[test]
    fn apply_overwrites_only_supplied_fields() {
        let book = Book::new(4, "Dune", "Herbert", 15.5, 3).unwrap();
        let patch = BookPatch {
            price: Some(20.0),
            ..Default::default()
        };
        let updated = book.apply(&patch).unwrap();
        assert_eq!(updated.id(), 4);
        assert_eq!(updated.title(), "Dune");
        assert_eq!(updated.price(), 20.0);
        assert_eq!(updated.quantity(), 3);
    }

    #[test]
    fn apply_failure_leaves_original() {
        let book = Book::new(4, "Dune", "Herbert", 15.5, 3).unwrap();
        let patch = BookPatch {
            title: Some("Dune Messiah".into()),
            quantity: Some(-1),
            ..Default::default()
        };
        assert!(book.apply(&patch).is_err());
        assert_eq!(book.title(), "Dune");
    }

    #[test]
    fn display_form() {
        let book = Book::new(1, "Dune", "Herbert", 15.5, 3).unwrap();
        assert_eq!(book.to_string(), "ID: 1, 'Dune' - Herbert, 15.5 руб., 3 шт.");
        assert_eq!(
            book.display_with("USD", "pcs"),
            "ID: 1, 'Dune' - Herbert, 15.5 USD, 3 pcs"
        );

        let whole = Book::new(2, "Neuromancer", "Gibson", 10.0, 2).unwrap();
        assert_eq!(whole.display_with("$", "x"), "ID: 2, 'Neuromancer' - Gibson, 10 $, 2 x");
    }

    #[test]
    fn record_conversion_revalidates() {
        let record = BookRecord {
            id: 3,
            title: "Solaris".into(),
            author: "Lem".into(),
            price: 9.0,
            quantity: -4,
        };
        assert!(Book::try_from(record).is_err());
    }

    #[test]
    fn parses_text_fields() {
        assert_eq!(parse_id(" 12 ").unwrap(), 12);
        assert_eq!(parse_price("15.5").unwrap(), 15.5);
        assert_eq!(parse_price("10").unwrap(), 10.0);
        assert_eq!(parse_quantity("3").unwrap(), 3);

        assert_eq!(field_of(parse_quantity("2.5").unwrap_err()), "quantity");
        assert_eq!(field_of(parse_quantity("-1").unwrap_err()), "quantity");
        assert_eq!(field_of(parse_price("cheap").unwrap_err()), "price");
        assert_eq!(field_of(parse_price("-3").unwrap_err()), "price");
        assert_eq!(field_of(parse_id("x").unwrap_err()), "id");
    }

    #[test]
    fn empty_patch() {
        assert!(BookPatch::default().is_empty());
        let patch = BookPatch {
            author: Some("X".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
