//! Markup tree snapshots.
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <bookstore>
//!   <book>
//!     <id>1</id>
//!     <title>Dune</title>
//!     <author>Herbert</author>
//!     <price>15.5</price>
//!     <quantity>3</quantity>
//!   </book>
//! </bookstore>
//! ```
//!
//! The markup carries no types, so decoding types each value by its element
//! name: `id` and `quantity` are integers, `price` is a float, everything
//! else is text.

use super::SnapshotError;
use crate::model::{Book, BookRecord};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fmt::Display;

const ROOT_TAG: &str = "bookstore";
const BOOK_TAG: &str = "book";

fn xml_err(e: impl Display) -> SnapshotError {
    SnapshotError::Xml(e.to_string())
}

pub fn encode(books: &[Book]) -> Result<String, SnapshotError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new(ROOT_TAG)))
        .map_err(xml_err)?;

    for book in books {
        writer
            .write_event(Event::Start(BytesStart::new(BOOK_TAG)))
            .map_err(xml_err)?;

        let fields = [
            ("id", book.id().to_string()),
            ("title", book.title().to_string()),
            ("author", book.author().to_string()),
            ("price", book.price().to_string()),
            ("quantity", book.quantity().to_string()),
        ];
        for (tag, text) in &fields {
            writer
                .write_event(Event::Start(BytesStart::new(*tag)))
                .map_err(xml_err)?;
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_err)?;
            writer
                .write_event(Event::End(BytesEnd::new(*tag)))
                .map_err(xml_err)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(BOOK_TAG)))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(ROOT_TAG)))
        .map_err(xml_err)?;

    let mut content = String::from_utf8(writer.into_inner()).map_err(xml_err)?;
    content.push('\n');
    Ok(content)
}

/// Fields collected for one `<book>` before it is complete.
#[derive(Debug, Default)]
struct PartialRecord {
    id: Option<i64>,
    title: Option<String>,
    author: Option<String>,
    price: Option<f64>,
    quantity: Option<i64>,
}

impl PartialRecord {
    fn set(&mut self, tag: &str, text: String) -> Result<(), SnapshotError> {
        match tag {
            "id" => self.id = Some(parse_int("id", &text)?),
            "quantity" => self.quantity = Some(parse_int("quantity", &text)?),
            "price" => self.price = Some(parse_float("price", &text)?),
            "title" => self.title = Some(text),
            "author" => self.author = Some(text),
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<BookRecord, SnapshotError> {
        Ok(BookRecord {
            id: self.id.ok_or(SnapshotError::MissingField("id"))?,
            title: self.title.ok_or(SnapshotError::MissingField("title"))?,
            author: self.author.ok_or(SnapshotError::MissingField("author"))?,
            price: self.price.ok_or(SnapshotError::MissingField("price"))?,
            quantity: self
                .quantity
                .ok_or(SnapshotError::MissingField("quantity"))?,
        })
    }
}

fn parse_int(field: &'static str, text: &str) -> Result<i64, SnapshotError> {
    text.trim().parse().map_err(|_| SnapshotError::BadField {
        field,
        value: text.to_string(),
    })
}

fn parse_float(field: &'static str, text: &str) -> Result<f64, SnapshotError> {
    text.trim().parse().map_err(|_| SnapshotError::BadField {
        field,
        value: text.to_string(),
    })
}

fn tag_name(name: quick_xml::name::QName<'_>) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}

pub fn decode(content: &str) -> Result<Vec<BookRecord>, SnapshotError> {
    let mut reader = Reader::from_str(content);

    let mut records = Vec::new();
    // Open elements from the root down.
    let mut stack: Vec<String> = Vec::new();
    let mut current: Option<PartialRecord> = None;
    let mut text = String::new();
    let mut seen_root = false;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                let name = tag_name(e.name());
                match stack.len() {
                    0 => {
                        if seen_root || name != ROOT_TAG {
                            return Err(SnapshotError::UnexpectedRoot(name));
                        }
                        seen_root = true;
                    }
                    1 if name == BOOK_TAG => current = Some(PartialRecord::default()),
                    2 => text.clear(),
                    _ => {}
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = tag_name(e.name());
                match stack.len() {
                    0 => {
                        if seen_root || name != ROOT_TAG {
                            return Err(SnapshotError::UnexpectedRoot(name));
                        }
                        seen_root = true;
                    }
                    1 if name == BOOK_TAG => records.push(PartialRecord::default().finish()?),
                    2 => {
                        if let Some(partial) = current.as_mut() {
                            partial.set(&name, String::new())?;
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) => {
                if stack.len() == 3 && current.is_some() {
                    text.push_str(&e.unescape().map_err(xml_err)?);
                }
            }
            Event::CData(e) => {
                if stack.len() == 3 && current.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                let name = stack.pop().unwrap_or_default();
                match stack.len() {
                    2 => {
                        if let Some(partial) = current.as_mut() {
                            partial.set(&name, std::mem::take(&mut text))?;
                        }
                    }
                    1 => {
                        if let Some(partial) = current.take() {
                            records.push(partial.finish()?);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(SnapshotError::Xml(format!(
            "missing <{}> root element",
            ROOT_TAG
        )));
    }
    if !stack.is_empty() {
        return Err(SnapshotError::Xml("unexpected end of document".to_string()));
    }

    Ok(records)
}
