//! Interactive numbered menu over a `CatalogStore`.
//!
//! # Responsibility
//! - Read free-text answers and reject non-numeric ids/years locally.
//! - Render store results as human-readable text.
//!
//! # Invariants
//! - The store is only called with already-validated numeric input.
//! - Persistence errors end the session; usage errors never do.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use shelf_core::{Book, CatalogBackend, CatalogStore, StatusChange};
use std::io::{BufRead, Write};
use std::str::FromStr;

static DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid digits regex"));

const MENU: &str = "\nAvailable actions:
1. Add a book
2. Delete a book
3. Search books
4. List all books
5. Change book status
6. Exit";

/// One interactive session bound to input and output streams.
pub struct MenuSession<'store, B: CatalogBackend, R, W> {
    store: &'store mut CatalogStore<B>,
    input: R,
    output: W,
}

impl<'store, B, R, W> MenuSession<'store, B, R, W>
where
    B: CatalogBackend,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'store mut CatalogStore<B>, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Runs until the user exits or input ends.
    ///
    /// # Errors
    /// - Terminal I/O failures.
    /// - Backing-file rewrite failures reported by the store.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Choose an action: ")? else {
                writeln!(self.output)?;
                return Ok(());
            };

            let keep_going = match choice.as_str() {
                "1" => self.add()?,
                "2" => self.delete()?,
                "3" => self.search()?,
                "4" => self.list()?,
                "5" => self.change_status()?,
                "6" => {
                    writeln!(self.output, "Goodbye.")?;
                    false
                }
                _ => {
                    writeln!(self.output, "Unknown choice. Please try again.")?;
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    fn add(&mut self) -> Result<bool> {
        let Some(title) = self.prompt("Enter the title: ")? else {
            return Ok(false);
        };
        let Some(author) = self.prompt("Enter the author: ")? else {
            return Ok(false);
        };
        let Some(year) = self.prompt("Enter the publication year: ")? else {
            return Ok(false);
        };

        let Some(year) = parse_number::<i32>(&year) else {
            writeln!(self.output, "The year must be a number.")?;
            return Ok(true);
        };

        let id = self
            .store
            .add(title.as_str(), author, year)
            .context("failed to save the catalog after adding a book")?;
        writeln!(self.output, "Book '{title}' added with ID {id}.")?;
        Ok(true)
    }

    fn delete(&mut self) -> Result<bool> {
        let Some(id) = self.prompt("Enter the ID of the book to delete: ")? else {
            return Ok(false);
        };
        let Some(id) = parse_number::<u64>(&id) else {
            writeln!(self.output, "The ID must be a number.")?;
            return Ok(true);
        };

        let removed = self
            .store
            .delete(id)
            .context("failed to save the catalog after deleting a book")?;
        if removed {
            writeln!(self.output, "Book with ID {id} deleted.")?;
        } else {
            writeln!(self.output, "Book with ID {id} not found.")?;
        }
        Ok(true)
    }

    fn search(&mut self) -> Result<bool> {
        let Some(field) = self.prompt("Search field (title, author, year): ")? else {
            return Ok(false);
        };
        let Some(value) = self.prompt("Search value: ")? else {
            return Ok(false);
        };

        match self.store.search(&field, &value) {
            Ok(hits) if hits.is_empty() => writeln!(self.output, "No books found.")?,
            Ok(hits) => {
                for book in &hits {
                    writeln!(self.output, "{}", render_book(book))?;
                }
            }
            Err(_) => writeln!(self.output, "Invalid search field.")?,
        }
        Ok(true)
    }

    fn list(&mut self) -> Result<bool> {
        let books = self.store.list();
        if books.is_empty() {
            writeln!(self.output, "The library is empty.")?;
            return Ok(true);
        }

        writeln!(self.output, "Books:")?;
        for book in books {
            writeln!(self.output, "{}", render_book(book))?;
        }
        Ok(true)
    }

    fn change_status(&mut self) -> Result<bool> {
        let Some(id) = self.prompt("Enter the ID of the book: ")? else {
            return Ok(false);
        };
        let Some(status) = self.prompt("New status (available, checked_out): ")? else {
            return Ok(false);
        };
        let Some(id) = parse_number::<u64>(&id) else {
            writeln!(self.output, "The ID must be a number.")?;
            return Ok(true);
        };

        let outcome = self
            .store
            .change_status(id, &status)
            .context("failed to save the catalog after changing a status")?;
        match outcome {
            StatusChange::Updated => {
                writeln!(self.output, "Status of book {id} changed to '{status}'.")?
            }
            StatusChange::NotFound => writeln!(self.output, "Book with ID {id} not found.")?,
            StatusChange::InvalidStatus(_) => writeln!(self.output, "Invalid status.")?,
        }
        Ok(true)
    }

    /// Prints `label` and reads one trimmed line; `None` on end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn parse_number<T: FromStr>(value: &str) -> Option<T> {
    if !DIGITS_RE.is_match(value) {
        return None;
    }
    value.parse().ok()
}

fn render_book(book: &Book) -> String {
    format!(
        "ID: {}, Title: {}, Author: {}, Year: {}, Status: {}",
        book.id, book.title, book.author, book.year, book.status
    )
}

#[cfg(test)]
mod tests {
    use super::{parse_number, MenuSession};
    use shelf_core::{CatalogStore, JsonFileBackend};
    use std::io::Cursor;

    fn run_script(store: &mut CatalogStore<JsonFileBackend>, script: &str) -> String {
        let mut output = Vec::new();
        MenuSession::new(store, Cursor::new(script.as_bytes().to_vec()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_number_accepts_only_ascii_digits() {
        assert_eq!(parse_number::<u64>("42"), Some(42));
        assert_eq!(parse_number::<i32>("1965"), Some(1965));
        assert_eq!(parse_number::<i32>("-5"), None);
        assert_eq!(parse_number::<u64>("4 2"), None);
        assert_eq!(parse_number::<u64>(""), None);
        assert_eq!(parse_number::<i32>("99999999999"), None);
    }

    #[test]
    fn add_list_and_exit() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CatalogStore::open_file(dir.path().join("library.json")).unwrap();

        let output = run_script(&mut store, "1\nDune\nHerbert\n1965\n4\n6\n");

        assert!(output.contains("Book 'Dune' added with ID 1."));
        assert!(output.contains("ID: 1, Title: Dune, Author: Herbert, Year: 1965, Status: available"));
        assert!(output.ends_with("Goodbye.\n"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn non_numeric_input_is_rejected_before_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        let mut store = CatalogStore::open_file(&path).unwrap();

        let output = run_script(&mut store, "1\nDune\nHerbert\nnineteen\n2\nx\n5\none\navailable\n6\n");

        assert!(output.contains("The year must be a number."));
        assert_eq!(output.matches("The ID must be a number.").count(), 2);
        assert!(store.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn status_change_search_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CatalogStore::open_file(dir.path().join("library.json")).unwrap();
        store.add("War and Peace", "Tolstoy", 1869).unwrap();

        let output = run_script(
            &mut store,
            "5\n1\nchecked_out\n5\n1\nlost\n5\n9\navailable\n3\ntitle\nwar\n3\nstatus\nx\n3\nauthor\nzzz\n2\n1\n2\n1\n4\n",
        );

        assert!(output.contains("Status of book 1 changed to 'checked_out'."));
        assert!(output.contains("Invalid status."));
        assert!(output.contains("Book with ID 9 not found."));
        assert!(output.contains("Status: checked_out"));
        assert!(output.contains("Invalid search field."));
        assert!(output.contains("No books found."));
        assert!(output.contains("Book with ID 1 deleted."));
        assert!(output.contains("Book with ID 1 not found."));
        assert!(output.contains("The library is empty."));
        assert!(store.get(1).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_choice_reprompts_and_eof_exits() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CatalogStore::open_file(dir.path().join("library.json")).unwrap();

        let output = run_script(&mut store, "7\n");

        assert!(output.contains("Unknown choice. Please try again."));
        assert_eq!(output.matches("Available actions:").count(), 2);
    }
}
