//! Application state for an inventory session.
//!
//! The session owns the inventory and the file it is persisted to. Each
//! command updates the inventory and leaves a status message for the
//! presentation layer to print.

use crate::domain::{Inventory, Product};
use crate::infrastructure::{FileRepository, LoadOutcome, PersistenceError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How a status message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

/// Outcome of the last command, shown to the user once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Main application state for one run of the tracker.
///
/// # Examples
///
/// ```
/// use stockroom::application::App;
///
/// let app = App::new("inventory.txt");
/// assert!(app.inventory.is_empty());
/// assert!(app.status_message.is_none());
/// ```
#[derive(Debug)]
pub struct App {
    /// The products being tracked
    pub inventory: Inventory,
    /// File the inventory is loaded from and saved to
    pub path: PathBuf,
    /// Outcome of the last command
    pub status_message: Option<StatusMessage>,
}

impl App {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inventory: Inventory::default(),
            path: path.into(),
            status_message: None,
        }
    }

    /// Creates a session and fills it from the file at `path`.
    ///
    /// Never fails: a missing or unreadable file leaves the inventory empty and
    /// the reason in the status message.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let mut app = Self::new(path);
        let result = FileRepository::load_inventory(&app.path);
        app.set_load_result(result);
        app
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status_message = Some(StatusMessage::new(kind, text));
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_message.as_ref().map(|s| s.text.as_str())
    }

    pub fn set_load_result(&mut self, result: Result<LoadOutcome, PersistenceError>) {
        match result {
            Ok(LoadOutcome::Missing) => {
                self.inventory = Inventory::default();
                self.set_status(
                    StatusKind::Warning,
                    "File not found. Starting with an empty inventory.",
                );
            }
            Ok(LoadOutcome::Loaded(report)) => {
                let loaded = report.products.len();
                let skipped = report.skipped.len();
                self.inventory = Inventory::from_products(report.products);
                if skipped == 0 {
                    let text = format!("Loaded {loaded} products from {}", self.path.display());
                    self.set_status(StatusKind::Success, text);
                } else {
                    let lines: Vec<String> =
                        report.skipped.iter().map(|s| s.line.to_string()).collect();
                    let text = format!(
                        "Loaded {loaded} products from {}, skipped {skipped} malformed line(s): {}. \
                         Skipped lines will be dropped from the file on the next save.",
                        self.path.display(),
                        lines.join(", ")
                    );
                    self.set_status(StatusKind::Warning, text);
                }
            }
            Err(e) => {
                warn!(error = %e, "could not load inventory");
                self.inventory = Inventory::default();
                self.set_status(
                    StatusKind::Error,
                    format!("Error: Unable to load from file {e}. Starting with an empty inventory."),
                );
            }
        }
    }

    pub fn add_product(&mut self, product: Product) {
        self.inventory.add(product);
        self.set_status(StatusKind::Success, "Product added successfully.");
    }

    /// Returns whether a product with that id existed.
    pub fn update_product(&mut self, id: i32, price: f64, quantity: i32) -> bool {
        match self.inventory.update(id, price, quantity) {
            Ok(()) => {
                self.set_status(StatusKind::Success, "Product updated successfully.");
                true
            }
            Err(e) => {
                info!(error = %e, "update skipped");
                self.set_status(StatusKind::Error, "Product not found.");
                false
            }
        }
    }

    /// Returns whether at least one product was removed.
    pub fn delete_product(&mut self, id: i32) -> bool {
        match self.inventory.delete(id) {
            Ok(_) => {
                self.set_status(StatusKind::Success, "Product deleted successfully.");
                true
            }
            Err(e) => {
                info!(error = %e, "delete skipped");
                self.set_status(StatusKind::Error, "Product not found.");
                false
            }
        }
    }

    pub fn low_stock(&self, threshold: i32) -> Vec<&Product> {
        self.inventory.low_stock(threshold)
    }

    /// Writes the inventory to the session file. Returns whether it worked.
    pub fn save(&mut self) -> bool {
        let result = FileRepository::save_inventory(&self.path, self.inventory.list_all());
        self.set_save_result(result)
    }

    pub fn set_save_result(&mut self, result: Result<PathBuf, PersistenceError>) -> bool {
        match result {
            Ok(path) => {
                self.set_status(
                    StatusKind::Success,
                    format!("Inventory saved to file {}.", path.display()),
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "could not save inventory");
                self.set_status(StatusKind::Error, format!("Error: Unable to save to file {e}"));
                false
            }
        }
    }

    pub fn take_status_message(&mut self) -> Option<StatusMessage> {
        self.status_message.take()
    }
}
