//! Flat-file persistence for the inventory.
//!
//! One product per line as `id,name,price,quantity`, no header. Names that
//! contain a comma or a quote are written quoted; everything else is written
//! bare. Lines written before quoting existed are read back bare, so a quote
//! that is part of an old name stays in the name.

use crate::domain::Product;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Default inventory file, relative to the working directory.
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.txt";

const FIELD_COUNT: usize = 4;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A line that could not be turned into a product and was left out.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub products: Vec<Product>,
    pub skipped: Vec<SkippedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No file at the path; start from an empty inventory.
    Missing,
    Loaded(LoadReport),
}

pub struct FileRepository;

impl FileRepository {
    /// Writes every product to `path`, replacing whatever was there.
    pub fn save_inventory(path: &Path, products: &[Product]) -> Result<PathBuf, PersistenceError> {
        let file = File::create(path).map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = row_writer().from_writer(file);
        for product in products {
            writer.serialize(product).map_err(|source| PersistenceError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
        }
        writer.flush().map_err(|source| PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), count = products.len(), "saved inventory");
        Ok(path.to_path_buf())
    }

    /// Reads products from `path`.
    ///
    /// A missing file is [`LoadOutcome::Missing`]. Lines with the wrong number
    /// of fields or a non-numeric id, price or quantity are skipped and listed
    /// in [`LoadReport::skipped`]. Blank lines are ignored.
    pub fn load_inventory(path: &Path) -> Result<LoadOutcome, PersistenceError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no inventory file, starting empty");
                return Ok(LoadOutcome::Missing);
            }
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut report = LoadReport::default();
        for (index, bytes) in BufReader::new(file).split(b'\n').enumerate() {
            let bytes = bytes.map_err(|source| PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let line = index as u64 + 1;

            let parsed = match String::from_utf8(bytes) {
                Ok(text) => {
                    let text = text.strip_suffix('\r').unwrap_or(&text);
                    if text.trim().is_empty() {
                        continue;
                    }
                    parse_record(&split_line(text))
                }
                Err(e) => Err(e.to_string()),
            };

            match parsed {
                Ok(product) => report.products.push(product),
                Err(reason) => {
                    warn!(path = %path.display(), line, %reason, "skipping malformed line");
                    report.skipped.push(SkippedLine { line, reason });
                }
            }
        }

        info!(
            path = %path.display(),
            loaded = report.products.len(),
            skipped = report.skipped.len(),
            "loaded inventory"
        );
        Ok(LoadOutcome::Loaded(report))
    }
}

fn row_writer() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'));
    builder
}

/// Splits one line into fields.
///
/// Quoted parsing is used only when writing the parsed fields back gives the
/// exact same line, i.e. the line came from [`FileRepository::save_inventory`].
/// Anything else is split on bare commas.
fn split_line(line: &str) -> StringRecord {
    let bare = || StringRecord::from(line.split(',').collect::<Vec<_>>());
    if !line.contains('"') {
        return bare();
    }

    let quoted = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(Result::ok);

    match quoted {
        Some(record) if encode(&record).as_deref() == Some(line) => record,
        _ => bare(),
    }
}

fn encode(record: &StringRecord) -> Option<String> {
    let mut writer = row_writer().from_writer(Vec::new());
    writer.write_record(record).ok()?;
    let bytes = writer.into_inner().ok()?;
    let text = String::from_utf8(bytes).ok()?;
    Some(text.strip_suffix('\n').unwrap_or(&text).to_string())
}

fn parse_record(record: &StringRecord) -> Result<Product, String> {
    if record.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields, found {}",
            record.len()
        ));
    }
    let id = record[0]
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("id {:?}: {e}", &record[0]))?;
    let price = record[2]
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("price {:?}: {e}", &record[2]))?;
    let quantity = record[3]
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("quantity {:?}: {e}", &record[3]))?;
    Ok(Product::new(id, &record[1], price, quantity))
}
