//! Parser for the catalog and similarity data files.
//!
//! - movies.dat: movieId::title (one movie per line, row order = line order)
//! - similarity.dat: one matrix row per line, scores separated by
//!   whitespace and/or commas
//!
//! Empty lines are ignored in both files. Line numbers in errors are the
//! physical 1-based line numbers of the file.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

pub const CATALOG_FILE: &str = "movies.dat";
pub const SIMILARITY_FILE: &str = "similarity.dat";

/// Read a whole file as UTF-8.
///
/// Invalid bytes are a parse error pointing at the offending line.
fn read_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    String::from_utf8(bytes).map_err(|e| {
        let valid_up_to = e.utf8_error().valid_up_to();
        let line = e.as_bytes()[..valid_up_to]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1;
        DataLoadError::ParseError {
            file: file_label(path),
            line,
            reason: format!("Invalid UTF-8: {}", e.utf8_error()),
        }
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies.dat file
pub fn parse_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    let content = read_file(path)?;
    parse_catalog_str(&content, &file_label(path))
}

/// Parse catalog entries from the contents of a movies.dat file.
///
/// Format: movieId::title
///
/// Only the first `::` separates the id; titles may contain `::` themselves.
/// Titles are kept verbatim, surrounding whitespace included.
pub fn parse_catalog_str(content: &str, file: &str) -> Result<Vec<CatalogEntry>> {
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let (movie_id, title) = line
            .split_once("::")
            .ok_or_else(|| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing '::' separator".to_string(),
            })?;

        if title.trim().is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing title".to_string(),
            });
        }

        let entry = CatalogEntry {
            title: title.to_string(),
            row_index: entries.len(),
            movie_id: movie_id.trim().parse().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
        };

        entries.push(entry);
    }

    Ok(entries)
}

/// Parse the similarity.dat file
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let content = read_file(path)?;
    parse_similarity_str(&content, &file_label(path))
}

/// Parse a similarity matrix from text, one row per non-empty line.
///
/// Rows are parsed in parallel; the resulting matrix keeps file order.
pub fn parse_similarity_str(content: &str, file: &str) -> Result<SimilarityMatrix> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let rows: Vec<Vec<f32>> = lines
        .par_iter()
        .map(|&(line_no, line)| parse_row(line, line_no, file))
        .collect::<Result<_>>()?;

    SimilarityMatrix::from_rows(rows)
}

fn parse_row(line: &str, line_no: usize, file: &str) -> Result<Vec<f32>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .map(|field| {
            field.parse::<f32>().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid score '{}': {}", field, e),
            })
        })
        .collect()
}
