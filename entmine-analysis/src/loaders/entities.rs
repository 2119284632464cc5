//! Cross-lingual entity file reader.
//!
//! The first row is a header: `id<TAB>site...[<TAB>instance_of]`. Each
//! following row holds an entity identifier, one title per site (empty when
//! the entity has no page on that site) and, optionally, a comma-separated
//! list of instance-of classes.

use std::io::BufRead;
use std::path::Path;

use entmine_core::constants::INSTANCE_OF_COLUMN;
use entmine_core::errors::LoadError;

use super::LoadSummary;

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityColumns {
    pub width: usize,
    pub site: usize,
    pub instance_of: Option<usize>,
}

impl EntityColumns {
    /// Locate `site` (and the optional instance-of column) in `header`.
    pub fn from_header(header: &str, site: &str, path: &Path) -> Result<Self, LoadError> {
        let names: Vec<&str> = header.split('\t').collect();
        let site_column = names
            .iter()
            .skip(1)
            .position(|n| *n == site)
            .map(|i| i + 1)
            .ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: site.to_string(),
            })?;
        Ok(Self {
            width: names.len(),
            site: site_column,
            instance_of: names.iter().position(|n| *n == INSTANCE_OF_COLUMN),
        })
    }
}

/// Read entity rows, calling `on_entity(id, title)` for every row that has a
/// title for `site` and no excluded class.
pub fn read_entities<R: BufRead>(
    reader: R,
    path: &Path,
    site: &str,
    excluded_classes: &[String],
    mut on_entity: impl FnMut(&str, &str) -> bool,
) -> Result<LoadSummary, LoadError> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            return Err(LoadError::MissingHeader {
                path: path.to_path_buf(),
            })
        }
    };
    let columns = EntityColumns::from_header(&header, site, path)?;

    let mut summary = LoadSummary::default();
    for (index, line) in lines.enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != columns.width {
            return Err(LoadError::MalformedLine {
                path: path.to_path_buf(),
                line: index + 2,
                expected: columns.width.to_string(),
                found: fields.len(),
            });
        }

        let excluded = columns.instance_of.is_some_and(|col| {
            fields[col]
                .split(',')
                .map(str::trim)
                .any(|class| excluded_classes.iter().any(|e| e == class))
        });
        let title = fields[columns.site];
        if excluded || title.is_empty() || fields[0].is_empty() {
            summary.skipped += 1;
            continue;
        }
        if on_entity(fields[0], title) {
            summary.records += 1;
        } else {
            summary.skipped += 1;
        }
    }
    Ok(summary)
}
