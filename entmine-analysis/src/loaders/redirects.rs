//! Redirect file reader: `source<TAB>target`, one edge per line.

use std::io::BufRead;
use std::path::Path;

use entmine_core::errors::LoadError;

use super::LoadSummary;

/// Read redirect edges, calling `on_edge(source, target)` for each.
///
/// `on_edge` returns whether the edge was kept. Blank lines are skipped; a
/// line without exactly two columns is an error.
pub fn read_redirects<R: BufRead>(
    reader: R,
    path: &Path,
    mut on_edge: impl FnMut(&str, &str) -> bool,
) -> Result<LoadSummary, LoadError> {
    let mut summary = LoadSummary::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        let (Some(source), Some(target), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(LoadError::MalformedLine {
                path: path.to_path_buf(),
                line: index + 1,
                expected: "2".to_string(),
                found: line.split('\t').count(),
            });
        };
        if on_edge(source, target) {
            summary.records += 1;
        } else {
            summary.skipped += 1;
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_edges_and_skips_blank_lines() {
        let data = "A\tB\n\nC\tD\n";
        let mut edges = Vec::new();
        let summary = read_redirects(data.as_bytes(), Path::new("r.tsv"), |s, t| {
            edges.push((s.to_string(), t.to_string()));
            true
        })
        .unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(edges, vec![("A".into(), "B".into()), ("C".into(), "D".into())]);
    }

    #[test]
    fn wrong_column_count_is_fatal() {
        let data = "A\tB\nC\n";
        let err = read_redirects(data.as_bytes(), Path::new("r.tsv"), |_, _| true).unwrap_err();
        match err {
            LoadError::MalformedLine { line, found, .. } => {
                assert_eq!(line, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
