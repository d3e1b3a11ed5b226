//! CSV uploads destined for a bulk insert.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ExtractResult;
use crate::gateway::TabularResult;

/// Parsed CSV file: header row plus data rows. Empty fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Upload {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Upload {
    pub fn read_path(path: &Path) -> ExtractResult<Self> {
        let file = File::open(path)?;
        Self::read(file)
    }

    pub fn read<R: Read>(reader: R) -> ExtractResult<Self> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|field| (!field.is_empty()).then(|| field.to_string()))
                    .collect(),
            );
        }
        Ok(Self { headers, rows })
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// First `n` rows as a table, for a look before inserting.
    pub fn head(&self, n: usize) -> TabularResult {
        TabularResult {
            columns: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_with_blanks_and_quotes() {
        let data = "id,name,note\n1,\"Smith, J\",\n2,O'Brien,vip\n";
        let upload = Upload::read(data.as_bytes()).unwrap();
        assert_eq!(upload.headers, vec!["id", "name", "note"]);
        assert_eq!(
            upload.rows,
            vec![
                vec![Some("1".to_string()), Some("Smith, J".to_string()), None],
                vec![Some("2".to_string()), Some("O'Brien".to_string()), Some("vip".to_string())],
            ]
        );
        assert_eq!(upload.width(), 3);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let data = "id,name\n1,a\n2\n";
        assert!(Upload::read(data.as_bytes()).is_err());
    }

    #[test]
    fn test_head() {
        let data = "id\n1\n2\n3\n";
        let upload = Upload::read(data.as_bytes()).unwrap();
        assert_eq!(upload.head(2).len(), 2);
        assert_eq!(upload.head(10).len(), 3);
    }
}
