use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tdas_models::Table;
use tracing::info;

use crate::error::LoaderError;

/// Read a CSV file into a [`Table`].
pub fn read_path(path: impl AsRef<Path>) -> Result<Table, LoaderError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_csv(file)?;
    info!(path = %path.display(), rows = table.len(), "Loaded CSV");
    Ok(table)
}

/// Parse CSV from any reader into a [`Table`].
///
/// The first record is the header row (names trimmed). Records may be
/// ragged; `Table::new` normalizes them to the header width. Cell text is
/// kept verbatim.
pub fn read_csv<R: Read>(reader: R) -> Result<Table, LoaderError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoaderError::Empty("no header row".to_string()));
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(Table::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_csv() {
        let input = "ShortName,PortfolioName,PL_YTD\nAlpha,Growth,10.5\nBeta,Income,-3\n";
        let table = read_csv(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), ["ShortName", "PortfolioName", "PL_YTD"]);
        assert_eq!(table.value(0, "PL_YTD"), Some("10.5"));
        assert_eq!(table.value(1, "ShortName"), Some("Beta"));
    }

    #[test]
    fn headers_are_trimmed() {
        let input = " ShortName , PL_YTD \nAlpha,1\n";
        let table = read_csv(input.as_bytes()).unwrap();
        assert_eq!(table.columns(), ["ShortName", "PL_YTD"]);
    }

    #[test]
    fn ragged_records_are_tolerated() {
        let input = "a,b,c\n1\n1,2,3,4\n";
        let table = read_csv(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(0, "c"), Some(""));
        assert_eq!(table.value(1, "c"), Some("3"));
    }

    #[test]
    fn quoted_cells_keep_commas() {
        let input = "Name,Qty\n\"Fund, Global\",100\n";
        let table = read_csv(input.as_bytes()).unwrap();
        assert_eq!(table.value(0, "Name"), Some("Fund, Global"));
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = read_csv("".as_bytes());
        assert!(matches!(result, Err(LoaderError::Empty(_))));
    }

    #[test]
    fn header_only_yields_empty_table() {
        let table = read_csv("a,b\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns(), ["a", "b"]);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let input: &[u8] = b"a,b\n\xff\xfe,1\n";
        let result = read_csv(input);
        assert!(matches!(result, Err(LoaderError::Csv(_))));
    }
}
