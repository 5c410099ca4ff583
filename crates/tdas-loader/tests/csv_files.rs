//! Filesystem-level loader tests.

use std::io::Write;

use tdas_loader::{read_path, LoaderError};

#[test]
fn read_csv_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "ShortName,PortfolioName,PL_YTD\nAlpha,Growth,100\nBeta,Income,-25.5\n"
    )
    .unwrap();

    let table = read_path(file.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.value(1, "PL_YTD"), Some("-25.5"));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = read_path("does/not/exist.csv");
    assert!(matches!(result, Err(LoaderError::Io(_))));
}

#[test]
fn unreadable_bytes_are_a_csv_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"a,b\n\xff\xfe,1\n").unwrap();

    let result = read_path(file.path());
    assert!(matches!(result, Err(LoaderError::Csv(_))));
}
