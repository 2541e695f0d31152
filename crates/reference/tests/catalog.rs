use reference::Catalog;
use std::fs;
use tempfile::tempdir;

fn write_catalog(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn display_names_join_security_and_sector() {
    let (_dir, path) = write_catalog(
        "Symbol,Security,GICS Sector\n\
         MMM,3M,Industrials\n\
         AOS,A. O. Smith,Industrials\n\
         ABT,Abbott Laboratories,Health Care\n",
    );

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(
        catalog.display_name("ABT").as_deref(),
        Some("Abbott Laboratories - Health Care")
    );
    assert_eq!(catalog.security("MMM"), Some("3M"));
    assert_eq!(catalog.industry_map().get("AOS").map(String::as_str), Some("Industrials"));
}

#[test]
fn unknown_symbols_resolve_to_none() {
    let (_dir, path) = write_catalog("Symbol,Security,GICS Sector\nMMM,3M,Industrials\n");

    let catalog = Catalog::load(&path).unwrap();
    assert!(catalog.display_name("XXXX").is_none());
    assert!(catalog.security("XXXX").is_none());
    assert!(!catalog.industry_map().contains_key("XXXX"));
}

#[test]
fn a_missing_catalog_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(Catalog::load(&dir.path().join("absent.csv")).is_err());
}
