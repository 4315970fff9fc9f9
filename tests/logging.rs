//! The file logger captures engine records and refuses a second install.

use stylekit_rs::vds::GrammarContext;
use stylekit_rs::{StyleKitError, init_logger};

#[test]
fn test_file_logger() {
    let path = std::env::temp_dir().join(format!("stylekit-{}.log", std::process::id()));
    let path = path.to_string_lossy().to_string();

    init_logger(&path).unwrap();
    let ctx = GrammarContext::standard();
    ctx.expand("auto | <length>").unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[DEBUG]"));
    assert!(contents.contains("cache miss"));

    let err = init_logger(&path).unwrap_err();
    assert!(matches!(err, StyleKitError::LoggerInstalled(_)));

    let _ = std::fs::remove_file(&path);
}
