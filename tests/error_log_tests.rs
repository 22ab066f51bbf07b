use anyhow::anyhow;

use hilo_oracle::error_log::append_startup_error;

#[test]
fn appends_blocks_and_creates_parent_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("server-error.log");

    append_startup_error(&path, &anyhow!("address in use").context("bind failed")).unwrap();
    append_startup_error(&path, &anyhow!("second failure")).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("SERVER ERROR").count(), 2);
    assert!(text.contains("bind failed: address in use"));
    assert!(text.contains("second failure"));
    assert!(text.contains("Time: "));
}
