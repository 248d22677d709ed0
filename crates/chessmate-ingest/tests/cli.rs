use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

/// Without `DATABASE_URL` set, the binary must fail fast at startup with a
/// configuration error rather than attempting to connect.
#[test]
fn missing_database_url_fails_fast_before_touching_any_file() {
    let dir = tempdir().unwrap();
    let pgn_path = dir.path().join("nonexistent.pgn");

    let mut cmd = Command::cargo_bin("chessmate-ingest").unwrap();
    cmd.arg(pgn_path.to_string_lossy().to_string())
        .env_remove("DATABASE_URL");

    cmd.assert().failure();
}

#[test]
fn missing_input_file_fails_with_a_readable_error() {
    let dir = tempdir().unwrap();
    let pgn_path = dir.path().join("does-not-exist.pgn");
    let unused_pgn = dir.path().join("unused.pgn");
    fs::write(&unused_pgn, "[Event \"x\"]\n\n1. e4 *\n").unwrap();

    let mut cmd = Command::cargo_bin("chessmate-ingest").unwrap();
    cmd.arg(pgn_path.to_string_lossy().to_string())
        .env("DATABASE_URL", "postgres://localhost/does-not-matter");

    // Either the config/connect step or the file read fails first; either
    // way, the process must exit non-zero rather than panic.
    cmd.assert().failure();
}
