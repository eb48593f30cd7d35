//! Integration tests for sqlfs-rs.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use proptest::prelude::*;
use sqlfs_rs::codec::decode_block;
use sqlfs_rs::db::{BATCH_DRIVER_NAME, SqlDatabase};
use sqlfs_rs::writer;
use std::io::Write;
use tempfile::TempDir;
use test_case::test_case;

/// Reads all blocks of a table in `id` order.
fn read_blocks(db: &SqlDatabase, table: &str) -> Vec<(i64, String)> {
    let conn = db.conn().expect("connection");
    let mut stmt = conn
        .prepare(&format!("SELECT id, block FROM {table} ORDER BY id"))
        .expect("prepare");
    stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .expect("query")
        .collect::<Result<Vec<_>, _>>()
        .expect("rows")
}

/// Reassembles the original byte stream from a table.
fn reassemble(db: &SqlDatabase, table: &str) -> Vec<u8> {
    read_blocks(db, table)
        .iter()
        .flat_map(|(_, block)| decode_block(block).expect("decode"))
        .collect()
}

fn db_for(driver: &str) -> SqlDatabase {
    SqlDatabase::in_memory()
        .expect("in-memory db")
        .with_driver_name(driver)
}

#[test_case("sqlite3"; "generic strategy")]
#[test_case(BATCH_DRIVER_NAME; "batch transactional strategy")]
fn test_example_scenario_abcdef_threshold_4(driver: &str) {
    let db = db_for(driver);
    let mut w = writer::open(&db, "t1", 4).expect("open writer");

    w.write_all(b"ABCDEF").expect("write");
    w.close().expect("close");

    let rows = read_blocks(&db, "t1");
    assert_eq!(
        rows,
        vec![(0, "QUJDRA==".to_string()), (1, "RUY=".to_string())]
    );
}

#[test_case("sqlite3"; "generic strategy")]
#[test_case(BATCH_DRIVER_NAME; "batch transactional strategy")]
fn test_write_nothing_close_leaves_empty_table(driver: &str) {
    let db = db_for(driver);
    let w = writer::open(&db, "t1", 4).expect("open writer");

    w.close().expect("close");

    assert!(read_blocks(&db, "t1").is_empty());
}

#[test_case("sqlite3"; "generic strategy")]
#[test_case(BATCH_DRIVER_NAME; "batch transactional strategy")]
fn test_ids_are_dense_and_ordered(driver: &str) {
    let db = db_for(driver);
    let mut w = writer::open(&db, "t1", 2).expect("open writer");

    // 11 bytes at threshold 2: five full blocks plus a final short one
    w.write_all(b"hello world").expect("write");
    w.close().expect("close");

    let rows = read_blocks(&db, "t1");
    assert_eq!(rows.len(), 6);
    for (expected, (id, _)) in rows.iter().enumerate() {
        assert_eq!(*id, expected as i64);
    }
}

#[test]
fn test_reopen_empties_prior_stream() {
    let db = SqlDatabase::in_memory().expect("db");
    let mut w = writer::open(&db, "t1", 4).expect("open");
    w.write_all(b"first stream contents").expect("write");
    w.close().expect("close");
    assert!(!read_blocks(&db, "t1").is_empty());

    let w = writer::open(&db, "t1", 4).expect("reopen");
    assert!(
        read_blocks(&db, "t1").is_empty(),
        "reopen must leave an empty table before any write"
    );
    w.close().expect("close");
}

#[test]
fn test_writer_survives_on_file_backed_db() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("stream.db");

    {
        let db = SqlDatabase::open(&path).expect("open db");
        let mut w = writer::open(&db, "t1", 8).expect("open writer");
        w.write_all(b"persisted across connections").expect("write");
        w.close().expect("close");
    }

    let db = SqlDatabase::open(&path).expect("reopen db");
    assert_eq!(reassemble(&db, "t1"), b"persisted across connections");
}

#[test]
fn test_flush_failure_does_not_advance_stream() {
    let db = SqlDatabase::in_memory().expect("db");
    let mut w = writer::open(&db, "t1", 4).expect("open");
    w.write_all(b"ABCD").expect("first block");
    assert_eq!(w.rows_written(), 1);

    db.conn()
        .expect("connection")
        .execute("DROP TABLE t1", [])
        .expect("drop");

    assert!(w.write_all(b"EFGH").is_err());
    assert_eq!(w.rows_written(), 1);
}

proptest! {
    /// For any byte sequence written in arbitrary chunk sizes, reading the
    /// table in id order and decoding each block yields exactly the input.
    #[test]
    fn prop_round_trip_generic(
        data in proptest::collection::vec(any::<u8>(), 0..512),
        threshold in 1usize..32,
        chunk in 1usize..17,
    ) {
        let db = SqlDatabase::in_memory().expect("db");
        let mut w = writer::open(&db, "t1", threshold).expect("open");
        for piece in data.chunks(chunk) {
            w.write_all(piece).expect("write");
        }
        w.close().expect("close");

        prop_assert_eq!(reassemble(&db, "t1"), data);
    }

    #[test]
    fn prop_round_trip_batch(
        data in proptest::collection::vec(any::<u8>(), 0..512),
        threshold in 1usize..32,
        chunk in 1usize..17,
    ) {
        let db = db_for(BATCH_DRIVER_NAME);
        let mut w = writer::open(&db, "t1", threshold).expect("open");
        for piece in data.chunks(chunk) {
            w.write_all(piece).expect("write");
        }
        w.close().expect("close");

        prop_assert_eq!(reassemble(&db, "t1"), data);
    }

    /// Every block except the last is exactly the threshold size.
    #[test]
    fn prop_block_sizes(
        data in proptest::collection::vec(any::<u8>(), 1..256),
        threshold in 1usize..16,
    ) {
        let db = SqlDatabase::in_memory().expect("db");
        let mut w = writer::open(&db, "t1", threshold).expect("open");
        w.write_all(&data).expect("write");
        w.close().expect("close");

        let blocks = read_blocks(&db, "t1");
        for (i, (_, block)) in blocks.iter().enumerate() {
            let decoded = decode_block(block).expect("decode");
            if i + 1 < blocks.len() {
                prop_assert_eq!(decoded.len(), threshold);
            } else {
                prop_assert!(decoded.len() <= threshold);
                prop_assert!(!decoded.is_empty());
            }
        }
    }
}

// ==================== CLI ====================

fn cli() -> Command {
    Command::cargo_bin("sqlfs-rs").expect("binary")
}

#[test]
fn test_cli_import_and_show() {
    let temp = TempDir::new().expect("temp dir");
    let input = temp.path().join("input.bin");
    std::fs::write(&input, b"ABCDEF").expect("write input");
    let db_path = temp.path().join("sqlfs.db");

    cli()
        .args(["--db-path", db_path.to_str().expect("path")])
        .args(["import", "t1"])
        .arg(&input)
        .args(["--buffer-size", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 blocks"));

    cli()
        .args(["--db-path", db_path.to_str().expect("path")])
        .args(["show", "t1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Blocks: 2"));
}

#[test]
fn test_cli_import_stdin_json_format() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("sqlfs.db");

    cli()
        .args(["--db-path", db_path.to_str().expect("path")])
        .args(["--format", "json"])
        .args(["import", "t1", "--buffer-size", "4"])
        .write_stdin("ABCDEF")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"blocks\": 2"));
}

#[test]
fn test_cli_tables() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("sqlfs.db");

    cli()
        .args(["--db-path", db_path.to_str().expect("path")])
        .args(["import", "alpha"])
        .write_stdin("x")
        .assert()
        .success();

    cli()
        .args(["--db-path", db_path.to_str().expect("path")])
        .arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"));
}

#[test]
fn test_cli_rejects_invalid_table_name() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("sqlfs.db");

    cli()
        .args(["--db-path", db_path.to_str().expect("path")])
        .args(["import", "bad name"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid table name"));
}
