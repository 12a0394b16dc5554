use assert_cmd::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Command with no user config or environment overrides leaking in.
fn cart_ledger(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin!("cart-ledger"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("CART_LEDGER_CATALOG")
        .env_remove("CART_LEDGER_FORMAT")
        .env_remove("CART_LEDGER_STORE_NAME")
        .env_remove("RUST_LOG");
    cmd
}

fn script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_pay_sequence_from_script() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let session = script("add 1\nadd 2\ntotal\npay 3\npay 4\nbalance\ncatalog\n");

    cart_ledger(&home)
        .arg(session.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("total: $5.00"))
        .stdout(predicate::str::contains("paid $3.00: owed $2.00 (balance $3.00)"))
        .stdout(predicate::str::contains("paid $4.00: settled, change due $2.00"))
        .stdout(predicate::str::contains("balance: $0.00"))
        .stdout(predicate::str::contains("in cart: 1").not())
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn test_reads_stdin() {
    let home = TempDir::new().unwrap();

    cart_ledger(&home)
        .write_stdin("add 3\nadd 3\ntotal\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("total: $3.00"));
}

#[test]
fn test_bad_lines_reported_but_session_succeeds() {
    let home = TempDir::new().unwrap();

    cart_ledger(&home)
        .arg("-")
        .write_stdin("add 1\nsing\npay two\ntotal\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("line 2: [UNKNOWN_COMMAND]"))
        .stderr(predicate::str::contains("line 3: [PARSE_ERROR]"))
        .stdout(predicate::str::contains("total: $2.00"));
}

#[test]
fn test_unknown_product_is_silent() {
    let home = TempDir::new().unwrap();

    cart_ledger(&home)
        .write_stdin("add 42\ninc 1\ndec 1\nremove 9\ntotal\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("total: $0.00"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_invalid_utf8_line_does_not_end_session() {
    let home = TempDir::new().unwrap();

    cart_ledger(&home)
        .write_stdin(&b"add 1\n\xff\xfe\ntotal\n"[..])
        .assert()
        .success()
        .stderr(predicate::str::contains("line 2: [PARSE_ERROR]"))
        .stdout(predicate::str::contains("total: $2.00"));
}

#[test]
fn test_huge_tenders_do_not_crash() {
    let home = TempDir::new().unwrap();

    cart_ledger(&home)
        .write_stdin("add 1\npay -90000000000000000\npay -90000000000000000\ncart\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("items: 1"));
}

#[test]
fn test_json_output() {
    let home = TempDir::new().unwrap();

    let output = cart_ledger(&home)
        .args(["--format", "json"])
        .write_stdin("add 2\npay 3\nreceipt\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(values.len(), 3);
    assert_eq!(values[0]["totals"]["total"], 300);
    assert_eq!(values[1]["payment"]["status"], "exact");
    assert_eq!(values[2]["kind"], "receipt");
    assert_eq!(values[2]["settlement"]["tendered"], 300);
}

#[test]
fn test_custom_catalog_file() {
    let home = TempDir::new().unwrap();
    let catalog = script(r#"[{"id": 10, "name": "Melon", "unitPrice": "4.25"}]"#);

    cart_ledger(&home)
        .arg("--catalog")
        .arg(catalog.path())
        .write_stdin("catalog\nadd 10\nadd 1\ntotal\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Melon"))
        .stdout(predicate::str::contains("Cherry").not())
        .stdout(predicate::str::contains("total: $4.25"));
}

#[test]
fn test_config_file_sets_symbol_and_store() {
    let home = TempDir::new().unwrap();
    let config = script("[store]\nname = \"Corner Shop\"\ncurrency_symbol = \"€\"\n");

    cart_ledger(&home)
        .arg("--config")
        .arg(config.path())
        .write_stdin("add 1\npay 2\nreceipt\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("paid €2.00: settled exactly"))
        .stdout(predicate::str::contains("Corner Shop receipt"));
}

#[test]
fn test_env_overrides_format() {
    let home = TempDir::new().unwrap();

    cart_ledger(&home)
        .env("CART_LEDGER_FORMAT", "json")
        .write_stdin("balance\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"kind":"balance","balance":0}"#));
}

#[test]
fn test_invalid_catalog_is_fatal() {
    let home = TempDir::new().unwrap();
    let catalog = script(r#"[{"id": 1, "name": "", "unitPrice": "1.00"}]"#);

    cart_ledger(&home)
        .arg("--catalog")
        .arg(catalog.path())
        .write_stdin("total\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CATALOG_ERROR"));
}

#[test]
fn test_missing_script_is_fatal() {
    let home = TempDir::new().unwrap();

    cart_ledger(&home)
        .arg("does-not-exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO_ERROR"));
}
