mod common;

use common::book;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn add_contact() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    book(&dir)
        .args([
            "add",
            "--name",
            "Ada Lovelace",
            "--phone",
            "01712345678",
            "--email",
            "ada@example.com",
            "--group",
            "work",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact added successfully"))
        .stdout(predicate::str::contains("Favorite: no"))
        .stdout(predicate::str::contains("Address: -"));

    // Confirm newly added contact exist
    book(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"))
        .stdout(predicate::str::contains("ada@example.com"))
        .stdout(predicate::str::contains("work"));

    // Persisted under the contacts slot as a JSON array
    let raw = fs::read_to_string(common::storage_path(&dir))?;
    let slots: serde_json::Value = serde_json::from_str(&raw)?;
    let contacts: serde_json::Value = serde_json::from_str(slots["contacts"].as_str().unwrap())?;
    assert_eq!(contacts[0]["phone"], "01712345678");
    assert_eq!(contacts[0]["favorite"], false);

    Ok(())
}

#[test]
fn duplicate_phone_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    common::add(&dir, &["--name", "Ada", "--phone", "01712345678"]);

    book(&dir)
        .args(["add", "--name", "Bob", "--phone", "01712345678"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Phone already exists"));

    book(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1"));

    Ok(())
}

#[test]
fn invalid_inputs() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    // INVALID COMMAND
    book(&dir)
        .args(["and", "--name", "Alice", "--phone", "01712345678"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand 'and'"));

    // BLANK NAME
    book(&dir)
        .args(["add", "--name", "  ", "--phone", "01712345678"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name & Phone are required"));

    // INVALID PHONE NUMBER
    for phone in ["0171234567", "+8801712345678", "0271234567a"] {
        book(&dir)
            .args(["add", "--name", "Alice", "--phone", phone])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid phone number"));
    }

    // Nothing was written
    book(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts found"));

    Ok(())
}

#[test]
fn add_with_photo_and_flags() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let photo = dir.path().join("ada.png");
    fs::write(&photo, [0x89, b'P', b'N', b'G'])?;

    book(&dir)
        .args(["add", "--name", "Ada", "--phone", "01712345678", "--favorite", "--emergency"])
        .arg("--photo")
        .arg(&photo)
        .assert()
        .success()
        .stdout(predicate::str::contains("Favorite: yes"))
        .stdout(predicate::str::contains("Emergency: yes"))
        .stdout(predicate::str::contains("Photo: yes"));

    book(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[photo]"));

    // Missing photo file fails before anything is added
    book(&dir)
        .args(["add", "--name", "Bob", "--phone", "01812345678"])
        .arg("--photo")
        .arg(dir.path().join("missing.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));

    Ok(())
}
