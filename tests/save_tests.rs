// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;

use chrono::NaiveDate;
use coinpurse::models::{Frequency, TimeUnit, Transaction, User};
use coinpurse::save::manager::{pack_version, unpack_version, SAVE_VERSION};
use coinpurse::save::{Savable, SaveError, SaveManager};
use tempfile::TempDir;

fn manager() -> (TempDir, SaveManager) {
    let dir = TempDir::new().unwrap();
    let saves = SaveManager::new(dir.path());
    (dir, saves)
}

fn sample_user() -> User {
    let mut user = User::new("Test user", 15000.0).unwrap();
    user.history_mut().add(
        Transaction::new(
            "Test name",
            "Test category",
            999.9,
            NaiveDate::from_ymd_opt(2021, 6, 17).unwrap(),
            None,
        )
        .unwrap(),
    );
    user.history_mut().add(
        Transaction::new(
            "Recurring test transaction",
            "Test category",
            -420.69,
            NaiveDate::from_ymd_opt(1963, 12, 31).unwrap(),
            Some(Frequency::new(1, TimeUnit::Years).unwrap()),
        )
        .unwrap(),
    );
    user
}

#[test]
fn save_and_load_round_trips() {
    let (_dir, saves) = manager();

    let empty = User::new("empty user", 1000.0).unwrap();
    saves.save_user(&empty, 69).unwrap();
    assert_eq!(saves.load_user(69).unwrap(), empty);

    let full = sample_user();
    saves.save_user(&full, 69).unwrap();
    assert_eq!(saves.load_user(69).unwrap(), full);
}

#[test]
fn missing_slot_is_its_own_condition() {
    let (_dir, saves) = manager();
    match saves.load_user(2) {
        Err(SaveError::NoSuchSave(2)) => {}
        other => panic!("expected NoSuchSave, got {:?}", other.map(|u| u.username().to_string())),
    }
}

#[test]
fn version_header_round_trips() {
    let bits = pack_version("3.7.19").unwrap();
    assert_eq!(unpack_version(bits), "3.7.19");
    assert_eq!(unpack_version(pack_version("63.31.31").unwrap()), "63.31.31");
}

#[test]
fn version_above_ceiling_is_unsupported() {
    match pack_version("64.0.0") {
        Err(SaveError::UnsupportedVersion { version, ceiling }) => {
            assert_eq!(version, "64.0.0");
            assert_eq!(ceiling.as_deref(), Some("63.31.31"));
        }
        other => panic!("expected UnsupportedVersion, got {:?}", other),
    }
    assert!(pack_version("1.32.0").is_err());
    assert!(pack_version("not.a.version").is_err());
}

#[test]
fn saved_file_starts_with_the_packed_current_version() {
    let (_dir, saves) = manager();
    let user = User::new("Header", 0.0).unwrap();
    saves.save_user(&user, 0).unwrap();

    let bytes = fs::read(saves.slot_path(0)).unwrap();
    let header = u16::from_be_bytes([bytes[0], bytes[1]]);
    assert_eq!(unpack_version(header), SAVE_VERSION);
    assert_eq!(&bytes[2..], &user.as_bytes()[..]);
}

#[test]
fn backup_rotation_shifts_generations_and_discards_the_oldest() {
    let (_dir, saves) = manager();
    fs::create_dir_all(saves.base_dir()).unwrap();
    fs::write(saves.slot_path(1), b"live").unwrap();
    fs::write(saves.backup_path(1, 1), b"gen one").unwrap();
    fs::write(saves.backup_path(1, 2), b"gen two").unwrap();
    fs::write(saves.backup_path(1, 3), b"gen three").unwrap();

    let user = User::new("Rotator", 1.0).unwrap();
    saves.save_user(&user, 1).unwrap();

    assert_eq!(fs::read(saves.backup_path(1, 1)).unwrap(), b"live");
    assert_eq!(fs::read(saves.backup_path(1, 2)).unwrap(), b"gen one");
    assert_eq!(fs::read(saves.backup_path(1, 3)).unwrap(), b"gen two");
    assert!(!saves.backup_path(1, 4).exists());
    assert_eq!(saves.load_user(1).unwrap(), user);
}

#[test]
fn rotation_copes_with_missing_generations() {
    let (_dir, saves) = manager();
    let user = User::new("Fresh", 0.0).unwrap();

    // No live file, no backups: first save creates only the live file.
    saves.save_user(&user, 5).unwrap();
    assert!(saves.slot_path(5).is_file());
    assert!(!saves.backup_path(5, 1).exists());

    // Second save: live moves to .bak1, nothing else appears.
    saves.save_user(&user, 5).unwrap();
    assert!(saves.backup_path(5, 1).is_file());
    assert!(!saves.backup_path(5, 2).exists());
}

#[test]
fn layout_identical_older_version_loads() {
    let (_dir, saves) = manager();
    let user = sample_user();
    saves.save_user(&user, 7).unwrap();

    // Re-stamp the file as 1.0.1 and load it back through migration.
    let path = saves.slot_path(7);
    let mut bytes = fs::read(&path).unwrap();
    let restamped = pack_version("1.0.1").unwrap().to_be_bytes();
    bytes[0] = restamped[0];
    bytes[1] = restamped[1];
    fs::write(&path, &bytes).unwrap();

    assert_eq!(saves.load_user(7).unwrap(), user);
}

#[test]
fn unknown_version_on_disk_is_unsupported() {
    let (_dir, saves) = manager();
    let user = User::new("Future", 0.0).unwrap();
    saves.save_user(&user, 4).unwrap();

    let path = saves.slot_path(4);
    let mut bytes = fs::read(&path).unwrap();
    let restamped = pack_version("2.0.0").unwrap().to_be_bytes();
    bytes[0] = restamped[0];
    bytes[1] = restamped[1];
    fs::write(&path, &bytes).unwrap();

    match saves.load_user(4) {
        Err(SaveError::UnsupportedVersion { version, .. }) => assert_eq!(version, "2.0.0"),
        other => panic!("expected UnsupportedVersion, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn truncated_file_is_an_integrity_error() {
    let (_dir, saves) = manager();
    fs::create_dir_all(saves.base_dir()).unwrap();
    fs::write(saves.slot_path(3), [0x04]).unwrap();
    assert!(matches!(
        saves.load_user(3),
        Err(SaveError::Truncated { .. })
    ));
}
