// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use coinpurse::models::{Frequency, TimeUnit, Transaction, User};
use coinpurse::save::Savable;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn frequency_layout() {
    let freq = Frequency::new(2, TimeUnit::Weeks).unwrap();
    let bytes = freq.as_bytes();
    assert_eq!(bytes.len(), freq.byte_len());
    // 2 bytes interval, 1 length byte, then the unit label.
    assert_eq!(&bytes[0..2], &2i16.to_be_bytes());
    assert_eq!(bytes[2], 5);
    assert_eq!(&bytes[3..], b"Weeks");
}

#[test]
fn byte_length_agrees_with_encoding_recursively() {
    let mut user = User::new("Lengthy", 123.45).unwrap();
    let freq = Frequency::new(12, TimeUnit::Months).unwrap();
    let one = Transaction::new("Bus", "Transport", -3.5, date(2023, 8, 14), None).unwrap();
    let two =
        Transaction::new("Insurance", "Home", -220.0, date(2023, 9, 1), Some(freq)).unwrap();

    assert_eq!(freq.as_bytes().len(), freq.byte_len());
    assert_eq!(one.as_bytes().len(), one.byte_len());
    assert_eq!(two.as_bytes().len(), two.byte_len());

    assert_eq!(user.history().as_bytes().len(), user.history().byte_len());
    user.history_mut().add(one);
    user.history_mut().add(two);
    assert_eq!(user.history().as_bytes().len(), user.history().byte_len());
    assert_eq!(user.as_bytes().len(), user.byte_len());
}

#[test]
fn user_layout_matches_documented_offsets() {
    let mut user = User::new("TestUser", 69.99).unwrap();
    user.history_mut().add(
        Transaction::new("Test", "TestCategory", -100.0, date(2024, 1, 1), None).unwrap(),
    );
    let bytes = user.as_bytes();

    // 8 funds + 1 username length + 8 username + 2 count, then the
    // transaction: 2 year + 1 month + 1 day + 4 amount
    // + 1 + "TestCategory" + 1 + "Test" + 1 presence flag.
    let tx_len = 11 + "TestCategory".len() + "Test".len();
    assert_eq!(tx_len, 27);
    assert_eq!(bytes.len(), 9 + "TestUser".len() + 2 + tx_len);
    assert_eq!(bytes.len(), user.byte_len());

    assert_eq!(&bytes[0..8], &69.99f64.to_be_bytes());
    assert_eq!(bytes[8], 8);
    assert_eq!(&bytes[9..17], b"TestUser");
    assert_eq!(&bytes[17..19], &1u16.to_be_bytes());
    assert_eq!(&bytes[19..21], &2024i16.to_be_bytes());
    assert_eq!(bytes[21], 1);
    assert_eq!(bytes[22], 1);
    assert_eq!(&bytes[23..27], &(-100.0f32).to_be_bytes());
    assert_eq!(bytes[27], 12);
    assert_eq!(&bytes[28..40], b"TestCategory");
    assert_eq!(bytes[40], 4);
    assert_eq!(&bytes[41..45], b"Test");
    assert_eq!(bytes[45], 0);
}

#[test]
fn presence_flag_precedes_frequency_bytes() {
    let freq = Frequency::new(1, TimeUnit::Years).unwrap();
    let tx = Transaction::new("Sub", "Media", -9.99, date(2022, 3, 4), Some(freq)).unwrap();
    let bytes = tx.as_bytes();
    let flag_at = 4 + 4 + 1 + "Media".len() + 1 + "Sub".len();
    assert_eq!(bytes[flag_at], 1);
    assert_eq!(&bytes[flag_at + 1..], &freq.as_bytes()[..]);
}
