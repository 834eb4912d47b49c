// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Canonical current-version byte layout for each entity.
//!
//! All multi-byte numbers are big-endian, all text is UTF-8, and every
//! length prefix counts bytes, not characters.

use chrono::Datelike;

use crate::models::{Frequency, Transaction, TransactionHistory, User};

/// An entity that can serialize itself into the save payload.
///
/// `as_bytes().len()` and `byte_len()` agree for every implementor, at
/// every nesting level.
pub trait Savable {
    /// # Panics
    ///
    /// Panics if a text field exceeds 255 bytes of UTF-8, or a history
    /// holds more than 65535 transactions. Both are caller errors; the
    /// encoder never truncates silently.
    fn as_bytes(&self) -> Vec<u8>;

    fn byte_len(&self) -> usize;
}

fn push_text(out: &mut Vec<u8>, field: &str, text: &str) {
    let bytes = text.as_bytes();
    assert!(
        bytes.len() <= u8::MAX as usize,
        "{field} is {} bytes long, the limit is 255",
        bytes.len()
    );
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
}

/// Layout: 2 bytes interval (i16), 1 length byte, then the unit label.
impl Savable for Frequency {
    fn as_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        out.extend_from_slice(&self.interval().to_be_bytes());
        push_text(&mut out, "frequency unit label", self.unit().label());
        out
    }

    fn byte_len(&self) -> usize {
        3 + self.unit().label().len()
    }
}

/// Layout: 2 bytes year (i16), 1 byte month, 1 byte day, 4 bytes amount
/// (f32), length-prefixed category, length-prefixed name, 1 presence
/// byte, then the frequency if present.
impl Savable for Transaction {
    fn as_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        out.extend_from_slice(&(self.date.year() as i16).to_be_bytes());
        out.push(self.date.month() as u8);
        out.push(self.date.day() as u8);
        out.extend_from_slice(&self.amount.to_be_bytes());
        push_text(&mut out, "transaction category", &self.category);
        push_text(&mut out, "transaction name", &self.name);
        match &self.frequency {
            Some(frequency) => {
                out.push(1);
                out.extend_from_slice(&frequency.as_bytes());
            }
            None => out.push(0),
        }
        out
    }

    fn byte_len(&self) -> usize {
        11 + self.category.len()
            + self.name.len()
            + self.frequency.map_or(0, |f| f.byte_len())
    }
}

/// Layout: 2 bytes transaction count (u16), then each transaction in
/// sequence.
impl Savable for TransactionHistory {
    fn as_bytes(&self) -> Vec<u8> {
        let count = self.len();
        assert!(
            count <= u16::MAX as usize,
            "history holds {count} transactions, the limit is 65535"
        );
        let mut out = Vec::with_capacity(self.byte_len());
        out.extend_from_slice(&(count as u16).to_be_bytes());
        for transaction in self.transactions() {
            out.extend_from_slice(&transaction.as_bytes());
        }
        out
    }

    fn byte_len(&self) -> usize {
        2 + self
            .transactions()
            .iter()
            .map(Savable::byte_len)
            .sum::<usize>()
    }
}

/// Layout: 8 bytes starting funds (f64), length-prefixed username, then
/// the transaction history.
impl Savable for User {
    fn as_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        out.extend_from_slice(&self.starting_funds().to_be_bytes());
        push_text(&mut out, "username", self.username());
        out.extend_from_slice(&self.history().as_bytes());
        out
    }

    fn byte_len(&self) -> usize {
        9 + self.username().len() + self.history().byte_len()
    }
}
