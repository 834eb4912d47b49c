// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rebuilding entities from a migrated byte map.

use chrono::NaiveDate;

use crate::models::{Frequency, TimeUnit, Transaction, User};
use crate::save::decode;
use crate::save::error::SaveError;
use crate::save::key::{ByteMap, FieldKey};
use crate::save::migrate;
use crate::save::template::{
    EntityKind, FREQUENCY_INTERVAL, FREQUENCY_UNIT, STARTING_FUNDS, TRANSACTION,
    TRANSACTION_AMOUNT, TRANSACTION_CATEGORY, TRANSACTION_DAY, TRANSACTION_MONTH,
    TRANSACTION_NAME, TRANSACTION_YEAR, USERNAME,
};

/// A save payload decoded and migrated into the current key space,
/// ready to be read back as typed values.
///
/// An absent key, or one holding a zero-length migration placeholder,
/// resolves to the caller's default. A key holding bytes of the wrong
/// width for its type is corruption and fails hard; no coercion is
/// attempted.
#[derive(Debug)]
pub struct SaveData {
    map: ByteMap,
}

impl SaveData {
    /// Decodes `payload` against the template for `version` and
    /// migrates the result into the current version's key space.
    pub fn from_payload(version: &str, payload: &[u8]) -> Result<Self, SaveError> {
        let decoded = decode::decode(EntityKind::User, version, payload)?;
        Ok(Self {
            map: migrate::migrate(&decoded),
        })
    }

    fn fixed<const N: usize>(&self, key: &FieldKey) -> Result<Option<[u8; N]>, SaveError> {
        match self.map.get(key) {
            None => Ok(None),
            Some([]) => Ok(None),
            Some(bytes) if bytes.len() == N => {
                let mut buf = [0u8; N];
                buf.copy_from_slice(bytes);
                Ok(Some(buf))
            }
            Some(bytes) => Err(SaveError::FieldWidth {
                key: key.to_string(),
                expected: N,
                actual: bytes.len(),
            }),
        }
    }

    fn get_u8(&self, key: &FieldKey, default: u8) -> Result<u8, SaveError> {
        Ok(self.fixed::<1>(key)?.map_or(default, |b| b[0]))
    }

    fn get_i16(&self, key: &FieldKey, default: i16) -> Result<i16, SaveError> {
        Ok(self.fixed::<2>(key)?.map_or(default, i16::from_be_bytes))
    }

    fn get_f32(&self, key: &FieldKey, default: f32) -> Result<f32, SaveError> {
        Ok(self.fixed::<4>(key)?.map_or(default, f32::from_be_bytes))
    }

    fn get_f64(&self, key: &FieldKey, default: f64) -> Result<f64, SaveError> {
        Ok(self.fixed::<8>(key)?.map_or(default, f64::from_be_bytes))
    }

    fn get_text(&self, key: &FieldKey, default: &str) -> String {
        match self.map.get(key) {
            None | Some([]) => default.to_string(),
            Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    fn get_unit(&self, key: &FieldKey, default: TimeUnit) -> TimeUnit {
        match self.map.get(key) {
            None | Some([]) => default,
            Some(bytes) => TimeUnit::from_label(&String::from_utf8_lossy(bytes)).unwrap_or(default),
        }
    }

    fn has_occurrence(&self, index: u16) -> bool {
        self.map.keys().any(|k| k.in_group(TRANSACTION, index))
    }

    fn has_frequency(&self, index: u16) -> bool {
        self.map
            .contains(&FieldKey::indexed(FREQUENCY_INTERVAL, TRANSACTION, index))
            || self
                .map
                .contains(&FieldKey::indexed(FREQUENCY_UNIT, TRANSACTION, index))
    }

    /// Rebuilds the user, applying defaults for anything the source
    /// version did not carry. Transactions are walked by successive
    /// occurrence index until none exists; the on-disk count field was
    /// absorbed by decoding and plays no part here.
    pub fn build_user(&self) -> Result<User, SaveError> {
        let mut user = User::new(
            &self.get_text(&FieldKey::scalar(USERNAME), "(unknown user)"),
            self.get_f64(&FieldKey::scalar(STARTING_FUNDS), 0.0)?,
        )?;

        let mut index = 0u16;
        while self.has_occurrence(index) {
            user.history_mut().add(self.build_transaction(index)?);
            index += 1;
        }
        Ok(user)
    }

    fn build_transaction(&self, index: u16) -> Result<Transaction, SaveError> {
        let frequency = if self.has_frequency(index) {
            Some(Frequency::new(
                self.get_i16(&FieldKey::indexed(FREQUENCY_INTERVAL, TRANSACTION, index), 1)?,
                self.get_unit(
                    &FieldKey::indexed(FREQUENCY_UNIT, TRANSACTION, index),
                    TimeUnit::Months,
                ),
            )?)
        } else {
            None
        };

        let year = self.get_i16(&FieldKey::indexed(TRANSACTION_YEAR, TRANSACTION, index), 1970)?;
        let month = self.get_u8(&FieldKey::indexed(TRANSACTION_MONTH, TRANSACTION, index), 1)?;
        let day = self.get_u8(&FieldKey::indexed(TRANSACTION_DAY, TRANSACTION, index), 1)?;
        let date = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
            .ok_or(SaveError::InvalidDate {
                year: i32::from(year),
                month,
                day,
            })?;

        Ok(Transaction::new(
            &self.get_text(
                &FieldKey::indexed(TRANSACTION_NAME, TRANSACTION, index),
                "(unnamed)",
            ),
            &self.get_text(
                &FieldKey::indexed(TRANSACTION_CATEGORY, TRANSACTION, index),
                "(uncategorized)",
            ),
            self.get_f32(&FieldKey::indexed(TRANSACTION_AMOUNT, TRANSACTION, index), 0.0)?,
            date,
            frequency,
        )?)
    }
}

impl From<ByteMap> for SaveData {
    /// Wraps an already-migrated map; used by tests that build maps by
    /// hand.
    fn from(map: ByteMap) -> Self {
        Self { map }
    }
}
