// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-version schema templates for the save-file payload.
//!
//! A template is an ordered list of [`FieldSpec`]s describing how the
//! decoder consumes bytes for one entity:
//!
//! - [`FieldRule::Fixed`]: read exactly n bytes.
//! - [`FieldRule::LengthPrefixed`]: one length byte, then that many bytes.
//! - [`FieldRule::Nested`]: apply another entity's template once.
//! - [`FieldRule::Repeated`]: a big-endian u16 count, then that many
//!   applications of the nested template. The spec name doubles as the
//!   group label on decoded keys.
//! - [`FieldRule::Optional`]: a presence byte, then the nested template
//!   only if it was non-zero.
//!
//! Versions are registered in the [`template`] table. A version whose
//! layout did not change reuses the previous version's descriptor slice
//! outright; that reuse is what keeps old save files loadable without
//! duplicating descriptors.

/// Entity types a template can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    TransactionHistory,
    Transaction,
    Frequency,
}

/// How one field's bytes are laid out.
#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    Fixed(usize),
    LengthPrefixed,
    Nested(EntityKind),
    Repeated(EntityKind),
    Optional(EntityKind),
}

/// One ordered entry of an entity template.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: FieldRule,
}

const fn spec(name: &'static str, rule: FieldRule) -> FieldSpec {
    FieldSpec { name, rule }
}

/// The version written by every save, and the key space every load is
/// migrated into.
pub const CURRENT_VERSION: &str = "1.0.0";

// Field names. These are the structural keys of the decoded byte map,
// shared by the decoder, migrator and builder.
pub const STARTING_FUNDS: &str = "starting_funds";
pub const USERNAME: &str = "username";
pub const TRANSACTION_HISTORY: &str = "transaction_history";
pub const TRANSACTION: &str = "transaction";
pub const TRANSACTION_YEAR: &str = "transaction_year";
pub const TRANSACTION_MONTH: &str = "transaction_month";
pub const TRANSACTION_DAY: &str = "transaction_day";
pub const TRANSACTION_AMOUNT: &str = "transaction_amount";
pub const TRANSACTION_CATEGORY: &str = "transaction_category";
pub const TRANSACTION_NAME: &str = "transaction_name";
pub const TRANSACTION_FREQUENCY: &str = "transaction_frequency";
pub const FREQUENCY_INTERVAL: &str = "frequency_interval";
pub const FREQUENCY_UNIT: &str = "frequency_unit";

const USER_1_0_0: &[FieldSpec] = &[
    spec(STARTING_FUNDS, FieldRule::Fixed(8)),
    spec(USERNAME, FieldRule::LengthPrefixed),
    spec(TRANSACTION_HISTORY, FieldRule::Nested(EntityKind::TransactionHistory)),
];

const TRANSACTION_HISTORY_1_0_0: &[FieldSpec] = &[
    spec(TRANSACTION, FieldRule::Repeated(EntityKind::Transaction)),
];

const TRANSACTION_1_0_0: &[FieldSpec] = &[
    spec(TRANSACTION_YEAR, FieldRule::Fixed(2)),
    spec(TRANSACTION_MONTH, FieldRule::Fixed(1)),
    spec(TRANSACTION_DAY, FieldRule::Fixed(1)),
    spec(TRANSACTION_AMOUNT, FieldRule::Fixed(4)),
    spec(TRANSACTION_CATEGORY, FieldRule::LengthPrefixed),
    spec(TRANSACTION_NAME, FieldRule::LengthPrefixed),
    spec(TRANSACTION_FREQUENCY, FieldRule::Optional(EntityKind::Frequency)),
];

const FREQUENCY_1_0_0: &[FieldSpec] = &[
    spec(FREQUENCY_INTERVAL, FieldRule::Fixed(2)),
    spec(FREQUENCY_UNIT, FieldRule::LengthPrefixed),
];

/// Looks up the template for an entity at a given save version.
///
/// Returns `None` for versions that never shipped; the caller turns
/// that into an unsupported-version error. "1.0.1" changed no layouts
/// and reuses every "1.0.0" descriptor slice.
pub fn template(kind: EntityKind, version: &str) -> Option<&'static [FieldSpec]> {
    match (kind, version) {
        (EntityKind::User, "1.0.0" | "1.0.1") => Some(USER_1_0_0),
        (EntityKind::TransactionHistory, "1.0.0" | "1.0.1") => Some(TRANSACTION_HISTORY_1_0_0),
        (EntityKind::Transaction, "1.0.0" | "1.0.1") => Some(TRANSACTION_1_0_0),
        (EntityKind::Frequency, "1.0.0" | "1.0.1") => Some(FREQUENCY_1_0_0),
        _ => None,
    }
}
