// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reconciles a decoded byte map into the current version's key space.
//!
//! Every version's payload is decoded once against its own template;
//! this pass then remaps the result so consumers only ever see
//! current-version keys, regardless of how the source version ordered
//! or nested its fields.

use std::collections::HashMap;

use crate::save::key::{ByteMap, FieldKey, GroupIndex};
use crate::save::template::{self, EntityKind, FieldRule, CURRENT_VERSION};

/// A field position the current template can produce: its name, plus
/// the label of every repeated group enclosing it, outermost first.
struct KeySlot {
    name: &'static str,
    groups: Vec<&'static str>,
}

fn current_slots() -> Vec<KeySlot> {
    let mut slots = Vec::new();
    collect_slots(&mut slots, EntityKind::User, &[]);
    slots
}

fn collect_slots(out: &mut Vec<KeySlot>, kind: EntityKind, groups: &[&'static str]) {
    let Some(specs) = template::template(kind, CURRENT_VERSION) else {
        return;
    };
    for spec in specs {
        match spec.rule {
            FieldRule::Fixed(_) | FieldRule::LengthPrefixed => out.push(KeySlot {
                name: spec.name,
                groups: groups.to_vec(),
            }),
            FieldRule::Nested(child) | FieldRule::Optional(child) => {
                collect_slots(out, child, groups);
            }
            FieldRule::Repeated(child) => {
                let mut child_groups = groups.to_vec();
                child_groups.push(spec.name);
                collect_slots(out, child, &child_groups);
            }
        }
    }
}

/// Remaps `source` into the current version's key space.
///
/// Scalar keys of the current template are seeded with zero-length
/// placeholders, so a current key with no source counterpart survives
/// as "use the default". Source keys are matched to current slots by
/// field name alone; matched keys inside repeated groups have each
/// occurrence index re-resolved against the current template's group
/// labels, falling back to a monotonically increasing missing-index
/// counter scoped per (field, resolved outer indices) when the source
/// key carries no index for a label. Source keys matching no current
/// slot are dropped.
pub fn migrate(source: &ByteMap) -> ByteMap {
    let slots = current_slots();
    let mut out = ByteMap::new();
    for slot in &slots {
        if slot.groups.is_empty() {
            out.insert(FieldKey::scalar(slot.name), Vec::new());
        }
    }

    let mut missing_indexes: HashMap<(&'static str, Vec<u16>), u16> = HashMap::new();

    for (key, value) in source.iter() {
        let Some(slot) = slots.iter().find(|s| s.name == key.name) else {
            continue;
        };
        let mut groups = Vec::with_capacity(slot.groups.len());
        for &label in &slot.groups {
            let index = match key.groups.iter().find(|g| g.group == label) {
                Some(found) => found.index,
                None => {
                    let resolved: Vec<u16> = groups.iter().map(|g: &GroupIndex| g.index).collect();
                    let counter = missing_indexes.entry((slot.name, resolved)).or_insert(0);
                    let next = *counter;
                    *counter += 1;
                    next
                }
            };
            groups.push(GroupIndex {
                group: label,
                index,
            });
        }
        out.insert(
            FieldKey {
                name: slot.name,
                groups,
            },
            value.to_vec(),
        );
    }
    out
}
