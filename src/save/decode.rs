// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Template-driven payload decoding.

use crate::save::error::SaveError;
use crate::save::key::{ByteMap, FieldKey, GroupIndex};
use crate::save::template::{self, EntityKind, FieldRule};

/// Bounds-checked read position over a payload, shared across the whole
/// recursive walk. Reads are strictly sequential; nothing backtracks.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], SaveError> {
        if len > self.remaining() {
            return Err(SaveError::Truncated {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn take_byte(&mut self) -> Result<u8, SaveError> {
        Ok(self.take(1)?[0])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], SaveError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }
}

/// Decodes a payload against the template registered for `kind` at
/// `version`, producing the flat byte map keyed by structural position.
///
/// Decoding is purely structural: field widths and nesting come from
/// the template, and no field semantics (date validity, enum labels)
/// are checked here.
pub fn decode(kind: EntityKind, version: &str, bytes: &[u8]) -> Result<ByteMap, SaveError> {
    let mut map = ByteMap::new();
    let mut cursor = Cursor::new(bytes);
    decode_entity(&mut map, &mut cursor, kind, version, &[])?;
    Ok(map)
}

fn decode_entity(
    map: &mut ByteMap,
    cursor: &mut Cursor<'_>,
    kind: EntityKind,
    version: &str,
    groups: &[GroupIndex],
) -> Result<(), SaveError> {
    let specs = template::template(kind, version).ok_or_else(|| SaveError::UnsupportedVersion {
        version: version.to_string(),
        ceiling: None,
    })?;

    for spec in specs {
        match spec.rule {
            FieldRule::Fixed(len) => {
                let value = cursor.take(len)?.to_vec();
                map.insert(field_key(spec.name, groups), value);
            }
            FieldRule::LengthPrefixed => {
                let len = cursor.take_byte()? as usize;
                let value = cursor.take(len)?.to_vec();
                map.insert(field_key(spec.name, groups), value);
            }
            FieldRule::Nested(child) => {
                decode_entity(map, cursor, child, version, groups)?;
            }
            FieldRule::Repeated(child) => {
                let count = u16::from_be_bytes(cursor.take_array()?);
                for index in 0..count {
                    let mut child_groups = groups.to_vec();
                    child_groups.push(GroupIndex {
                        group: spec.name,
                        index,
                    });
                    decode_entity(map, cursor, child, version, &child_groups)?;
                }
            }
            FieldRule::Optional(child) => {
                // The presence byte is consumed unconditionally.
                if cursor.take_byte()? != 0 {
                    decode_entity(map, cursor, child, version, groups)?;
                }
            }
        }
    }
    Ok(())
}

fn field_key(name: &'static str, groups: &[GroupIndex]) -> FieldKey {
    FieldKey {
        name,
        groups: groups.to_vec(),
    }
}
