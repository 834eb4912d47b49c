// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Slot files, the packed version header and backup rotation.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;

use crate::models::User;
use crate::save::build::SaveData;
use crate::save::encode::Savable;
use crate::save::error::SaveError;
use crate::save::template;

/// The version stamped into every file this build writes.
pub const SAVE_VERSION: &str = template::CURRENT_VERSION;

/// Hard ceiling imposed by the 6/5/5-bit header packing.
pub const MAX_VERSION: &str = "63.31.31";
const MAX_VERSION_PARTS: [u16; 3] = [63, 31, 31];

pub const FILE_NAME_BASE: &str = "save";
pub const FILE_EXTENSION: &str = ".purse";
pub const BACKUP_EXTENSION: &str = ".bak";

/// Backup generations kept per slot; `.bak1` is the most recent.
pub const BACKUP_COUNT: u32 = 3;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("no.skagemoen", "Coinpurse", "coinpurse"));

/// Packs "major.minor.patch" into the 16-bit header: bits 15-10 major,
/// 9-5 minor, 4-0 patch. Versions above [`MAX_VERSION`], or strings
/// that are not three dot-separated numbers, are unsupported.
pub fn pack_version(version: &str) -> Result<u16, SaveError> {
    let unsupported = |ceiling: Option<&str>| SaveError::UnsupportedVersion {
        version: version.to_string(),
        ceiling: ceiling.map(str::to_string),
    };

    let mut parts = [0u16; 3];
    let mut split = version.split('.');
    for part in &mut parts {
        *part = split
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| unsupported(None))?;
    }
    if split.next().is_some() {
        return Err(unsupported(None));
    }
    if parts.iter().zip(MAX_VERSION_PARTS).any(|(n, max)| *n > max) {
        return Err(unsupported(Some(MAX_VERSION)));
    }
    Ok((parts[0] << 10) | (parts[1] << 5) | parts[2])
}

/// Inverse of [`pack_version`].
pub fn unpack_version(bits: u16) -> String {
    format!("{}.{}.{}", (bits >> 10) & 0x3f, (bits >> 5) & 0x1f, bits & 0x1f)
}

/// Owns the directory save slots live in. Passed explicitly to every
/// operation that touches saves; there is no ambient current-user or
/// current-directory state.
pub struct SaveManager {
    base_dir: PathBuf,
}

impl SaveManager {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The platform data directory, created if needed.
    pub fn default_location() -> Result<Self, SaveError> {
        let dirs = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(SaveError::NoDataDir)?;
        let base = dirs.data_dir().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self::new(base))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `<base>/save<slot>.purse`
    pub fn slot_path(&self, slot: u32) -> PathBuf {
        self.base_dir
            .join(format!("{FILE_NAME_BASE}{slot}{FILE_EXTENSION}"))
    }

    /// `<live path>.bak<generation>`
    pub fn backup_path(&self, slot: u32, generation: u32) -> PathBuf {
        let mut path = self.slot_path(slot).into_os_string();
        path.push(format!("{BACKUP_EXTENSION}{generation}"));
        PathBuf::from(path)
    }

    /// Rotates backups, then writes the user under a fresh live file.
    ///
    /// The version ceiling is checked before any file is touched, so an
    /// unsupported configured version leaves the slot untouched. The
    /// rotation is sequenced oldest-first (discard `.bak3`, shift the
    /// rest up one generation, move the live file to `.bak1`) so a
    /// crash mid-way costs at most one generation.
    pub fn save_user(&self, user: &User, slot: u32) -> Result<(), SaveError> {
        let header = pack_version(SAVE_VERSION)?;
        fs::create_dir_all(&self.base_dir)?;
        self.rotate_backups(slot)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.slot_path(slot))?;
        file.write_all(&header.to_be_bytes())?;
        file.write_all(&user.as_bytes())?;
        Ok(())
    }

    fn rotate_backups(&self, slot: u32) -> Result<(), SaveError> {
        let oldest = self.backup_path(slot, BACKUP_COUNT);
        if oldest.is_file() {
            fs::remove_file(&oldest)?;
        }
        for generation in (2..=BACKUP_COUNT).rev() {
            let from = self.backup_path(slot, generation - 1);
            if from.is_file() {
                fs::rename(from, self.backup_path(slot, generation))?;
            }
        }
        let live = self.slot_path(slot);
        if live.exists() {
            fs::rename(live, self.backup_path(slot, 1))?;
        }
        Ok(())
    }

    /// Loads and rebuilds the user in `slot`, whatever supported
    /// version wrote it.
    pub fn load_user(&self, slot: u32) -> Result<User, SaveError> {
        let bytes = match fs::read(self.slot_path(slot)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SaveError::NoSuchSave(slot));
            }
            Err(e) => return Err(e.into()),
        };
        if bytes.len() < 2 {
            return Err(SaveError::Truncated {
                needed: 2,
                remaining: bytes.len(),
            });
        }
        let version = unpack_version(u16::from_be_bytes([bytes[0], bytes[1]]));
        SaveData::from_payload(&version, &bytes[2..])?.build_user()
    }
}
