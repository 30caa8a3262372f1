use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use directories::ProjectDirs;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::card::Prize;

type HmacSha256 = Hmac<Sha256>;

const SIGNING_KEY: &[u8] = b"cardflip_ledger_key_v1_no_peeking";
const TAG_SIZE: usize = 32;

/// Seconds since the Unix epoch, for session timestamps.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// One sitting at the table: which prizes came up, in reveal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Seed the row was dealt from, when one was given on the command line.
    pub seed: Option<u64>,
    pub started: i64,
    pub ended: Option<i64>,
    pub revealed: Vec<Prize>,
}

impl SessionRecord {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            started: unix_now(),
            ended: None,
            revealed: Vec::new(),
        }
    }
}

/// The on-disk ledger of every past session.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct History {
    pub records: Vec<SessionRecord>,
}

impl History {
    /// Load the ledger from disk. A missing, corrupted, or tampered file
    /// yields an empty ledger rather than an error.
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        let mut data = Vec::new();
        let ok = File::open(&path)
            .and_then(|mut f| f.read_to_end(&mut data))
            .is_ok();
        if !ok || data.len() < TAG_SIZE {
            return Self::default();
        }

        let (payload, tag) = data.split_at(data.len() - TAG_SIZE);
        if !verify(payload, tag) {
            eprintln!("[WARN] Ledger signature mismatched! Starting with a fresh ledger.");
            return Self::default();
        }

        bincode::deserialize(payload).unwrap_or_default()
    }

    /// Save the ledger atomically: write a signed temp file, fsync, rename.
    pub fn save(&self) {
        let Some(path) = Self::file_path() else { return };
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }

        let Ok(mut data) = bincode::serialize(self) else {
            return;
        };
        let Some(tag) = sign(&data) else { return };
        data.extend_from_slice(&tag);

        let mut temp_path = path.clone();
        temp_path.set_extension("tmp");

        let written = File::create(&temp_path).and_then(|mut f| {
            f.write_all(&data)?;
            // Flush OS buffers before the rename so a crash cannot leave a
            // half-written ledger behind the final name.
            f.sync_all()
        });
        match written {
            Ok(()) => {
                let _ = fs::rename(&temp_path, &path);
            }
            Err(_) => {
                let _ = fs::remove_file(&temp_path);
            }
        }
    }

    /// Path of the save file (`ledger.dat`) in the platform data dir.
    fn file_path() -> Option<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "cardflip", "cardflip")?;
        Some(proj_dirs.data_dir().join("ledger.dat"))
    }
}

fn sign(payload: &[u8]) -> Option<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(SIGNING_KEY).ok()?;
    mac.update(payload);
    Some(mac.finalize().into_bytes().to_vec())
}

fn verify(payload: &[u8], tag: &[u8]) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(SIGNING_KEY) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(tag).is_ok()
}
