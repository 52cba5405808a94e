use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, TrainingError};
use crate::models::{PlayerIdentity, PlayerRecord};

/// Directory of per-player JSON records, one `<surname>_<id>.json` file each.
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Open (or create) a record directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if dir.exists() && !dir.is_dir() {
            return Err(TrainingError::Data(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Load the stored record for a player, `None` if there isn't one yet.
    pub fn load(&self, identity: &PlayerIdentity) -> Result<Option<PlayerRecord>> {
        self.load_key(&identity.record_key())
    }

    pub fn load_key(&self, key: &str) -> Result<Option<PlayerRecord>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        let record = serde_json::from_str(&text)?;
        Ok(Some(record))
    }

    /// Write a record unless its pops ratio is undefined.
    ///
    /// Returns whether the file was written. The file is replaced through a
    /// sibling temp file so a failed write leaves the old record intact.
    pub fn write_if_ratio_defined(&self, record: &PlayerRecord) -> Result<bool> {
        let Some(ratio) = record.player_pops_ratio else {
            log::debug!("Not writing {}: no pops or drops yet", record.name);
            return Ok(false);
        };

        let path = self.path_for(&record.record_key());
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(record)?;
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;

        log::debug!("Wrote player data to {}", path.display());
        log::info!(
            "{} \tPOPS: {} \tDROPS: {} \tRATIO: {}",
            record.name,
            record.player_pops,
            record.player_drops,
            ratio
        );
        Ok(true)
    }

    /// Every record in the directory, sorted by file name. Unreadable files are skipped.
    pub fn load_all(&self) -> Result<Vec<PlayerRecord>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
            .collect();
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            let parsed: Result<PlayerRecord> = fs::read_to_string(&path)
                .map_err(TrainingError::from)
                .and_then(|text| serde_json::from_str(&text).map_err(TrainingError::from));
            match parsed {
                Ok(record) => records.push(record),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        Ok(records)
    }
}
