//! Reading and writing the files around a generation run. Everything here works on plain paths;
//! the pipeline itself never touches the filesystem.

#[macro_use]
extern crate log;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use cityutil::prettyprint_usize;

pub fn slurp_file<I: AsRef<str>>(path: I) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = fs_err::read(path)?;
    debug!("Read {} ({} bytes)", path, prettyprint_usize(bytes.len()));
    Ok(bytes)
}

pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(obj)?)
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let bytes = slurp_file(path)?;
    let obj: T = serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path))?;
    Ok(obj)
}

/// Deletes the directory if it exists, then recreates it empty. Artifacts from a previous run
/// never mix with the new ones.
pub fn replace_dir(path: &str) -> Result<()> {
    if Path::new(path).exists() {
        info!("Removing stale output in {}", path);
        fs_err::remove_dir_all(path)?;
    }
    fs_err::create_dir_all(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn json_and_replace_dir() {
        let dir = std::env::temp_dir().join(format!("cityio_test_{}", std::process::id()));
        let dir = dir.display().to_string();
        replace_dir(&dir).unwrap();

        let path = format!("{}/obj.json", dir);
        let mut obj = BTreeMap::new();
        obj.insert("spacing".to_string(), 10.0);
        fs_err::write(&path, to_json(&obj).unwrap()).unwrap();
        let back: BTreeMap<String, f64> = read_json(&path).unwrap();
        assert_eq!(obj, back);

        // Stale files vanish
        replace_dir(&dir).unwrap();
        assert!(!Path::new(&path).exists());

        fs_err::remove_dir_all(&dir).unwrap();
    }
}
