//! Bootstrap discovery — which script files run before the first tick.
//!
//! # Layout
//!
//! ```text
//! <data dir>/Bootstrap/000 Switcher/*.cos     switcher set
//! <data dir>/Bootstrap/001 World/*.cos        normal set, runs first
//! <data dir>/Bootstrap/010 Creatures/*.cos
//! ```
//!
//! A directory qualifies when its name is longer than three characters and
//! starts with three digits.  Those digits order the directories across all
//! data dirs (ties broken by path).  The `000` directory is the switcher set
//! and is run only when asked for, to the exclusion of everything else.
//! Within a directory, `.cos` files run in path order.

use std::path::{Path, PathBuf};

use crate::ScriptResult;

pub const BOOTSTRAP_DIR: &str = "Bootstrap";

pub const SCRIPT_EXTENSION: &str = "cos";

/// Every bootstrap script to run, in order.
///
/// Data dirs without a `Bootstrap` directory are skipped.  I/O errors while
/// listing are returned.
pub fn discover_bootstrap(data_dirs: &[PathBuf], switcher: bool) -> ScriptResult<Vec<PathBuf>> {
    let mut sets: Vec<(u32, PathBuf)> = Vec::new();

    for data_dir in data_dirs {
        let root = data_dir.join(BOOTSTRAP_DIR);
        if !root.is_dir() {
            log::debug!("bootstrap: no {BOOTSTRAP_DIR} directory in {}", data_dir.display());
            continue;
        }
        for entry in std::fs::read_dir(&root)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(number) = set_number(&path) else {
                continue;
            };
            if (number == 0) != switcher {
                continue;
            }
            sets.push((number, path));
        }
    }
    sets.sort();

    let mut files = Vec::new();
    for (_, dir) in &sets {
        files.extend(bootstrap_files(dir)?);
    }
    log::info!(
        "bootstrap: {} file(s) in {} set(s){}",
        files.len(),
        sets.len(),
        if switcher { " (switcher)" } else { "" }
    );
    Ok(files)
}

/// The scripts `path` stands for: its `.cos` files in path order when it is
/// a directory, or `path` itself otherwise.
pub fn bootstrap_files(path: &Path) -> ScriptResult<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let p = entry?.path();
        if !p.is_dir() && p.extension().is_some_and(|e| e == SCRIPT_EXTENSION) {
            files.push(p);
        }
    }
    files.sort();
    Ok(files)
}

/// `"001 World"` → `Some(1)`; anything not `DDD` + at least one more char → `None`.
fn set_number(dir: &Path) -> Option<u32> {
    let name = dir.file_name()?.to_str()?;
    let digits = name.get(..3)?;
    if name.len() <= 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
