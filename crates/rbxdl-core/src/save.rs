//! Download trigger: persist a payload under a name.
//!
//! The payload is staged in a `.part` temp file inside the destination
//! directory and renamed into place without clobbering. An existing name gets
//! a ` (n)` marker before the extension, the way browsers number repeats.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before the atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Highest ` (n)` marker tried before giving up.
const MAX_COLLISION_INDEX: u32 = 999;

/// Somewhere a finished payload can be written.
pub trait SaveTarget {
    /// Stores `bytes` as `file_name`; returns where it ended up.
    fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// Saves into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectorySaveTarget {
    dir: PathBuf,
}

impl DirectorySaveTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveTarget for DirectorySaveTarget {
    fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let file_name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("not a file name: {:?}", file_name),
                )
            })?;

        fs::create_dir_all(&self.dir)?;
        let mut staged = tempfile::Builder::new()
            .prefix(".rbxdl-")
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.dir)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;

        let mut index = 0;
        loop {
            let candidate = self.dir.join(numbered_name(file_name, index));
            match staged.persist_noclobber(&candidate) {
                Ok(_) => {
                    tracing::debug!(path = %candidate.display(), bytes = bytes.len(), "saved");
                    return Ok(candidate);
                }
                Err(e)
                    if e.error.kind() == io::ErrorKind::AlreadyExists
                        && index < MAX_COLLISION_INDEX =>
                {
                    staged = e.file;
                    index += 1;
                }
                Err(e) => return Err(e.error),
            }
        }
    }
}

/// `name.ext` for 0, `name (n).ext` otherwise. Dotfiles keep their leading dot.
pub fn numbered_name(file_name: &str, index: u32) -> String {
    if index == 0 {
        return file_name.to_string();
    }
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => format!(
            "{} ({}){}",
            &file_name[..dot],
            index,
            &file_name[dot..]
        ),
        _ => format!("{} ({})", file_name, index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_names() {
        assert_eq!(numbered_name("a.png", 0), "a.png");
        assert_eq!(numbered_name("a.png", 2), "a (2).png");
        assert_eq!(numbered_name("noext", 1), "noext (1)");
        assert_eq!(numbered_name(".hidden", 1), ".hidden (1)");
    }

    #[test]
    fn saves_bytes_under_name() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectorySaveTarget::new(dir.path());
        let path = target.save("logo.png", b"\x89PNG").unwrap();
        assert_eq!(path, dir.path().join("logo.png"));
        assert_eq!(fs::read(&path).unwrap(), b"\x89PNG");
    }

    #[test]
    fn never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectorySaveTarget::new(dir.path());
        let first = target.save("m.rbxm", b"one").unwrap();
        let second = target.save("m.rbxm", b"two").unwrap();
        assert_eq!(second, dir.path().join("m (1).rbxm"));
        assert_eq!(fs::read(first).unwrap(), b"one");
        assert_eq!(fs::read(second).unwrap(), b"two");
    }

    #[test]
    fn creates_missing_dir_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let target = DirectorySaveTarget::new(&nested);
        target.save("s.ogg", b"ogg").unwrap();
        let names: Vec<String> = fs::read_dir(&nested)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["s.ogg".to_string()]);
    }

    #[test]
    fn path_components_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let target = DirectorySaveTarget::new(dir.path());
        let path = target.save("../escape.png", b"x").unwrap();
        assert_eq!(path, dir.path().join("escape.png"));
        assert!(target.save("..", b"x").is_err());
    }
}
