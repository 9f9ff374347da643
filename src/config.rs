//! Startup configuration: the env file, the pepper secret and the resolved
//! [`Settings`] for a run.
//!
//! Everything here is read once before the first passphrase is generated.
//! The process environment is only read, never written.

use crate::error::{Error, Result};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

pub const PEPPER_ENV_KEY: &str = "PASSGEN_PEPPER";
pub const DEFAULT_ENV_PATH: &str = ".env";

pub fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();

    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    // Only a matching pair of quotes is stripped.
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);

    if key.is_empty() {
        return None;
    }

    Some((key, value))
}

pub struct EnvFile {
    path: PathBuf,
    entries: Vec<(String, Zeroizing<String>)>,
}

impl EnvFile {
    /// Reads `path`. A file that does not exist yields no entries.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => Zeroizing::new(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "env file not found, skipping");
                return Ok(Self {
                    path: path.to_path_buf(),
                    entries: Vec::new(),
                });
            }
            Err(source) => {
                return Err(Error::EnvFileRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut env = Self::parse(&content);
        env.path = path.to_path_buf();

        tracing::debug!(
            path = %path.display(),
            keys = env.entries.len(),
            "loaded env file"
        );
        Ok(env)
    }

    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter_map(parse_env_line)
            .map(|(key, value)| (key.to_string(), Zeroizing::new(value.to_string())))
            .collect();

        Self {
            path: PathBuf::new(),
            entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for EnvFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvFile")
            .field("path", &self.path)
            .field("keys", &self.entries.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

/// The secret key for pepper tags. Never empty.
pub struct Pepper(Zeroizing<Vec<u8>>);

impl Pepper {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return None;
        }
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Pepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pepper(<redacted>)")
    }
}

/// A key already present in the process environment is never overridden by
/// the file, even when its value is empty.
pub fn resolve_pepper<F>(env_file: &EnvFile, process: F) -> Result<Pepper>
where
    F: Fn(&str) -> Option<Vec<u8>>,
{
    let value = match process(PEPPER_ENV_KEY) {
        Some(value) => Zeroizing::new(value),
        None => Zeroizing::new(
            env_file
                .get(PEPPER_ENV_KEY)
                .unwrap_or_default()
                .as_bytes()
                .to_vec(),
        ),
    };

    Pepper::new(value.as_slice()).ok_or_else(|| Error::MissingPepper {
        env_file: env_file.path().to_path_buf(),
    })
}

pub fn process_env(key: &str) -> Option<Vec<u8>> {
    std::env::var_os(key).map(|v| v.into_encoded_bytes())
}

#[derive(Debug)]
pub struct Settings {
    pub wordlist_path: PathBuf,
    pub count: usize,
    pub words_per_passphrase: usize,
    pub capitalize: bool,
    pub log_path: Option<PathBuf>,
    pub pepper: Option<Pepper>,
}

impl Settings {
    pub const DEFAULT_COUNT: usize = 5;
    pub const DEFAULT_WORDS: usize = 2;
}
