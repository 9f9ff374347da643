// This file is part of passgen.
//
// Copyright (c) 2025  The passgen contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const DEFAULT_WORDLIST_PATH: &str = "words.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// One word per line; blank lines are skipped and surrounding whitespace
    /// is trimmed. Repeated words keep their first position.
    pub fn parse(data: &str) -> Self {
        let mut seen = HashSet::new();
        let words = data
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .filter(|word| seen.insert(*word))
            .map(String::from)
            .collect();

        Self { words }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::WordListRead {
            path: path.to_path_buf(),
            source,
        })?;

        let list = Self::parse(&data);
        tracing::debug!(
            path = %path.display(),
            words = list.len(),
            "loaded word list"
        );
        Ok(list)
    }

    pub fn ensure_at_least(&self, required: usize) -> Result<()> {
        if self.words.len() < required {
            return Err(Error::InsufficientWords {
                required,
                available: self.words.len(),
            });
        }
        Ok(())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
