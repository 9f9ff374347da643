use crate::config::Pepper;
use crate::error::{Error, Result};
use crate::tag::derive_tag;
use crate::wordlist::WordList;
use rand::Rng;
use rand::seq::IndexedRandom;
use zeroize::Zeroizing;

pub const SEPARATOR: char = '-';
pub const MAX_NUMBER: u16 = 9999;

#[derive(Debug, Clone, Copy)]
pub struct PassphraseConfig {
    pub words_per_passphrase: usize,
    pub capitalize: bool,
}

pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Picks `count` distinct words, uniformly and without replacement.
pub fn select_words<'a, R: Rng + ?Sized>(
    rng: &mut R,
    wordlist: &'a WordList,
    count: usize,
) -> Result<Vec<&'a str>> {
    let picked: Vec<&str> = wordlist
        .words()
        .choose_multiple(rng, count)
        .map(String::as_str)
        .collect();

    if picked.len() < count {
        return Err(Error::SelectionShortfall {
            requested: count,
            selected: picked.len(),
        });
    }

    Ok(picked)
}

/// Builds `Word-Word-NNNN`, with `-TAG` appended when a pepper is given.
pub fn generate_passphrase<R: Rng + ?Sized>(
    rng: &mut R,
    wordlist: &WordList,
    config: PassphraseConfig,
    pepper: Option<&Pepper>,
) -> Result<Zeroizing<String>> {
    let picked = select_words(rng, wordlist, config.words_per_passphrase)?;
    let number: u16 = rng.random_range(0..=MAX_NUMBER);

    let mut passphrase = Zeroizing::new(String::new());
    for (i, word) in picked.iter().enumerate() {
        if i > 0 {
            passphrase.push(SEPARATOR);
        }
        if config.capitalize {
            passphrase.push_str(&capitalize_first(word));
        } else {
            passphrase.push_str(word);
        }
    }
    passphrase.push(SEPARATOR);
    passphrase.push_str(&format!("{:04}", number));

    if let Some(pepper) = pepper {
        let tag = derive_tag(&passphrase, pepper.as_bytes());
        passphrase.push(SEPARATOR);
        passphrase.push_str(&tag);
    }

    Ok(passphrase)
}
