use crate::config::{Pepper, Settings};
use crate::error::{Error, Result};
use crate::generator::{PassphraseConfig, generate_passphrase};
use crate::journal::Journal;
use crate::tag::verify_tag;
use crate::wordlist::WordList;
use rand::Rng;
use std::io::Write;

/// Nothing is written until the word list and log file are both ready.
pub fn run<R, W>(settings: &Settings, rng: &mut R, out: &mut W) -> Result<()>
where
    R: Rng + ?Sized,
    W: Write,
{
    let wordlist = WordList::load(&settings.wordlist_path)?;
    wordlist.ensure_at_least(settings.words_per_passphrase)?;

    let mut journal = settings
        .log_path
        .as_deref()
        .map(Journal::open)
        .transpose()?;

    let config = PassphraseConfig {
        words_per_passphrase: settings.words_per_passphrase,
        capitalize: settings.capitalize,
    };

    tracing::debug!(
        count = settings.count,
        words = config.words_per_passphrase,
        capitalize = config.capitalize,
        tagged = settings.pepper.is_some(),
        "generating passphrases"
    );

    for _ in 0..settings.count {
        let passphrase = generate_passphrase(rng, &wordlist, config, settings.pepper.as_ref())?;

        writeln!(out, "{}", *passphrase).map_err(Error::Output)?;

        if let Some(journal) = journal.as_mut() {
            journal.record(&passphrase)?;
        }
    }

    out.flush().map_err(Error::Output)
}

pub fn verify(tagged: &str, pepper: &Pepper) -> bool {
    let valid = verify_tag(tagged.trim(), pepper.as_bytes());
    tracing::debug!(valid, "verified pepper tag");
    valid
}
