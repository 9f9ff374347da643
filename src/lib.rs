pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod journal;
pub mod tag;
pub mod ui;
pub mod wordlist;

pub use config::{Pepper, Settings};
pub use error::{Error, Result};
pub use generator::{capitalize_first, generate_passphrase, select_words};
pub use tag::{derive_tag, encode_base32, verify_tag};
pub use wordlist::WordList;
