use crate::config::{self, DEFAULT_ENV_PATH, EnvFile, Settings};
use crate::error::Result;
use crate::wordlist::DEFAULT_WORDLIST_PATH;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "passgen",
    version,
    author,
    about = "Generate memorable word-list passphrases with an optional pepper tag"
)]
pub struct Cli {
    /// Word list, one word per line
    #[arg(value_name = "WORDLIST")]
    pub wordlist: Option<PathBuf>,

    /// Word list path (takes precedence over WORDLIST)
    #[arg(long, value_name = "FILE")]
    pub wordspath: Option<PathBuf>,

    /// Number of passphrases to generate
    #[arg(
        long,
        value_name = "N",
        default_value_t = Settings::DEFAULT_COUNT,
        value_parser = at_least_one,
        allow_negative_numbers = true
    )]
    pub count: usize,

    /// Words per passphrase
    #[arg(
        long,
        value_name = "N",
        default_value_t = Settings::DEFAULT_WORDS,
        value_parser = at_least_one,
        allow_negative_numbers = true
    )]
    pub words: usize,

    /// Append every passphrase to this file (empty disables logging)
    #[arg(long, value_name = "FILE")]
    pub log: Option<OsString>,

    /// Uppercase the first letter of each word (default)
    #[arg(long, overrides_with = "no_capitalize")]
    pub capitalize: bool,

    /// Keep words exactly as they appear in the word list
    #[arg(long, overrides_with = "capitalize")]
    pub no_capitalize: bool,

    /// Append a tag derived from PASSGEN_PEPPER
    #[arg(long)]
    pub pepper: bool,

    /// Env file that may define PASSGEN_PEPPER
    #[arg(long, value_name = "FILE", default_value = DEFAULT_ENV_PATH)]
    pub env: PathBuf,

    /// Check the pepper tag of an existing passphrase instead of generating
    #[arg(long, value_name = "PASSPHRASE", requires = "pepper")]
    pub verify: Option<String>,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

// Zero and negative counts are raised to 1.
fn at_least_one(value: &str) -> std::result::Result<usize, String> {
    let n: i64 = value
        .parse()
        .map_err(|_| format!("`{}` is not a whole number", value))?;
    Ok(usize::try_from(n.max(1)).unwrap_or(usize::MAX))
}

impl Cli {
    pub fn capitalize(&self) -> bool {
        !self.no_capitalize
    }

    pub fn wordlist_path(&self) -> PathBuf {
        self.wordspath
            .clone()
            .or_else(|| self.wordlist.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORDLIST_PATH))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log
            .as_ref()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    /// Resolves the run settings, reading the env file and the process
    /// environment only when a pepper is requested.
    pub fn settings(&self) -> Result<Settings> {
        self.settings_with(config::process_env)
    }

    pub fn settings_with<F>(&self, process: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<Vec<u8>>,
    {
        let pepper = if self.pepper {
            let env_file = EnvFile::load(&self.env)?;
            Some(config::resolve_pepper(&env_file, process)?)
        } else {
            None
        };

        Ok(Settings {
            wordlist_path: self.wordlist_path(),
            count: self.count,
            words_per_passphrase: self.words,
            capitalize: self.capitalize(),
            log_path: self.log_path(),
            pepper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("passgen").chain(args.iter().copied())).unwrap()
    }

    fn parse_err(args: &[&str]) -> ErrorKind {
        Cli::try_parse_from(std::iter::once("passgen").chain(args.iter().copied()))
            .unwrap_err()
            .kind()
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.wordlist_path(), PathBuf::from("words.txt"));
        assert_eq!(cli.count, 5);
        assert_eq!(cli.words, 2);
        assert!(cli.capitalize());
        assert!(!cli.pepper);
        assert_eq!(cli.log_path(), None);
        assert_eq!(cli.env, PathBuf::from(".env"));
        assert_eq!(cli.verify, None);
    }

    #[test]
    fn test_positional_wordlist() {
        let cli = parse(&["my-words.txt", "--count", "3"]);
        assert_eq!(cli.wordlist_path(), PathBuf::from("my-words.txt"));
        assert_eq!(cli.count, 3);
    }

    #[test]
    fn test_wordspath_overrides_positional() {
        let cli = parse(&["positional.txt", "--wordspath", "flag.txt"]);
        assert_eq!(cli.wordlist_path(), PathBuf::from("flag.txt"));
    }

    #[test]
    fn test_counts() {
        let cli = parse(&["--count", "12", "--words", "4"]);
        assert_eq!(cli.count, 12);
        assert_eq!(cli.words, 4);
    }

    #[test]
    fn test_counts_below_one_are_clamped() {
        let cli = parse(&["--count", "0", "--words", "0"]);
        assert_eq!(cli.count, 1);
        assert_eq!(cli.words, 1);

        let cli = parse(&["--count", "-3", "--words", "-1"]);
        assert_eq!(cli.count, 1);
        assert_eq!(cli.words, 1);
    }

    #[test]
    fn test_counts_reject_garbage() {
        assert_eq!(parse_err(&["--count", "five"]), ErrorKind::ValueValidation);
        assert_eq!(parse_err(&["--words", "2.5"]), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_capitalize_toggle_last_wins() {
        assert!(!parse(&["--no-capitalize"]).capitalize());
        assert!(parse(&["--capitalize"]).capitalize());
        assert!(parse(&["--no-capitalize", "--capitalize"]).capitalize());
        assert!(!parse(&["--capitalize", "--no-capitalize"]).capitalize());
    }

    #[test]
    fn test_log_path() {
        assert_eq!(
            parse(&["--log", "generator.log"]).log_path(),
            Some(PathBuf::from("generator.log"))
        );
        assert_eq!(parse(&["--log", ""]).log_path(), None);
    }

    #[test]
    fn test_unknown_flag() {
        assert_eq!(parse_err(&["--bogus"]), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_err(&["--help"]), ErrorKind::DisplayHelp);
        assert_eq!(parse_err(&["-h"]), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_verify_requires_pepper() {
        assert_eq!(
            parse_err(&["--verify", "Alpha-Bravo-0042-N4M4"]),
            ErrorKind::MissingRequiredArgument
        );
        let cli = parse(&["--pepper", "--verify", "Alpha-Bravo-0042-N4M4"]);
        assert_eq!(cli.verify.as_deref(), Some("Alpha-Bravo-0042-N4M4"));
    }

    #[test]
    fn test_settings_without_pepper_ignore_env() {
        let cli = parse(&["--env", "/definitely/not/here/.env"]);
        let settings = cli
            .settings_with(|_| panic!("environment must not be read"))
            .unwrap();
        assert!(settings.pepper.is_none());
    }

    #[test]
    fn test_settings_pepper_from_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join("custom.env");
        std::fs::write(&env_path, "PASSGEN_PEPPER='s3cret'\n").unwrap();

        let cli = parse(&["--pepper", "--env", env_path.to_str().unwrap()]);
        let settings = cli.settings_with(|_| None).unwrap();
        assert_eq!(settings.pepper.unwrap().as_bytes(), b"s3cret");
    }

    #[test]
    fn test_settings_pepper_missing() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");

        let cli = parse(&["--pepper", "--env", env_path.to_str().unwrap()]);
        let err = cli.settings_with(|_| None).unwrap_err();
        assert!(matches!(err, Error::MissingPepper { .. }));
    }
}
