//! Runtime configuration from the environment.

use std::path::PathBuf;
use thiserror::Error;

pub const SUBJECTS_DIR_VAR: &str = "STUDY_GUIDE_SUBJECTS_DIR";
pub const DATA_DIR_VAR: &str = "STUDY_GUIDE_DATA_DIR";
pub const MANIFEST_VAR: &str = "STUDY_GUIDE_MANIFEST";
pub const QUIZ_COUNT_VAR: &str = "STUDY_GUIDE_QUIZ_COUNT";

const DEFAULT_SUBJECTS_DIR: &str = "Subjects";
const DEFAULT_QUIZ_COUNT: usize = 10;
const APP_DIR: &str = "study-guide";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("could not determine a data directory; set STUDY_GUIDE_DATA_DIR")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// One directory per subject, markdown topics inside.
    pub subjects_dir: PathBuf,
    /// Where `progress.json` lives.
    pub data_dir: PathBuf,
    /// Optional manifest used instead of scanning `subjects_dir`.
    pub manifest: Option<PathBuf>,
    /// Default number of questions per quiz.
    pub quiz_count: usize,
}

impl Config {
    /// Read configuration from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let subjects_dir = var(SUBJECTS_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SUBJECTS_DIR));

        let data_dir = match var(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let quiz_count = match var(QUIZ_COUNT_VAR) {
            Some(value) => parse_positive(QUIZ_COUNT_VAR, &value)?,
            None => DEFAULT_QUIZ_COUNT,
        };

        Ok(Self {
            subjects_dir,
            data_dir,
            manifest: var(MANIFEST_VAR).map(PathBuf::from),
            quiz_count,
        })
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or(ConfigError::NoDataDir)
}

fn parse_positive(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn explicit_values() {
        let config = Config::from_lookup(lookup(&[
            (SUBJECTS_DIR_VAR, "notes"),
            (DATA_DIR_VAR, "/tmp/progress"),
            (MANIFEST_VAR, "docs/manifest.json"),
            (QUIZ_COUNT_VAR, " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.subjects_dir, PathBuf::from("notes"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/progress"));
        assert_eq!(config.manifest, Some(PathBuf::from("docs/manifest.json")));
        assert_eq!(config.quiz_count, 5);
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[(DATA_DIR_VAR, "data")])).unwrap();
        assert_eq!(config.subjects_dir, PathBuf::from("Subjects"));
        assert_eq!(config.manifest, None);
        assert_eq!(config.quiz_count, 10);
    }

    #[test]
    fn blank_values_use_defaults() {
        let config =
            Config::from_lookup(lookup(&[(DATA_DIR_VAR, "data"), (MANIFEST_VAR, "  ")])).unwrap();
        assert_eq!(config.manifest, None);
    }

    #[test]
    fn rejects_bad_quiz_count() {
        for bad in ["0", "-3", "ten"] {
            let err = Config::from_lookup(lookup(&[(DATA_DIR_VAR, "data"), (QUIZ_COUNT_VAR, bad)]))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidNumber { .. }), "{bad}");
        }
    }
}
