use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MatchError;
use crate::search::{DEFAULT_MODULUS, MAX_MODULUS};

pub const DEFAULT_REPS: u32 = 1000;
pub const WARMUP_REPS: u32 = 10;
pub const DEFAULT_MISSING_PATTERN: &str = "thissubstringdoesnotexist";
/// Byte range of each text used as the "existing" pattern.
pub const DEFAULT_WINDOW: (usize, usize) = (50, 100);
/// Picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "strmatch.toml";

/// On-disk config. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub reps: Option<u32>,
    pub modulus: Option<u64>,
    pub missing_pattern: Option<String>,
    pub window: Option<[usize; 2]>,
    pub texts: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Parse a TOML config. Relative paths inside it resolve against the
    /// file's own directory, not the working directory.
    pub fn load(path: &Path) -> Result<Self, MatchError> {
        let content = fs::read_to_string(path).map_err(|e| MatchError::from_io(path, e))?;
        let mut config: FileConfig =
            toml::from_str(&content).map_err(|e| MatchError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for text in &mut config.texts {
            if text.is_relative() {
                *text = base.join(&*text);
            }
        }
        if let Some(dir) = config.output_dir.as_mut()
            && dir.is_relative()
        {
            *dir = base.join(&*dir);
        }

        tracing::debug!(path = %path.display(), texts = config.texts.len(), "loaded config");
        Ok(config)
    }

    /// Load `path`, or `strmatch.toml` in `cwd` if present, or nothing.
    pub fn discover(path: Option<&Path>, cwd: &Path) -> Result<Option<Self>, MatchError> {
        if let Some(p) = path {
            return Self::load(p).map(Some);
        }
        let default = cwd.join(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            return Self::load(&default).map(Some);
        }
        Ok(None)
    }
}

/// Values given on the command line; each one beats the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub reps: Option<u32>,
    pub modulus: Option<u64>,
    pub missing_pattern: Option<String>,
    pub texts: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Fully resolved benchmark settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub reps: u32,
    pub modulus: u64,
    pub missing_pattern: String,
    pub window: (usize, usize),
    pub texts: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            reps: DEFAULT_REPS,
            modulus: DEFAULT_MODULUS,
            missing_pattern: DEFAULT_MISSING_PATTERN.into(),
            window: DEFAULT_WINDOW,
            texts: Vec::new(),
            output_dir: None,
        }
    }
}

impl BenchConfig {
    /// Layer defaults, then the file, then the command line, and validate.
    /// Command-line texts replace the file's list rather than extending it.
    pub fn resolve(file: Option<FileConfig>, overrides: Overrides) -> Result<Self, MatchError> {
        let mut config = Self::default();

        if let Some(file) = file {
            config.reps = file.reps.unwrap_or(config.reps);
            config.modulus = file.modulus.unwrap_or(config.modulus);
            if let Some(p) = file.missing_pattern {
                config.missing_pattern = p;
            }
            if let Some([start, end]) = file.window {
                config.window = (start, end);
            }
            config.texts = file.texts;
            config.output_dir = file.output_dir;
        }

        config.reps = overrides.reps.unwrap_or(config.reps);
        config.modulus = overrides.modulus.unwrap_or(config.modulus);
        if let Some(p) = overrides.missing_pattern {
            config.missing_pattern = p;
        }
        if !overrides.texts.is_empty() {
            config.texts = overrides.texts;
        }
        if overrides.output_dir.is_some() {
            config.output_dir = overrides.output_dir;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), MatchError> {
        if self.reps == 0 {
            return Err(invalid("reps", "must be at least 1"));
        }
        validate_modulus(self.modulus)?;
        if self.missing_pattern.is_empty() {
            return Err(invalid("missing pattern", "must not be empty"));
        }
        let (start, end) = self.window;
        if start >= end {
            return Err(invalid(
                "window",
                &format!("start {start} must be below end {end}"),
            ));
        }
        if self.texts.is_empty() {
            return Err(invalid(
                "texts",
                "no texts to benchmark (pass --text or list them in strmatch.toml)",
            ));
        }
        Ok(())
    }
}

/// Rabin-Karp needs a modulus of at least 2, and small enough not to overflow.
pub fn validate_modulus(modulus: u64) -> Result<u64, MatchError> {
    if (2..=MAX_MODULUS).contains(&modulus) {
        Ok(modulus)
    } else {
        Err(invalid(
            "modulus",
            &format!("{modulus} is outside 2..={MAX_MODULUS}"),
        ))
    }
}

fn invalid(arg: &str, reason: &str) -> MatchError {
    MatchError::InvalidArgument {
        arg: arg.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_text() -> Overrides {
        Overrides {
            texts: vec![PathBuf::from("a.txt")],
            ..Overrides::default()
        }
    }

    #[test]
    fn defaults_apply_without_file() {
        let c = BenchConfig::resolve(None, with_text()).unwrap();
        assert_eq!(c.reps, DEFAULT_REPS);
        assert_eq!(c.modulus, DEFAULT_MODULUS);
        assert_eq!(c.missing_pattern, DEFAULT_MISSING_PATTERN);
        assert_eq!(c.window, DEFAULT_WINDOW);
    }

    #[test]
    fn cli_beats_file_beats_default() {
        let file = FileConfig {
            reps: Some(50),
            modulus: Some(997),
            texts: vec![PathBuf::from("from_file.txt")],
            ..FileConfig::default()
        };
        let overrides = Overrides {
            reps: Some(7),
            ..Overrides::default()
        };
        let c = BenchConfig::resolve(Some(file), overrides).unwrap();
        assert_eq!(c.reps, 7);
        assert_eq!(c.modulus, 997);
        assert_eq!(c.texts, vec![PathBuf::from("from_file.txt")]);
    }

    #[test]
    fn cli_texts_replace_file_texts() {
        let file = FileConfig {
            texts: vec![PathBuf::from("from_file.txt")],
            ..FileConfig::default()
        };
        let c = BenchConfig::resolve(Some(file), with_text()).unwrap();
        assert_eq!(c.texts, vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = |o: Overrides| BenchConfig::resolve(None, o).unwrap_err();

        assert!(bad(Overrides::default()).to_string().contains("no texts"));
        assert!(
            bad(Overrides {
                reps: Some(0),
                ..with_text()
            })
            .to_string()
            .contains("reps")
        );
        assert!(
            bad(Overrides {
                modulus: Some(1),
                ..with_text()
            })
            .to_string()
            .contains("modulus")
        );
        assert!(
            bad(Overrides {
                missing_pattern: Some(String::new()),
                ..with_text()
            })
            .to_string()
            .contains("missing pattern")
        );
    }

    #[test]
    fn modulus_bounds() {
        assert!(validate_modulus(0).is_err());
        assert!(validate_modulus(1).is_err());
        assert_eq!(validate_modulus(2).unwrap(), 2);
        assert_eq!(validate_modulus(MAX_MODULUS).unwrap(), MAX_MODULUS);
        assert!(validate_modulus(MAX_MODULUS + 1).is_err());
    }

    #[test]
    fn load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strmatch.toml");
        fs::write(
            &path,
            "reps = 3\nwindow = [10, 20]\ntexts = [\"corpus/a.txt\", \"/abs/b.txt\"]\noutput_dir = \"results\"\n",
        )
        .unwrap();

        let file = FileConfig::load(&path).unwrap();
        assert_eq!(file.reps, Some(3));
        assert_eq!(file.window, Some([10, 20]));
        assert_eq!(file.texts[0], dir.path().join("corpus/a.txt"));
        assert_eq!(file.texts[1], PathBuf::from("/abs/b.txt"));
        assert_eq!(file.output_dir, Some(dir.path().join("results")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strmatch.toml");
        fs::write(&path, "repetitions = 3\n").unwrap();
        let err = FileConfig::load(&path).unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig { .. }), "{err}");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn discover_falls_back_to_cwd_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::discover(None, dir.path()).unwrap().is_none());

        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "modulus = 13\n").unwrap();
        let found = FileConfig::discover(None, dir.path()).unwrap().unwrap();
        assert_eq!(found.modulus, Some(13));
    }
}
