//! Letter sets and output settings.
//!
//! A config is a TOML file with the canvas settings at the top level and a
//! `[letters]` table mapping output names to the text to draw:
//!
//! ```toml
//! em = 1000.0
//! padding = 0.1
//!
//! [letters]
//! ka = "क"
//! ksha = "क्ष"
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use trace_path::{NormalizeOptions, DEFAULT_EM, DEFAULT_PADDING, DEFAULT_PRECISION, DEFAULT_SAMPLES};

use crate::error::ConfigError;

const DEVANAGARI: &str = include_str!("../resources/devanagari.toml");
const TELUGU: &str = include_str!("../resources/telugu.toml");

/// Letter sets that ship with the tool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Script {
    Devanagari,
    Telugu,
}

impl Script {
    fn source(self) -> (&'static str, &'static str) {
        match self {
            Script::Devanagari => ("devanagari.toml", DEVANAGARI),
            Script::Telugu => ("telugu.toml", TELUGU),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub em: f64,
    pub padding: f64,
    pub precision: usize,
    /// Maximum number of trace points per stroke.
    pub samples: usize,
    pub output_dir: Option<PathBuf>,
    pub letters: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            em: DEFAULT_EM,
            padding: DEFAULT_PADDING,
            precision: DEFAULT_PRECISION,
            samples: DEFAULT_SAMPLES,
            output_dir: None,
            letters: IndexMap::new(),
        }
    }
}

/// Settings given on the command line, which win over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub em: Option<f64>,
    pub padding: Option<f64>,
    pub precision: Option<usize>,
    pub samples: Option<usize>,
    pub output_dir: Option<PathBuf>,
}

/// A named piece of text to extract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Letter {
    pub name: String,
    pub text: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    pub fn bundled(script: Script) -> Result<Self, ConfigError> {
        let (name, contents) = script.source();
        Self::parse(contents, Path::new(name))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.normalize_options().validate()?;
        if let Some(name) = config.letters.keys().find(|name| !is_file_stem(name)) {
            return Err(ConfigError::InvalidLetterName(name.clone()));
        }
        Ok(config)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        let Overrides {
            em,
            padding,
            precision,
            samples,
            output_dir,
        } = overrides;
        self.em = em.unwrap_or(self.em);
        self.padding = padding.unwrap_or(self.padding);
        self.precision = precision.unwrap_or(self.precision);
        self.samples = samples.unwrap_or(self.samples);
        if output_dir.is_some() {
            self.output_dir = output_dir;
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            em: self.em,
            padding: self.padding,
            precision: self.precision,
        }
    }

    /// Resolves letter names to their text, in the order given.
    ///
    /// No names, or the name `all`, selects every letter in file order.
    pub fn select(&self, names: &[String]) -> Result<Vec<Letter>, ConfigError> {
        let letters: Vec<Letter> = if names.is_empty() || names.iter().any(|name| name == "all") {
            self.letters
                .iter()
                .map(|(name, text)| Letter {
                    name: name.clone(),
                    text: text.clone(),
                })
                .collect()
        } else {
            names
                .iter()
                .map(|name| {
                    self.letters
                        .get(name)
                        .map(|text| Letter {
                            name: name.clone(),
                            text: text.clone(),
                        })
                        .ok_or_else(|| ConfigError::UnknownLetter(name.clone()))
                })
                .collect::<Result<_, _>>()?
        };
        if letters.is_empty() {
            return Err(ConfigError::NoLetters);
        }
        Ok(letters)
    }
}

/// Letter names become file name prefixes in the output directory.
fn is_file_stem(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && !name.contains("..")
}
