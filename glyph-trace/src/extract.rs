//! Batch extraction of letters to tracing assets.
//!
//! Every letter produces three files in the output directory:
//!
//! * `<name>_extracted.svg`: the normalized outline as a standalone SVG,
//! * `<name>_path.txt`: the bare path data,
//! * `<name>_points.json`: sampled trace points per stroke.
//!
//! Points files can be read back with [`read_points`] for editing.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use trace_path::{trace_points, Normalizer, TracePoints, Warning};

use crate::{
    config::{Config, Letter},
    error::ExtractError,
    font::Font,
};

/// Files written for one letter.
#[derive(Clone, Debug, PartialEq)]
pub struct Extracted {
    pub name: String,
    pub svg: PathBuf,
    pub path: PathBuf,
    /// `None` when the outline yielded no points to sample.
    pub points: Option<PathBuf>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug)]
pub struct Failure {
    pub name: String,
    pub error: ExtractError,
}

/// Outcome of a batch, in the order the letters were given.
#[derive(Debug, Default)]
pub struct Report {
    pub extracted: Vec<Extracted>,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Extractor<'a> {
    font: &'a Font,
    units_per_em: f64,
    normalizer: Normalizer,
    samples: usize,
    output_dir: PathBuf,
}

impl<'a> Extractor<'a> {
    pub fn new(font: &'a Font, config: &Config) -> Result<Self, ExtractError> {
        Ok(Self {
            font,
            units_per_em: font.units_per_em()?.into(),
            normalizer: Normalizer::new(config.normalize_options())?,
            samples: config.samples,
            output_dir: config
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Extracts all `letters` in parallel.
    ///
    /// A failing letter is logged and recorded; the others still run.
    pub fn run(&self, letters: &[Letter]) -> Result<Report, ExtractError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ExtractError::Write {
            path: self.output_dir.clone(),
            source,
        })?;
        let results: Vec<_> = letters
            .par_iter()
            .map(|letter| (letter, self.extract(letter)))
            .collect();
        let mut report = Report::default();
        for (letter, result) in results {
            match result {
                Ok(extracted) => report.extracted.push(extracted),
                Err(error) => {
                    log::error!("{}: {error}", letter.name);
                    report.failures.push(Failure {
                        name: letter.name.clone(),
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Extracts, normalizes and writes a single letter.
    pub fn extract(&self, letter: &Letter) -> Result<Extracted, ExtractError> {
        let source = self.font.text_path(&letter.text)?;
        let normalized = self.normalizer.normalize(&source, self.units_per_em)?;
        for warning in &normalized.warnings {
            log::warn!("{}: {warning}", letter.name);
        }
        let data = normalized.to_svg();
        let em = self.normalizer.options().em;

        let svg = self.output_file(letter, "extracted.svg");
        write(&svg, svg_document(&data, em))?;
        let path = self.output_file(letter, "path.txt");
        write(&path, data)?;

        let points = trace_points(&normalized.path, self.samples);
        let points = if points.is_empty() {
            log::warn!("{}: no trace points", letter.name);
            None
        } else {
            let file = self.output_file(letter, "points.json");
            write_points(&file, &points)?;
            Some(file)
        };
        log::info!("extracted {} ({})", letter.name, letter.text);
        Ok(Extracted {
            name: letter.name.clone(),
            svg,
            path,
            points,
            warnings: normalized.warnings,
        })
    }

    fn output_file(&self, letter: &Letter, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{suffix}", letter.name))
    }
}

/// Wraps path data in an SVG document with an `em` sized view box.
pub fn svg_document(data: &str, em: f64) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {em} {em}\">\n  \
         <path d=\"{data}\" fill=\"black\" stroke=\"none\"/>\n\
         </svg>\n"
    )
}

/// Reads a points file written by [`Extractor`] or [`write_points`].
pub fn read_points(path: &Path) -> Result<TracePoints, ExtractError> {
    let json = std::fs::read_to_string(path).map_err(|source| ExtractError::Read {
        path: path.to_owned(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Writes `points` as pretty printed JSON.
pub fn write_points(path: &Path, points: &TracePoints) -> Result<(), ExtractError> {
    write(path, serde_json::to_string_pretty(points)?)
}

fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), ExtractError> {
    std::fs::write(path, contents).map_err(|source| ExtractError::Write {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn svg_wrapper() {
        assert_eq!(
            svg_document("M 100.00 100.00 L 900.00 900.00 Z", 1000.0),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 1000 1000\">\n  \
             <path d=\"M 100.00 100.00 L 900.00 900.00 Z\" fill=\"black\" stroke=\"none\"/>\n\
             </svg>\n"
        );
    }

    #[test]
    fn write_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("ka_path.txt");
        let err = write(&target, "M 0 0").unwrap_err();
        assert!(matches!(&err, ExtractError::Write { path, .. } if path == &target));
    }

    #[test]
    fn points_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ka_points.json");
        let points = trace_points(&"M 0 0 L 10 0 L 10 10".parse().unwrap(), 30);
        write_points(&file, &points).unwrap();
        assert_eq!(read_points(&file).unwrap(), points);

        std::fs::write(&file, "{\"strokes\": 3}").unwrap();
        assert!(matches!(read_points(&file), Err(ExtractError::Json(_))));
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            read_points(&missing),
            Err(ExtractError::Read { .. })
        ));
    }
}
