//! Archive writing.

use crate::solver::Assignment;
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Characters used to pad payloads to a uniform length.
const PAD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz1234567890+/=";

/// Name of the payload entry inside every archive.
const PAYLOAD_NAME: &str = "assignment.txt";

/// Errors from writing artifacts.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        /// The directory path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An archive file could not be written.
    #[error("failed to write archive {path}: {source}")]
    Io {
        /// The archive path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An archive could not be assembled.
    #[error("failed to build archive {path}: {source}")]
    Zip {
        /// The archive path.
        path: PathBuf,
        /// The underlying zip error.
        source: ZipError,
    },
}

/// Configuration for artifact output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Directory the archives are written into. Created if missing.
    pub out_dir: PathBuf,

    /// Extra width beyond the longest recipient name when padding
    /// payloads to a uniform length.
    pub pad_margin: usize,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            pad_margin: 5,
        }
    }
}

impl EmitConfig {
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn with_pad_margin(mut self, margin: usize) -> Self {
        self.pad_margin = margin;
        self
    }
}

/// Writes one sealed archive per participant.
///
/// The archive is named after the giver (spaces become underscores) and
/// contains a single stored entry whose first line is the recipient's
/// name. A second line of random padding brings every payload to the
/// same length, so neither compression nor file size reveals who is
/// inside. Returns the written paths in giver name order.
pub fn write_artifacts<R: Rng>(
    assignment: &Assignment,
    config: &EmitConfig,
    rng: &mut R,
) -> Result<Vec<PathBuf>, EmitError> {
    fs::create_dir_all(&config.out_dir).map_err(|source| EmitError::CreateDir {
        path: config.out_dir.clone(),
        source,
    })?;

    let pad_to = assignment.longest_recipient_len() + config.pad_margin;
    let mut written = Vec::with_capacity(assignment.len());

    for (giver, recipient) in assignment.iter() {
        let path = archive_path(&config.out_dir, giver);
        let payload = sealed_payload(recipient, pad_to, rng);
        write_archive(&path, &payload)?;
        debug!("wrote result for {giver} into {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn archive_path(out_dir: &Path, giver: &str) -> PathBuf {
    out_dir.join(format!("{}.zip", giver.replace(' ', "_")))
}

fn sealed_payload<R: Rng>(recipient: &str, pad_to: usize, rng: &mut R) -> String {
    let mut payload = String::with_capacity(pad_to + 24);
    payload.push_str(recipient);
    payload.push('\n');
    payload.push_str("Secret Padding: ");
    for _ in (recipient.len() + 1)..pad_to {
        if let Some(&c) = PAD_ALPHABET.choose(rng) {
            payload.push(c as char);
        }
    }
    payload.push('\n');
    payload
}

fn write_archive(path: &Path, payload: &str) -> Result<(), EmitError> {
    let io_err = |source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    };
    let zip_err = |source| EmitError::Zip {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    writer.start_file(PAYLOAD_NAME, options).map_err(zip_err)?;
    writer.write_all(payload.as_bytes()).map_err(io_err)?;
    let _ = writer.finish().map_err(zip_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConstraintGraph;
    use crate::solver::{Solver, SolverConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::io::Read;
    use zip::ZipArchive;

    fn solve(names: &[&str]) -> Assignment {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        let graph = ConstraintGraph::build(&names, &[], &[], &[], &[]).unwrap();
        Solver::solve(&names, &graph, &SolverConfig::default().with_seed(7)).unwrap()
    }

    fn read_payload(path: &Path) -> String {
        let file = File::open(path).unwrap();
        let mut archive = ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name(PAYLOAD_NAME).unwrap();
        let mut payload = String::new();
        entry.read_to_string(&mut payload).unwrap();
        payload
    }

    #[test]
    fn test_one_archive_per_participant() {
        let assignment = solve(&["ann", "bo", "celeste"]);
        let dir = tempfile::tempdir().unwrap();
        let config = EmitConfig::default().with_out_dir(dir.path());
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let written = write_artifacts(&assignment, &config, &mut rng).unwrap();

        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists(), "{} missing", path.display());
        }
        assert_eq!(written[0], dir.path().join("ann.zip"));
    }

    #[test]
    fn test_payload_names_only_the_recipient() {
        let assignment = solve(&["ann", "bo"]);
        let dir = tempfile::tempdir().unwrap();
        let config = EmitConfig::default().with_out_dir(dir.path());
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let _ = write_artifacts(&assignment, &config, &mut rng).unwrap();

        let payload = read_payload(&dir.path().join("ann.zip"));
        let mut lines = payload.lines();
        assert_eq!(lines.next(), Some("bo"));
        assert!(lines.next().unwrap().starts_with("Secret Padding: "));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_payloads_have_uniform_length() {
        let assignment = solve(&["jo", "annabelle", "kit", "maximilian"]);
        let dir = tempfile::tempdir().unwrap();
        let config = EmitConfig::default().with_out_dir(dir.path());
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let written = write_artifacts(&assignment, &config, &mut rng).unwrap();

        let lengths: Vec<usize> = written.iter().map(|p| read_payload(p).len()).collect();
        assert!(
            lengths.windows(2).all(|w| w[0] == w[1]),
            "payload sizes leak the recipient: {lengths:?}"
        );
    }

    #[test]
    fn test_spaces_in_names_become_underscores() {
        let assignment = solve(&["mary ann", "bo jack"]);
        let dir = tempfile::tempdir().unwrap();
        let config = EmitConfig::default().with_out_dir(dir.path());
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let written = write_artifacts(&assignment, &config, &mut rng).unwrap();

        assert!(written.contains(&dir.path().join("mary_ann.zip")));
        assert!(written.contains(&dir.path().join("bo_jack.zip")));
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let assignment = solve(&["ann", "bo"]);
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep/out");
        let config = EmitConfig::default().with_out_dir(&nested);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let written = write_artifacts(&assignment, &config, &mut rng).unwrap();
        assert!(written.iter().all(|p| p.starts_with(&nested)));
    }
}
