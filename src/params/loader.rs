//! Parameter-file loading and conversion to the constraint model.

use super::types::{PairingParams, ParamsError};
use crate::model::{ConstraintGraph, ModelError};
use log::debug;
use std::fs;
use std::path::Path;

/// Reads and parses a parameter file.
pub fn load_params(path: &Path) -> Result<PairingParams, ParamsError> {
    let text = fs::read_to_string(path).map_err(|source| ParamsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let params: PairingParams =
        serde_json::from_str(&text).map_err(|source| ParamsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        "loaded {} participants, {} forces, {} blocks, {} two-way forces, {} two-way blocks",
        params.names.len(),
        params.force.len(),
        params.block.len(),
        params.twoway_force.len(),
        params.twoway_block.len()
    );
    Ok(params)
}

impl PairingParams {
    /// Normalizes the document into a validated [`ConstraintGraph`].
    pub fn build_graph(&self) -> Result<ConstraintGraph, ModelError> {
        let force: Vec<(String, String)> = self
            .force
            .iter()
            .map(|(giver, recipient)| (giver.clone(), recipient.clone()))
            .collect();
        let block: Vec<(String, Vec<String>)> = self
            .block
            .iter()
            .map(|(giver, recipients)| (giver.clone(), recipients.clone().into_vec()))
            .collect();
        ConstraintGraph::build(
            &self.names,
            &self.twoway_force,
            &self.twoway_block,
            &force,
            &block,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_and_build_graph() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "names": ["a", "b", "c", "d"],
                "force": {{"a": "b"}},
                "block": {{"b": "a"}},
                "twoway_block": [["c", "d"]]
            }}"#
        )
        .unwrap();

        let params = load_params(file.path()).unwrap();
        let graph = params.build_graph().unwrap();

        assert_eq!(graph.forced_of("a"), Some("b"));
        assert!(graph.is_blocked("b", "a"));
        assert!(graph.is_blocked("c", "d"));
        assert!(graph.is_blocked("d", "c"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_params(Path::new("/nonexistent/params.json")).unwrap_err();
        assert!(matches!(err, ParamsError::Io { .. }));
        assert!(err.to_string().contains("params.json"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_params(file.path()).unwrap_err();
        assert!(matches!(err, ParamsError::Parse { .. }));
    }

    #[test]
    fn test_build_graph_surfaces_model_errors() {
        let params: PairingParams = serde_json::from_str(
            r#"{"names": ["a", "b"], "force": {"a": "z"}}"#,
        )
        .unwrap();

        let err = params.build_graph().unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownParticipant {
                name: "z".to_string(),
                declared_in: "force",
            }
        );
    }
}
