//! Parameter-file shape and parse errors.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or parsing a parameter file.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a valid parameter document.
    #[error("invalid parameter file {path}: {source}")]
    Parse {
        /// The offending path.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// A `block` value: one recipient or a list of them.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NameOrList {
    /// A single blocked recipient.
    One(String),
    /// Several blocked recipients.
    Many(Vec<String>),
}

impl NameOrList {
    /// Normalizes to a list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            NameOrList::One(name) => vec![name],
            NameOrList::Many(names) => names,
        }
    }
}

/// The parameter document.
///
/// ```json
/// {
///   "names": ["ann", "bo", "celeste", "dmitri"],
///   "force": { "ann": "bo" },
///   "block": { "bo": ["ann", "celeste"], "celeste": "dmitri" },
///   "twoway_force": [["celeste", "dmitri"]],
///   "twoway_block": [["ann", "dmitri"]]
/// }
/// ```
///
/// All four constraint fields may be absent or empty. Unknown fields are
/// rejected rather than ignored: a misspelled constraint field would
/// otherwise silently run an unconstrained draw.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PairingParams {
    /// Every participant in the draw.
    pub names: Vec<String>,

    /// Giver → recipient pairs that must appear in the result.
    #[serde(default)]
    pub force: BTreeMap<String, String>,

    /// Giver → recipients that must not appear in the result.
    #[serde(default)]
    pub block: BTreeMap<String, NameOrList>,

    /// Pairs forced to each other, both directions.
    #[serde(default)]
    pub twoway_force: Vec<(String, String)>,

    /// Pairs kept apart, both directions.
    #[serde(default)]
    pub twoway_block: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document() {
        let doc = r#"{
            "names": ["a", "b", "c", "d"],
            "force": {"a": "b"},
            "block": {"b": ["a", "c"], "c": "d"},
            "twoway_force": [["c", "d"]],
            "twoway_block": [["a", "d"]]
        }"#;

        let params: PairingParams = serde_json::from_str(doc).unwrap();
        assert_eq!(params.names.len(), 4);
        assert_eq!(params.force["a"], "b");
        assert_eq!(
            params.block["b"],
            NameOrList::Many(vec!["a".to_string(), "c".to_string()])
        );
        assert_eq!(params.block["c"], NameOrList::One("d".to_string()));
        assert_eq!(params.twoway_force, vec![("c".to_string(), "d".to_string())]);
        assert_eq!(params.twoway_block, vec![("a".to_string(), "d".to_string())]);
    }

    #[test]
    fn test_constraint_fields_default_to_empty() {
        let params: PairingParams = serde_json::from_str(r#"{"names": ["a", "b"]}"#).unwrap();
        assert!(params.force.is_empty());
        assert!(params.block.is_empty());
        assert!(params.twoway_force.is_empty());
        assert!(params.twoway_block.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let doc = r#"{"names": ["a", "b"], "twoway_forse": [["a", "b"]]}"#;
        assert!(serde_json::from_str::<PairingParams>(doc).is_err());
    }

    #[test]
    fn test_missing_names_rejected() {
        assert!(serde_json::from_str::<PairingParams>(r#"{"force": {}}"#).is_err());
    }

    #[test]
    fn test_name_or_list_normalization() {
        assert_eq!(
            NameOrList::One("a".to_string()).into_vec(),
            vec!["a".to_string()]
        );
        assert_eq!(
            NameOrList::Many(vec!["a".to_string(), "b".to_string()]).into_vec(),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
