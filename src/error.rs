//! Error types for the hub's stores and storage.

use thiserror::Error;

use crate::catalog::Course;

#[derive(Error, Debug)]
pub enum HubError {
    /// Reading or writing the data directory failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings could not be loaded or stored
    #[error("Configuration error: {0}")]
    Config(#[from] confy::ConfyError),

    /// A resource edit or removal pointed past the end of the list
    #[error("Resource index {index} out of range for {course} ({len} resources)")]
    ResourceIndex {
        course: Course,
        index: usize,
        len: usize,
    },

    #[error("Could not determine a data directory; pass --data-dir")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_index_message_names_the_course() {
        let err = HubError::ResourceIndex {
            course: Course::BigData,
            index: 7,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "Resource index 7 out of range for Big Data Processing (3 resources)"
        );
    }

    #[test]
    fn json_errors_convert() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: HubError = parse.unwrap_err().into();
        assert!(matches!(err, HubError::Json(_)));
    }
}
