//! Error types for the KQL field engine crate.

use std::fmt;

pub type Result<T> = std::result::Result<T, KqlError>;

#[derive(Debug, Clone, PartialEq)]
pub enum KqlError {
    /// The configured detection rules directory does not exist. Fatal: the
    /// pipeline aborts before producing any output.
    SourceDirNotFound(String),
    /// A rule document parsed but carries no usable `query` text.
    MissingQuery(String),
    /// A rule document parsed but carries no `name`.
    MissingName(String),
    /// The domain keyword table could not be compiled into an automaton.
    InvalidKeywordTable(String),
    /// A validator pattern failed to compile.
    InvalidPattern(String),
    IoError(String),
    YamlError(String),
    JsonError(String),
    CsvError(String),
}

impl fmt::Display for KqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KqlError::SourceDirNotFound(path) => {
                write!(f, "Rules directory not found: {path}")
            }
            KqlError::MissingQuery(file) => write!(f, "No query found in rule: {file}"),
            KqlError::MissingName(file) => write!(f, "No name found in rule: {file}"),
            KqlError::InvalidKeywordTable(msg) => {
                write!(f, "Invalid domain keyword table: {msg}")
            }
            KqlError::InvalidPattern(pattern) => write!(f, "Invalid pattern: {pattern}"),
            KqlError::IoError(msg) => write!(f, "IO error: {msg}"),
            KqlError::YamlError(msg) => write!(f, "YAML parsing error: {msg}"),
            KqlError::JsonError(msg) => write!(f, "JSON serialization error: {msg}"),
            KqlError::CsvError(msg) => write!(f, "CSV serialization error: {msg}"),
        }
    }
}

impl std::error::Error for KqlError {}

impl From<std::io::Error> for KqlError {
    fn from(err: std::io::Error) -> Self {
        KqlError::IoError(err.to_string())
    }
}

impl From<serde_yaml::Error> for KqlError {
    fn from(err: serde_yaml::Error) -> Self {
        KqlError::YamlError(err.to_string())
    }
}

impl From<serde_json::Error> for KqlError {
    fn from(err: serde_json::Error) -> Self {
        KqlError::JsonError(err.to_string())
    }
}

impl From<csv::Error> for KqlError {
    fn from(err: csv::Error) -> Self {
        KqlError::CsvError(err.to_string())
    }
}
