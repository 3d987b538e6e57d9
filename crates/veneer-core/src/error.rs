//! Error types for the editor shim, native embeddings, and configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::platform::{Platform, WindowApi};

/// Errors returned by [`EditorShim`](crate::EditorShim) lifecycle operations.
///
/// The host-facing adapter treats every variant as "feature unavailable";
/// none of them are fatal to the plugin.
#[derive(Debug, Error)]
pub enum ShimError {
    /// Floating editor windows are never supported.
    #[error("floating editor windows are not supported")]
    FloatingUnsupported,

    /// `create` was called while an editor already exists.
    #[error("an editor is already embedded in this shim")]
    AlreadyCreated,

    /// The editor provider declined to construct an editor.
    #[error("the editor provider did not supply an editor")]
    EditorUnavailable,

    /// The operation needs a live containment chain.
    #[error("no editor has been created")]
    NoEditor,

    /// The current platform cannot rescale the editor at runtime.
    #[error("runtime rescaling is not supported on this platform")]
    ScaleUnsupported,

    /// The host requested a scale factor that is not finite and positive.
    #[error("invalid scale factor: {0}")]
    InvalidScale(f64),

    /// Attaching to the host window failed.
    #[error("failed to attach editor: {0}")]
    Embed(#[from] EmbedError),
}

/// Errors raised by a [`NativeEmbedding`](crate::platform::NativeEmbedding).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    /// No native embedding is configured for this platform.
    #[error("no native window embedding available on {platform}")]
    Unsupported {
        /// Platform the embedding was requested on.
        platform: Platform,
    },

    /// The host handed over a window of a different windowing API.
    #[error("expected a {expected} parent window, got {found}")]
    ApiMismatch {
        /// API the embedding drives.
        expected: WindowApi,
        /// API of the window the host supplied.
        found: WindowApi,
    },
}

/// Errors that can occur while loading a [`ShimConfig`](crate::ShimConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field holds a value outside its accepted range
    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Description of why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }
}
