//! Error types for the shotflash core crate.

use thiserror::Error;

/// Errors that can occur while preparing or rendering a shot animation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnimError {
    /// Shots are wider than the selected device can display.
    #[error(
        "These counts require at least a {required}-qubit quantum processor, but the device only has {capacity}"
    )]
    UnsupportedQubitCount {
        /// Number of bits per shot.
        required: usize,
        /// Qubit capacity of the selected device or layout.
        capacity: usize,
    },

    /// Device name is not in the device table.
    #[error("Unknown device '{name}', please use one of: {}", supported.join(", "))]
    UnknownDevice {
        /// The name that was requested.
        name: String,
        /// Names of all supported devices, in table order.
        supported: Vec<&'static str>,
    },

    /// Render mode other than `gate` or `xray`.
    #[error("Animation type '{0}' not supported, use 'gate' or 'xray'")]
    UnsupportedRenderMode(String),

    /// Gate mode was requested without naming a device.
    #[error(
        "Animation type 'gate' must have a device name, use auto-select or provide one, e.g. 'sparrow'"
    )]
    MissingDeviceForGateMode,

    /// A count was negative or not an integer.
    #[error("Invalid count for '{bitstring}': {count}")]
    InvalidCount {
        /// The offending key.
        bitstring: String,
        /// The rejected value.
        count: i64,
    },

    /// A key contained something other than '0', '1' or whitespace.
    #[error("Invalid bitstring '{0}': expected only '0' and '1'")]
    InvalidBitstring(String),

    /// Keys of different widths in one counts map.
    #[error("Bitstrings have inconsistent widths: '{first}' has {expected} bits but '{other}' has {found}")]
    InconsistentWidth {
        /// First key seen.
        first: String,
        /// Its width.
        expected: usize,
        /// The key that disagreed.
        other: String,
        /// Its width.
        found: usize,
    },

    /// The counts add up to more shots than a `u64` can hold.
    #[error("Counts add up to more than {} shots", u64::MAX)]
    ShotCountOverflow,

    /// Counts contain no shots at all.
    #[error("Counts contain no shots")]
    EmptyCounts,

    /// Marker color could not be parsed.
    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The animation could not be encoded or written.
    #[error("Could not create/save animation: {0}")]
    Encoding(String),

    /// Image decoding/encoding error.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type for shotflash operations.
pub type AnimResult<T> = Result<T, AnimError>;
