//! Automatic device selection.
//!
//! Real hardware backends announce which diagram they correspond to; for
//! simulators (or unknown hardware) the smallest device that fits the
//! circuit is used.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::counts::Counts;
use crate::device::{self, DEVICES};
use crate::error::{AnimError, AnimResult};

/// What the selector needs to know about a backend.
pub trait BackendInfo {
    /// Whether the backend is a simulator.
    fn is_simulator(&self) -> bool;

    /// Device diagram name declared by the backend, if any.
    fn sample_name(&self) -> Option<&str>;
}

/// What the selector needs to know about a circuit.
pub trait CircuitInfo {
    /// Number of qubits the circuit uses, or why it cannot be told.
    fn num_qubits(&self) -> AnimResult<usize>;
}

/// Backend configuration as found in a backend descriptor file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDescriptor {
    /// Whether the backend is a simulator.
    #[serde(default)]
    pub simulator: bool,

    /// Device diagram name.
    #[serde(default)]
    pub sample_name: Option<String>,
}

impl BackendDescriptor {
    /// Descriptor for a simulator.
    pub fn simulator() -> Self {
        Self {
            simulator: true,
            sample_name: None,
        }
    }

    /// Descriptor for hardware that declares a diagram name.
    pub fn hardware(sample_name: impl Into<String>) -> Self {
        Self {
            simulator: false,
            sample_name: Some(sample_name.into()),
        }
    }

    /// Read a descriptor from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AnimResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&source)?)
    }
}

impl BackendInfo for BackendDescriptor {
    fn is_simulator(&self) -> bool {
        self.simulator
    }

    fn sample_name(&self) -> Option<&str> {
        self.sample_name.as_deref()
    }
}

/// A circuit known only by its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitDescriptor {
    /// Number of qubits.
    pub num_qubits: usize,
}

impl CircuitInfo for CircuitDescriptor {
    fn num_qubits(&self) -> AnimResult<usize> {
        Ok(self.num_qubits)
    }
}

/// The width of the bitstrings; malformed or mixed-width keys are an error.
impl CircuitInfo for Counts {
    fn num_qubits(&self) -> AnimResult<usize> {
        self.validate()
    }
}

/// Pick a device diagram for `circuit` running on `backend`.
///
/// Hardware that declares a supported diagram name gets that diagram,
/// whatever the circuit size. Otherwise the first device in table order with
/// at least `circuit.num_qubits()` qubits is chosen. A circuit whose width
/// cannot be determined is an error either way.
pub fn get_sample(
    backend: &impl BackendInfo,
    circuit: &impl CircuitInfo,
) -> AnimResult<&'static str> {
    let needed = circuit.num_qubits()?;
    if !backend.is_simulator() {
        if let Some(profile) = backend
            .sample_name()
            .and_then(|name| device::lookup(name).ok())
        {
            debug!(device = profile.name, "using device declared by backend");
            return Ok(profile.name);
        }
    }

    let chosen = DEVICES.iter().find(|d| d.num_qubits >= needed);
    match chosen {
        Some(profile) => {
            debug!(device = profile.name, qubits = needed, "selected device by size");
            Ok(profile.name)
        }
        None => Err(AnimError::UnsupportedQubitCount {
            required: needed,
            capacity: DEVICES.iter().map(|d| d.num_qubits).max().unwrap_or(0),
        }),
    }
}
