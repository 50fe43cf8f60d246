//! Select command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use shotflash_core::{CircuitDescriptor, get_sample, lookup};

use super::common::{load_backend, load_counts};

/// Execute the select command.
pub fn execute(backend: &Path, qubits: Option<usize>, counts: Option<&Path>) -> Result<()> {
    let backend = load_backend(backend)?;

    let num_qubits = match (qubits, counts) {
        (Some(n), _) => n,
        (None, Some(path)) => load_counts(path)?.width()?,
        (None, None) => anyhow::bail!("Either --qubits or --counts is required"),
    };

    let name = get_sample(&backend, &CircuitDescriptor { num_qubits })?;
    let device = lookup(name)?;

    println!(
        "{} {} ({} qubits, circuit uses {})",
        style("✓").green().bold(),
        style(name).cyan().bold(),
        device.num_qubits,
        num_qubits
    );
    Ok(())
}
