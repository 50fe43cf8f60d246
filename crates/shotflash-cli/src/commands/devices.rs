//! Devices command implementation.

use console::style;

use shotflash_core::{Layout, fig_size, supported_devices};

/// Execute the devices command.
pub fn execute() {
    println!("{} Supported devices:\n", style("shotflash").cyan().bold());
    println!(
        "  {:<12} {:>6}  {:>9}  {:>9}  {}",
        style("name").bold(),
        style("qubits").bold(),
        style("gate").bold(),
        style("x-ray").bold(),
        style("figure (in)").bold()
    );

    for device in supported_devices() {
        let xray = match device.canvas_size(Layout::Xray) {
            Ok(size) => size.to_string(),
            Err(_) => "-".to_string(),
        };
        let figure = match fig_size(Layout::Gate, device.name) {
            Ok((w, h)) => format!("{w:.1} x {h:.1}"),
            Err(_) => "-".to_string(),
        };
        println!(
            "  {:<12} {:>6}  {:>9}  {:>9}  {}",
            style(device.name).green(),
            device.num_qubits,
            device.gate_size.to_string(),
            xray,
            style(figure).dim()
        );
    }
}
