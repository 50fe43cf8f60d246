//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum measurement shots as flashing qubits",
        style("shotflash").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  shotflash-core  Counts, device diagrams, frame rendering, GIF output");
    println!("  shotflash-cli   Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
