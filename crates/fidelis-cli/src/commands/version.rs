//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum-kernel fidelity classification",
        style("Fidelis").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  fidelis-ir      Circuit intermediate representation");
    println!("  fidelis-sim     Statevector simulator");
    println!("  fidelis-embed   Variational feature maps");
    println!("  fidelis-kernel  Overlap estimators and fidelity classifier");
    println!("  fidelis-cli     Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
