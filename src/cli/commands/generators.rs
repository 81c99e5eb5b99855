//! List generators command.

use anyhow::Result;
use signal_markers::GeneratorRegistry;

pub async fn run() -> Result<()> {
    let registry = GeneratorRegistry::new();

    println!("Available Generators");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for info in registry.list() {
        println!("  {} ({})", info.key, info.name);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        println!();
        let config = serde_json::to_string_pretty(&info.default_config)?;
        for line in config.lines() {
            println!("    {}", line);
        }
        println!();
    }

    println!("Use --generator <name> with `analyze`, or set analysis.generator in the config.");
    println!();
    println!("Generator names: {}", registry.names().join(", "));

    Ok(())
}
