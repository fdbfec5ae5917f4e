//! `ledgercalc status` — Show the effective configuration.

use ledgercalc_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("🧮 ledgercalc Status");
    println!("===================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Network:      {}", config.network.name);
    println!("  Module:       {}", config.module_id());
    println!(
        "  Account:      {}",
        config.account.address.as_deref().unwrap_or("(none)")
    );
    println!("  Submitter:    {}", config.dispatch.submitter);
    if let Some(url) = &config.dispatch.relay_url {
        println!("  Relay:        {url}");
    }
    println!(
        "  Timeout:      {}",
        match config.dispatch.timeout_secs {
            0 => "disabled".to_string(),
            secs => format!("{secs}s"),
        }
    );
    println!("  Naming:       {:?}", config.dispatch.function_naming);
    println!(
        "  Operands:     {}",
        if config.parser.strict_operands { "strict" } else { "pass-through" }
    );
    println!("  Log file:     {}", config.log_path().display());

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `ledgercalc onboard` first");
    }

    Ok(())
}
