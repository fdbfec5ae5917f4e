//! `ledgercalc doctor` — Diagnose configuration problems.

use ledgercalc_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 ledgercalc Doctor");
    println!("===================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  ⚠️  No config file — defaults apply (run `ledgercalc onboard`)");
        issues += 1;
    }

    match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            println!("  ✅ Module {}", config.module_id());

            if config.account.address.is_some() {
                println!("  ✅ Account configured");
            } else {
                println!("  ⚠️  No account — operations will be skipped (set LEDGERCALC_ACCOUNT)");
                issues += 1;
            }

            if config.dispatch.submitter == "dry_run" {
                println!("  ⚠️  Dry-run submitter — nothing reaches the chain");
                issues += 1;
            } else {
                println!("  ✅ Relay submitter configured");
            }

            if config.dispatch.submitter == "relay" && config.dispatch.timeout_secs == 0 {
                println!("  ⚠️  Relay timeout disabled — a stalled relay request never resolves");
                issues += 1;
            }
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
