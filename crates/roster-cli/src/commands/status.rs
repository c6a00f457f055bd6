//! Status command handler

use anyhow::Result;

use roster_core::{Config, KeyValueStore};

use super::FileRoster;
use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(roster: &FileRoster, config: &Config, output: &Output) -> Result<()> {
    let store = roster.storage();
    let location = store
        .location()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(memory)".to_string());
    let backup_slot = store.backup_slot();
    let has_backup = store.backend().location(&backup_slot).is_some_and(|p| p.exists());

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "records": roster.len(),
                    "slot": store.slot(),
                    "location": location,
                    "data_dir": config.data_dir,
                    "on_corrupt": store.policy().to_string(),
                    "corrupt_backup": has_backup,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", roster.len());
        }
        OutputFormat::Human => {
            println!("Roster Status");
            println!("=============");
            println!();
            println!("Storage:");
            println!("  Slot:       {}", store.slot());
            println!("  Location:   {}", location);
            println!("  On corrupt: {}", store.policy());
            if has_backup {
                println!("  Backup:     {} (a corrupt roster was moved aside)", backup_slot);
            }
            println!();
            println!("Contents:");
            println!("  Records: {}", roster.len());
        }
    }

    Ok(())
}
