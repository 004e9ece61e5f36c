use std::path::Path;

use colored::Colorize;

use kg_core::Region;
use kg_roster::{DirSource, RosterStore};

pub fn run(dir: &Path, unified: Option<String>) -> Result<(), String> {
    let source = DirSource::new(dir);
    let layout = super::layout(unified);
    let mut failures = 0;

    // A unified file is fetched once and refiltered per server.
    let mut store = RosterStore::new(layout.clone(), Region::Jp);
    for region in Region::ALL {
        if layout.is_per_region() {
            store = RosterStore::new(layout.clone(), region);
            store.load(&source);
        } else if region == Region::Jp {
            store.load(&source);
        } else {
            store.set_region(region, &source);
        }

        let label = format!("{} ({})", region.code().to_uppercase(), layout.path_for(region));
        match store.error() {
            Some(message) => {
                failures += 1;
                println!("  {} {label}: {message}", "✘".red());
            }
            None => println!(
                "  {} {label}: {} students, {} released",
                "✔".green(),
                store.roster().len(),
                store.available().len()
            ),
        }

        if !layout.is_per_region() && store.error().is_some() {
            break;
        }
    }

    if failures > 0 {
        return Err("data check failed".to_string());
    }
    println!();
    println!("  All roster data is valid.");
    Ok(())
}
