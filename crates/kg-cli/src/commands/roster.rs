use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use kg_core::{Field, Region};
use kg_roster::{DirSource, RosterStore};

use crate::render::format_value;

pub fn run(dir: &Path, region: &str, unified: Option<String>) -> Result<(), String> {
    let region = Region::parse(region).map_err(|e| e.to_string())?;
    let mut store = RosterStore::new(super::layout(unified), region);
    store.load(&DirSource::new(dir));

    if let Some(message) = store.error() {
        return Err(message.to_string());
    }

    let available = store.available();
    if available.is_empty() {
        println!("  No students are released on {}.", region.label());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "School", "Star", "Role"]);

    for c in available {
        table.add_row(vec![
            c.id.to_string(),
            c.display_name(),
            format_value(Field::School, c.get(Field::School)),
            format_value(Field::StarGrade, c.get(Field::StarGrade)),
            format_value(Field::TacticRole, c.get(Field::TacticRole)),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} students available on {} ({} in roster)",
        available.len(),
        region.code().to_uppercase(),
        store.roster().len()
    );

    Ok(())
}
