//! Terminal rendering of guesses and feedback.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use kg_core::{AttrValue, Field};
use kg_engine::{GameEngine, GuessRecord, Verdict};

/// Cell text for one attribute value.
pub fn format_value(field: Field, value: Option<&AttrValue>) -> String {
    match value {
        None => "-".to_string(),
        Some(AttrValue::Number(n)) if field == Field::StarGrade => format!("{n}★"),
        Some(v) => v.to_string(),
    }
}

fn mark(verdict: Verdict) -> String {
    match verdict {
        Verdict::Correct => "✔".green().to_string(),
        Verdict::Close => "≈".yellow().to_string(),
        Verdict::Incorrect => "✘".red().to_string(),
    }
}

fn cell(record: &GuessRecord, field: Field, verdict: Verdict) -> String {
    let text = format_value(field, record.guess.get(field));
    let text = match verdict {
        Verdict::Correct => text.green(),
        Verdict::Close => text.yellow(),
        Verdict::Incorrect => text.normal(),
    };
    format!("{text} {}", mark(verdict))
}

/// Feedback table for the given guesses, most recent first.
pub fn guess_table(engine: &GameEngine, records: &[GuessRecord]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Student".to_string()];
    header.extend(
        engine
            .comparison_headers()
            .into_iter()
            .map(|(_, label)| label.to_string()),
    );
    table.set_header(header);

    for record in records {
        let mut row = vec![record.guess.display_name()];
        row.extend(
            record
                .feedback
                .verdicts()
                .iter()
                .map(|(field, verdict)| cell(record, *field, *verdict)),
        );
        table.add_row(row);
    }

    table
}
