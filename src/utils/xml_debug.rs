// src/utils/xml_debug.rs
//
// Debug helper: dumps the parsed fact index as a tab-separated table so a
// failed extraction can be compared against the raw document by eye.

use crate::extractors::facts::{FactIndex, Period};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Writes contexts and facts from the index to `path`, one row per line.
pub fn dump_fact_table(index: &FactIndex, path: &Path) -> std::io::Result<()> {
    let mut out = String::new();

    out.push_str("# contexts\nid\tperiod\tdimensions\n");
    let mut contexts: Vec<_> = index.contexts().collect();
    contexts.sort_by(|a, b| a.id.cmp(&b.id));
    for context in contexts {
        let period = match context.period {
            Period::Instant(date) => format!("instant {}", date),
            Period::Duration { start, end } => format!("{} .. {}", start, end),
        };
        let _ = writeln!(out, "{}\t{}\t{}", context.id, period, context.dimensions);
    }

    out.push_str("\n# facts\nconcept\tcontext\tvalue\tunit\n");
    let mut rows: Vec<String> = index
        .all_facts()
        .map(|fact| {
            format!(
                "{}\t{}\t{}\t{}",
                fact.concept,
                fact.context_ref,
                fact.value,
                fact.unit_ref.as_deref().unwrap_or("-")
            )
        })
        .collect();
    rows.sort();
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }

    fs::write(path, out)
}
