// src/extractors/context.rs

// --- Imports ---
use crate::extractors::facts::{FactIndex, Period};
use chrono::NaiveDate;

/// How a field's value relates to the reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodKind {
    /// Balance-sheet items: a snapshot at the document period end date.
    Instant,
    /// Income-statement items: one quarter for Q1-Q4 focus, the full year
    /// for FY.
    Duration,
    /// Cash-flow items: filers report these cumulatively from the fiscal
    /// year start, so a Q3 filing carries the nine-month figure.
    Cumulative,
}

// Fiscal quarters run 13 or 14 weeks and 52/53-week calendars drift the
// year end, so durations are matched within a tolerance of the nominal
// length rather than exactly.
const NOMINAL_QUARTER_DAYS: i64 = 91;
const NOMINAL_YEAR_DAYS: i64 = 365;
const DURATION_TOLERANCE_DAYS: i64 = 20;

/// Ranks the contexts a top-level field may bind to, most preferred first.
/// An empty list is a per-field outcome that surfaces as a null value,
/// never an error.
///
/// All qualifying contexts are returned rather than a single winner:
/// filers routinely declare duplicate equivalent contexts (same instant or
/// same span under different ids) and tag a fact against any one of them,
/// so the concept lookup must be free to take the first declaration that
/// actually carries a fact.
///
/// Dimensionally qualified contexts are never eligible: picking a segment
/// or geography breakdown would substitute a sub-total for the
/// consolidated figure.
pub fn resolve_contexts<'a>(
    index: &'a FactIndex,
    kind: PeriodKind,
    period_focus: &str,
    end_date: NaiveDate,
) -> Vec<&'a str> {
    match kind {
        PeriodKind::Instant => resolve_instants(index, end_date),
        PeriodKind::Duration | PeriodKind::Cumulative => {
            match expected_days(kind, period_focus) {
                Some(expected) => resolve_durations(index, end_date, expected),
                None => Vec::new(),
            }
        }
    }
}

fn resolve_instants(index: &FactIndex, end_date: NaiveDate) -> Vec<&str> {
    let mut candidates: Vec<&str> = index
        .contexts()
        .filter(|c| c.is_consolidated() && c.period == Period::Instant(end_date))
        .map(|c| c.id.as_str())
        .collect();

    // Duplicate declarations of the same instant are interchangeable; sort
    // so the ranking does not depend on map iteration order.
    candidates.sort_unstable();
    candidates
}

fn resolve_durations(index: &FactIndex, end_date: NaiveDate, expected: i64) -> Vec<&str> {
    let mut candidates: Vec<(i64, &str)> = index
        .contexts()
        .filter(|c| c.is_consolidated())
        .filter_map(|c| match c.period {
            Period::Duration { start, end } if end == end_date => {
                Some(((end - start).num_days() + 1, c.id.as_str()))
            }
            _ => None,
        })
        .filter(|(days, _)| (days - expected).abs() <= DURATION_TOLERANCE_DAYS)
        .collect();

    // A filer may declare several durations ending on the same date (e.g.
    // quarter and year-to-date). Prefer the length closest to the focus,
    // then the shorter span, then the id for determinism.
    candidates
        .sort_unstable_by_key(|(days, id)| ((days - expected).abs(), *days, id.to_string()));
    candidates.into_iter().map(|(_, id)| id).collect()
}

/// Nominal duration in days implied by the fiscal period focus, or `None`
/// for a focus the resolver does not understand.
fn expected_days(kind: PeriodKind, period_focus: &str) -> Option<i64> {
    let quarters = match period_focus {
        "Q1" => 1,
        "Q2" => 2,
        "Q3" => 3,
        "Q4" | "FY" => 4,
        _ => return None,
    };
    match kind {
        PeriodKind::Instant => None,
        // Income-statement figures cover the single reported quarter.
        PeriodKind::Duration if quarters < 4 => Some(NOMINAL_QUARTER_DAYS),
        PeriodKind::Duration => Some(NOMINAL_YEAR_DAYS),
        // Cash flows accumulate from the fiscal year start.
        PeriodKind::Cumulative if quarters < 4 => Some(NOMINAL_QUARTER_DAYS * quarters),
        PeriodKind::Cumulative => Some(NOMINAL_YEAR_DAYS),
    }
}
