// src/extractors/classify.rs

// --- Imports ---
use crate::extractors::facts::{parse_date, FactIndex};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

// Filing metadata concepts. Unlike financial facts these do not vary by
// taxonomy version, which is what makes classification reliable -- filings
// old enough to predate the dei vocabulary are unsupported by policy.
const DOC_TYPE: &str = "dei:DocumentType";
const PERIOD_FOCUS: &str = "dei:DocumentFiscalPeriodFocus";
const PERIOD_END_DATE: &str = "dei:DocumentPeriodEndDate";
const AMENDMENT_FLAG: &str = "dei:AmendmentFlag";
const TRADING_SYMBOL: &str = "dei:TradingSymbol";
const FISCAL_YEAR_END: &str = "dei:CurrentFiscalYearEndDate";

// Ticker embedded in EDGAR instance file names, e.g. "aapl-20120929.xml".
static FILENAME_SYMBOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z0-9]*)-\d{8}\.xml$")
        .expect("Failed to compile FILENAME_SYMBOL_RE")
});

// Fiscal year end as declared by dei:CurrentFiscalYearEndDate, e.g. "--06-30".
// Only the month matters for quarter derivation.
static FISCAL_YEAR_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2})-(?:\d{2})\s*$").expect("Failed to compile FISCAL_YEAR_END_RE")
});

/// Filing metadata read from the document's taxonomy-stable dei concepts.
#[derive(Debug, Clone, PartialEq)]
pub struct FilingMetadata {
    pub symbol: String,
    pub amend: bool,
    pub doc_type: String,
    pub period_focus: String,
    pub end_date: NaiveDate,
}

/// Classifies the document, returning `None` when it is unsupported.
///
/// Unsupported is a recognized outcome, not an error: pre-2009 schema
/// generations carry no machine-readable document-type/period metadata and
/// are structurally incapable of reliable automated extraction. Metadata
/// extraction never partially defaults -- any required piece missing
/// degrades the whole document to unsupported.
pub fn classify(index: &FactIndex, source_url: &str) -> Option<FilingMetadata> {
    let raw_doc_type = match index.first_value(DOC_TYPE) {
        Some(v) => v.trim().to_uppercase(),
        None => {
            tracing::info!("No {} concept present; document predates extractable metadata", DOC_TYPE);
            return None;
        }
    };

    // Amended filings appear either as a "10-K/A" document type or via the
    // amendment flag concept. Several real amendments set neither; that
    // upstream data-quality gap is preserved, so the flag defaults to false.
    let (doc_type, amended_by_suffix) = match raw_doc_type.strip_suffix("/A") {
        Some(base) => (base.to_string(), true),
        None => (raw_doc_type, false),
    };
    if doc_type != "10-K" && doc_type != "10-Q" {
        tracing::info!("Unsupported document type '{}'", doc_type);
        return None;
    }
    let amend = amended_by_suffix || amendment_flag(index);

    let end_date = match index.first_value(PERIOD_END_DATE).and_then(parse_date) {
        Some(date) => date,
        None => {
            tracing::info!("No parseable {} concept; treating document as unsupported", PERIOD_END_DATE);
            return None;
        }
    };

    let period_focus = period_focus(index, &doc_type, end_date)?;
    let symbol = symbol(index, source_url)?;

    Some(FilingMetadata {
        symbol,
        amend,
        doc_type,
        period_focus,
        end_date,
    })
}

fn amendment_flag(index: &FactIndex) -> bool {
    index
        .first_value(AMENDMENT_FLAG)
        .map(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1")
        .unwrap_or(false)
}

/// The fiscal period the document's figures represent. Read directly when
/// declared; otherwise a 10-K is a full-year report, and a 10-Q's quarter
/// is derived from how far the period end sits from the declared fiscal
/// year end.
fn period_focus(index: &FactIndex, doc_type: &str, end_date: NaiveDate) -> Option<String> {
    if let Some(focus) = index.first_value(PERIOD_FOCUS) {
        let focus = focus.trim().to_uppercase();
        if !focus.is_empty() {
            return Some(focus);
        }
    }

    if doc_type == "10-K" {
        return Some("FY".to_string());
    }

    let fiscal_year_end = index.first_value(FISCAL_YEAR_END)?;
    let captures = FISCAL_YEAR_END_RE.captures(fiscal_year_end.trim())?;
    let fiscal_end_month: i32 = captures[1].parse().ok()?;

    // Months remaining until fiscal year end: ~9 after Q1, ~6 after Q2,
    // ~3 after Q3. A month of slack absorbs 4-4-5 calendar drift.
    let gap = (fiscal_end_month - end_date.month() as i32).rem_euclid(12);
    let focus = match gap {
        8..=10 => "Q1",
        5..=7 => "Q2",
        2..=4 => "Q3",
        _ => {
            tracing::warn!(
                "Cannot derive period focus from fiscal year end '{}' and period end {}",
                fiscal_year_end,
                end_date
            );
            return None;
        }
    };
    Some(focus.to_string())
}

/// Entity ticker: the declared trading symbol(s), falling back to the
/// ticker embedded in the source file name. Multi-class filers declare one
/// symbol per share class; those are joined into a single label.
fn symbol(index: &FactIndex, source_url: &str) -> Option<String> {
    let mut symbols: Vec<String> = Vec::new();
    for fact in index.facts_for(TRADING_SYMBOL) {
        let value = fact.value.trim().to_uppercase();
        if !value.is_empty() && !symbols.contains(&value) {
            symbols.push(value);
        }
    }
    if !symbols.is_empty() {
        return Some(symbols.join(" - "));
    }

    FILENAME_SYMBOL_RE
        .captures(source_url)
        .map(|c| c[1].to_uppercase())
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::facts::FactIndex;

    const URL: &str =
        "http://www.sec.gov/Archives/edgar/data/1090872/000110465911013291/a-20110131.xml";

    fn index_with_dei(dei_facts: &str) -> FactIndex {
        let body = format!(
            r#"<?xml version="1.0"?>
<xbrli:xbrl xmlns:xbrli="http://www.xbrl.org/2003/instance"
            xmlns:dei="http://xbrl.sec.gov/dei/2011-01-31">
  <xbrli:context id="D">
    <xbrli:entity><xbrli:identifier scheme="cik">1</xbrli:identifier></xbrli:entity>
    <xbrli:period><xbrli:startDate>2010-11-01</xbrli:startDate><xbrli:endDate>2011-01-31</xbrli:endDate></xbrli:period>
  </xbrli:context>
  {}
</xbrli:xbrl>"#,
            dei_facts
        );
        FactIndex::build(&body).unwrap()
    }

    #[test]
    fn test_full_metadata() {
        let index = index_with_dei(
            r#"<dei:DocumentType contextRef="D">10-Q</dei:DocumentType>
               <dei:DocumentFiscalPeriodFocus contextRef="D">Q1</dei:DocumentFiscalPeriodFocus>
               <dei:DocumentPeriodEndDate contextRef="D">2011-01-31</dei:DocumentPeriodEndDate>
               <dei:AmendmentFlag contextRef="D">false</dei:AmendmentFlag>
               <dei:TradingSymbol contextRef="D">A</dei:TradingSymbol>"#,
        );
        let meta = classify(&index, URL).unwrap();
        assert_eq!(
            meta,
            FilingMetadata {
                symbol: "A".to_string(),
                amend: false,
                doc_type: "10-Q".to_string(),
                period_focus: "Q1".to_string(),
                end_date: NaiveDate::from_ymd_opt(2011, 1, 31).unwrap(),
            }
        );
    }

    #[test]
    fn test_missing_document_type_is_unsupported() {
        let index = index_with_dei(
            r#"<dei:DocumentPeriodEndDate contextRef="D">2006-09-14</dei:DocumentPeriodEndDate>"#,
        );
        assert!(classify(&index, URL).is_none());
    }

    #[test]
    fn test_non_annual_or_quarterly_type_is_unsupported() {
        let index = index_with_dei(
            r#"<dei:DocumentType contextRef="D">8-K</dei:DocumentType>
               <dei:DocumentPeriodEndDate contextRef="D">2011-01-31</dei:DocumentPeriodEndDate>"#,
        );
        assert!(classify(&index, URL).is_none());
    }

    #[test]
    fn test_amendment_flag_defaults_false() {
        let index = index_with_dei(
            r#"<dei:DocumentType contextRef="D">10-Q</dei:DocumentType>
               <dei:DocumentFiscalPeriodFocus contextRef="D">Q1</dei:DocumentFiscalPeriodFocus>
               <dei:DocumentPeriodEndDate contextRef="D">2011-01-31</dei:DocumentPeriodEndDate>"#,
        );
        assert!(!classify(&index, URL).unwrap().amend);
    }

    #[test]
    fn test_amended_doc_type_suffix_sets_flag_and_base_type() {
        let index = index_with_dei(
            r#"<dei:DocumentType contextRef="D">10-K/A</dei:DocumentType>
               <dei:DocumentFiscalPeriodFocus contextRef="D">FY</dei:DocumentFiscalPeriodFocus>
               <dei:DocumentPeriodEndDate contextRef="D">2011-12-31</dei:DocumentPeriodEndDate>"#,
        );
        let meta = classify(&index, URL).unwrap();
        assert!(meta.amend);
        assert_eq!(meta.doc_type, "10-K");
    }

    #[test]
    fn test_amendment_flag_concept_sets_flag() {
        let index = index_with_dei(
            r#"<dei:DocumentType contextRef="D">10-K</dei:DocumentType>
               <dei:DocumentFiscalPeriodFocus contextRef="D">FY</dei:DocumentFiscalPeriodFocus>
               <dei:DocumentPeriodEndDate contextRef="D">2012-12-31</dei:DocumentPeriodEndDate>
               <dei:AmendmentFlag contextRef="D">true</dei:AmendmentFlag>"#,
        );
        assert!(classify(&index, URL).unwrap().amend);
    }

    #[test]
    fn test_period_focus_defaults_to_fy_for_annual_report() {
        let index = index_with_dei(
            r#"<dei:DocumentType contextRef="D">10-K</dei:DocumentType>
               <dei:DocumentPeriodEndDate contextRef="D">2012-09-29</dei:DocumentPeriodEndDate>"#,
        );
        assert_eq!(classify(&index, URL).unwrap().period_focus, "FY");
    }

    #[test]
    fn test_quarter_derived_from_fiscal_year_end() {
        // Fiscal year ends Oct 31; a quarter ending Jan 31 is Q1.
        let index = index_with_dei(
            r#"<dei:DocumentType contextRef="D">10-Q</dei:DocumentType>
               <dei:DocumentPeriodEndDate contextRef="D">2011-01-31</dei:DocumentPeriodEndDate>
               <dei:CurrentFiscalYearEndDate contextRef="D">--10-31</dei:CurrentFiscalYearEndDate>"#,
        );
        assert_eq!(classify(&index, URL).unwrap().period_focus, "Q1");
    }

    #[test]
    fn test_quarterly_without_any_focus_hint_is_unsupported() {
        let index = index_with_dei(
            r#"<dei:DocumentType contextRef="D">10-Q</dei:DocumentType>
               <dei:DocumentPeriodEndDate contextRef="D">2011-01-31</dei:DocumentPeriodEndDate>"#,
        );
        assert!(classify(&index, URL).is_none());
    }

    #[test]
    fn test_symbol_from_url_when_concept_absent() {
        let index = index_with_dei(
            r#"<dei:DocumentType contextRef="D">10-Q</dei:DocumentType>
               <dei:DocumentFiscalPeriodFocus contextRef="D">Q1</dei:DocumentFiscalPeriodFocus>
               <dei:DocumentPeriodEndDate contextRef="D">2011-01-31</dei:DocumentPeriodEndDate>"#,
        );
        let meta = classify(
            &index,
            "http://www.sec.gov/Archives/edgar/data/320193/000119312510162840/aapl-20100626.xml",
        )
        .unwrap();
        assert_eq!(meta.symbol, "AAPL");
    }

    #[test]
    fn test_multiple_trading_symbols_joined() {
        let index = index_with_dei(
            r#"<dei:DocumentType contextRef="D">10-Q</dei:DocumentType>
               <dei:DocumentFiscalPeriodFocus contextRef="D">Q3</dei:DocumentFiscalPeriodFocus>
               <dei:DocumentPeriodEndDate contextRef="D">2013-09-30</dei:DocumentPeriodEndDate>
               <dei:TradingSymbol contextRef="D">vel</dei:TradingSymbol>
               <dei:TradingSymbol contextRef="D">pe</dei:TradingSymbol>"#,
        );
        assert_eq!(classify(&index, URL).unwrap().symbol, "VEL - PE");
    }
}
