// src/extractors/report.rs

// --- Imports ---
use crate::extractors::classify::{classify, FilingMetadata};
use crate::extractors::concept::{resolve_concept, FIELD_SPECS};
use crate::extractors::context::resolve_contexts;
use crate::extractors::facts::FactIndex;
use crate::utils::error::ExtractError;
use chrono::NaiveDate;
use serde::Serialize;

/// The extracted report: filing metadata plus the financial line items,
/// each independently nullable. Constructed once per document and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportItem {
    pub symbol: String,
    pub amend: bool,
    pub doc_type: String,
    pub period_focus: String,
    pub end_date: NaiveDate,
    pub revenues: Option<f64>,
    pub op_income: Option<f64>,
    pub net_income: Option<f64>,
    pub eps_basic: Option<f64>,
    pub eps_diluted: Option<f64>,
    pub dividend: Option<f64>,
    pub assets: Option<f64>,
    pub cur_assets: Option<f64>,
    pub cur_liab: Option<f64>,
    pub equity: Option<f64>,
    pub cash: Option<f64>,
    pub cash_flow_op: Option<f64>,
    pub cash_flow_inv: Option<f64>,
    pub cash_flow_fin: Option<f64>,
}

impl ReportItem {
    fn from_metadata(meta: FilingMetadata) -> Self {
        Self {
            symbol: meta.symbol,
            amend: meta.amend,
            doc_type: meta.doc_type,
            period_focus: meta.period_focus,
            end_date: meta.end_date,
            revenues: None,
            op_income: None,
            net_income: None,
            eps_basic: None,
            eps_diluted: None,
            dividend: None,
            assets: None,
            cur_assets: None,
            cur_liab: None,
            equity: None,
            cash: None,
            cash_flow_op: None,
            cash_flow_inv: None,
            cash_flow_fin: None,
        }
    }

    fn assign(&mut self, field: &str, value: Option<f64>) {
        match field {
            "revenues" => self.revenues = value,
            "op_income" => self.op_income = value,
            "net_income" => self.net_income = value,
            "eps_basic" => self.eps_basic = value,
            "eps_diluted" => self.eps_diluted = value,
            "dividend" => self.dividend = value,
            "assets" => self.assets = value,
            "cur_assets" => self.cur_assets = value,
            "cur_liab" => self.cur_liab = value,
            "equity" => self.equity = value,
            "cash" => self.cash = value,
            "cash_flow_op" => self.cash_flow_op = value,
            "cash_flow_inv" => self.cash_flow_inv = value,
            "cash_flow_fin" => self.cash_flow_fin = value,
            other => tracing::error!("FieldSpec names unknown report field '{}'", other),
        }
    }
}

/// Extracts one report item from an already-fetched XBRL instance document.
///
/// A pure function of its inputs: no I/O, no shared mutable state, safe to
/// run on any number of threads. `Ok(None)` is the documented outcome for
/// unsupported documents (obsolete schema generations, non-10-K/Q types);
/// only a structurally unparseable document is an error. Per-field
/// resolution failures surface as null fields and never abort extraction.
pub fn extract_report(url: &str, body: &str) -> Result<Option<ReportItem>, ExtractError> {
    let index = FactIndex::build(body)?;

    let meta = match classify(&index, url) {
        Some(meta) => meta,
        None => {
            tracing::info!("Document at {} is unsupported; producing empty result", url);
            return Ok(None);
        }
    };
    tracing::debug!(
        "Classified {} as {} {} ending {}",
        meta.symbol,
        meta.doc_type,
        meta.period_focus,
        meta.end_date
    );

    let mut item = ReportItem::from_metadata(meta);
    for spec in FIELD_SPECS {
        let context_ids = resolve_contexts(&index, spec.kind, &item.period_focus, item.end_date);
        let value = resolve_concept(&index, spec, &context_ids);
        item.assign(spec.name, value);
    }

    // A filing that declares no dividend-per-share concept pays none.
    if item.dividend.is_none() {
        item.dividend = Some(0.0);
    }

    Ok(Some(item))
}
