// src/extractors/facts.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use chrono::NaiveDate;
use std::collections::HashMap;

/// One reported value, tagged with a concept name and a context reference.
/// Immutable once parsed from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    /// Canonically prefixed concept name, e.g. "us-gaap:Revenues".
    pub concept: String,
    pub context_ref: String,
    /// Raw text value, passed through at the filer's reported precision.
    pub value: String,
    /// Inline-XBRL `sign="-"` attribute: the value is negated relative to
    /// the standard orientation for the concept.
    pub negated: bool,
    pub decimals: Option<String>,
    pub unit_ref: Option<String>,
}

/// The reporting period a context declares: a single balance-sheet date or
/// a start/end span for flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Instant(NaiveDate),
    Duration { start: NaiveDate, end: NaiveDate },
}

/// A declared reporting context: period plus dimensional qualifiers
/// (segment/scenario members).
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub id: String,
    pub period: Period,
    /// Number of explicit/typed dimension members attached to the context.
    pub dimensions: usize,
}

impl Context {
    /// A context with zero qualifiers is the consolidated, entity-level
    /// view — the only kind eligible for top-level report values.
    pub fn is_consolidated(&self) -> bool {
        self.dimensions == 0
    }
}

/// Queryable view of one XBRL instance document: declared contexts by id,
/// and reported facts grouped by concept name (a concept may be reported
/// several times across different contexts). Built once per document,
/// read-only thereafter.
#[derive(Debug)]
pub struct FactIndex {
    contexts: HashMap<String, Context>,
    facts: HashMap<String, Vec<Fact>>,
}

impl FactIndex {
    /// Parses an XBRL instance document into a fact index.
    ///
    /// Fails with `MalformedDocument` if the body is not well-formed XML or
    /// declares no contexts at all. A fact referencing an undeclared context
    /// is dropped with a diagnostic rather than failing the whole parse.
    pub fn build(body: &str) -> Result<Self, ExtractError> {
        let doc = roxmltree::Document::parse(body)
            .map_err(|e| ExtractError::MalformedDocument(e.to_string()))?;

        let mut contexts = HashMap::new();
        for node in doc.root_element().descendants().filter(|n| n.is_element()) {
            if node.tag_name().name() != "context" {
                continue;
            }
            match parse_context(&node) {
                Some(context) => {
                    contexts.insert(context.id.clone(), context);
                }
                None => {
                    tracing::warn!(
                        "Skipping context declaration without a usable id/period: {:?}",
                        node.attribute("id")
                    );
                }
            }
        }

        if contexts.is_empty() {
            return Err(ExtractError::MalformedDocument(
                "document declares no reporting contexts".to_string(),
            ));
        }

        let mut facts: HashMap<String, Vec<Fact>> = HashMap::new();
        let mut dropped = 0usize;
        for node in doc.root_element().descendants().filter(|n| n.is_element()) {
            // Facts are the namespaced elements that carry a contextRef;
            // structural elements (context, unit, schemaRef) do not.
            let context_ref = match node.attribute("contextRef") {
                Some(r) => r,
                None => continue,
            };
            let namespace = match node.tag_name().namespace() {
                Some(ns) => ns,
                None => continue,
            };

            if !contexts.contains_key(context_ref) {
                tracing::warn!(
                    "Dropping fact <{}> referencing undeclared context '{}'",
                    node.tag_name().name(),
                    context_ref
                );
                dropped += 1;
                continue;
            }

            let concept = qualified_concept(&node, namespace);
            facts.entry(concept.clone()).or_default().push(Fact {
                concept,
                context_ref: context_ref.to_string(),
                value: node.text().unwrap_or("").trim().to_string(),
                negated: node.attribute("sign") == Some("-"),
                decimals: node.attribute("decimals").map(String::from),
                unit_ref: node.attribute("unitRef").map(String::from),
            });
        }

        tracing::debug!(
            "Indexed {} contexts, {} concepts ({} facts dropped)",
            contexts.len(),
            facts.len(),
            dropped
        );

        Ok(Self { contexts, facts })
    }

    /// Looks up a declared context by id.
    pub fn context(&self, id: &str) -> Option<&Context> {
        self.contexts.get(id)
    }

    /// Iterates all declared contexts (unordered).
    pub fn contexts(&self) -> impl Iterator<Item = &Context> {
        self.contexts.values()
    }

    /// All facts tagged with the given concept name, in document order.
    pub fn facts_for(&self, concept: &str) -> &[Fact] {
        self.facts.get(concept).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates every indexed fact, in no particular order. Used by the
    /// debug dump.
    pub fn all_facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts.values().flatten()
    }

    /// Convenience for metadata concepts that appear at most a handful of
    /// times: the first reported non-empty value, if any.
    pub fn first_value(&self, concept: &str) -> Option<&str> {
        self.facts_for(concept)
            .iter()
            .map(|f| f.value.as_str())
            .find(|v| !v.is_empty())
    }
}

/// Parses a calendar date, tolerating the `2011-01-31T00:00:00` datetime
/// form some filers emit.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let date_part = text.trim().split('T').next().unwrap_or("");
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn parse_context(node: &roxmltree::Node<'_, '_>) -> Option<Context> {
    let id = node.attribute("id")?.to_string();

    let period_node = node
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "period")?;

    let mut instant = None;
    let mut start = None;
    let mut end = None;
    for child in period_node.children().filter(|n| n.is_element()) {
        let text = child.text().unwrap_or("");
        match child.tag_name().name() {
            "instant" => instant = parse_date(text),
            "startDate" => start = parse_date(text),
            "endDate" => end = parse_date(text),
            _ => {}
        }
    }

    let period = match (instant, start, end) {
        (Some(date), _, _) => Period::Instant(date),
        (None, Some(start), Some(end)) => Period::Duration { start, end },
        _ => return None,
    };

    // Dimensional qualifiers live under entity/segment or scenario.
    let dimensions = node
        .descendants()
        .filter(|n| {
            n.is_element()
                && matches!(n.tag_name().name(), "explicitMember" | "typedMember")
        })
        .count();

    Some(Context { id, period, dimensions })
}

/// Canonical `prefix:LocalName` for a fact element. The us-gaap and dei
/// namespace URIs change with every taxonomy year
/// (`http://xbrl.us/us-gaap/2009-01-31`, `http://fasb.org/us-gaap/2012-01-31`,
/// ...), so concepts are keyed by a stable prefix rather than whatever
/// prefix the filer happened to declare.
fn qualified_concept(node: &roxmltree::Node<'_, '_>, namespace: &str) -> String {
    let local = node.tag_name().name();
    if namespace.contains("us-gaap") {
        format!("us-gaap:{}", local)
    } else if namespace.contains("/dei") {
        format!("dei:{}", local)
    } else {
        match node.lookup_prefix(namespace) {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
            _ => local.to_string(),
        }
    }
}
