// src/extractors/concept.rs

// --- Imports ---
use crate::extractors::context::PeriodKind;
use crate::extractors::facts::{Fact, FactIndex};

/// Static configuration for one output field: which reporting period it
/// binds to and which concept names may carry it, in priority order.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: PeriodKind,
    /// Acceptable concept names, most preferred first. Taxonomy vocabulary
    /// varies by filer and year, so each field carries the modern tag plus
    /// the legacy and industry-specific fallbacks observed in real filings.
    pub aliases: &'static [&'static str],
}

/// One entry per numeric field of the report item. Process-wide immutable
/// configuration, passed explicitly to the resolver.
pub static FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec {
        name: "revenues",
        kind: PeriodKind::Duration,
        aliases: &[
            "us-gaap:Revenues",
            "us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax",
            "us-gaap:RevenueFromContractWithCustomerIncludingAssessedTax",
            "us-gaap:SalesRevenueNet",
            "us-gaap:SalesRevenueGoodsNet",
            "us-gaap:SalesRevenueServicesNet",
            "us-gaap:RevenuesNetOfInterestExpense",
            "us-gaap:RegulatedAndUnregulatedOperatingRevenue",
            "us-gaap:HealthCareOrganizationRevenue",
            "us-gaap:RealEstateRevenueNet",
            "us-gaap:OilAndGasRevenue",
            "us-gaap:FinancialServicesRevenue",
            "us-gaap:InterestAndDividendIncomeOperating",
        ],
    },
    FieldSpec {
        name: "op_income",
        kind: PeriodKind::Duration,
        aliases: &["us-gaap:OperatingIncomeLoss"],
    },
    FieldSpec {
        name: "net_income",
        kind: PeriodKind::Duration,
        aliases: &[
            "us-gaap:NetIncomeLoss",
            "us-gaap:ProfitLoss",
            "us-gaap:NetIncomeLossAvailableToCommonStockholdersBasic",
            "us-gaap:IncomeLossFromContinuingOperationsIncludingPortionAttributableToNoncontrollingInterest",
            "us-gaap:IncomeLossFromContinuingOperations",
        ],
    },
    FieldSpec {
        name: "eps_basic",
        kind: PeriodKind::Duration,
        aliases: &[
            "us-gaap:EarningsPerShareBasic",
            "us-gaap:EarningsPerShareBasicAndDiluted",
            "us-gaap:IncomeLossFromContinuingOperationsPerBasicShare",
        ],
    },
    FieldSpec {
        name: "eps_diluted",
        kind: PeriodKind::Duration,
        aliases: &[
            "us-gaap:EarningsPerShareDiluted",
            "us-gaap:EarningsPerShareBasicAndDiluted",
            "us-gaap:IncomeLossFromContinuingOperationsPerDilutedShare",
        ],
    },
    FieldSpec {
        name: "dividend",
        kind: PeriodKind::Duration,
        aliases: &[
            "us-gaap:CommonStockDividendsPerShareDeclared",
            "us-gaap:CommonStockDividendsPerShareCashPaid",
        ],
    },
    FieldSpec {
        name: "assets",
        kind: PeriodKind::Instant,
        aliases: &["us-gaap:Assets"],
    },
    FieldSpec {
        name: "cur_assets",
        kind: PeriodKind::Instant,
        aliases: &["us-gaap:AssetsCurrent"],
    },
    FieldSpec {
        name: "cur_liab",
        kind: PeriodKind::Instant,
        aliases: &["us-gaap:LiabilitiesCurrent"],
    },
    FieldSpec {
        name: "equity",
        kind: PeriodKind::Instant,
        aliases: &[
            "us-gaap:StockholdersEquity",
            "us-gaap:StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest",
            "us-gaap:PartnersCapital",
            "us-gaap:PartnersCapitalIncludingPortionAttributableToNoncontrollingInterest",
            "us-gaap:CommonStockholdersEquity",
        ],
    },
    FieldSpec {
        name: "cash",
        kind: PeriodKind::Instant,
        aliases: &[
            "us-gaap:CashAndCashEquivalentsAtCarryingValue",
            "us-gaap:CashCashEquivalentsRestrictedCashAndRestrictedCashEquivalents",
            "us-gaap:CashAndDueFromBanks",
            "us-gaap:CashCashEquivalentsAndFederalFundsSold",
        ],
    },
    FieldSpec {
        name: "cash_flow_op",
        kind: PeriodKind::Cumulative,
        aliases: &[
            "us-gaap:NetCashProvidedByUsedInOperatingActivities",
            "us-gaap:NetCashProvidedByUsedInOperatingActivitiesContinuingOperations",
        ],
    },
    FieldSpec {
        name: "cash_flow_inv",
        kind: PeriodKind::Cumulative,
        aliases: &[
            "us-gaap:NetCashProvidedByUsedInInvestingActivities",
            "us-gaap:NetCashProvidedByUsedInInvestingActivitiesContinuingOperations",
        ],
    },
    FieldSpec {
        name: "cash_flow_fin",
        kind: PeriodKind::Cumulative,
        aliases: &[
            "us-gaap:NetCashProvidedByUsedInFinancingActivities",
            "us-gaap:NetCashProvidedByUsedInFinancingActivitiesContinuingOperations",
        ],
    },
];

/// Finds the field's value within the resolved contexts, trying aliases in
/// priority order and, per alias, the ranked context candidates in order.
/// Filers tag a fact against whichever duplicate equivalent context
/// declaration they like, so every qualifying context stays in play until
/// one actually yields a fact. Returns `None` when no alias has a matching
/// fact; the field then surfaces as null rather than aborting extraction.
pub fn resolve_concept(index: &FactIndex, spec: &FieldSpec, context_ids: &[&str]) -> Option<f64> {
    for alias in spec.aliases {
        for context_id in context_ids {
            for fact in index.facts_for(alias) {
                if fact.context_ref != *context_id {
                    continue;
                }
                match numeric_value(fact) {
                    Some(value) => return Some(value),
                    None => {
                        tracing::warn!(
                            "Fact {} in context '{}' has non-numeric value '{}', skipping",
                            alias,
                            context_id,
                            fact.value
                        );
                    }
                }
            }
        }
    }
    None
}

/// Parses the fact's raw text as a decimal number, applying the `sign`
/// negation attribute. Values are passed through at the filer's reported
/// precision; known filer-side sign errors are preserved verbatim since
/// intent cannot be inferred from the document alone.
fn numeric_value(fact: &Fact) -> Option<f64> {
    let parsed: f64 = fact.value.trim().parse().ok()?;
    Some(if fact.negated { -parsed } else { parsed })
}
