//! Order Document model
//!
//! Immutable snapshot of one extracted voucher. Built wholesale by the
//! extractor and never mutated afterwards; a new upload replaces the
//! whole document.

use serde::{Deserialize, Serialize};

/// Voucher classification, derived from the export's voucher-type name
///
/// Classification is an ordered first-match-wins substring table; see
/// [`Heading::classify`]. The precedence matters: "SALES ORDER" must be
/// tested before the bare "SALES" fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    SalesOrder,
    MaterialChallan,
    SalesInvoice,
    #[default]
    Document,
}

/// Ordered classification rules: first matching substring wins
const HEADING_RULES: &[(&[&str], Heading)] = &[
    (&["SALES ORDER"], Heading::SalesOrder),
    (&["MATERIAL OUT", "DELIVERY"], Heading::MaterialChallan),
    (&["SALES"], Heading::SalesInvoice),
];

impl Heading {
    /// Classify a raw voucher-type name
    pub fn classify(voucher_type: &str) -> Self {
        let upper = voucher_type.to_uppercase();
        for (patterns, heading) in HEADING_RULES {
            if patterns.iter().any(|p| upper.contains(p)) {
                return *heading;
            }
        }
        Heading::Document
    }

    /// Printed form of the heading
    pub fn label(&self) -> &'static str {
        match self {
            Heading::SalesOrder => "SALES ORDER",
            Heading::MaterialChallan => "MATERIAL CHALLAN",
            Heading::SalesInvoice => "SALES INVOICE",
            Heading::Document => "DOCUMENT",
        }
    }
}

/// Issuing company block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gstin: String,
    /// Address lines joined with '\n'
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

/// Counterparty block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartyInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gstin: String,
}

/// Voucher metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderInfo {
    #[serde(default)]
    pub number: String,
    /// Display form DD-MM-YYYY, transformed from the export's YYYYMMDD
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub user: String,
}

/// One inventory line
///
/// `qty` keeps the raw leading token of the export's "quantity unit"
/// pair ("10 NOS" stores "10"); `rate` and `amount` are non-negative
/// and fixed to two decimals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItem {
    pub s_no: usize,
    pub name: String,
    pub qty: String,
    pub rate: String,
    pub amount: String,
}

/// Totals block, all fixed to two decimals
///
/// `subtotal` is recomputed from the item amounts, never trusted from
/// the source. `total` is the party-ledger amount when one is flagged,
/// otherwise the subtotal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: String,
    pub cgst: String,
    pub sgst: String,
    pub igst: String,
    pub total: String,
}

/// Canonical Order Document extracted from one voucher
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDocument {
    #[serde(default)]
    pub heading: Heading,
    #[serde(default)]
    pub company: CompanyInfo,
    #[serde(default)]
    pub party: PartyInfo,
    #[serde(default)]
    pub order: OrderInfo,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub totals: Totals,
    #[serde(default)]
    pub narration: String,
    #[serde(default)]
    pub terms_and_conditions: String,
    #[serde(default)]
    pub amount_in_words: String,
    #[serde(default)]
    pub authorized_signatory: String,
}
