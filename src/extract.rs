//! Voucher document extractor
//!
//! Normalizes the ERP's accounting-export XML into an [`OrderDocument`].
//! The export is tag soup: tags come and go across ERP configurations
//! and voucher types, so every field access goes through the permissive
//! getters below ([`tag_text`], [`list_text`], [`tag_amount`]) — a
//! missing tag is an empty string or a zero amount, never an error.
//! Only an unparseable document or a missing `VOUCHER` element fails
//! the operation, and then it fails whole: callers get a complete
//! document or none.

use crate::document::{
    CompanyInfo, Heading, OrderDocument, OrderInfo, OrderItem, PartyInfo, Totals,
};
use crate::error::{ExtractError, ExtractResult};
use roxmltree::{Document as XmlDocument, Node};
use tracing::{debug, info};

/// Invalid numeric character reference some exports embed unescaped.
/// XML parsers rightly reject it, so it is stripped before parsing.
const INVALID_CHAR_REF: &str = "&#4;";

/// Item entries can live under any of these list tags; a voucher is
/// expected to use one of them, but all three are read and their items
/// concatenated in this order.
const ITEM_LIST_TAGS: &[&str] = &[
    "ALLINVENTORYENTRIES.LIST",
    "INVENTORYENTRIESIN.LIST",
    "INVENTORYENTRIESOUT.LIST",
];

/// Extract the canonical Order Document from raw voucher XML
pub fn extract(raw: &str) -> ExtractResult<OrderDocument> {
    let cleaned = raw.replace(INVALID_CHAR_REF, "");
    let xml =
        XmlDocument::parse(&cleaned).map_err(|e| ExtractError::Malformed(e.to_string()))?;

    let voucher = xml
        .descendants()
        .find(|n| n.has_tag_name("VOUCHER"))
        .ok_or(ExtractError::MissingVoucher)?;

    let heading = Heading::classify(&tag_text(voucher, "VOUCHERTYPENAME"));

    // Company name lives in the request metadata, outside the voucher.
    let company_name = xml
        .descendants()
        .find(|n| n.has_tag_name("REQUESTDESC"))
        .map(|desc| tag_text(desc, "SVCURRENTCOMPANY"))
        .unwrap_or_default();

    let company = CompanyInfo {
        name: company_name,
        gstin: tag_text(voucher, "CMPGSTIN"),
        address: list_text(voucher, "ADDRESS.LIST"),
        phone: tag_text(voucher, "CMPPHONE"),
    };

    let mut party_name = tag_text(voucher, "PARTYNAME");
    if party_name.is_empty() {
        party_name = tag_text(voucher, "PARTYLEDGERNAME");
    }
    let party = PartyInfo {
        name: party_name,
        address: list_text(voucher, "BASICBUYERADDRESS.LIST"),
        gstin: tag_text(voucher, "PARTYGSTIN"),
    };

    let order = OrderInfo {
        number: tag_text(voucher, "VOUCHERNUMBER"),
        date: display_date(&tag_text(voucher, "DATE")),
        user: tag_text(voucher, "ENTEREDBY"),
    };

    let items = extract_items(voucher);
    let subtotal: f64 = items.iter().map(|i| money(&i.amount)).sum();

    let ledgers: Vec<Node> = voucher
        .descendants()
        .filter(|n| n.has_tag_name("LEDGERENTRIES.LIST"))
        .collect();

    let cgst = ledger_amount(&ledgers, "CGST").unwrap_or(0.0);
    let sgst = ledger_amount(&ledgers, "SGST")
        .or_else(|| ledger_amount(&ledgers, "SGST/UTGST"))
        .unwrap_or(0.0);
    let igst = ledger_amount(&ledgers, "IGST").unwrap_or(0.0);

    // The party ledger carries the authoritative total; the computed
    // subtotal stands in when no entry is flagged.
    let total = ledgers
        .iter()
        .find(|e| tag_text(**e, "ISPARTYLEDGER") == "Yes")
        .map(|e| tag_amount(*e, "AMOUNT"))
        .unwrap_or(subtotal);

    let totals = Totals {
        subtotal: fixed2(subtotal),
        cgst: fixed2(cgst),
        sgst: fixed2(sgst),
        igst: fixed2(igst),
        total: fixed2(total),
    };

    let doc = OrderDocument {
        heading,
        company,
        party,
        order,
        items,
        totals,
        narration: tag_text(voucher, "NARRATION"),
        terms_and_conditions: list_text(voucher, "BASICORDERTERMS.LIST"),
        amount_in_words: tag_text(voucher, "AMOUNTINWORDS"),
        authorized_signatory: tag_text(voucher, "AUTHORISEDSIGNATORY"),
    };

    info!(
        heading = doc.heading.label(),
        number = %doc.order.number,
        items = doc.items.len(),
        "voucher extracted"
    );
    Ok(doc)
}

fn extract_items(voucher: Node) -> Vec<OrderItem> {
    let mut items = Vec::new();
    for tag in ITEM_LIST_TAGS {
        for entry in voucher.descendants().filter(|n| n.has_tag_name(*tag)) {
            let s_no = items.len() + 1;
            items.push(OrderItem {
                s_no,
                name: tag_text(entry, "STOCKITEMNAME"),
                qty: leading_token(&tag_text(entry, "ACTUALQTY")),
                rate: fixed2(money(rate_part(&tag_text(entry, "RATE")))),
                amount: fixed2(tag_amount(entry, "AMOUNT")),
            });
        }
    }
    debug!(count = items.len(), "inventory entries collected");
    items
}

// === Permissive tree access ===
//
// The only way extraction code touches the parsed tree. Absence is a
// default, never an error.

/// Trimmed text of the first element named `tag` under `scope`
fn tag_text(scope: Node, tag: &str) -> String {
    scope
        .descendants()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// All text nodes under every list element named `tag`, joined with
/// newlines (address and terms lines arrive as repeating child tags)
fn list_text(scope: Node, tag: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for list in scope.descendants().filter(|n| n.has_tag_name(tag)) {
        for text in list.descendants().filter(|n| n.is_text()) {
            let t = text.text().unwrap_or("").trim();
            if !t.is_empty() {
                lines.push(t.to_string());
            }
        }
    }
    lines.join("\n")
}

/// Magnitude of the amount in the first element named `tag`
fn tag_amount(scope: Node, tag: &str) -> f64 {
    money(&tag_text(scope, tag))
}

/// Amount of the ledger entry whose name matches `name` exactly
///
/// `None` when no entry carries that ledger name, so callers can
/// distinguish absence from a zero amount (the SGST label fallback
/// needs that).
fn ledger_amount(ledgers: &[Node], name: &str) -> Option<f64> {
    ledgers
        .iter()
        .find(|e| tag_text(**e, "LEDGERNAME") == name)
        .map(|e| tag_amount(*e, "AMOUNT"))
}

// === Field normalization ===

/// Parse a money value, keeping only the magnitude
///
/// Credit entries arrive negative; the model stores absolute values.
fn money(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(f64::abs).unwrap_or(0.0)
}

fn fixed2(v: f64) -> String {
    format!("{v:.2}")
}

/// Leading token of a "quantity unit" pair: "10 NOS" -> "10"
fn leading_token(raw: &str) -> String {
    raw.split_whitespace().next().unwrap_or("").to_string()
}

/// Numeric portion of a rate before any "/unit" suffix
fn rate_part(raw: &str) -> &str {
    raw.split('/').next().unwrap_or("")
}

/// YYYYMMDD -> DD-MM-YYYY; anything else passes through unchanged
fn display_date(raw: &str) -> String {
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &raw[6..8], &raw[4..6], &raw[0..4])
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"<ENVELOPE>
 <HEADER><TALLYREQUEST>Import Data</TALLYREQUEST></HEADER>
 <BODY>
  <IMPORTDATA>
   <REQUESTDESC>
    <REPORTNAME>Vouchers</REPORTNAME>
    <STATICVARIABLES><SVCURRENTCOMPANY>Acme Industries</SVCURRENTCOMPANY></STATICVARIABLES>
   </REQUESTDESC>
   <REQUESTDATA>
    <TALLYMESSAGE>
     <VOUCHER VCHTYPE="Sales Order">
      <VOUCHERTYPENAME>Sales Order</VOUCHERTYPENAME>
      <VOUCHERNUMBER>SO-42</VOUCHERNUMBER>
      <DATE>20250709</DATE>
      <ENTEREDBY>ops</ENTEREDBY>
      <PARTYNAME>Bharat Traders</PARTYNAME>
      <PARTYGSTIN>27AAAPL1234C1ZV</PARTYGSTIN>
      <CMPGSTIN>29AABCU9603R1ZM</CMPGSTIN>
      <CMPPHONE>080-2345-6789</CMPPHONE>
      <ADDRESS.LIST TYPE="String">
       <ADDRESS>12 Mill Road</ADDRESS>
       <ADDRESS>Bengaluru 560001</ADDRESS>
      </ADDRESS.LIST>
      <BASICBUYERADDRESS.LIST TYPE="String">
       <BASICBUYERADDRESS>5 Market Street</BASICBUYERADDRESS>
      </BASICBUYERADDRESS.LIST>
      <NARRATION>Urgent&#4; dispatch</NARRATION>
      <ALLINVENTORYENTRIES.LIST>
       <STOCKITEMNAME>Widget</STOCKITEMNAME>
       <ACTUALQTY> 10 NOS</ACTUALQTY>
       <RATE>5.5/PCS</RATE>
       <AMOUNT>-55.00</AMOUNT>
      </ALLINVENTORYENTRIES.LIST>
      <LEDGERENTRIES.LIST>
       <LEDGERNAME>Bharat Traders</LEDGERNAME>
       <ISPARTYLEDGER>Yes</ISPARTYLEDGER>
       <AMOUNT>64.90</AMOUNT>
      </LEDGERENTRIES.LIST>
      <LEDGERENTRIES.LIST>
       <LEDGERNAME>CGST</LEDGERNAME>
       <ISPARTYLEDGER>No</ISPARTYLEDGER>
       <AMOUNT>4.95</AMOUNT>
      </LEDGERENTRIES.LIST>
      <LEDGERENTRIES.LIST>
       <LEDGERNAME>SGST/UTGST</LEDGERNAME>
       <ISPARTYLEDGER>No</ISPARTYLEDGER>
       <AMOUNT>4.95</AMOUNT>
      </LEDGERENTRIES.LIST>
     </VOUCHER>
    </TALLYMESSAGE>
   </REQUESTDATA>
  </IMPORTDATA>
 </BODY>
</ENVELOPE>"#;

    #[test]
    fn test_item_normalization() {
        let doc = extract(FIXTURE).unwrap();
        assert_eq!(doc.items.len(), 1);
        let item = &doc.items[0];
        assert_eq!(item.s_no, 1);
        assert_eq!(item.name, "Widget");
        assert_eq!(item.qty, "10");
        assert_eq!(item.rate, "5.50");
        assert_eq!(item.amount, "55.00");
    }

    #[test]
    fn test_date_transform() {
        let doc = extract(FIXTURE).unwrap();
        assert_eq!(doc.order.date, "09-07-2025");
        assert_eq!(display_date(""), "");
        assert_eq!(display_date("July 2025"), "July 2025");
    }

    #[test]
    fn test_subtotal_recomputed_from_items() {
        let doc = extract(FIXTURE).unwrap();
        assert_eq!(doc.totals.subtotal, "55.00");
    }

    #[test]
    fn test_total_prefers_party_ledger() {
        let doc = extract(FIXTURE).unwrap();
        assert_eq!(doc.totals.total, "64.90");
    }

    #[test]
    fn test_total_falls_back_to_subtotal() {
        let xml = FIXTURE.replace("Yes", "No");
        let doc = extract(&xml).unwrap();
        assert_eq!(doc.totals.total, doc.totals.subtotal);
        assert_eq!(doc.totals.total, "55.00");
    }

    #[test]
    fn test_sgst_label_fallback() {
        let doc = extract(FIXTURE).unwrap();
        assert_eq!(doc.totals.sgst, "4.95");
        assert_eq!(doc.totals.cgst, "4.95");
        assert_eq!(doc.totals.igst, "0.00");

        // a plain SGST ledger takes precedence by being looked up first
        let xml = FIXTURE.replace("SGST/UTGST", "SGST");
        let doc = extract(&xml).unwrap();
        assert_eq!(doc.totals.sgst, "4.95");
    }

    #[test]
    fn test_invalid_char_ref_stripped() {
        let doc = extract(FIXTURE).unwrap();
        assert_eq!(doc.narration, "Urgent dispatch");
    }

    #[test]
    fn test_company_and_party_blocks() {
        let doc = extract(FIXTURE).unwrap();
        assert_eq!(doc.company.name, "Acme Industries");
        assert_eq!(doc.company.gstin, "29AABCU9603R1ZM");
        assert_eq!(doc.company.address, "12 Mill Road\nBengaluru 560001");
        assert_eq!(doc.party.name, "Bharat Traders");
        assert_eq!(doc.party.address, "5 Market Street");
    }

    #[test]
    fn test_heading_from_voucher_type() {
        let doc = extract(FIXTURE).unwrap();
        assert_eq!(doc.heading, Heading::SalesOrder);
    }

    #[test]
    fn test_missing_voucher_fails() {
        let err = extract("<ENVELOPE><BODY/></ENVELOPE>").unwrap_err();
        assert!(matches!(err, ExtractError::MissingVoucher));
    }

    #[test]
    fn test_malformed_xml_fails() {
        let err = extract("<VOUCHER><open").unwrap_err();
        assert!(matches!(err, ExtractError::Malformed(_)));
    }

    #[test]
    fn test_absent_fields_default_empty() {
        let doc = extract("<VOUCHER></VOUCHER>").unwrap();
        assert_eq!(doc.company.name, "");
        assert_eq!(doc.party.name, "");
        assert_eq!(doc.order.date, "");
        assert!(doc.items.is_empty());
        assert_eq!(doc.totals.subtotal, "0.00");
        assert_eq!(doc.totals.total, "0.00");
        assert_eq!(doc.heading, Heading::Document);
    }

    #[test]
    fn test_items_concatenated_across_list_tags() {
        let xml = r#"<VOUCHER>
          <INVENTORYENTRIESOUT.LIST>
            <STOCKITEMNAME>Beta</STOCKITEMNAME>
            <ACTUALQTY>2 NOS</ACTUALQTY>
            <RATE>3/NOS</RATE>
            <AMOUNT>6</AMOUNT>
          </INVENTORYENTRIESOUT.LIST>
          <INVENTORYENTRIESIN.LIST>
            <STOCKITEMNAME>Alpha</STOCKITEMNAME>
            <ACTUALQTY>1 NOS</ACTUALQTY>
            <RATE>2/NOS</RATE>
            <AMOUNT>2</AMOUNT>
          </INVENTORYENTRIESIN.LIST>
        </VOUCHER>"#;
        let doc = extract(xml).unwrap();
        // tag-declaration order: IN before OUT regardless of document order
        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.items[0].name, "Alpha");
        assert_eq!(doc.items[0].s_no, 1);
        assert_eq!(doc.items[1].name, "Beta");
        assert_eq!(doc.items[1].s_no, 2);
        assert_eq!(doc.totals.subtotal, "8.00");
    }

    #[test]
    fn test_party_name_fallback_tag() {
        let xml = "<VOUCHER><PARTYLEDGERNAME>Fallback Co</PARTYLEDGERNAME></VOUCHER>";
        let doc = extract(xml).unwrap();
        assert_eq!(doc.party.name, "Fallback Co");
    }
}
