//! Voucher renderer
//!
//! Walks an [`OrderDocument`] plus [`PrintSettings`] and assembles the
//! complete print job. Rendering is stateless and deterministic: the
//! same document and settings always produce the same bytes, so a
//! caller printing N copies can transmit one buffer N times.
//!
//! The logo load is the only awaited step; everything after it is
//! synchronous byte assembly.

use crate::document::OrderDocument;
use crate::escpos::EscPosBuilder;
use crate::layout::{header_lines, item_lines, line_lr, separator, wrap_chars};
use crate::settings::{Align, PrintSettings};

#[cfg(feature = "image")]
use crate::raster::{MonoBitmap, load_logo};

/// Line printed in place of the item table when a voucher has no
/// inventory entries
const NO_ITEMS_LINE: &str = "(no items)";

pub struct VoucherRenderer<'a> {
    doc: &'a OrderDocument,
    settings: &'a PrintSettings,
}

impl<'a> VoucherRenderer<'a> {
    pub fn new(doc: &'a OrderDocument, settings: &'a PrintSettings) -> Self {
        Self { doc, settings }
    }

    /// Render the full ESC/POS job, reset through paper cut
    pub async fn render(&self) -> Vec<u8> {
        #[cfg(feature = "image")]
        let logo = match self.settings.logo_path.as_deref() {
            Some(path) => load_logo(path, self.settings.logo_width).await,
            None => MonoBitmap::empty(),
        };

        let mut b = EscPosBuilder::new(self.settings.line_width);

        #[cfg(feature = "image")]
        if !logo.is_empty() {
            b.align(Align::Center);
            b.raster(&logo);
        }

        self.company_block(&mut b);
        self.heading_block(&mut b);
        self.order_block(&mut b);
        self.party_block(&mut b);
        self.item_table(&mut b);
        self.totals_block(&mut b);
        self.trailing_text(&mut b);

        b.feed(self.settings.feed_lines);
        b.cut();
        b.build()
    }

    fn sep(&self, b: &mut EscPosBuilder) {
        b.line(&separator(self.settings.separator, self.settings.line_width));
    }

    fn company_block(&self, b: &mut EscPosBuilder) {
        let c = &self.doc.company;
        b.align(self.settings.header_align);
        b.bold_on().double_size();
        b.line(&c.name);
        b.normal_size().bold_off();
        for line in c.address.lines() {
            b.line(line);
        }
        if !c.phone.is_empty() {
            b.line(&format!("Ph: {}", c.phone));
        }
        if !c.gstin.is_empty() {
            b.line(&format!("GSTIN: {}", c.gstin));
        }
    }

    fn heading_block(&self, b: &mut EscPosBuilder) {
        b.align(Align::Center);
        b.bold_on();
        b.line(self.doc.heading.label());
        b.bold_off();
    }

    /// Label/value pair with the boldness each side is configured for
    fn kv_line(&self, b: &mut EscPosBuilder, label: &str, value: &str) {
        if self.settings.bold_labels {
            b.bold_on();
        }
        b.text(label);
        if self.settings.bold_labels {
            b.bold_off();
        }
        if self.settings.bold_values {
            b.bold_on();
        }
        b.text(value);
        if self.settings.bold_values {
            b.bold_off();
        }
        b.newline();
    }

    fn order_block(&self, b: &mut EscPosBuilder) {
        let o = &self.doc.order;
        b.align(Align::Left);
        self.kv_line(b, "Voucher No: ", &o.number);
        self.kv_line(b, "Date: ", &o.date);
        self.kv_line(b, "User: ", &o.user);
    }

    /// Counterparty block, skipped whole when there is no party name
    fn party_block(&self, b: &mut EscPosBuilder) {
        let p = &self.doc.party;
        if p.name.is_empty() {
            return;
        }
        b.align(Align::Left);
        b.newline();
        b.bold_on();
        b.line(&format!("To: {}", p.name));
        b.bold_off();
        for line in p.address.lines() {
            b.line(line);
        }
        if !p.gstin.is_empty() {
            b.line(&format!("GSTIN: {}", p.gstin));
        }
    }

    fn item_table(&self, b: &mut EscPosBuilder) {
        let width = self.settings.line_width;
        let plan = &self.settings.columns;

        b.align(Align::Left);
        b.newline();
        for line in header_lines(plan, width) {
            b.line(&line);
        }
        self.sep(b);

        if self.doc.items.is_empty() {
            b.line(NO_ITEMS_LINE);
        } else {
            for item in &self.doc.items {
                for line in item_lines(item, plan, width) {
                    b.line(&line);
                }
            }
        }
        self.sep(b);
    }

    fn totals_block(&self, b: &mut EscPosBuilder) {
        let width = self.settings.line_width;
        let t = &self.doc.totals;

        b.align(Align::Left);
        b.line(&line_lr("Subtotal", &t.subtotal, width));
        // Zero tax lines are a display omission only; the model always
        // carries all three fields.
        for (label, amount) in [("CGST", &t.cgst), ("SGST", &t.sgst), ("IGST", &t.igst)] {
            if amount != "0.00" {
                b.line(&line_lr(label, amount, width));
            }
        }
        b.bold_on();
        b.line(&line_lr("Total", &format!("Rs. {}", t.total), width));
        b.bold_off();
    }

    fn wrapped_block(&self, b: &mut EscPosBuilder, label: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        b.newline();
        b.line(label);
        for src_line in text.lines() {
            for chunk in wrap_chars(src_line, self.settings.line_width) {
                b.line(&chunk);
            }
        }
    }

    fn trailing_text(&self, b: &mut EscPosBuilder) {
        if !self.doc.amount_in_words.is_empty() {
            b.newline();
            for chunk in wrap_chars(
                &format!("Amount: {}", self.doc.amount_in_words),
                self.settings.line_width,
            ) {
                b.line(&chunk);
            }
        }

        self.wrapped_block(b, "Narration:", &self.doc.narration);
        self.wrapped_block(b, "Terms & Conditions:", &self.doc.terms_and_conditions);

        if !self.doc.authorized_signatory.is_empty() {
            b.newline();
            b.align(Align::Right);
            b.line(&self.doc.authorized_signatory);
            b.align(Align::Left);
        }
    }
}
