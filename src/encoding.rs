//! Printer text codec
//!
//! The target printers speak a Latin code page (Windows-1252 superset)
//! and have no glyph for the rupee sign, so text is encoded in two
//! steps:
//! - substitute `₹` with the ASCII `Rs.` equivalent
//! - encode the result with Windows-1252 (unmappable characters fall
//!   back to the encoder's substitute byte)

/// ASCII rendition of the rupee sign on the printer
const RUPEE_SUBSTITUTE: &str = "Rs.";

/// Encode a line of text to printer bytes
pub fn encode_printer_text(s: &str) -> Vec<u8> {
    let substituted = if s.contains('₹') {
        s.replace('₹', RUPEE_SUBSTITUTE)
    } else {
        s.to_string()
    };
    let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(&substituted);
    encoded.into_owned()
}

/// Printable width of a string in character cells
///
/// Layout is character-count based; one Unicode scalar occupies one
/// cell on these printers.
pub fn printer_width(s: &str) -> usize {
    s.chars().count()
}
