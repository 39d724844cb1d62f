//! Fixed-width line layout
//!
//! Produces the printable text lines for the item table and free-text
//! blocks. Widths are counted in character cells (see
//! [`crate::encoding::printer_width`]); wrapping is hard chunking with
//! no word-boundary awareness, matching the observed printer output.

use crate::document::OrderItem;
use crate::encoding::printer_width;
use crate::settings::ColumnPlan;

/// Pad a string with trailing spaces to `width` cells
///
/// Longer strings are returned unchanged, never truncated.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = printer_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Pad a string with leading spaces to `width` cells
pub fn pad_left(s: &str, width: usize) -> String {
    let w = printer_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - w), s)
    }
}

/// Hard-wrap a string into chunks of at most `width` characters
///
/// Empty input yields a single empty line so callers still emit a
/// line feed for the block.
pub fn wrap_chars(s: &str, width: usize) -> Vec<String> {
    if s.is_empty() || width == 0 {
        return vec![String::new()];
    }
    let chars: Vec<char> = s.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Separator line: the configured glyph repeated across the paper
pub fn separator(glyph: char, width: usize) -> String {
    glyph.to_string().repeat(width)
}

/// Compose a line with `right` right-aligned at the paper edge
///
/// Padding clamps to zero when the two parts no longer fit; nothing is
/// truncated.
pub fn line_lr(left: &str, right: &str, width: usize) -> String {
    let lw = printer_width(left);
    let rw = printer_width(right);
    if lw + rw >= width {
        format!("{}{}", left, right)
    } else {
        format!("{}{}{}", left, " ".repeat(width - lw - rw), right)
    }
}

/// Two-part item table header
pub fn header_lines(plan: &ColumnPlan, width: usize) -> [String; 2] {
    let first = format!("{}Item", pad_right("S.No", plan.s_no));
    let summary = format!("{}Qty x Rate", " ".repeat(plan.s_no));
    let second = line_lr(&summary, "Amount", width);
    [first, second]
}

/// Printable lines for one item row
///
/// The name hard-wraps at the name column width; continuation lines are
/// indented under the name column start. The closing summary line
/// right-aligns the amount.
pub fn item_lines(item: &OrderItem, plan: &ColumnPlan, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let name_chunks = wrap_chars(&item.name, plan.name);
    let indent = " ".repeat(plan.s_no);

    for (i, chunk) in name_chunks.iter().enumerate() {
        if i == 0 {
            lines.push(format!(
                "{}{}",
                pad_right(&item.s_no.to_string(), plan.s_no),
                chunk
            ));
        } else {
            lines.push(format!("{}{}", indent, chunk));
        }
    }

    let summary = format!("{}{} x {}", indent, item.qty, item.rate);
    lines.push(line_lr(&summary, &item.amount, width));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> OrderItem {
        OrderItem {
            s_no: 1,
            name: name.to_string(),
            qty: "10".to_string(),
            rate: "5.50".to_string(),
            amount: "55.00".to_string(),
        }
    }

    #[test]
    fn test_wrap_exact_multiple_plus_three() {
        let plan = ColumnPlan::default();
        let w = plan.name;
        let name = "x".repeat(2 * w + 3);
        let lines = item_lines(&item(&name), &plan, 48);
        // one primary + two continuations + summary
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("1   "));
        assert!(lines[1].starts_with(&" ".repeat(plan.s_no)));
        assert_eq!(lines[2].trim_start(), "xxx");
    }

    #[test]
    fn test_amount_right_aligned() {
        let plan = ColumnPlan::default();
        let lines = item_lines(&item("Widget"), &plan, 48);
        let last = lines.last().unwrap();
        assert_eq!(last.chars().count(), 48);
        assert!(last.ends_with("55.00"));
        assert!(last.contains("10 x 5.50"));
    }

    #[test]
    fn test_padding_clamps_to_zero() {
        let line = line_lr(&"a".repeat(30), &"b".repeat(30), 48);
        // no truncation, just no padding
        assert_eq!(line.chars().count(), 60);
    }

    #[test]
    fn test_wrap_empty_gives_one_line() {
        assert_eq!(wrap_chars("", 10), vec![String::new()]);
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator('-', 5), "-----");
        assert_eq!(separator('=', 3), "===");
    }

    #[test]
    fn test_header_lines() {
        let plan = ColumnPlan::default();
        let [first, second] = header_lines(&plan, 48);
        assert!(first.starts_with("S.No"));
        assert!(first.contains("Item"));
        assert!(second.ends_with("Amount"));
        assert_eq!(second.chars().count(), 48);
    }
}
