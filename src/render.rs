use crate::align::{align, DiffTag};
use crate::docx::paragraphs::ParagraphUnit;

pub const REMOVED_CLASS: &str = "diff-removed";
pub const ADDED_CLASS: &str = "diff-added";
pub const COMMENT_CLASS: &str = "comment-summary";

/// Word-level highlighting of one aligned pair.
///
/// Both texts are split on whitespace and aligned with the shared opcode
/// primitive. Unchanged words pass through; removed words are wrapped in the
/// removed span on the left, added words in the added span on the right.
/// Each side is rejoined with single spaces. All text is HTML-escaped, so
/// highlighting identical inputs returns both texts span-free.
pub fn highlight_word_changes(old_text: &str, new_text: &str) -> (String, String) {
    let old_words: Vec<&str> = old_text.split_whitespace().collect();
    let new_words: Vec<&str> = new_text.split_whitespace().collect();

    let mut left: Vec<String> = Vec::new();
    let mut right: Vec<String> = Vec::new();
    for op in align(&old_words, &new_words) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                left.push(escape_html(&old_words[old_range].join(" ")));
                right.push(escape_html(&new_words[new_range].join(" ")));
            }
            DiffTag::Delete => {
                left.push(removed_span(&old_words[old_range].join(" ")));
            }
            DiffTag::Insert => {
                right.push(added_span(&new_words[new_range].join(" ")));
            }
            DiffTag::Replace => {
                left.push(removed_span(&old_words[old_range].join(" ")));
                right.push(added_span(&new_words[new_range].join(" ")));
            }
        }
    }
    (left.join(" "), right.join(" "))
}

/// Render the comparison of two paragraph-unit sequences as an HTML table
/// showing only the differences.
///
/// Equal runs are suppressed. Replace runs are paired index-by-index up to
/// the longer side, padding the short side with empty text; rows where both
/// resolved texts are blank are skipped. Delete/insert runs emit one-sided
/// rows, skipping blank units. Row order follows opcode order, which follows
/// document order.
pub fn render_diff_table(old_units: &[ParagraphUnit], new_units: &[ParagraphUnit]) -> String {
    let old_texts: Vec<&str> = old_units.iter().map(|u| u.text.as_str()).collect();
    let new_texts: Vec<&str> = new_units.iter().map(|u| u.text.as_str()).collect();

    let mut table = String::from(
        "<table class='diff-table'><thead><tr><th>Old Version</th><th>New Version</th></tr></thead><tbody>",
    );

    for op in align(&old_texts, &new_texts) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {}
            DiffTag::Replace => {
                let (i1, i2) = (old_range.start, old_range.end);
                let (j1, j2) = (new_range.start, new_range.end);
                let n = (i2 - i1).max(j2 - j1);
                for k in 0..n {
                    let old_unit = (i1 + k < i2).then(|| &old_units[i1 + k]);
                    let new_unit = (j1 + k < j2).then(|| &new_units[j1 + k]);
                    let (old_text, old_tip) = cell_source(old_unit);
                    let (new_text, new_tip) = cell_source(new_unit);
                    if old_text.trim().is_empty() && new_text.trim().is_empty() {
                        continue;
                    }
                    let (mut left, mut right) = highlight_word_changes(old_text, new_text);
                    if !old_tip.is_empty() {
                        left.push_str(&comment_block(old_tip));
                    }
                    if !new_tip.is_empty() {
                        right.push_str(&comment_block(new_tip));
                    }
                    push_row(&mut table, &left, &right);
                }
            }
            DiffTag::Delete => {
                for unit in &old_units[old_range] {
                    if unit.text.trim().is_empty() {
                        continue;
                    }
                    let mut cell = escape_html(&unit.text);
                    if !unit.tooltip.is_empty() {
                        cell.push_str(&comment_block(&unit.tooltip));
                    }
                    push_row(&mut table, &cell, "");
                }
            }
            DiffTag::Insert => {
                for unit in &new_units[new_range] {
                    if unit.text.trim().is_empty() {
                        continue;
                    }
                    let mut cell = escape_html(&unit.text);
                    if !unit.tooltip.is_empty() {
                        cell.push_str(&comment_block(&unit.tooltip));
                    }
                    push_row(&mut table, "", &cell);
                }
            }
        }
    }

    table.push_str("</tbody></table>");
    table
}

fn cell_source(unit: Option<&ParagraphUnit>) -> (&str, &str) {
    unit.map(|u| (u.text.as_str(), u.tooltip.as_str()))
        .unwrap_or(("", ""))
}

fn push_row(table: &mut String, left: &str, right: &str) {
    table.push_str("<tr><td>");
    table.push_str(left);
    table.push_str("</td><td>");
    table.push_str(right);
    table.push_str("</td></tr>");
}

fn removed_span(segment: &str) -> String {
    format!("<span class='{REMOVED_CLASS}'>{}</span>", escape_html(segment))
}

fn added_span(segment: &str) -> String {
    format!("<span class='{ADDED_CLASS}'>{}</span>", escape_html(segment))
}

/// Trailing annotation block under a cell. Tooltip lines are joined with
/// newlines in the data model and become line breaks here.
fn comment_block(tooltip: &str) -> String {
    format!(
        "<div class='{COMMENT_CLASS}'>{}</div>",
        escape_html(tooltip).replace('\n', "<br>")
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
