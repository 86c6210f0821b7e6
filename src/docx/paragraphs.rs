use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::package::{DocPackage, DOCUMENT_PART};
use super::xml::{find_attr, parse_xml_part, XmlEvent, XmlPart};
use crate::error::Result;

/// One comparable unit of document text plus the comment summary shown
/// alongside it. `tooltip` is empty when no comment applies; otherwise the
/// newline-joined comment lines active during the paragraph's traversal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphUnit {
    pub text: String,
    pub tooltip: String,
}

impl ParagraphUnit {
    pub fn new(text: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: tooltip.into(),
        }
    }
}

/// Per-paragraph traversal state: the accumulating text buffer and the
/// comment-range stack. Range starts and references push ids; range ends pop
/// the top of the stack. Every id ever pushed is also recorded once, in
/// push order, for the tooltip.
#[derive(Default)]
struct ParagraphWalk {
    buf: String,
    active: Vec<String>,
    seen: Vec<String>,
}

impl ParagraphWalk {
    fn on_text(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    fn on_break(&mut self) {
        self.buf.push('\n');
    }

    fn on_range_start(&mut self, id: &str) {
        self.push_id(id);
    }

    fn on_range_end(&mut self) {
        if self.active.pop().is_none() {
            warn!("comment range end without matching start");
        }
    }

    fn on_reference(&mut self, id: &str) {
        // A reference marks the comment anchor; it is never popped by a
        // range end.
        self.push_id(id);
    }

    fn push_id(&mut self, id: &str) {
        self.active.push(id.to_string());
        if !self.seen.iter().any(|s| s == id) {
            self.seen.push(id.to_string());
        }
    }

    fn tooltip(&self, comments: &HashMap<String, String>) -> String {
        self.seen
            .iter()
            .filter_map(|id| comments.get(id).map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Split the buffer on line-break markers into trimmed non-blank blocks,
    /// one unit per block. A paragraph with no non-blank block still yields
    /// one unit so blank paragraphs keep their position in the sequence.
    fn into_units(self, comments: &HashMap<String, String>) -> Vec<ParagraphUnit> {
        let tooltip = self.tooltip(comments);
        let blocks: Vec<&str> = self
            .buf
            .split('\n')
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .collect();
        if blocks.is_empty() {
            return vec![ParagraphUnit::new(self.buf.clone(), tooltip)];
        }
        blocks
            .into_iter()
            .map(|b| ParagraphUnit::new(b, tooltip.clone()))
            .collect()
    }
}

/// Extract the ordered paragraph units of the document body, with comment
/// summaries resolved through `comments` (ids absent from the map are
/// skipped).
pub fn extract_paragraphs_with_tooltip(
    pkg: &DocPackage,
    comments: &HashMap<String, String>,
) -> Result<Vec<ParagraphUnit>> {
    let part = parse_xml_part(DOCUMENT_PART, pkg.document_xml()?)?;
    let units = paragraphs_from_part(&part, comments);
    debug!("extracted {} paragraph units", units.len());
    Ok(units)
}

pub fn paragraphs_from_part(
    part: &XmlPart,
    comments: &HashMap<String, String>,
) -> Vec<ParagraphUnit> {
    let mut units: Vec<ParagraphUnit> = Vec::new();
    let mut walk: Option<ParagraphWalk> = None;
    let mut in_text = false;

    for ev in &part.events {
        match ev {
            XmlEvent::Start { name, attrs } => {
                if name == "w:p" {
                    walk = Some(ParagraphWalk::default());
                    in_text = false;
                } else if let Some(w) = walk.as_mut() {
                    match name.as_str() {
                        "w:t" => in_text = true,
                        _ => visit_marker(w, name, attrs),
                    }
                }
            }
            XmlEvent::Empty { name, attrs } => {
                if name == "w:p" {
                    // An empty paragraph element still occupies a position.
                    units.extend(ParagraphWalk::default().into_units(comments));
                } else if let Some(w) = walk.as_mut() {
                    visit_marker(w, name, attrs);
                }
            }
            XmlEvent::Text { text } => {
                if in_text {
                    if let Some(w) = walk.as_mut() {
                        w.on_text(text);
                    }
                }
            }
            XmlEvent::End { name } => {
                if name == "w:p" {
                    if let Some(w) = walk.take() {
                        units.extend(w.into_units(comments));
                    }
                    in_text = false;
                } else if name == "w:t" {
                    in_text = false;
                }
            }
        }
    }
    units
}

fn visit_marker(walk: &mut ParagraphWalk, name: &str, attrs: &[(String, String)]) {
    match name {
        "w:br" | "w:cr" => walk.on_break(),
        "w:commentRangeStart" => {
            if let Some(id) = find_attr(attrs, "w:id") {
                walk.on_range_start(id);
            }
        }
        "w:commentRangeEnd" => walk.on_range_end(),
        "w:commentReference" => {
            if let Some(id) = find_attr(attrs, "w:id") {
                walk.on_reference(id);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{paragraphs_from_part, ParagraphUnit};
    use crate::docx::xml::parse_xml_part;

    fn comments(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn units_of(xml: &str, comments: &HashMap<String, String>) -> Vec<ParagraphUnit> {
        let part = parse_xml_part("word/document.xml", xml.as_bytes()).expect("parse");
        paragraphs_from_part(&part, comments)
    }

    #[test]
    fn breaks_split_paragraph_into_blocks_sharing_tooltip() {
        let xml = r#"<w:document><w:body><w:p>
            <w:commentRangeStart w:id="3"/>
            <w:r><w:t>first line</w:t></w:r>
            <w:r><w:br/><w:t>second line</w:t></w:r>
            <w:commentRangeEnd w:id="3"/>
        </w:p></w:body></w:document>"#;
        let units = units_of(xml, &comments(&[("3", "💬 Alice: check")]));
        assert_eq!(
            units,
            vec![
                ParagraphUnit::new("first line", "💬 Alice: check"),
                ParagraphUnit::new("second line", "💬 Alice: check"),
            ]
        );
    }

    #[test]
    fn blank_paragraph_keeps_its_position() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>a</w:t></w:r></w:p>
            <w:p/>
            <w:p><w:r><w:t>b</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let units = units_of(xml, &HashMap::new());
        let texts: Vec<&str> = units.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "", "b"]);
    }

    #[test]
    fn closed_range_still_contributes_to_tooltip() {
        let xml = r#"<w:document><w:body><w:p>
            <w:commentRangeStart w:id="1"/>
            <w:r><w:t>annotated</w:t></w:r>
            <w:commentRangeEnd w:id="1"/>
            <w:r><w:commentReference w:id="1"/></w:r>
        </w:p></w:body></w:document>"#;
        let units = units_of(xml, &comments(&[("1", "💬 Bob: note")]));
        assert_eq!(units, vec![ParagraphUnit::new("annotated", "💬 Bob: note")]);
    }

    #[test]
    fn nested_ranges_union_in_first_push_order() {
        let xml = r#"<w:document><w:body><w:p>
            <w:commentRangeStart w:id="2"/>
            <w:commentRangeStart w:id="5"/>
            <w:r><w:t>overlapping</w:t></w:r>
            <w:commentRangeEnd w:id="5"/>
            <w:commentRangeEnd w:id="2"/>
        </w:p></w:body></w:document>"#;
        let units = units_of(
            xml,
            &comments(&[("2", "💬 A: outer"), ("5", "💬 B: inner")]),
        );
        assert_eq!(units[0].tooltip, "💬 A: outer\n💬 B: inner");
    }

    #[test]
    fn unknown_ids_and_unbalanced_ends_are_ignored() {
        let xml = r#"<w:document><w:body><w:p>
            <w:commentRangeEnd w:id="9"/>
            <w:commentRangeStart w:id="8"/>
            <w:r><w:t>text</w:t></w:r>
        </w:p></w:body></w:document>"#;
        let units = units_of(xml, &HashMap::new());
        assert_eq!(units, vec![ParagraphUnit::new("text", "")]);
    }

    #[test]
    fn text_outside_runs_is_not_captured() {
        let xml = r#"<w:document><w:body><w:p>stray<w:r><w:t>kept</w:t></w:r></w:p></w:body></w:document>"#;
        let units = units_of(xml, &HashMap::new());
        assert_eq!(units, vec![ParagraphUnit::new("kept", "")]);
    }
}
