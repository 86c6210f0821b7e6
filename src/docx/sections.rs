use std::collections::HashMap;

use log::debug;

use super::package::{DocPackage, DOCUMENT_PART};
use super::xml::{find_attr, parse_xml_part, XmlEvent, XmlPart};
use crate::error::Result;

/// Reserved title for content preceding the first heading.
pub const NO_SECTION: &str = "no section";

/// Accumulator threaded through the single-pass walk: the title currently
/// in effect plus the sections gathered so far.
struct SectionFold {
    current: String,
    sections: HashMap<String, Vec<String>>,
}

impl SectionFold {
    fn new() -> Self {
        let mut sections = HashMap::new();
        sections.insert(NO_SECTION.to_string(), Vec::new());
        Self {
            current: NO_SECTION.to_string(),
            sections,
        }
    }

    fn on_heading(&mut self, title: &str) {
        self.current = title.to_string();
        self.sections.entry(self.current.clone()).or_default();
    }

    fn on_body_text(&mut self, text: &str) {
        self.sections
            .entry(self.current.clone())
            .or_default()
            .push(text.to_string());
    }

    fn finish(self) -> HashMap<String, Vec<String>> {
        self.sections
    }
}

/// Extract the document's sections keyed by heading title.
///
/// A paragraph is a heading when its style id starts with `heading`
/// (case-insensitive) and its text is non-blank. Sections are keyed by
/// title, so a repeated title accumulates into the same list. Blank
/// non-heading paragraphs are dropped.
pub fn extract_sections(pkg: &DocPackage) -> Result<HashMap<String, Vec<String>>> {
    let part = parse_xml_part(DOCUMENT_PART, pkg.document_xml()?)?;
    let sections = sections_from_part(&part);
    debug!("extracted {} sections", sections.len());
    Ok(sections)
}

pub fn sections_from_part(part: &XmlPart) -> HashMap<String, Vec<String>> {
    let mut fold = SectionFold::new();

    let mut in_p = false;
    let mut in_text = false;
    let mut is_heading = false;
    let mut buf = String::new();

    for ev in &part.events {
        match ev {
            XmlEvent::Start { name, attrs } => {
                if name == "w:p" {
                    in_p = true;
                    in_text = false;
                    is_heading = false;
                    buf.clear();
                } else if in_p {
                    match name.as_str() {
                        "w:t" => in_text = true,
                        "w:pStyle" => is_heading |= heading_style(attrs),
                        _ => {}
                    }
                }
            }
            XmlEvent::Empty { name, attrs } => {
                if in_p && name == "w:pStyle" {
                    is_heading |= heading_style(attrs);
                }
            }
            XmlEvent::Text { text } => {
                if in_p && in_text {
                    buf.push_str(text);
                }
            }
            XmlEvent::End { name } => {
                if name == "w:p" {
                    let text = buf.trim();
                    if is_heading && !text.is_empty() {
                        fold.on_heading(text);
                    } else if !text.is_empty() {
                        fold.on_body_text(text);
                    }
                    in_p = false;
                    in_text = false;
                } else if name == "w:t" {
                    in_text = false;
                }
            }
        }
    }
    fold.finish()
}

fn heading_style(attrs: &[(String, String)]) -> bool {
    find_attr(attrs, "w:val")
        .map(|v| v.to_lowercase().starts_with("heading"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{sections_from_part, NO_SECTION};
    use crate::docx::xml::parse_xml_part;

    fn sections_of(xml: &str) -> HashMap<String, Vec<String>> {
        let part = parse_xml_part("word/document.xml", xml.as_bytes()).expect("parse");
        sections_from_part(&part)
    }

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    fn heading(style: &str, text: &str) -> String {
        format!(
            "<w:p><w:pPr><w:pStyle w:val=\"{style}\"/></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"
        )
    }

    fn doc(body: &str) -> String {
        format!("<w:document><w:body>{body}</w:body></w:document>")
    }

    #[test]
    fn no_headings_yields_single_no_section() {
        let xml = doc(&[para("one"), para("two")].concat());
        let sections = sections_of(&xml);
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections.get(NO_SECTION).unwrap(),
            &vec!["one".to_string(), "two".to_string()]
        );
    }

    #[test]
    fn heading_switches_current_section() {
        let body = [
            para("preamble"),
            heading("Heading1", "Payment"),
            para("pay on time"),
            heading("Heading2", "Termination"),
            para("thirty days notice"),
        ]
        .concat();
        let sections = sections_of(&doc(&body));
        assert_eq!(
            sections.get(NO_SECTION).unwrap(),
            &vec!["preamble".to_string()]
        );
        assert_eq!(
            sections.get("Payment").unwrap(),
            &vec!["pay on time".to_string()]
        );
        assert_eq!(
            sections.get("Termination").unwrap(),
            &vec!["thirty days notice".to_string()]
        );
    }

    #[test]
    fn repeated_title_accumulates() {
        let body = [
            heading("heading1", "Scope"),
            para("a"),
            heading("HEADING1", "Scope"),
            para("b"),
        ]
        .concat();
        let sections = sections_of(&doc(&body));
        assert_eq!(
            sections.get("Scope").unwrap(),
            &vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn blank_and_blank_heading_paragraphs_are_dropped() {
        let body = [
            heading("Heading1", " "),
            para("kept"),
            "<w:p><w:r><w:t>  </w:t></w:r></w:p>".to_string(),
        ]
        .concat();
        let sections = sections_of(&doc(&body));
        // The blank heading does not open a section; its paragraph is blank
        // too, so everything stays under the sentinel.
        assert_eq!(sections.len(), 1);
        assert_eq!(sections.get(NO_SECTION).unwrap(), &vec!["kept".to_string()]);
    }

    #[test]
    fn non_heading_styles_are_body_text() {
        let body = [heading("BodyText", "styled para"), para("x")].concat();
        let sections = sections_of(&doc(&body));
        assert_eq!(
            sections.get(NO_SECTION).unwrap(),
            &vec!["styled para".to_string(), "x".to_string()]
        );
    }
}
