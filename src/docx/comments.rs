use std::collections::HashMap;

use log::debug;

use super::package::{DocPackage, COMMENTS_PART};
use super::xml::{find_attr, parse_xml_part, XmlEvent, XmlPart};
use crate::error::Result;

const UNKNOWN_AUTHOR: &str = "unknown";

/// Extract the comments store as a map from comment id to a formatted
/// `💬 author: text` line.
///
/// A package without a comments part has no comments; that is not an error.
pub fn extract_comments(pkg: &DocPackage) -> Result<HashMap<String, String>> {
    let Some(bytes) = pkg.comments_xml() else {
        return Ok(HashMap::new());
    };
    let part = parse_xml_part(COMMENTS_PART, bytes)?;
    let comments = comments_from_part(&part);
    debug!("extracted {} comments", comments.len());
    Ok(comments)
}

/// Walk the comments part. Comment text is the concatenation of every text
/// node under the comment element, trimmed. Comments without an id are
/// skipped.
pub fn comments_from_part(part: &XmlPart) -> HashMap<String, String> {
    let mut comments: HashMap<String, String> = HashMap::new();
    let mut current: Option<(String, String, String)> = None;

    for ev in &part.events {
        match ev {
            XmlEvent::Start { name, attrs } if name == "w:comment" => {
                let author = find_attr(attrs, "w:author")
                    .unwrap_or(UNKNOWN_AUTHOR)
                    .to_string();
                current = find_attr(attrs, "w:id").map(|id| (id.to_string(), author, String::new()));
            }
            XmlEvent::Text { text } => {
                if let Some((_, _, buf)) = current.as_mut() {
                    buf.push_str(text);
                }
            }
            XmlEvent::End { name } if name == "w:comment" => {
                if let Some((id, author, text)) = current.take() {
                    comments.insert(id, format!("💬 {author}: {}", text.trim()));
                }
            }
            _ => {}
        }
    }
    comments
}
