use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Result;

/// One parsed XML event, owned and decoupled from the reader's buffer.
///
/// Only the event kinds the extractors consume are kept; declarations,
/// comments and processing instructions are dropped at parse time.
#[derive(Clone, Debug)]
pub enum XmlEvent {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Empty {
        name: String,
        attrs: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Text {
        text: String,
    },
}

/// A fully-buffered XML part of the package.
#[derive(Clone)]
pub struct XmlPart {
    pub name: String,
    pub events: Vec<XmlEvent>,
}

pub fn parse_xml_part(name: &str, xml_bytes: &[u8]) -> Result<XmlPart> {
    let mut reader = Reader::from_reader(xml_bytes);
    reader.config_mut().trim_text(false);

    let mut events: Vec<XmlEvent> = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let ev = reader.read_event_into(&mut buf).map_err(quick_xml::Error::from)?;
        match ev {
            Event::Eof => break,
            Event::Start(s) => {
                events.push(XmlEvent::Start {
                    name: bytes_to_string(s.name().as_ref()),
                    attrs: collect_attrs(&s)?,
                });
            }
            Event::End(e) => {
                events.push(XmlEvent::End {
                    name: bytes_to_string(e.name().as_ref()),
                });
            }
            Event::Empty(s) => {
                events.push(XmlEvent::Empty {
                    name: bytes_to_string(s.name().as_ref()),
                    attrs: collect_attrs(&s)?,
                });
            }
            Event::Text(t) => {
                let txt = t.unescape().map_err(quick_xml::Error::from)?.into_owned();
                events.push(XmlEvent::Text { text: txt });
            }
            Event::CData(t) => {
                events.push(XmlEvent::Text {
                    text: bytes_to_string(t.into_inner()),
                });
            }
            _ => {}
        }
    }

    Ok(XmlPart {
        name: name.to_string(),
        events,
    })
}

fn collect_attrs(s: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attrs: Vec<(String, String)> = Vec::new();
    for a in s.attributes() {
        let a = a.map_err(quick_xml::Error::from)?;
        let key = bytes_to_string(a.key.as_ref());
        let val = a
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        attrs.push((key, val));
    }
    Ok(attrs)
}

fn bytes_to_string(bytes: impl AsRef<[u8]>) -> String {
    String::from_utf8_lossy(bytes.as_ref()).into_owned()
}

pub fn find_attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::{find_attr, parse_xml_part, XmlEvent};

    #[test]
    fn parse_unescapes_text_and_attrs() {
        let xml = br#"<?xml version="1.0"?><w:p w:val="a&amp;b"><w:t>x &lt; y</w:t></w:p>"#;
        let part = parse_xml_part("test.xml", xml).expect("parse xml");

        match &part.events[0] {
            XmlEvent::Start { name, attrs } => {
                assert_eq!(name, "w:p");
                assert_eq!(find_attr(attrs, "w:val"), Some("a&b"));
            }
            other => panic!("expected start event, got {other:?}"),
        }
        assert!(part
            .events
            .iter()
            .any(|e| matches!(e, XmlEvent::Text { text } if text == "x < y")));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let xml = b"<w:document><w:body></w:document>";
        assert!(parse_xml_part("bad.xml", xml).is_err());
    }
}
