//! Small helpers shared by the XML feed parsers.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Local (namespace-stripped) element name.
pub(super) fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

/// Unescaped attribute value, `None` when absent or unreadable.
pub(super) fn attribute(element: &BytesStart<'_>, name: &str) -> Option<String> {
    element
        .try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// Returns the lowercased local name of the first element in an XML document.
pub(super) fn root_element(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Some(local_name(&e).to_lowercase());
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

/// Formats a reader error with its byte position.
pub(super) fn describe_error(reader: &Reader<&[u8]>, error: quick_xml::Error) -> String {
    format!("XML error at position {}: {}", reader.buffer_position(), error)
}
