//! GPX feed parser.
//!
//! Every `trkpt` and `wpt` becomes one record. GPX points do not carry a
//! pilot name of their own, so the enclosing `trk/name` is used, falling back
//! to `metadata/name`. Speed is read from any `speed` element below the point
//! (GPX 1.0 places it directly, 1.1 exporters put it in `extensions`).

use quick_xml::events::Event;
use quick_xml::Reader;

use super::record::RawTrackRecord;
use super::xml::{attribute, describe_error, local_name};

/// Parses a GPX document into raw records.
pub(super) fn parse(xml: &str) -> Result<Vec<RawTrackRecord>, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut records = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut current: Option<RawTrackRecord> = None;
    let mut metadata_name: Option<String> = None;
    let mut track_name: Option<String> = None;
    let mut text = String::new();
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                if path.is_empty() {
                    check_root(&name, saw_root)?;
                    saw_root = true;
                }
                match name.as_str() {
                    "trk" => track_name = None,
                    "trkpt" | "wpt" => current = Some(point_from_attributes(&e)),
                    _ => {}
                }
                path.push(name);
                text.clear();
            }
            Ok(Event::Empty(e)) => {
                let name = local_name(&e);
                if path.is_empty() {
                    check_root(&name, saw_root)?;
                    saw_root = true;
                } else if name == "trkpt" || name == "wpt" {
                    let mut point = point_from_attributes(&e);
                    point.pilot_name = pilot_name(&track_name, &metadata_name);
                    records.push(point);
                }
            }
            Ok(Event::Text(t)) => {
                let value = t.unescape().map_err(|e| describe_error(&reader, e))?;
                text.push_str(&value);
            }
            Ok(Event::CData(c)) => {
                text.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Ok(Event::End(_)) => {
                let name = path.pop().unwrap_or_default();
                let parent = path.last().map(String::as_str);
                let value = text.trim().to_string();
                text.clear();

                match (name.as_str(), parent) {
                    ("trkpt", _) | ("wpt", _) => {
                        if let Some(mut point) = current.take() {
                            point.pilot_name = pilot_name(&track_name, &metadata_name);
                            records.push(point);
                        }
                    }
                    ("name", Some("trk")) if !value.is_empty() => track_name = Some(value),
                    ("name", Some("metadata")) if !value.is_empty() => {
                        metadata_name = Some(value)
                    }
                    (field, _) if !value.is_empty() => {
                        if let Some(point) = current.as_mut() {
                            match field {
                                "time" => point.timestamp = Some(value),
                                "ele" => point.altitude = Some(value),
                                "speed" => point.speed = Some(value),
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(describe_error(&reader, e)),
            _ => {}
        }
    }

    if !saw_root {
        return Err("document has no root element".to_string());
    }
    Ok(records)
}

fn point_from_attributes(element: &quick_xml::events::BytesStart<'_>) -> RawTrackRecord {
    RawTrackRecord {
        latitude: attribute(element, "lat"),
        longitude: attribute(element, "lon"),
        ..RawTrackRecord::default()
    }
}

fn pilot_name(track_name: &Option<String>, metadata_name: &Option<String>) -> Option<String> {
    track_name.clone().or_else(|| metadata_name.clone())
}

fn check_root(name: &str, saw_root: bool) -> Result<(), String> {
    if saw_root {
        return Err("multiple root elements".to_string());
    }
    if !name.eq_ignore_ascii_case("gpx") {
        return Err(format!("expected <gpx> root element, found <{}>", name));
    }
    Ok(())
}
