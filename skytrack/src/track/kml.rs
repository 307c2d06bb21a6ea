//! KML share-feed parser.
//!
//! Share feeds publish one `Placemark` per position report:
//!
//! ```text
//! <Placemark>
//!   <name>Ada Glider</name>
//!   <TimeStamp><when>2024-03-14T17:21:00Z</when></TimeStamp>
//!   <ExtendedData>
//!     <Data name="Latitude"><value>46.5</value></Data>
//!     <Data name="Velocity"><value>31.0 km/h</value></Data>
//!     ...
//!   </ExtendedData>
//!   <Point><coordinates>7.9,46.5,2150.2</coordinates></Point>
//! </Placemark>
//! ```
//!
//! `ExtendedData` values take precedence over the geometry, except for the
//! timestamp where `<when>` (RFC 3339) is preferred over `Time UTC`. The
//! trailing `LineString` placemark carries no timestamp and is dropped during
//! normalization.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::record::RawTrackRecord;
use super::xml::{attribute, describe_error, local_name};

/// Fields collected from one `Placemark` element.
#[derive(Debug, Default)]
struct Placemark {
    name: Option<String>,
    when: Option<String>,
    coordinates: Option<String>,
    /// `ExtendedData` values keyed by lowercased `Data/@name`.
    extended: HashMap<String, String>,
}

impl Placemark {
    fn extended(&self, key: &str) -> Option<String> {
        self.extended.get(key).cloned()
    }

    fn into_record(self) -> RawTrackRecord {
        let mut geometry = self
            .coordinates
            .as_deref()
            .map(|c| c.split(',').map(|v| v.trim().to_string()).collect::<Vec<_>>())
            .unwrap_or_default()
            .into_iter();
        // KML orders coordinates lon,lat[,alt]
        let lon = geometry.next();
        let lat = geometry.next();
        let alt = geometry.next();

        RawTrackRecord {
            pilot_name: self.extended("name").or_else(|| self.name.clone()),
            timestamp: self.when.clone().or_else(|| self.extended("time utc")),
            latitude: self.extended("latitude").or(lat),
            longitude: self.extended("longitude").or(lon),
            speed: self
                .extended("velocity")
                .or_else(|| self.extended("speed")),
            altitude: self.extended("elevation").or(alt),
            in_emergency: self.extended("in emergency"),
        }
    }
}

/// Parses a KML document into raw records, one per `Placemark`.
pub(super) fn parse(xml: &str) -> Result<Vec<RawTrackRecord>, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut records = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut current: Option<Placemark> = None;
    let mut data_name: Option<String> = None;
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
                    "Placemark" => current = Some(Placemark::default()),
                    "Data" if current.is_some() => {
                        data_name = attribute(&e, "name").map(|n| n.trim().to_lowercase());
                    }
                    _ => {}
                }
                path.push(name);
                text.clear();
            }
            Ok(Event::Empty(e)) => {
                if path.is_empty() {
                    check_root(&local_name(&e), saw_root)?;
                    saw_root = true;
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

                let Some(placemark) = current.as_mut() else {
                    continue;
                };
                match (name.as_str(), parent) {
                    ("Placemark", _) => {
                        if let Some(done) = current.take() {
                            records.push(done.into_record());
                        }
                    }
                    ("value", Some("Data")) => {
                        if let Some(key) = data_name.clone() {
                            if !value.is_empty() {
                                placemark.extended.insert(key, value);
                            }
                        }
                    }
                    ("Data", _) => data_name = None,
                    ("name", Some("Placemark")) if !value.is_empty() => {
                        placemark.name = Some(value)
                    }
                    ("when", Some("TimeStamp")) if !value.is_empty() => {
                        placemark.when = Some(value)
                    }
                    ("coordinates", Some("Point")) if !value.is_empty() => {
                        placemark.coordinates = Some(value)
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

fn check_root(name: &str, saw_root: bool) -> Result<(), String> {
    if saw_root {
        return Err("multiple root elements".to_string());
    }
    if !name.eq_ignore_ascii_case("kml") {
        return Err(format!("expected <kml> root element, found <{}>", name));
    }
    Ok(())
}
