//! Encoding and decoding of save files
//!
//! - Binary: `bitcode` encoding of `SaveData`, value tags included. Opaque,
//!   only readable by the same build.
//! - JSON: `{"key_value_pairs": [{"key": .., "value": ..}]}`, pretty printed.
//! - XML: `<SaveData><KeyValuePair><key/><value/></KeyValuePair>..</SaveData>`.
//!
//! JSON and XML store every value as its string form. Decoding is strict: a
//! missing pair list, a foreign root element or an unknown child is an error,
//! and text is kept byte for byte, surrounding whitespace included.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use super::data::SaveData;
use super::types::{DataType, KeyValuePair, SaveError, SaveValue};

#[derive(Debug, Serialize, Deserialize)]
struct PairRecord {
    key: String,
    value: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonDocument {
    key_value_pairs: Vec<PairRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename = "SaveData")]
struct XmlDocument {
    #[serde(rename = "KeyValuePair")]
    key_value_pairs: Vec<PairRecord>,
}

fn to_records(data: &SaveData) -> Vec<PairRecord> {
    data.iter()
        .map(|pair| PairRecord {
            key: pair.key.clone(),
            value: pair.value.to_string(),
        })
        .collect()
}

fn from_records(records: Vec<PairRecord>) -> SaveData {
    SaveData::from_pairs(records.into_iter().map(|record| KeyValuePair {
        key: record.key,
        value: SaveValue::String(record.value),
    }))
}

/// Serializes `data` in the given format
pub fn encode(data_type: DataType, data: &SaveData) -> Result<Vec<u8>, SaveError> {
    match data_type {
        DataType::Binary => Ok(bitcode::encode(data)),
        DataType::Json => {
            let document = JsonDocument {
                key_value_pairs: to_records(data),
            };
            Ok(serde_json::to_vec_pretty(&document)?)
        }
        DataType::Xml => {
            let document = XmlDocument {
                key_value_pairs: to_records(data),
            };
            let xml = quick_xml::se::to_string(&document)
                .map_err(|e| SaveError::Xml(e.to_string()))?;
            Ok(xml.into_bytes())
        }
    }
}

/// Parses save file contents in the given format
pub fn decode(data_type: DataType, bytes: &[u8]) -> Result<SaveData, SaveError> {
    match data_type {
        DataType::Binary => Ok(bitcode::decode::<SaveData>(bytes)?),
        DataType::Json => {
            let document: JsonDocument = serde_json::from_slice(bytes)?;
            Ok(from_records(document.key_value_pairs))
        }
        DataType::Xml => {
            let text = std::str::from_utf8(bytes).map_err(xml_error)?;
            Ok(from_records(decode_xml(text)?))
        }
    }
}

fn xml_error(e: impl std::fmt::Display) -> SaveError {
    SaveError::Xml(e.to_string())
}

fn unexpected(event: &Event<'_>, inside: &str) -> SaveError {
    SaveError::Xml(format!("unexpected {:?} in <{}>", event, inside))
}

fn is_named(start: &BytesStart<'_>, name: &str) -> bool {
    start.name().as_ref() == name.as_bytes()
}

/// Whitespace between elements, as written by pretty printers
fn is_blank(event: &Event<'_>) -> bool {
    match event {
        Event::Text(text) => text.iter().all(u8::is_ascii_whitespace),
        Event::Comment(_) => true,
        _ => false,
    }
}

/// Reads the pair list. Text is never trimmed, so padded keys and values
/// load exactly as they were saved.
fn decode_xml(text: &str) -> Result<Vec<PairRecord>, SaveError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut records = None;
    loop {
        let event = reader.read_event().map_err(xml_error)?;
        match event {
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Start(ref start) if records.is_none() && is_named(start, "SaveData") => {
                records = Some(read_pairs(&mut reader)?);
            }
            Event::Empty(ref start) if records.is_none() && is_named(start, "SaveData") => {
                records = Some(Vec::new());
            }
            Event::Eof => break,
            ref other if is_blank(other) => {}
            ref other => return Err(unexpected(other, "document")),
        }
    }

    records.ok_or_else(|| SaveError::Xml("missing <SaveData> root element".to_string()))
}

fn read_pairs(reader: &mut Reader<&[u8]>) -> Result<Vec<PairRecord>, SaveError> {
    let mut records = Vec::new();
    loop {
        let event = reader.read_event().map_err(xml_error)?;
        match event {
            Event::Start(ref start) if is_named(start, "KeyValuePair") => {
                records.push(read_pair(reader)?);
            }
            Event::End(_) => return Ok(records),
            ref other if is_blank(other) => {}
            ref other => return Err(unexpected(other, "SaveData")),
        }
    }
}

fn read_pair(reader: &mut Reader<&[u8]>) -> Result<PairRecord, SaveError> {
    let mut key = None;
    let mut value = None;
    loop {
        let event = reader.read_event().map_err(xml_error)?;
        let (slot, text) = match event {
            Event::Start(ref start) if is_named(start, "key") => (&mut key, read_text(reader)?),
            Event::Start(ref start) if is_named(start, "value") => (&mut value, read_text(reader)?),
            Event::Empty(ref start) if is_named(start, "key") => (&mut key, String::new()),
            Event::Empty(ref start) if is_named(start, "value") => (&mut value, String::new()),
            Event::End(_) => break,
            ref other if is_blank(other) => continue,
            ref other => return Err(unexpected(other, "KeyValuePair")),
        };
        if slot.replace(text).is_some() {
            return Err(SaveError::Xml("repeated child in <KeyValuePair>".to_string()));
        }
    }

    match (key, value) {
        (Some(key), Some(value)) => Ok(PairRecord { key, value }),
        _ => Err(SaveError::Xml("<KeyValuePair> needs both <key> and <value>".to_string())),
    }
}

/// Collects the text of a leaf element up to its end tag
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, SaveError> {
    let mut text = String::new();
    loop {
        let event = reader.read_event().map_err(xml_error)?;
        match event {
            Event::Text(ref raw) => text.push_str(&raw.unescape().map_err(xml_error)?),
            Event::CData(ref raw) => text.push_str(std::str::from_utf8(raw).map_err(xml_error)?),
            Event::Comment(_) => {}
            Event::End(_) => return Ok(text),
            ref other => return Err(unexpected(other, "key/value")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SaveData {
        let mut data = SaveData::new();
        data.set_int("i_test_7", 7);
        data.set_float("f_test_4.2", 4.2);
        data.set_string("s_test_helloWorld", "helloWorld");
        data
    }

    #[test]
    fn test_typed_reads_survive_every_format() {
        for data_type in DataType::ALL {
            let bytes = encode(data_type, &sample()).unwrap();
            let mut loaded = decode(data_type, &bytes).unwrap();

            assert_eq!(loaded.get_int("i_test_7", 0).unwrap(), 7, "{}", data_type);
            assert_eq!(loaded.get_float("f_test_4.2", 0.0).unwrap(), 4.2, "{}", data_type);
            assert_eq!(
                loaded.get_string("s_test_helloWorld", "").unwrap(),
                "helloWorld",
                "{}",
                data_type
            );
        }
    }

    #[test]
    fn test_float_as_int_agrees_across_formats() {
        let mut data = SaveData::new();
        data.set_float("whole", 3.0);
        data.set_float("fraction", 4.2);

        for data_type in DataType::ALL {
            let bytes = encode(data_type, &data).unwrap();
            let mut loaded = decode(data_type, &bytes).unwrap();

            assert_eq!(loaded.get_int("whole", 0).unwrap(), 3, "{}", data_type);
            assert!(
                matches!(loaded.get_int("fraction", 0), Err(SaveError::InvalidValue { .. })),
                "{}",
                data_type
            );
        }
        let mut in_memory = data.clone();
        assert_eq!(in_memory.get_int("whole", 0).unwrap(), 3);
        assert!(in_memory.get_int("fraction", 0).is_err());
    }

    #[test]
    fn test_binary_keeps_value_tags() {
        let bytes = encode(DataType::Binary, &sample()).unwrap();
        assert_eq!(decode(DataType::Binary, &bytes).unwrap(), sample());
    }

    #[test]
    fn test_json_layout() {
        let bytes = encode(DataType::Json, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let pairs = value["key_value_pairs"].as_array().unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0]["key"], "i_test_7");
        assert_eq!(pairs[0]["value"], "7");
        assert_eq!(pairs[2]["value"], "helloWorld");
    }

    #[test]
    fn test_xml_layout() {
        let mut data = SaveData::new();
        data.set_int("i", 7);
        let xml = String::from_utf8(encode(DataType::Xml, &data).unwrap()).unwrap();

        assert_eq!(
            xml,
            "<SaveData><KeyValuePair><key>i</key><value>7</value></KeyValuePair></SaveData>"
        );
    }

    #[test]
    fn test_xml_escapes_markup() {
        let mut data = SaveData::new();
        data.set_string("s", "<a & b>");
        let bytes = encode(DataType::Xml, &data).unwrap();
        let mut loaded = decode(DataType::Xml, &bytes).unwrap();

        assert_eq!(loaded.get_string("s", "").unwrap(), "<a & b>");
    }

    #[test]
    fn test_empty_data_every_format() {
        for data_type in DataType::ALL {
            let bytes = encode(data_type, &SaveData::new()).unwrap();
            assert!(decode(data_type, &bytes).unwrap().is_empty(), "{}", data_type);
        }
    }

    #[test]
    fn test_padded_text_survives_every_format() {
        let mut data = SaveData::new();
        data.set_string("  padded  ", "  padded  ");
        data.set_string(" a", "\tline\n");
        data.set_string("blank", "   ");
        data.set_string("empty", "");

        for data_type in DataType::ALL {
            let bytes = encode(data_type, &data).unwrap();
            let mut loaded = decode(data_type, &bytes).unwrap();

            assert_eq!(loaded.get_string("  padded  ", "").unwrap(), "  padded  ", "{}", data_type);
            assert!(!loaded.has_key("padded"), "{}", data_type);
            assert_eq!(loaded.get_string(" a", "").unwrap(), "\tline\n", "{}", data_type);
            assert_eq!(loaded.get_string("blank", "x").unwrap(), "   ", "{}", data_type);
            assert_eq!(loaded.get_string("empty", "x").unwrap(), "", "{}", data_type);
            assert_eq!(loaded.len(), 4, "{}", data_type);
        }
    }

    #[test]
    fn test_xml_accepts_pretty_printed_input() {
        let xml = "<?xml version=\"1.0\"?>\n<SaveData>\n  <KeyValuePair>\n    <key>i</key>\n    <value>7</value>\n  </KeyValuePair>\n  <!-- note -->\n</SaveData>\n";
        let mut loaded = decode(DataType::Xml, xml.as_bytes()).unwrap();
        assert_eq!(loaded.get_int("i", 0).unwrap(), 7);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_malformed_content_is_error() {
        assert!(matches!(
            decode(DataType::Json, b"{not json"),
            Err(SaveError::Json(_))
        ));
        assert!(matches!(decode(DataType::Json, b"{}"), Err(SaveError::Json(_))));
        assert!(matches!(
            decode(
                DataType::Json,
                br#"{"m_keyValuePairs":[{"key":"i","value":"7"}]}"#
            ),
            Err(SaveError::Json(_))
        ));
        assert!(matches!(
            decode(DataType::Xml, b"<SaveData><KeyValuePair>"),
            Err(SaveError::Xml(_))
        ));
        for xml in [
            "",
            "<Other><x/></Other>",
            "<SaveData><Other/></SaveData>",
            "<SaveData><KeyValuePair><key>i</key></KeyValuePair></SaveData>",
            "<SaveData><KeyValuePair><key>i</key><value>1</value><extra/></KeyValuePair></SaveData>",
            "<SaveData><KeyValuePair><key>i</key><key>j</key><value>1</value></KeyValuePair></SaveData>",
            "<SaveData/><SaveData/>",
        ] {
            assert!(
                matches!(decode(DataType::Xml, xml.as_bytes()), Err(SaveError::Xml(_))),
                "{:?} should be rejected",
                xml
            );
        }
        let bytes = encode(DataType::Binary, &sample()).unwrap();
        assert!(matches!(
            decode(DataType::Binary, &bytes[..1]),
            Err(SaveError::Binary(_))
        ));
    }
}
