//! Content negotiation
//!
//! Records travel as compact JSON (the default) or as XML with the record
//! type as the root element. Request bodies follow `Content-Type`,
//! responses follow `Accept`.

use axum::http::{header, HeaderMap, HeaderValue};
use quick_xml::{
    escape::escape,
    events::{BytesText, Event},
    Reader, Writer,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;

/// Wire format of a record body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Representation {
    #[default]
    Json,
    Xml,
}

impl Representation {
    pub const JSON_MIME: &'static str = "application/json";
    pub const XML_MIME: &'static str = "application/xml";

    /// Maps one media type (parameters ignored) to a representation.
    pub fn from_media_type(media: &str) -> Option<Self> {
        let essence = media.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/json" => Some(Representation::Json),
            "application/xml" | "text/xml" => Some(Representation::Xml),
            _ => None,
        }
    }

    /// Format of the request body; JSON when unspecified.
    pub fn of_request(headers: &HeaderMap) -> Self {
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(Self::from_media_type)
            .unwrap_or_default()
    }

    /// Response format: first recognized entry of `Accept`, JSON otherwise.
    pub fn negotiate(headers: &HeaderMap) -> Self {
        headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .find_map(Self::from_media_type)
            .unwrap_or_default()
    }

    pub fn content_type(self) -> HeaderValue {
        match self {
            Representation::Json => HeaderValue::from_static(Self::JSON_MIME),
            Representation::Xml => HeaderValue::from_static(Self::XML_MIME),
        }
    }

    pub fn decode<T: DeserializeOwned>(self, body: &[u8]) -> Result<T, ApiError> {
        match self {
            Representation::Json => {
                serde_json::from_slice(body).map_err(|err| ApiError::DecodeFailure(err.to_string()))
            }
            Representation::Xml => {
                let text = std::str::from_utf8(body)
                    .map_err(|err| ApiError::DecodeFailure(err.to_string()))?;
                quick_xml::de::from_str(text)
                    .map_err(|err| ApiError::DecodeFailure(err.to_string()))
            }
        }
    }

    pub fn encode<T: Serialize>(self, value: &T) -> Result<String, ApiError> {
        match self {
            Representation::Json => serde_json::to_string(value).map_err(encode_failure),
            Representation::Xml => {
                let xml = quick_xml::se::to_string(value).map_err(encode_failure)?;
                pin_whitespace(&xml)
            }
        }
    }
}

fn encode_failure(err: impl std::fmt::Display) -> ApiError {
    ApiError::StoreUnavailable(err.to_string())
}

fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Rewrites every text node so its whitespace survives decoding.
///
/// The deserializer trims raw whitespace at the edges of text, but keeps
/// whitespace written as character references, so edge whitespace and the
/// control whitespace inside the text are emitted as `&#N;`.
fn pin_whitespace(xml: &str) -> Result<String, ApiError> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());

    loop {
        let event = match reader.read_event().map_err(encode_failure)? {
            Event::Eof => break,
            Event::Text(text) => {
                let raw = text.unescape().map_err(encode_failure)?;
                Event::Text(BytesText::from_escaped(escape_text(&raw)))
            }
            other => other,
        };
        writer.write_event(event).map_err(encode_failure)?;
    }

    String::from_utf8(writer.into_inner()).map_err(encode_failure)
}

fn escape_text(raw: &str) -> String {
    let start = raw.len() - raw.trim_start_matches(is_xml_space).len();
    let end = raw.trim_end_matches(is_xml_space).len().max(start);

    let mut out = String::with_capacity(raw.len() + 8);
    push_char_refs(&mut out, &raw[..start]);
    for c in escape(&raw[start..end]).chars() {
        if is_xml_space(c) && c != ' ' {
            out.push_str(&format!("&#{};", c as u32));
        } else {
            out.push(c);
        }
    }
    push_char_refs(&mut out, &raw[end..]);
    out
}

fn push_char_refs(out: &mut String, text: &str) {
    for c in text.chars() {
        out.push_str(&format!("&#{};", c as u32));
    }
}
