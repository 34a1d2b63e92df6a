//! XML codec.
//!
//! XML documents identify their revision through the default namespace of
//! the root `bom` element. The root is scanned with a pull reader before any
//! tree mapping happens, so a wrong namespace is reported as such instead of
//! as whatever shape error the body would trigger.
//!
//! The serde layer of quick-xml trims raw whitespace around text content.
//! Before deserializing, whitespace at the edges of every text node that has
//! other content is rewritten as character references, which survive the trim
//! and unescape back to the original characters. Whitespace-only text nodes
//! are layout and stay as they are.

mod common;
mod v1_0;
mod v1_1;
mod v1_2;

use super::{BomDecoder, DecodeErrorKind, EncodeError, Encoding, FormatCodec, StructuralDecodeError};
use crate::model::{self, SchemaModel, SchemaVersion, VersionedBom};
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::marker::PhantomData;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Links a revision's document type to its XML representation.
pub trait XmlSchema: SchemaModel {
    #[doc(hidden)]
    type Document: Serialize + DeserializeOwned + for<'a> From<&'a Self> + Into<Self>;
}

impl XmlSchema for model::v1_0::Bom {
    type Document = v1_0::Document;
}

impl XmlSchema for model::v1_1::Bom {
    type Document = v1_1::Document;
}

impl XmlSchema for model::v1_2::Bom {
    type Document = v1_2::Document;
}

/// XML codec for the document type `B`.
pub struct XmlCodec<B> {
    pretty: bool,
    _bom: PhantomData<fn() -> B>,
}

impl<B> XmlCodec<B> {
    /// Codec that writes indented output.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pretty: true,
            _bom: PhantomData,
        }
    }

    /// Codec that writes everything on one line after the declaration.
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            pretty: false,
            _bom: PhantomData,
        }
    }

    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<B> Default for XmlCodec<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for XmlCodec<B> {
    fn clone(&self) -> Self {
        Self {
            pretty: self.pretty,
            _bom: PhantomData,
        }
    }
}

impl<B> std::fmt::Debug for XmlCodec<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlCodec")
            .field("version", &std::any::type_name::<B>())
            .field("pretty", &self.pretty)
            .finish()
    }
}

/// Name and namespace of the document element.
#[derive(Debug, PartialEq, Eq)]
struct RootElement {
    local_name: String,
    namespace: Option<String>,
}

/// Read up to the first element and report its name and namespace.
///
/// A prefixed root (`<cdx:bom xmlns:cdx="...">`) resolves its prefix binding;
/// an unprefixed root uses the default `xmlns`.
fn scan_root(content: &str) -> Result<RootElement, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => {
                let qname = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let (prefix, local_name) = match qname.split_once(':') {
                    Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
                    None => (None, qname.clone()),
                };
                let binding = prefix.map_or_else(|| "xmlns".to_string(), |p| format!("xmlns:{p}"));

                let mut namespace = None;
                for attr in e.attributes().filter_map(std::result::Result::ok) {
                    if attr.key.as_ref() == binding.as_bytes() {
                        let value = attr
                            .unescape_value()
                            .map_err(|err| format!("invalid namespace attribute: {err}"))?;
                        namespace = Some(value.into_owned());
                    }
                }
                return Ok(RootElement {
                    local_name,
                    namespace,
                });
            }
            Ok(Event::Eof) => return Err("document has no root element".to_string()),
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "XML error at position {}: {e}",
                    reader.buffer_position()
                ))
            }
        }
    }
}

const fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Escape leading and trailing whitespace of raw (still escaped) text.
fn protect_edges(raw: &str) -> Cow<'_, str> {
    let trimmed_start = raw.trim_start_matches(is_xml_space);
    let core = trimmed_start.trim_end_matches(is_xml_space);
    if core.is_empty() || core.len() == raw.len() {
        return Cow::Borrowed(raw);
    }

    let leading = &raw[..raw.len() - trimmed_start.len()];
    let trailing = &trimmed_start[core.len()..];
    let mut out = String::with_capacity(raw.len() + 5 * (leading.len() + trailing.len()));
    for c in leading.chars() {
        let _ = write!(out, "&#{};", u32::from(c));
    }
    out.push_str(core);
    for c in trailing.chars() {
        let _ = write!(out, "&#{};", u32::from(c));
    }
    Cow::Owned(out)
}

/// Copy the document, protecting edge whitespace of every text node.
fn protect_text_whitespace(content: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(content);
    let mut writer = Writer::new(Vec::with_capacity(content.len()));

    loop {
        let event = match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => event,
            Err(e) => {
                return Err(format!(
                    "XML error at position {}: {e}",
                    reader.buffer_position()
                ))
            }
        };
        let written = match event {
            Event::Text(text) => {
                let raw = std::str::from_utf8(&text).map_err(|e| e.to_string())?;
                let protected = protect_edges(raw).into_owned();
                writer.write_event(Event::Text(BytesText::from_escaped(protected)))
            }
            other => writer.write_event(other),
        };
        written.map_err(|e| e.to_string())?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}

impl<B> FormatCodec<B> for XmlCodec<B>
where
    B: XmlSchema,
{
    fn version(&self) -> SchemaVersion {
        B::VERSION
    }

    fn encoding(&self) -> Encoding {
        Encoding::Xml
    }

    fn decode(&self, content: &str) -> Result<B, StructuralDecodeError> {
        let fail = |kind| StructuralDecodeError::new(B::VERSION, Encoding::Xml, kind);

        let content = content.trim_start_matches('\u{feff}');
        if Encoding::sniff(content) != Some(Encoding::Xml) {
            return Err(fail(DecodeErrorKind::WrongEncoding(Encoding::Xml)));
        }

        let root = scan_root(content).map_err(|e| fail(DecodeErrorKind::Malformed(e)))?;
        if root.local_name != "bom" {
            return Err(fail(DecodeErrorKind::NotCycloneDx {
                found: Some(root.local_name),
            }));
        }
        let expected = B::VERSION.xml_namespace();
        if root.namespace.as_deref() != Some(expected) {
            return Err(fail(DecodeErrorKind::NamespaceMismatch {
                expected,
                found: root.namespace,
            }));
        }

        let content =
            protect_text_whitespace(content).map_err(|e| fail(DecodeErrorKind::Malformed(e)))?;
        let document: B::Document = quick_xml::de::from_str(&content)
            .map_err(|e| fail(DecodeErrorKind::Malformed(e.to_string())))?;
        Ok(document.into())
    }

    fn encode(&self, bom: &B) -> Result<String, EncodeError> {
        let document = B::Document::from(bom);

        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut body);
        if self.pretty {
            serializer.indent(' ', 2);
        }
        document
            .serialize(serializer)
            .map_err(|e| EncodeError::Xml(e.to_string()))?;

        Ok(format!("{XML_DECLARATION}\n{body}"))
    }
}

impl<B> BomDecoder for XmlCodec<B>
where
    B: XmlSchema,
{
    fn version(&self) -> SchemaVersion {
        B::VERSION
    }

    fn encoding(&self) -> Encoding {
        Encoding::Xml
    }

    fn decode_versioned(&self, content: &str) -> Result<VersionedBom, StructuralDecodeError> {
        FormatCodec::decode(self, content).map(SchemaModel::into_versioned)
    }
}
