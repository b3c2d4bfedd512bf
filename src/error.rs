//! Error taxonomy for decoder construction and request decoding.
//!
//! Two layers are distinguished:
//!
//! - [`ConfigError`]: build-time failures raised by the decoder factories
//!   (unresolvable wrapper fields, unmappable attachment targets). These
//!   prevent decoder construction and must surface before any request is
//!   served.
//! - [`ReadError`]: per-request failures. Each is terminal for its request
//!   and is expected to be translated into a protocol fault by the
//!   dispatcher; nothing is retried or downgraded inside this crate.
//!
//! [`XmlError`] carries the payload-parsing failures underneath
//! [`ReadError::Xml`].

use thiserror::Error;

use crate::bridge::BoxError;
use crate::qname::QName;

/// Build-time decoder configuration failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The wrapper's decoded form exposes no field for a wrapped part.
    #[error("wrapper {wrapper} has no element property {field}")]
    UnresolvableField {
        /// The wrapper element being decomposed.
        wrapper: QName,
        /// The part element whose accessor could not be resolved.
        field: QName,
        /// Binder-reported cause.
        #[source]
        source: BoxError,
    },

    /// No attachment conversion exists for the parameter's declared type and
    /// MIME type combination.
    #[error("attachment part {part} has no conversion for its declared type")]
    UnsupportedAttachmentTarget {
        /// WSDL part name of the offending parameter.
        part: String,
    },
}

/// Per-request decoding failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadError {
    /// No attachment's content-id resolved to the expected part name.
    #[error("missing attachment for part {part}")]
    MissingAttachment {
        /// The part name that went unmatched.
        part: String,
    },

    /// More than one header matched a name expected to occur at most once.
    ///
    /// Carries the qualified name so the dispatcher can build a
    /// protocol-level fault naming the offending header.
    #[error("duplicate header {name}")]
    DuplicateHeader {
        /// The header element's qualified name.
        name: QName,
    },

    /// The message carries no payload where one is required.
    #[error(
        "no payload{expecting}",
        expecting = .element
            .as_ref()
            .map(|e| format!("; expecting payload with {e} element"))
            .unwrap_or_default()
    )]
    MissingPayload {
        /// The wrapper element that was expected, when known.
        element: Option<QName>,
    },

    /// The payload's first element is not the expected wrapper.
    #[error(
        "unexpected element {got}; expected {expected}",
        got = .found
            .as_ref()
            .map_or_else(|| "end of document".to_string(), ToString::to_string)
    )]
    UnexpectedElement {
        /// The wrapper element the binding calls for.
        expected: QName,
        /// What the payload actually started with, `None` at end of input.
        found: Option<QName>,
    },

    /// The payload is not well-formed XML.
    #[error("malformed payload: {0}")]
    Xml(#[from] XmlError),

    /// The schema binder, a field accessor, or an attachment codec failed.
    #[error("failed to decode part")]
    Decode(#[source] BoxError),
}

impl ReadError {
    /// Wrap a binder or codec failure.
    pub fn decode(source: impl Into<BoxError>) -> Self {
        ReadError::Decode(source.into())
    }
}

/// Failures raised by the streaming payload reader.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XmlError {
    /// The underlying parser rejected the input.
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// Text content carried an invalid entity or escape sequence.
    #[error("invalid text content: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Character data was not valid UTF-8.
    #[error("text content is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),

    /// The document ended inside an element.
    #[error("unexpected end of document")]
    UnexpectedEof,
}

#[cfg(test)]
mod tests {
    use super::{ReadError, XmlError};
    use crate::qname::QName;

    #[test]
    fn duplicate_header_names_the_header() {
        let err = ReadError::DuplicateHeader {
            name: QName::new("urn:demo", "auth"),
        };
        assert_eq!(err.to_string(), "duplicate header {urn:demo}auth");
    }

    #[test]
    fn missing_payload_names_the_wrapper_when_known() {
        let err = ReadError::MissingPayload {
            element: Some(QName::new("urn:demo", "echo")),
        };
        assert_eq!(
            err.to_string(),
            "no payload; expecting payload with {urn:demo}echo element"
        );
        let err = ReadError::MissingPayload { element: None };
        assert_eq!(err.to_string(), "no payload");
    }

    #[test]
    fn unexpected_element_renders_end_of_document() {
        let err = ReadError::UnexpectedElement {
            expected: QName::new("urn:demo", "echo"),
            found: None,
        };
        assert_eq!(
            err.to_string(),
            "unexpected element end of document; expected {urn:demo}echo"
        );
    }

    #[test]
    fn xml_errors_wrap_into_read_errors() {
        let err = ReadError::from(XmlError::UnexpectedEof);
        assert!(matches!(err, ReadError::Xml(XmlError::UnexpectedEof)));
    }
}
