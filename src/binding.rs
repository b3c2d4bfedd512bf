//! Static per-parameter binding metadata.
//!
//! Decoders are assembled once, at service-binding time, from immutable
//! descriptions of how each method parameter maps onto the wire: which
//! message part carries it, in which direction it flows, and how its raw
//! content becomes a typed value. Nothing here is inspected per request.

use std::sync::Arc;

use crate::bridge::{Bridge, WrapperBridge};
use crate::qname::QName;

/// Direction a parameter flows relative to the endpoint method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Request-only input.
    In,
    /// Response-only output, carried in a holder.
    Out,
    /// Flows both ways, carried in a holder.
    InOut,
}

/// Which part of the message envelope carries a parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParameterBinding {
    /// A child of the body wrapper element, or the whole body.
    Body,
    /// A protocol header element.
    Header,
    /// A MIME attachment with the given content type.
    Attachment {
        /// Declared MIME type of the attachment part.
        mime_type: String,
    },
}

/// Declared shape of an attachment-bound argument, driving the build-time
/// choice of conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetType {
    /// The attachment's native data handle, passed through unchanged.
    DataHandler,
    /// Raw bytes.
    Bytes,
    /// Lazily-consumable XML content.
    Source,
    /// A decoded image.
    Image,
    /// The attachment's byte stream, handed to the caller to consume.
    Stream,
    /// Text decoded per the attachment's MIME charset.
    Text,
    /// A schema-bound value; requires an XML MIME type.
    Typed,
}

/// Immutable binding of one method parameter to its message part.
#[derive(Clone)]
pub struct Parameter {
    /// Position in the invocation argument array.
    pub index: usize,
    /// Qualified element name of the part (header element or wrapper child).
    pub name: QName,
    /// WSDL part name, used to address attachments by content-id.
    pub part_name: String,
    /// Direction the parameter flows.
    pub direction: Direction,
    /// Which envelope section carries the part.
    pub binding: ParameterBinding,
    /// Declared shape for attachment-bound parameters.
    pub target: TargetType,
    /// Schema-binder capability for this parameter's element.
    pub bridge: Arc<dyn Bridge>,
}

impl Parameter {
    /// The declared MIME type, for attachment-bound parameters.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        match &self.binding {
            ParameterBinding::Attachment { mime_type } => Some(mime_type),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parameter")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("part_name", &self.part_name)
            .field("direction", &self.direction)
            .field("binding", &self.binding)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// A wrapper element together with its ordered child parts.
///
/// Document/literal wrapped and RPC/literal bindings both present the body
/// as one wrapper element whose children are the individually bound parts.
#[derive(Clone)]
pub struct WrapperParameter {
    /// Qualified name of the wrapper element.
    pub name: QName,
    /// Schema-binder capability for the wrapper itself.
    pub bridge: Arc<dyn WrapperBridge>,
    /// The wrapped child parts, in wire order.
    pub children: Vec<Parameter>,
}

impl std::fmt::Debug for WrapperParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperParameter")
            .field("name", &self.name)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
