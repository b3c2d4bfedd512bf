//! Request-argument decoders.
//!
//! A [`Decoder`] reads one inbound [`Message`], disassembles it, and routes
//! the decoded values into the invocation argument slots. One decoder tree
//! is built per endpoint method from its static binding metadata; it is
//! immutable afterwards and shared read-only across all requests for that
//! method. Per-request state (the message and the argument array) is owned
//! by the caller, so concurrent invocations never contend.
//!
//! The variants form a closed sum dispatched through [`Decoder::read_request`]:
//! control-flow glue ([`Decoder::None`], [`Decoder::NullSetter`],
//! [`Decoder::Composite`]) plus one variant per wire-binding convention
//! (headers, attachments, bare body, document/literal wrapped, RPC/literal).

mod attachment;
mod body;
mod doc_lit;
mod header;
mod rpc_lit;

pub use attachment::AttachmentDecoder;
pub use body::BodyDecoder;
pub use doc_lit::DocLitDecoder;
pub use header::HeaderDecoder;
pub use rpc_lit::RpcLitDecoder;

use std::sync::Arc;

use bytes::Bytes;

use crate::args::{NeutralKind, Slot, Value, ValueSetter, neutral_value};
use crate::binding::{Direction, Parameter, WrapperParameter};
use crate::bridge::Bridge;
use crate::error::{ConfigError, ReadError};
use crate::message::{AttachmentSet, Message};
use crate::qname::QName;
use crate::reader::{Node, XmlReader};

/// A configured request decoder for one endpoint method.
pub enum Decoder {
    /// The bodyless case: mark the payload consumed, touch nothing.
    None,
    /// Pre-seed one slot with a type-correct neutral value.
    NullSetter(NullSetterDecoder),
    /// Ordered sequence of sub-decoders over the same message.
    Composite(Vec<Decoder>),
    /// One attachment part into one slot.
    Attachment(AttachmentDecoder),
    /// One header element into one slot.
    Header(HeaderDecoder),
    /// The entire payload into one slot (bare-body binding).
    Body(BodyDecoder),
    /// Document/literal wrapped body fanned out to per-part accessors.
    DocLitWrapped(DocLitDecoder),
    /// RPC/literal wrapped body matched child-by-child.
    RpcLitWrapped(RpcLitDecoder),
}

impl Decoder {
    /// Decoder for operations with no request content.
    #[must_use]
    pub fn none() -> Self {
        Decoder::None
    }

    /// Decoder that seeds `setter`'s slot with the neutral value for
    /// `kind` before the method runs.
    #[must_use]
    pub fn null_setter(setter: ValueSetter, kind: NeutralKind) -> Self {
        Decoder::NullSetter(NullSetterDecoder { setter, kind })
    }

    /// Combine sub-decoders; each runs in order against the same message
    /// and argument array, and the first failure aborts the rest.
    #[must_use]
    pub fn composite(decoders: Vec<Decoder>) -> Self {
        Decoder::Composite(decoders)
    }

    /// Decoder for an attachment-bound parameter. The conversion is chosen
    /// here, once, from the parameter's declared type and MIME type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedAttachmentTarget`] when no
    /// conversion exists for the declared combination.
    pub fn attachment(param: &Parameter, setter: ValueSetter) -> Result<Self, ConfigError> {
        AttachmentDecoder::new(param, setter).map(Decoder::Attachment)
    }

    /// Decoder for a header-bound parameter.
    #[must_use]
    pub fn header(name: QName, bridge: Arc<dyn Bridge>, setter: ValueSetter) -> Self {
        Decoder::Header(HeaderDecoder::new(name, bridge, setter))
    }

    /// Decoder for a bare-body binding: the whole payload is one value.
    ///
    /// A bare-body decoder is exclusive with wrapped and RPC bindings for
    /// the same method.
    #[must_use]
    pub fn body(bridge: Arc<dyn Bridge>, setter: ValueSetter) -> Self {
        Decoder::Body(BodyDecoder::new(bridge, setter))
    }

    /// Decoder for a document/literal wrapped body. Parts flowing in the
    /// `skip` direction are request-absent and excluded up front.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvableField`] when the wrapper's
    /// decoded form lacks a field for one of its parts.
    pub fn doc_lit_wrapped(
        wrapper: &WrapperParameter,
        skip: Direction,
    ) -> Result<Self, ConfigError> {
        DocLitDecoder::new(wrapper, skip).map(Decoder::DocLitWrapped)
    }

    /// Decoder for an RPC/literal wrapped body.
    #[must_use]
    pub fn rpc_lit_wrapped(wrapper: &WrapperParameter) -> Self {
        Decoder::RpcLitWrapped(RpcLitDecoder::new(wrapper))
    }

    /// Read `msg`, decode its parts, and write them into `args`.
    ///
    /// On success the argument slots this decoder is responsible for have
    /// been populated; nothing is returned. On failure the error is
    /// terminal for the request, and slots populated by earlier
    /// sub-decoders are left as they are.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] describing the first part that could not be
    /// decoded.
    pub fn read_request(&self, msg: &mut Message, args: &mut [Slot]) -> Result<(), ReadError> {
        match self {
            Decoder::None => {
                msg.consume();
                Ok(())
            }
            Decoder::NullSetter(d) => {
                d.setter.put(neutral_value(d.kind), args);
                Ok(())
            }
            Decoder::Composite(decoders) => {
                for decoder in decoders {
                    decoder.read_request(msg, args)?;
                }
                Ok(())
            }
            Decoder::Attachment(d) => d.read_request(msg, args),
            Decoder::Header(d) => d.read_request(msg, args),
            Decoder::Body(d) => d.read_request(msg, args),
            Decoder::DocLitWrapped(d) => d.read_request(msg, args),
            Decoder::RpcLitWrapped(d) => d.read_request(msg, args),
        }
    }
}

/// Seeds one slot with a neutral value; used for output-only arguments
/// whose in-slot must be initialized before the call.
pub struct NullSetterDecoder {
    setter: ValueSetter,
    kind: NeutralKind,
}

/// Verify that the next element under the reader is `expected`.
pub(crate) fn expect_element(reader: &mut XmlReader, expected: &QName) -> Result<(), ReadError> {
    match reader.next_tag()? {
        Node::Start(name) if name == expected => Ok(()),
        Node::Start(name) => Err(ReadError::UnexpectedElement {
            expected: expected.clone(),
            found: Some(name.clone()),
        }),
        _ => Err(ReadError::UnexpectedElement {
            expected: expected.clone(),
            found: None,
        }),
    }
}

/// Unmarshal a standalone XML fragment (a header element or an XML
/// attachment body) through the schema binder.
pub(crate) fn unmarshal_fragment(
    bridge: &dyn Bridge,
    content: Bytes,
    attachments: Option<&AttachmentSet>,
) -> Result<Value, ReadError> {
    let mut reader = XmlReader::new(content);
    match reader.next_tag()? {
        Node::Start(_) => {}
        _ => return Err(ReadError::decode("fragment contains no element")),
    }
    let value = bridge
        .unmarshal(&mut reader, attachments)
        .map_err(ReadError::Decode)?;
    reader.close();
    Ok(value)
}
