#![doc(html_root_url = "https://docs.rs/partwire/latest")]
//! Public API for the `partwire` library.
//!
//! This crate is the request-argument decoder core of a SOAP-style RPC
//! endpoint: given an inbound message and a method's static binding
//! metadata, it disassembles the message (headers, body payload, MIME
//! attachments) and populates the method's invocation argument slots,
//! including holder slots for output parameters.
//!
//! Decoder trees are built once per method from [`binding`] metadata and
//! invoked per request through [`decoder::Decoder::read_request`]. Schema
//! binding and transport are external collaborators, reached through the
//! [`bridge`] traits and the [`message`] envelope respectively.

pub mod args;
pub mod binding;
pub mod bridge;
pub mod decoder;
pub mod error;
pub mod message;
pub mod prelude;
pub mod qname;
pub mod reader;

pub use args::{Holder, NeutralKind, Slot, Value, ValueSetter, neutral_value};
pub use binding::{Direction, Parameter, ParameterBinding, TargetType, WrapperParameter};
pub use bridge::{Bridge, BoxError, FieldAccessor, WrapperBridge};
pub use decoder::Decoder;
pub use error::{ConfigError, ReadError, XmlError};
pub use message::{Attachment, AttachmentSet, Header, HeaderSet, Message};
pub use qname::QName;
