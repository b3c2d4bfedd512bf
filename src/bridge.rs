//! Schema-binder seam.
//!
//! Converting bytes or XML nodes into typed domain values is the job of an
//! external schema binder. This module defines the traits the decoder
//! orchestrates against; implementations live with the service's generated
//! binding layer, never here.

use std::sync::Arc;

use crate::args::Value;
use crate::message::AttachmentSet;
use crate::qname::QName;
use crate::reader::XmlReader;

/// Boxed error used across the binder seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Unmarshals one XML element into a typed value.
///
/// `unmarshal` is called with the reader positioned on the element's start
/// node and must consume the element, leaving the reader on its matching end
/// node. When the message carries attachments they are supplied so embedded
/// binary references can be resolved.
pub trait Bridge: Send + Sync {
    /// Decode the element under the reader's cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be decoded into the bound type.
    fn unmarshal(
        &self,
        reader: &mut XmlReader,
        attachments: Option<&AttachmentSet>,
    ) -> Result<Value, BoxError>;
}

/// A [`Bridge`] for a wrapper element whose decoded form exposes named
/// fields, one per wrapped part.
pub trait WrapperBridge: Bridge {
    /// Resolve the accessor for the wrapper field carrying the named part.
    ///
    /// Called at decoder-construction time only; an unresolvable field is a
    /// fatal configuration error, surfaced before any request is served.
    ///
    /// # Errors
    ///
    /// Returns an error if the wrapper type has no such field.
    fn field_accessor(&self, name: &QName) -> Result<Arc<dyn FieldAccessor>, BoxError>;
}

/// Extracts one field from a decoded wrapper value.
pub trait FieldAccessor: Send + Sync {
    /// Pull this accessor's field out of `wrapper`.
    ///
    /// Returns `None` when the field is absent in this particular wrapper
    /// instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the wrapper value is not of the expected type or
    /// the field cannot be read.
    fn get(&self, wrapper: &Value) -> Result<Option<Value>, BoxError>;
}
