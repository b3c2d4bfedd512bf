//! Convenience imports for building and invoking decoders.
//!
//! ```rust
//! use partwire::prelude::*;
//! ```

pub use crate::args::{Holder, NeutralKind, Slot, Value, ValueSetter, neutral_value};
pub use crate::binding::{Direction, Parameter, ParameterBinding, TargetType, WrapperParameter};
pub use crate::bridge::{BoxError, Bridge, FieldAccessor, WrapperBridge};
pub use crate::decoder::Decoder;
pub use crate::error::{ConfigError, ReadError};
pub use crate::message::{Attachment, Header, Message};
pub use crate::qname::QName;
