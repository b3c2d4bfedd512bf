//! Document/literal wrapped body decoding.

use std::sync::Arc;

use crate::args::{Slot, ValueSetter};
use crate::binding::{Direction, WrapperParameter};
use crate::bridge::{FieldAccessor, WrapperBridge};
use crate::error::{ConfigError, ReadError};
use crate::message::Message;
use crate::qname::QName;

/// Decodes the wrapper element in one pass, then fans its fields out to the
/// argument slots.
///
/// The wrapper is unmarshalled as a whole; each configured part is then
/// pulled out of the intermediate value through a field accessor resolved at
/// build time.
pub struct DocLitDecoder {
    wrapper_name: QName,
    bridge: Arc<dyn WrapperBridge>,
    parts: Vec<WrappedPart>,
}

/// One wrapped part: where in the wrapper it lives, and where it goes.
struct WrappedPart {
    accessor: Arc<dyn FieldAccessor>,
    setter: ValueSetter,
}

impl DocLitDecoder {
    /// Resolve an accessor per child part, excluding parts that flow in the
    /// `skip` direction (the request side never carries output-only parts).
    pub(crate) fn new(wrapper: &WrapperParameter, skip: Direction) -> Result<Self, ConfigError> {
        let mut parts = Vec::new();
        for child in &wrapper.children {
            if child.direction == skip {
                continue;
            }
            let accessor = wrapper.bridge.field_accessor(&child.name).map_err(|source| {
                ConfigError::UnresolvableField {
                    wrapper: wrapper.name.clone(),
                    field: child.name.clone(),
                    source,
                }
            })?;
            parts.push(WrappedPart {
                accessor,
                setter: ValueSetter::for_parameter(child),
            });
        }
        Ok(Self {
            wrapper_name: wrapper.name.clone(),
            bridge: wrapper.bridge.clone(),
            parts,
        })
    }

    pub(crate) fn read_request(&self, msg: &mut Message, args: &mut [Slot]) -> Result<(), ReadError> {
        if self.parts.is_empty() {
            // Nothing bound to the request body; never open a reader.
            msg.consume();
            return Ok(());
        }
        let Some(mut reader) = msg.read_payload() else {
            return Err(ReadError::MissingPayload {
                element: Some(self.wrapper_name.clone()),
            });
        };
        super::expect_element(&mut reader, &self.wrapper_name)?;
        let wrapper = self
            .bridge
            .unmarshal(&mut reader, msg.binder_attachments())
            .map_err(ReadError::Decode)?;
        for part in &self.parts {
            let value = part.accessor.get(&wrapper).map_err(ReadError::Decode)?;
            part.setter.put(value, args);
        }
        reader.close();
        Ok(())
    }
}
