//! Header-bound parameter decoding.

use std::sync::Arc;

use crate::args::{Slot, ValueSetter};
use crate::bridge::Bridge;
use crate::error::ReadError;
use crate::message::Message;
use crate::qname::QName;

/// Extracts a single header element into a typed value.
///
/// A header part is optional on the wire: with no match the argument keeps
/// its pre-seeded neutral value. More than one match is a protocol-level
/// fault, reported with the header's qualified name.
pub struct HeaderDecoder {
    name: QName,
    bridge: Arc<dyn Bridge>,
    setter: ValueSetter,
}

impl HeaderDecoder {
    pub(crate) fn new(name: QName, bridge: Arc<dyn Bridge>, setter: ValueSetter) -> Self {
        Self {
            name,
            bridge,
            setter,
        }
    }

    pub(crate) fn read_request(&self, msg: &mut Message, args: &mut [Slot]) -> Result<(), ReadError> {
        let content = {
            let mut matches = msg.headers().get(&self.name);
            let Some(header) = matches.next() else {
                tracing::trace!(header = %self.name, "optional header absent");
                return Ok(());
            };
            if matches.next().is_some() {
                return Err(ReadError::DuplicateHeader {
                    name: self.name.clone(),
                });
            }
            header.content().clone()
        };
        let value = super::unmarshal_fragment(self.bridge.as_ref(), content, None)?;
        self.setter.put(value, args);
        Ok(())
    }
}
