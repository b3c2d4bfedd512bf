//! Bare-body decoding.

use std::sync::Arc;

use crate::args::{Slot, ValueSetter};
use crate::bridge::Bridge;
use crate::error::ReadError;
use crate::message::Message;
use crate::reader::Node;

/// Decodes the entire payload as one value.
///
/// A bare-body binding is exclusive: at most one of these exists per method,
/// and never alongside a wrapped or RPC body decoder.
pub struct BodyDecoder {
    bridge: Arc<dyn Bridge>,
    setter: ValueSetter,
}

impl BodyDecoder {
    pub(crate) fn new(bridge: Arc<dyn Bridge>, setter: ValueSetter) -> Self {
        Self { bridge, setter }
    }

    pub(crate) fn read_request(&self, msg: &mut Message, args: &mut [Slot]) -> Result<(), ReadError> {
        let Some(mut reader) = msg.read_payload() else {
            return Err(ReadError::MissingPayload { element: None });
        };
        match reader.next_tag()? {
            Node::Start(_) => {}
            _ => return Err(ReadError::MissingPayload { element: None }),
        }
        let value = self
            .bridge
            .unmarshal(&mut reader, msg.binder_attachments())
            .map_err(ReadError::Decode)?;
        self.setter.put(value, args);
        reader.close();
        Ok(())
    }
}
