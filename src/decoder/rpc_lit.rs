//! RPC/literal wrapped body decoding.

use std::collections::HashMap;
use std::sync::Arc;

use crate::args::{Slot, ValueSetter};
use crate::binding::WrapperParameter;
use crate::bridge::Bridge;
use crate::error::ReadError;
use crate::message::Message;
use crate::qname::QName;
use crate::reader::Node;

/// Walks the wrapper's children element by element, decoding each known
/// part in place.
///
/// Child elements with no configured part are skipped wholesale rather than
/// rejected, so senders may interleave extensions without breaking the
/// binding; matching is by qualified name, not position, so skipping never
/// misaligns later parts.
pub struct RpcLitDecoder {
    wrapper_name: QName,
    parts: HashMap<QName, RpcPart>,
}

/// One expected child: how to decode it and where it goes.
struct RpcPart {
    bridge: Arc<dyn Bridge>,
    setter: ValueSetter,
}

impl RpcLitDecoder {
    pub(crate) fn new(wrapper: &WrapperParameter) -> Self {
        let parts = wrapper
            .children
            .iter()
            .map(|child| {
                (
                    child.name.clone(),
                    RpcPart {
                        bridge: child.bridge.clone(),
                        setter: ValueSetter::for_parameter(child),
                    },
                )
            })
            .collect();
        Self {
            wrapper_name: wrapper.name.clone(),
            parts,
        }
    }

    pub(crate) fn read_request(&self, msg: &mut Message, args: &mut [Slot]) -> Result<(), ReadError> {
        let Some(mut reader) = msg.read_payload() else {
            return Err(ReadError::MissingPayload {
                element: Some(self.wrapper_name.clone()),
            });
        };
        super::expect_element(&mut reader, &self.wrapper_name)?;
        reader.next_tag()?;

        loop {
            let name = match reader.current() {
                Node::Start(name) => name.clone(),
                _ => break,
            };
            if let Some(part) = self.parts.get(&name) {
                let value = part
                    .bridge
                    .unmarshal(&mut reader, msg.binder_attachments())
                    .map_err(ReadError::Decode)?;
                part.setter.put(value, args);
            } else {
                tracing::trace!(element = %name, wrapper = %self.wrapper_name, "skipping unmatched wrapper child");
                reader.skip_element()?;
            }
            // past any whitespace to the next sibling or the wrapper end
            reader.next_tag()?;
        }

        reader.close();
        Ok(())
    }
}
