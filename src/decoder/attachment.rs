//! Attachment-bound parameter decoding.

use std::sync::Arc;

use crate::args::{Slot, Value, ValueSetter};
use crate::binding::{Parameter, TargetType};
use crate::bridge::Bridge;
use crate::error::{ConfigError, ReadError};
use crate::message::{Attachment, Message};

/// MIME types the schema binder accepts for typed attachment bodies.
fn is_xml_mime_type(mime_type: &str) -> bool {
    mime_type == "text/xml" || mime_type == "application/xml"
}

/// Locates the attachment carrying a statically known part and converts its
/// content into the argument's declared shape.
pub struct AttachmentDecoder {
    part_name: String,
    /// The part name as it appears in bracketed content-ids.
    bracketed: String,
    conversion: Conversion,
    setter: ValueSetter,
}

/// Build-time-selected conversion from attachment content to slot value.
enum Conversion {
    DataHandler,
    Bytes,
    Source,
    #[cfg(feature = "image")]
    Image,
    Stream,
    Typed(Arc<dyn Bridge>),
    Text,
}

impl AttachmentDecoder {
    /// Select the conversion for `param`'s declared type, once.
    ///
    /// Declared types without a dedicated conversion still decode through
    /// the schema binder when the part's MIME type is exactly `text/xml` or
    /// `application/xml`; anything else is a configuration error.
    pub(crate) fn new(param: &Parameter, setter: ValueSetter) -> Result<Self, ConfigError> {
        let conversion = match param.target {
            TargetType::DataHandler => Conversion::DataHandler,
            TargetType::Bytes => Conversion::Bytes,
            TargetType::Source => Conversion::Source,
            #[cfg(feature = "image")]
            TargetType::Image => Conversion::Image,
            TargetType::Stream => Conversion::Stream,
            TargetType::Text | TargetType::Typed
                if param.mime_type().is_some_and(is_xml_mime_type) =>
            {
                Conversion::Typed(param.bridge.clone())
            }
            TargetType::Text => Conversion::Text,
            _ => {
                return Err(ConfigError::UnsupportedAttachmentTarget {
                    part: param.part_name.clone(),
                });
            }
        };
        Ok(Self {
            part_name: param.part_name.clone(),
            bracketed: format!("<{}", param.part_name),
            conversion,
            setter,
        })
    }

    /// Scan the attachments in wire order for the expected part and route
    /// its converted content. The first match wins and the scan stops;
    /// duplicate part names are not detected.
    pub(crate) fn read_request(&self, msg: &mut Message, args: &mut [Slot]) -> Result<(), ReadError> {
        let matched = msg.attachments().iter().find(|att| {
            att.part_name()
                .is_some_and(|p| p == self.part_name || p == self.bracketed)
        });
        let Some(att) = matched else {
            return Err(ReadError::MissingAttachment {
                part: self.part_name.clone(),
            });
        };
        tracing::trace!(part = %self.part_name, content_id = %att.content_id(), "matched attachment");
        let value = self.convert(att, msg)?;
        self.setter.put(value, args);
        Ok(())
    }

    fn convert(&self, att: &Attachment, msg: &Message) -> Result<Value, ReadError> {
        Ok(match &self.conversion {
            Conversion::DataHandler => Box::new(att.as_data_handler()),
            Conversion::Bytes => Box::new(att.as_bytes()),
            Conversion::Source => Box::new(att.as_source()),
            #[cfg(feature = "image")]
            Conversion::Image => {
                let image =
                    image::load_from_memory(&att.as_bytes()).map_err(ReadError::decode)?;
                Box::new(image)
            }
            Conversion::Stream => Box::new(att.as_stream()),
            Conversion::Typed(bridge) => super::unmarshal_fragment(
                bridge.as_ref(),
                att.as_bytes(),
                msg.binder_attachments(),
            )?,
            Conversion::Text => Box::new(att.as_string().map_err(ReadError::Decode)?),
        })
    }
}
