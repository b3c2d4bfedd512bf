//! Shared fixtures: toy schema bridges over simple text-bearing elements,
//! plus helpers for assembling binding metadata.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use partwire::message::AttachmentSet;
use partwire::prelude::*;
use partwire::reader::{Node, XmlReader};

/// Bridge decoding an element's text content into a `String`.
pub struct TextBridge;

impl Bridge for TextBridge {
    fn unmarshal(
        &self,
        reader: &mut XmlReader,
        _attachments: Option<&AttachmentSet>,
    ) -> Result<Value, BoxError> {
        Ok(Box::new(reader.read_element_text()?))
    }
}

/// Bridge decoding an element's text content into an `i32`.
pub struct IntBridge;

impl Bridge for IntBridge {
    fn unmarshal(
        &self,
        reader: &mut XmlReader,
        _attachments: Option<&AttachmentSet>,
    ) -> Result<Value, BoxError> {
        let text = reader.read_element_text()?;
        let value: i32 = text.trim().parse()?;
        Ok(Box::new(value))
    }
}

/// Wrapper bridge decoding child elements into a map keyed by local name.
///
/// Field accessors resolve only for the locals listed in `known`, so tests
/// can provoke build-time accessor failures.
pub struct MapWrapperBridge {
    known: Vec<String>,
}

impl MapWrapperBridge {
    pub fn new(known: &[&str]) -> Self {
        Self {
            known: known.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Bridge for MapWrapperBridge {
    fn unmarshal(
        &self,
        reader: &mut XmlReader,
        _attachments: Option<&AttachmentSet>,
    ) -> Result<Value, BoxError> {
        let mut fields = BTreeMap::new();
        loop {
            match reader.next_tag()? {
                Node::Start(name) => {
                    let local = name.local_name().to_string();
                    let text = reader.read_element_text()?;
                    fields.insert(local, text);
                }
                Node::End(_) => break,
                _ => return Err("wrapper ended unexpectedly".into()),
            }
        }
        Ok(Box::new(fields))
    }
}

impl WrapperBridge for MapWrapperBridge {
    fn field_accessor(&self, name: &QName) -> Result<Arc<dyn FieldAccessor>, BoxError> {
        let local = name.local_name();
        if self.known.iter().any(|k| k == local) {
            Ok(Arc::new(MapFieldAccessor {
                field: local.to_string(),
            }))
        } else {
            Err(format!("no element property {local}").into())
        }
    }
}

struct MapFieldAccessor {
    field: String,
}

impl FieldAccessor for MapFieldAccessor {
    fn get(&self, wrapper: &Value) -> Result<Option<Value>, BoxError> {
        let map = wrapper
            .downcast_ref::<BTreeMap<String, String>>()
            .ok_or("wrapper value is not a field map")?;
        Ok(map
            .get(&self.field)
            .map(|text| Box::new(text.clone()) as Value))
    }
}

/// A body-bound text parameter.
pub fn text_param(index: usize, name: QName, direction: Direction) -> Parameter {
    Parameter {
        index,
        part_name: name.local_name().to_string(),
        name,
        direction,
        binding: ParameterBinding::Body,
        target: TargetType::Typed,
        bridge: Arc::new(TextBridge),
    }
}

/// A body-bound integer parameter.
pub fn int_param(index: usize, name: QName, direction: Direction) -> Parameter {
    Parameter {
        index,
        part_name: name.local_name().to_string(),
        name,
        direction,
        binding: ParameterBinding::Body,
        target: TargetType::Typed,
        bridge: Arc::new(IntBridge),
    }
}

/// An attachment-bound parameter with the given declared shape.
pub fn attachment_param(
    index: usize,
    part: &str,
    target: TargetType,
    mime_type: &str,
    direction: Direction,
) -> Parameter {
    Parameter {
        index,
        name: QName::local(part),
        part_name: part.to_string(),
        direction,
        binding: ParameterBinding::Attachment {
            mime_type: mime_type.to_string(),
        },
        target,
        bridge: Arc::new(IntBridge),
    }
}
