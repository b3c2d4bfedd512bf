//! In-memory request envelope.
//!
//! The transport layer builds a [`Message`] per request from whatever it
//! received on the wire: protocol headers, at most one XML payload, and a
//! set of MIME attachments. Decoders consume it exactly once; the payload in
//! particular may be read at most once, and a decoder that never reads it
//! marks it consumed instead.

mod attachment;
mod header;

pub use attachment::{Attachment, AttachmentSet, ByteStream, DataHandler, XmlSource};
pub use header::{Header, HeaderSet};

use bytes::Bytes;

use crate::reader::XmlReader;

/// One inbound request message.
#[derive(Default, Debug)]
pub struct Message {
    headers: HeaderSet,
    attachments: AttachmentSet,
    payload: Option<Bytes>,
}

impl Message {
    /// Create an empty message. Populate it with the `with_*` builders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the body payload.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Append a protocol header.
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    /// Append a MIME attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// The message's header collection.
    #[must_use]
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// The message's attachment collection.
    #[must_use]
    pub fn attachments(&self) -> &AttachmentSet {
        &self.attachments
    }

    /// The attachment set as supplied to the schema binder: present only
    /// when the message actually carries attachments.
    #[must_use]
    pub(crate) fn binder_attachments(&self) -> Option<&AttachmentSet> {
        if self.attachments.is_empty() {
            None
        } else {
            Some(&self.attachments)
        }
    }

    /// Whether an unconsumed payload is present.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Take the payload and open a streaming reader over it.
    ///
    /// The payload is consumable exactly once; subsequent calls return
    /// `None`.
    pub fn read_payload(&mut self) -> Option<XmlReader> {
        self.payload.take().map(XmlReader::new)
    }

    /// Mark the payload consumed without reading it.
    pub fn consume(&mut self) {
        self.payload = None;
    }
}
