//! Protocol header collection.

use bytes::Bytes;

use crate::qname::QName;

/// One protocol header: its element name plus the element's raw XML bytes.
#[derive(Clone, Debug)]
pub struct Header {
    name: QName,
    content: Bytes,
}

impl Header {
    /// Create a header from its qualified element name and raw XML content.
    ///
    /// `content` must hold the complete header element, starting with its
    /// start tag.
    #[must_use]
    pub fn new(name: QName, content: impl Into<Bytes>) -> Self {
        Self {
            name,
            content: content.into(),
        }
    }

    /// The header element's qualified name.
    #[must_use]
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// The raw XML bytes of the header element.
    #[must_use]
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

/// The ordered set of headers carried by a message.
#[derive(Default, Debug)]
pub struct HeaderSet {
    items: Vec<Header>,
}

impl HeaderSet {
    /// Append a header, preserving wire order.
    pub fn push(&mut self, header: Header) {
        self.items.push(header);
    }

    /// All headers, in wire order.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.items.iter()
    }

    /// The headers whose element name equals `name`, in wire order.
    pub fn get<'a>(&'a self, name: &'a QName) -> impl Iterator<Item = &'a Header> {
        self.items.iter().filter(move |h| h.name() == name)
    }

    /// Number of headers present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the message carries no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
