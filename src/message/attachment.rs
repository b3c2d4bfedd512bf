//! MIME attachment collection and content shapes.
//!
//! Attachments are addressed by WSDL part name, recovered from the
//! content-id header per the WSI Attachments Profile encoding: the part name
//! (percent-escaped), `=`, a unique token, `@`, a domain. `<fooPart=uuid@
//! example.com>` therefore names the part `<fooPart` / `fooPart`; matching
//! accepts both the bare and `<`-prefixed forms.

use std::borrow::Cow;
use std::io::{Cursor, Read};

use bytes::Bytes;
use percent_encoding::percent_decode_str;

use crate::bridge::BoxError;
use crate::reader::XmlReader;

/// One MIME attachment: content-id, content type, and raw bytes.
#[derive(Clone, Debug)]
pub struct Attachment {
    content_id: String,
    content_type: String,
    data: Bytes,
}

impl Attachment {
    /// Create an attachment from its MIME metadata and content.
    #[must_use]
    pub fn new(
        content_id: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// The raw content-id header value.
    #[must_use]
    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    /// The attachment's MIME content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The WSDL part name encoded in the content-id, or `None` when the id
    /// does not follow the part encoding (missing `@` or `=`, or a name
    /// that does not percent-decode to UTF-8). An unparseable id is not an
    /// error; the attachment simply cannot be matched by part name.
    #[must_use]
    pub fn part_name(&self) -> Option<String> {
        let (local, _domain) = self.content_id.rsplit_once('@')?;
        let (name, _unique) = local.rsplit_once('=')?;
        percent_decode_str(name)
            .decode_utf8()
            .ok()
            .map(Cow::into_owned)
    }

    /// The attachment content as raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> Bytes {
        self.data.clone()
    }

    /// The attachment content decoded as text per the content type's MIME
    /// charset (defaulting to UTF-8).
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported charset or content that is not
    /// valid in the declared charset.
    pub fn as_string(&self) -> Result<String, BoxError> {
        let charset = self
            .content_type
            .parse::<mime::Mime>()
            .ok()
            .and_then(|m| m.get_param(mime::CHARSET).map(|c| c.as_str().to_ascii_lowercase()));
        match charset.as_deref() {
            None | Some("utf-8" | "us-ascii") => {
                String::from_utf8(self.data.to_vec()).map_err(Into::into)
            }
            Some(other) => Err(format!("unsupported attachment charset {other}").into()),
        }
    }

    /// The attachment content as a byte stream. The caller owns the stream
    /// and is responsible for consuming it.
    #[must_use]
    pub fn as_stream(&self) -> ByteStream {
        ByteStream(Cursor::new(self.data.clone()))
    }

    /// The attachment wrapped in its native data-handle abstraction.
    #[must_use]
    pub fn as_data_handler(&self) -> DataHandler {
        DataHandler {
            content_type: self.content_type.clone(),
            data: self.data.clone(),
        }
    }

    /// The attachment content as lazily-consumable XML.
    #[must_use]
    pub fn as_source(&self) -> XmlSource {
        XmlSource {
            content: self.data.clone(),
        }
    }
}

/// The set of attachments carried by a message, in wire order.
#[derive(Default, Debug)]
pub struct AttachmentSet {
    items: Vec<Attachment>,
}

impl AttachmentSet {
    /// Append an attachment, preserving wire order.
    pub fn push(&mut self, attachment: Attachment) {
        self.items.push(attachment);
    }

    /// All attachments, in wire order.
    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.items.iter()
    }

    /// Number of attachments present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the message carries no attachments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An owned, readable byte stream over attachment content.
///
/// The stream is self-contained; dropping it releases the underlying
/// buffer reference.
#[derive(Debug)]
pub struct ByteStream(Cursor<Bytes>);

impl Read for ByteStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.0.read(buf)
    }
}

/// An attachment's native data handle: content type plus content, passed
/// through to the argument slot unchanged.
#[derive(Clone, Debug)]
pub struct DataHandler {
    content_type: String,
    data: Bytes,
}

impl DataHandler {
    /// The handle's MIME content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The handle's content.
    #[must_use]
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    /// Open a stream over the handle's content.
    #[must_use]
    pub fn stream(&self) -> ByteStream {
        ByteStream(Cursor::new(self.data.clone()))
    }
}

/// Lazily-consumable XML attachment content.
#[derive(Clone, Debug)]
pub struct XmlSource {
    content: Bytes,
}

impl XmlSource {
    /// The raw XML bytes.
    #[must_use]
    pub fn bytes(&self) -> Bytes {
        self.content.clone()
    }

    /// Open a streaming reader over the content.
    #[must_use]
    pub fn open(&self) -> XmlReader {
        XmlReader::new(self.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Attachment;

    fn attachment(content_id: &str) -> Attachment {
        Attachment::new(content_id, "application/octet-stream", &b"payload"[..])
    }

    #[rstest]
    #[case("<outPart=abc123@example.com>", Some("<outPart"))]
    #[case("outPart=abc123@example.com", Some("outPart"))]
    #[case("part%20name=uuid@example.com", Some("part name"))]
    #[case("no-delimiters-at-all", None)]
    #[case("missing-equals@example.com", None)]
    #[case("missing=at-sign", None)]
    fn part_name_reverses_content_id_encoding(
        #[case] content_id: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(attachment(content_id).part_name().as_deref(), expected);
    }

    #[test]
    fn string_conversion_honours_declared_charset() {
        let att = Attachment::new("<p=u@d>", "text/plain; charset=utf-8", &b"caf\xc3\xa9"[..]);
        assert_eq!(att.as_string().expect("utf-8 text"), "café");

        let att = Attachment::new("<p=u@d>", "text/plain; charset=ebcdic", &b"x"[..]);
        assert!(att.as_string().is_err());
    }

    #[test]
    fn stream_reads_full_content() {
        use std::io::Read;

        let mut stream = attachment("<p=u@d>").as_stream();
        let mut out = Vec::new();
        stream
            .read_to_end(&mut out)
            .expect("in-memory stream cannot fail");
        assert_eq!(out, b"payload");
    }
}
