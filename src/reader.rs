//! Streaming XML cursor over a message payload.
//!
//! [`XmlReader`] wraps a namespace-resolving pull parser with the small
//! cursor API the decoders need: advance to the next tag, skip an unwanted
//! subtree, collect an element's text. Names surface as [`QName`]s with
//! prefixes already resolved.
//!
//! Parsing scratch buffers are recycled through a bounded process-wide pool.
//! A reader returns its buffer on [`Drop`], so every exit path releases the
//! resource, including error propagation out of a decoder.
//! [`XmlReader::close`] is the explicit form for the happy path.

use std::io::Cursor;
use std::sync::Mutex;

use bytes::Bytes;
use quick_xml::NsReader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};

use crate::error::XmlError;
use crate::qname::QName;

/// Retained scratch buffers, reused across reader instances.
static SCRATCH_POOL: Mutex<Vec<Vec<u8>>> = Mutex::new(Vec::new());

/// Upper bound on retained buffers; beyond this they are simply dropped.
const SCRATCH_POOL_LIMIT: usize = 32;

fn acquire_scratch() -> Vec<u8> {
    SCRATCH_POOL
        .lock()
        .map_or_else(|_| Vec::new(), |mut pool| pool.pop().unwrap_or_default())
}

fn release_scratch(mut buf: Vec<u8>) {
    buf.clear();
    if let Ok(mut pool) = SCRATCH_POOL.lock()
        && pool.len() < SCRATCH_POOL_LIMIT
    {
        pool.push(buf);
    }
}

/// One significant node under the reader's cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Initial cursor position, before any node has been read.
    DocumentStart,
    /// The start of an element.
    Start(QName),
    /// The end of an element. Empty elements read as a start/end pair.
    End(QName),
    /// Character data, entities resolved.
    Text(String),
    /// End of the document.
    Eof,
}

/// A consumable-once streaming reader over payload bytes.
pub struct XmlReader {
    inner: NsReader<Cursor<Bytes>>,
    scratch: Option<Vec<u8>>,
    pending_end: Option<QName>,
    current: Node,
}

impl XmlReader {
    /// Open a reader over `content`, borrowing a scratch buffer from the
    /// pool.
    #[must_use]
    pub fn new(content: Bytes) -> Self {
        Self {
            inner: NsReader::from_reader(Cursor::new(content)),
            scratch: Some(acquire_scratch()),
            pending_end: None,
            current: Node::DocumentStart,
        }
    }

    /// The node under the cursor.
    #[must_use]
    pub fn current(&self) -> &Node {
        &self.current
    }

    /// Advance to the next significant node (start, end, text, or EOF).
    ///
    /// Comments, processing instructions, and the document prolog are
    /// passed over silently.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not well-formed XML.
    pub fn next_node(&mut self) -> Result<&Node, XmlError> {
        self.current = self.advance()?;
        Ok(&self.current)
    }

    /// Advance to the next element boundary, skipping any character data.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not well-formed XML.
    pub fn next_tag(&mut self) -> Result<&Node, XmlError> {
        loop {
            match self.advance()? {
                Node::Text(_) => {}
                node => {
                    self.current = node;
                    return Ok(&self.current);
                }
            }
        }
    }

    /// Skip the subtree of the element whose start node is under the cursor,
    /// leaving the cursor on that element's end node.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is malformed or ends inside the
    /// element.
    pub fn skip_element(&mut self) -> Result<(), XmlError> {
        debug_assert!(
            matches!(self.current, Node::Start(_)),
            "skip_element called off an element start"
        );
        let mut depth = 0usize;
        loop {
            match self.advance()? {
                Node::Start(_) => depth += 1,
                Node::End(name) => {
                    if depth == 0 {
                        self.current = Node::End(name);
                        return Ok(());
                    }
                    depth -= 1;
                }
                Node::Eof => return Err(XmlError::UnexpectedEof),
                Node::Text(_) | Node::DocumentStart => {}
            }
        }
    }

    /// Collect all character data inside the element whose start node is
    /// under the cursor, leaving the cursor on that element's end node.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is malformed or ends inside the
    /// element.
    pub fn read_element_text(&mut self) -> Result<String, XmlError> {
        debug_assert!(
            matches!(self.current, Node::Start(_)),
            "read_element_text called off an element start"
        );
        let mut depth = 0usize;
        let mut text = String::new();
        loop {
            match self.advance()? {
                Node::Start(_) => depth += 1,
                Node::End(name) => {
                    if depth == 0 {
                        self.current = Node::End(name);
                        return Ok(text);
                    }
                    depth -= 1;
                }
                Node::Text(chunk) => text.push_str(&chunk),
                Node::Eof => return Err(XmlError::UnexpectedEof),
                Node::DocumentStart => {}
            }
        }
    }

    /// Release the reader, returning its scratch buffer to the pool.
    ///
    /// Dropping the reader has the same effect; this form documents the
    /// release point on the happy path.
    pub fn close(self) {}

    fn advance(&mut self) -> Result<Node, XmlError> {
        if let Some(name) = self.pending_end.take() {
            return Ok(Node::End(name));
        }
        let mut scratch = self.scratch.take().unwrap_or_default();
        let node = loop {
            scratch.clear();
            match self.inner.read_resolved_event_into(&mut scratch) {
                Err(e) => break Err(XmlError::from(e)),
                Ok((ns, Event::Start(e))) => {
                    break Ok(Node::Start(resolved_name(&ns, e.local_name().into_inner())));
                }
                Ok((ns, Event::Empty(e))) => {
                    let name = resolved_name(&ns, e.local_name().into_inner());
                    self.pending_end = Some(name.clone());
                    break Ok(Node::Start(name));
                }
                Ok((ns, Event::End(e))) => {
                    break Ok(Node::End(resolved_name(&ns, e.local_name().into_inner())));
                }
                Ok((_, Event::Text(t))) => {
                    break match std::str::from_utf8(t.as_ref()) {
                        Ok(raw) => match unescape(raw) {
                            Ok(cow) => Ok(Node::Text(cow.into_owned())),
                            Err(e) => Err(XmlError::Escape(e)),
                        },
                        Err(e) => Err(XmlError::NotUtf8(e)),
                    };
                }
                Ok((_, Event::CData(t))) => {
                    break match std::str::from_utf8(t.as_ref()) {
                        Ok(raw) => Ok(Node::Text(raw.to_owned())),
                        Err(e) => Err(XmlError::NotUtf8(e)),
                    };
                }
                Ok((_, Event::Eof)) => break Ok(Node::Eof),
                // comments, processing instructions, prolog
                Ok(_) => {}
            }
        };
        self.scratch = Some(scratch);
        node
    }
}

impl Drop for XmlReader {
    fn drop(&mut self) {
        if let Some(buf) = self.scratch.take() {
            release_scratch(buf);
        }
    }
}

fn resolved_name(ns: &ResolveResult<'_>, local: &[u8]) -> QName {
    let namespace = match ns {
        ResolveResult::Bound(Namespace(n)) => String::from_utf8_lossy(n).into_owned(),
        ResolveResult::Unbound | ResolveResult::Unknown(_) => String::new(),
    };
    QName::new(namespace, String::from_utf8_lossy(local).into_owned())
}
