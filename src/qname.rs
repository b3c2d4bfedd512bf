//! Qualified XML names.
//!
//! A [`QName`] pairs a namespace URI with a local name. Wrapper elements,
//! header elements, and wrapped body parts are all addressed by qualified
//! name, and protocol faults render the name in the conventional
//! `{namespace}local` form.

use std::fmt;

/// A namespace-qualified XML element name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QName {
    namespace: String,
    local: String,
}

impl QName {
    /// Create a qualified name from a namespace URI and a local name.
    ///
    /// An empty namespace denotes a name in no namespace.
    #[must_use]
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// Create a name with no namespace.
    #[must_use]
    pub fn local(local: impl Into<String>) -> Self {
        Self::new(String::new(), local)
    }

    /// The namespace URI, empty when the name is unqualified.
    #[must_use]
    pub fn namespace_uri(&self) -> &str {
        &self.namespace
    }

    /// The local part of the name.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for QName {
    /// Renders as `{namespace}local`, or bare `local` without a namespace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        }
    }
}
