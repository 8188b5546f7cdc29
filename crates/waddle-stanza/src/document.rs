//! Document-backed stanzas.

use minidom::Element;

use crate::kind::StanzaKind;
use crate::StanzaError;

/// XML declaration emitted by [`StanzaDocument::to_xml_with_declaration`].
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// A complete XML document owning a synthesized stanza tree.
///
/// Unlike [`StanzaElement`](crate::StanzaElement) this exposes no attribute
/// accessors; it is built once and serialized as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct StanzaDocument {
    root: Element,
}

impl StanzaDocument {
    /// The document's root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Consume the document and return its root element.
    pub fn into_root(self) -> Element {
        self.root
    }

    /// The stanza kind of the root element, if known.
    pub fn kind(&self) -> Option<StanzaKind> {
        StanzaKind::from_element_name(self.root.name())
    }

    /// Serialize the whole document without an XML declaration.
    pub fn to_xml(&self) -> Result<String, StanzaError> {
        let mut output = Vec::new();
        self.root.write_to(&mut output)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    /// Serialize the whole document, prefixed with an XML declaration.
    pub fn to_xml_with_declaration(&self) -> Result<String, StanzaError> {
        Ok(format!("{}{}", XML_DECLARATION, self.to_xml()?))
    }
}

impl From<Element> for StanzaDocument {
    fn from(root: Element) -> Self {
        Self { root }
    }
}

impl TryFrom<Option<Element>> for StanzaDocument {
    type Error = StanzaError;

    fn try_from(root: Option<Element>) -> Result<Self, Self::Error> {
        root.map(Self::from)
            .ok_or(StanzaError::InvalidArgument("document"))
    }
}

impl std::fmt::Display for StanzaDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let xml = self.to_xml().map_err(|_| std::fmt::Error)?;
        f.write_str(&xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IQ_XML: &str = "<iq xmlns='jabber:client' type='get' id='ping-1'><ping xmlns='urn:xmpp:ping'/></iq>";

    #[test]
    fn test_document_wraps_root() {
        let root: Element = IQ_XML.parse().unwrap();
        let document = StanzaDocument::from(root.clone());

        assert_eq!(document.root(), &root);
        assert_eq!(document.kind(), Some(StanzaKind::Iq));
        assert_eq!(document.into_root(), root);
    }

    #[test]
    fn test_absent_document_fails() {
        let result = StanzaDocument::try_from(None::<Element>);
        assert!(matches!(result, Err(StanzaError::InvalidArgument("document"))));
    }

    #[test]
    fn test_declaration_only_on_request() {
        let document = StanzaDocument::from(IQ_XML.parse::<Element>().unwrap());
        let plain = document.to_xml().unwrap();
        let declared = document.to_xml_with_declaration().unwrap();

        assert!(plain.starts_with("<iq"));
        assert!(declared.starts_with(XML_DECLARATION));
        assert!(declared.ends_with(&plain));
        assert_eq!(document.to_string(), plain);
    }

    #[test]
    fn test_unserializable_document_formats_as_error() {
        use std::fmt::Write;

        let root = Element::builder("iq", "jabber:client")
            .attr("y:bar", "1")
            .build();
        let document = StanzaDocument::from(root);
        assert!(document.to_xml().is_err());

        let mut output = String::new();
        assert!(write!(output, "{}", document).is_err());
    }
}
