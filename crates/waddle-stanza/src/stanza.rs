//! Stanza model.
//!
//! A stanza is backed either by a single element (a stanza that was parsed
//! off the wire or built from typed fields) or by a complete document (a
//! synthesized request such as in-band registration). Attribute accessors
//! only exist for the element-backed form.

use jid::Jid;
use minidom::Element;
use tracing::debug;
use unic_langid::LanguageIdentifier;

use crate::attr;
use crate::config::StanzaConfig;
use crate::document::StanzaDocument;
use crate::kind::StanzaKind;
use crate::ns;
use crate::StanzaError;

/// An element-backed stanza.
#[derive(Debug, Clone, PartialEq)]
pub struct StanzaElement {
    element: Element,
}

impl StanzaElement {
    /// Destination address (`to`).
    pub fn destination(&self) -> Result<Option<Jid>, StanzaError> {
        attr::get_jid(&self.element, attr::TO)
    }

    /// Set or clear the destination address.
    pub fn set_destination(&mut self, to: Option<&Jid>) {
        attr::set_jid(&mut self.element, attr::TO, to);
    }

    /// Sender address (`from`). `None` means the stanza was generated by the
    /// client's server.
    pub fn sender(&self) -> Result<Option<Jid>, StanzaError> {
        attr::get_jid(&self.element, attr::FROM)
    }

    /// Set or clear the sender address.
    pub fn set_sender(&mut self, from: Option<&Jid>) {
        attr::set_jid(&mut self.element, attr::FROM, from);
    }

    /// Stanza identifier, used to correlate requests and responses.
    pub fn id(&self) -> Option<&str> {
        attr::get(&self.element, attr::ID)
    }

    /// Set or clear the stanza identifier.
    pub fn set_id(&mut self, id: Option<&str>) {
        attr::set(&mut self.element, attr::ID, id);
    }

    /// Language of human-readable character data (`xml:lang`).
    pub fn lang(&self) -> Result<Option<LanguageIdentifier>, StanzaError> {
        attr::get_lang(&self.element)
    }

    /// Set or clear the language.
    pub fn set_lang(&mut self, lang: Option<&LanguageIdentifier>) {
        attr::set_lang(&mut self.element, lang);
    }

    /// The stanza kind, if the element name is one of message/presence/iq.
    pub fn kind(&self) -> Option<StanzaKind> {
        StanzaKind::from_element_name(self.element.name())
    }

    /// Whether the stanza has no child nodes.
    pub fn is_empty(&self) -> bool {
        self.element.nodes().next().is_none()
    }

    /// The backing element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Consume the stanza and return the backing element.
    pub fn into_element(self) -> Element {
        self.element
    }

    /// Serialize the backing element.
    pub fn to_xml(&self) -> Result<String, StanzaError> {
        let mut output = Vec::new();
        self.element.write_to(&mut output)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

impl From<Element> for StanzaElement {
    /// Wrap an existing element. Its attributes are exposed unchanged.
    fn from(element: Element) -> Self {
        Self { element }
    }
}

impl TryFrom<Option<Element>> for StanzaElement {
    type Error = StanzaError;

    fn try_from(element: Option<Element>) -> Result<Self, Self::Error> {
        element
            .map(Self::from)
            .ok_or(StanzaError::InvalidArgument("element"))
    }
}

impl From<StanzaElement> for Element {
    fn from(stanza: StanzaElement) -> Self {
        stanza.element
    }
}

impl std::fmt::Display for StanzaElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let xml = self.to_xml().map_err(|_| std::fmt::Error)?;
        f.write_str(&xml)
    }
}

/// Builder for new element-backed stanzas.
///
/// ```
/// use waddle_stanza::{StanzaBuilder, StanzaKind};
///
/// let stanza = StanzaBuilder::new(StanzaKind::Presence)
///     .id("p1")
///     .build();
/// assert_eq!(stanza.id(), Some("p1"));
/// ```
#[derive(Debug, Clone)]
pub struct StanzaBuilder {
    kind: StanzaKind,
    namespace: String,
    to: Option<Jid>,
    from: Option<Jid>,
    id: Option<String>,
    lang: Option<LanguageIdentifier>,
    payloads: Vec<Element>,
}

impl StanzaBuilder {
    /// Start a stanza of the given kind in the `jabber:client` namespace.
    pub fn new(kind: StanzaKind) -> Self {
        Self {
            kind,
            namespace: ns::JABBER_CLIENT.to_string(),
            to: None,
            from: None,
            id: None,
            lang: None,
            payloads: Vec::new(),
        }
    }

    /// Start a stanza using the configured default namespace.
    pub fn with_config(kind: StanzaKind, config: &StanzaConfig) -> Self {
        Self::new(kind).namespace(config.default_namespace.clone())
    }

    /// Set the stanza namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the destination address.
    pub fn to(mut self, to: impl Into<Option<Jid>>) -> Self {
        self.to = to.into();
        self
    }

    /// Set the sender address.
    pub fn from(mut self, from: impl Into<Option<Jid>>) -> Self {
        self.from = from.into();
        self
    }

    /// Set the stanza identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the language.
    pub fn lang(mut self, lang: impl Into<Option<LanguageIdentifier>>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Append a payload child. `None` is skipped so optional payloads can be
    /// passed straight through.
    pub fn payload(mut self, payload: impl Into<Option<Element>>) -> Self {
        if let Some(payload) = payload.into() {
            self.payloads.push(payload);
        }
        self
    }

    /// Append several payload children in order, skipping `None`.
    pub fn payloads<I, E>(mut self, payloads: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Option<Element>>,
    {
        self.payloads
            .extend(payloads.into_iter().filter_map(|p| p.into()));
        self
    }

    /// Build the stanza element.
    pub fn build(self) -> StanzaElement {
        let mut builder = Element::builder(self.kind.as_str(), self.namespace);

        if let Some(to) = &self.to {
            builder = builder.attr(attr::TO, to.to_string());
        }
        if let Some(from) = &self.from {
            builder = builder.attr(attr::FROM, from.to_string());
        }
        if let Some(id) = self.id.filter(|id| !id.is_empty()) {
            builder = builder.attr(attr::ID, id);
        }
        if let Some(lang) = &self.lang {
            builder = builder.attr(attr::LANG, lang.to_string());
        }

        let payload_count = self.payloads.len();
        let element = builder.append_all(self.payloads).build();

        debug!(kind = %self.kind, payloads = payload_count, "Built stanza");

        StanzaElement { element }
    }
}

/// A stanza in either of its backing forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Stanza {
    /// Backed by a single element; attribute accessors are available.
    Element(StanzaElement),
    /// Backed by a complete synthesized document.
    Document(StanzaDocument),
}

impl Stanza {
    /// Serialize the stanza, element or whole document depending on backing.
    pub fn to_xml(&self) -> Result<String, StanzaError> {
        match self {
            Stanza::Element(element) => element.to_xml(),
            Stanza::Document(document) => document.to_xml(),
        }
    }

    /// The stanza kind, if known.
    pub fn kind(&self) -> Option<StanzaKind> {
        match self {
            Stanza::Element(element) => element.kind(),
            Stanza::Document(document) => document.kind(),
        }
    }

    /// The element-backed form, if this stanza has one.
    pub fn as_element(&self) -> Option<&StanzaElement> {
        match self {
            Stanza::Element(element) => Some(element),
            Stanza::Document(_) => None,
        }
    }

    /// Mutable access to the element-backed form.
    pub fn as_element_mut(&mut self) -> Option<&mut StanzaElement> {
        match self {
            Stanza::Element(element) => Some(element),
            Stanza::Document(_) => None,
        }
    }

    /// The document-backed form, if this stanza has one.
    pub fn as_document(&self) -> Option<&StanzaDocument> {
        match self {
            Stanza::Element(_) => None,
            Stanza::Document(document) => Some(document),
        }
    }
}

impl From<StanzaElement> for Stanza {
    fn from(element: StanzaElement) -> Self {
        Stanza::Element(element)
    }
}

impl From<StanzaDocument> for Stanza {
    fn from(document: StanzaDocument) -> Self {
        Stanza::Document(document)
    }
}

impl std::fmt::Display for Stanza {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stanza::Element(element) => std::fmt::Display::fmt(element, f),
            Stanza::Document(document) => std::fmt::Display::fmt(document, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE_XML: &str = "<message xmlns='jabber:client' to='bob@example.com' from='alice@example.com/phone' id='m1' xml:lang='en'><body>hello</body></message>";

    fn jid(s: &str) -> Jid {
        s.parse().unwrap()
    }

    #[test]
    fn test_wrap_exposes_existing_attributes() {
        let element: Element = MESSAGE_XML.parse().unwrap();
        let stanza = StanzaElement::from(element.clone());

        assert_eq!(stanza.destination().unwrap(), Some(jid("bob@example.com")));
        assert_eq!(stanza.sender().unwrap(), Some(jid("alice@example.com/phone")));
        assert_eq!(stanza.id(), Some("m1"));
        assert_eq!(stanza.lang().unwrap().map(|l| l.to_string()), Some("en".to_string()));
        assert_eq!(stanza.kind(), Some(StanzaKind::Message));
        assert!(!stanza.is_empty());
        // Wrapping leaves the element untouched
        assert_eq!(stanza.element(), &element);
    }

    #[test]
    fn test_wrap_absent_element_fails() {
        let result = StanzaElement::try_from(None::<Element>);
        assert!(matches!(result, Err(StanzaError::InvalidArgument("element"))));
    }

    #[test]
    fn test_setters_write_and_remove() {
        let mut stanza = StanzaElement::from(MESSAGE_XML.parse::<Element>().unwrap());

        stanza.set_destination(Some(&jid("carol@example.net")));
        assert_eq!(stanza.destination().unwrap(), Some(jid("carol@example.net")));

        stanza.set_destination(None);
        stanza.set_sender(None);
        stanza.set_id(None);
        stanza.set_lang(None);

        let element = stanza.element();
        for name in [attr::TO, attr::FROM, attr::ID, attr::LANG] {
            assert!(element.attr(name).is_none(), "{} should be removed", name);
        }
        assert!(stanza.destination().unwrap().is_none());
        assert!(stanza.id().is_none());
        // Payload is kept
        assert!(element.get_child("body", ns::JABBER_CLIENT).is_some());
    }

    #[test]
    fn test_build_bare_stanza() {
        let stanza = StanzaBuilder::new(StanzaKind::Presence)
            .namespace(ns::JABBER_SERVER)
            .build();
        let element = stanza.element();

        assert_eq!(element.name(), "presence");
        assert_eq!(element.ns(), ns::JABBER_SERVER);
        assert_eq!(element.attrs().count(), 0);
        assert!(stanza.is_empty());
    }

    #[test]
    fn test_build_full_stanza() {
        let body = Element::builder("body", ns::JABBER_CLIENT).append("hi").build();
        let thread = Element::builder("thread", ns::JABBER_CLIENT).append("t1").build();

        let stanza = StanzaBuilder::new(StanzaKind::Message)
            .to(jid("bob@example.com"))
            .from(jid("alice@example.com/desk"))
            .id("m42")
            .lang("de-AT".parse::<LanguageIdentifier>().unwrap())
            .payload(body)
            .payload(None::<Element>)
            .payload(thread)
            .build();

        assert_eq!(stanza.destination().unwrap(), Some(jid("bob@example.com")));
        assert_eq!(stanza.sender().unwrap(), Some(jid("alice@example.com/desk")));
        assert_eq!(stanza.id(), Some("m42"));
        assert_eq!(stanza.element().attr(attr::LANG), Some("de-AT"));

        let names: Vec<&str> = stanza.element().children().map(|c| c.name()).collect();
        assert_eq!(names, vec!["body", "thread"]);
    }

    #[test]
    fn test_build_payloads_skips_absent() {
        let ping = Element::builder("ping", "urn:xmpp:ping").build();
        let stanza = StanzaBuilder::new(StanzaKind::Iq)
            .payloads(vec![None, Some(ping), None])
            .build();

        assert_eq!(stanza.element().children().count(), 1);
        assert!(stanza.element().get_child("ping", "urn:xmpp:ping").is_some());
    }

    #[test]
    fn test_build_empty_id_is_omitted() {
        let stanza = StanzaBuilder::new(StanzaKind::Iq).id("").build();
        assert!(stanza.element().attr(attr::ID).is_none());
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let stanza = StanzaElement::from(MESSAGE_XML.parse::<Element>().unwrap());
        let first = stanza.to_xml().unwrap();
        let second = stanza.to_xml().unwrap();
        assert_eq!(first, second);
        assert_eq!(stanza.to_string(), String::from(stanza.element()));
    }

    #[test]
    fn test_unserializable_stanza_formats_as_error() {
        use std::fmt::Write;

        // No declaration binds the `y` prefix
        let element = Element::builder("message", ns::JABBER_CLIENT)
            .attr("y:bar", "1")
            .build();
        let stanza = StanzaElement::from(element);
        assert!(stanza.to_xml().is_err());

        let mut output = String::new();
        assert!(write!(output, "{}", stanza).is_err());
        assert!(write!(output, "{}", Stanza::from(stanza)).is_err());
    }

    #[test]
    fn test_cleared_prefixed_stanza_still_serializes() {
        let element: Element = "<message xmlns='jabber:client' xmlns:x='urn:x' x:foo='1' id='a'/>"
            .parse()
            .unwrap();
        let mut stanza = StanzaElement::from(element);
        assert!(stanza.to_xml().is_ok());

        stanza.set_id(None);
        stanza.set_destination(None);

        let xml = stanza.to_xml().unwrap();
        assert_eq!(stanza.to_string(), xml);
        assert!(stanza.id().is_none());
    }

    #[test]
    fn test_serialized_stanza_parses_back() {
        let stanza = StanzaBuilder::new(StanzaKind::Message)
            .to(jid("bob@example.com"))
            .id("m1")
            .build();
        let reparsed: Element = stanza.to_xml().unwrap().parse().unwrap();
        assert_eq!(&reparsed, stanza.element());
    }

    #[test]
    fn test_stanza_enum_dispatch() {
        let element = StanzaBuilder::new(StanzaKind::Message).id("x").build();
        let mut stanza = Stanza::from(element.clone());

        assert_eq!(stanza.kind(), Some(StanzaKind::Message));
        assert_eq!(stanza.as_element(), Some(&element));
        assert!(stanza.as_document().is_none());
        assert_eq!(stanza.to_xml().unwrap(), element.to_xml().unwrap());

        stanza.as_element_mut().unwrap().set_id(Some("y"));
        assert_eq!(stanza.as_element().unwrap().id(), Some("y"));
    }
}
