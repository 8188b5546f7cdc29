//! Attribute accessors over a backing `minidom::Element`.
//!
//! Every optional stanza field maps to exactly one attribute. Reads treat a
//! missing attribute and an empty one the same way (`None`). Writes either
//! store the canonical string form or remove the attribute entirely.

use std::str::FromStr;

use jid::Jid;
use minidom::Element;
use tracing::trace;
use unic_langid::LanguageIdentifier;

use crate::StanzaError;

/// Destination address attribute.
pub const TO: &str = "to";
/// Sender address attribute.
pub const FROM: &str = "from";
/// Stanza identifier attribute.
pub const ID: &str = "id";
/// Language attribute.
pub const LANG: &str = "xml:lang";
/// Stanza type attribute.
pub const TYPE: &str = "type";

/// Read an attribute, normalizing empty values to `None`.
pub fn get<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element.attr(name).filter(|value| !value.is_empty())
}

/// Write an attribute, or remove it when `value` is `None`.
pub fn set(element: &mut Element, name: &str, value: Option<&str>) {
    match value {
        Some(value) => element.set_attr(name, value),
        None => remove(element, name),
    }
}

/// Remove an attribute, keeping everything else about the element intact.
///
/// minidom cannot drop an existing attribute in place, so the element is
/// rebuilt without it. Prefix declarations are carried over so prefixed
/// attributes and children still serialize.
pub fn remove(element: &mut Element, name: &str) {
    if element.attr(name).is_none() {
        return;
    }

    trace!(element = %element.name(), attr = %name, "Removing attribute");

    let mut builder = Element::builder(element.name(), element.ns());
    for (key, value) in element.attrs() {
        if key != name {
            builder = builder.attr(key, value);
        }
    }
    let mut rebuilt = builder.append_all(element.nodes().cloned()).build();
    rebuilt.prefixes = element.prefixes.clone();
    *element = rebuilt;
}

/// Read an attribute and parse it through the value's `FromStr`.
pub fn get_parsed<T>(element: &Element, name: &str) -> Result<Option<T>, StanzaError>
where
    T: FromStr,
    StanzaError: From<T::Err>,
{
    get(element, name)
        .map(|value| value.parse::<T>().map_err(StanzaError::from))
        .transpose()
}

/// Read an address attribute.
pub fn get_jid(element: &Element, name: &str) -> Result<Option<Jid>, StanzaError> {
    get_parsed(element, name)
}

/// Write an address attribute in its canonical form.
pub fn set_jid(element: &mut Element, name: &str, value: Option<&Jid>) {
    let value = value.map(|jid| jid.to_string());
    set(element, name, value.as_deref());
}

/// Read the `xml:lang` attribute.
pub fn get_lang(element: &Element) -> Result<Option<LanguageIdentifier>, StanzaError> {
    get_parsed(element, LANG)
}

/// Write the `xml:lang` attribute as a canonical language tag.
pub fn set_lang(element: &mut Element, value: Option<&LanguageIdentifier>) {
    let value = value.map(|lang| lang.to_string());
    set(element, LANG, value.as_deref());
}
