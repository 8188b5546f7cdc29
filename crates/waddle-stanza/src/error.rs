//! Error types for stanza construction and access.

use thiserror::Error;

/// Stanza errors.
#[derive(Debug, Error)]
pub enum StanzaError {
    /// A required value was absent (e.g. wrapping a missing element)
    #[error("Invalid argument: {0} must not be absent")]
    InvalidArgument(&'static str),

    /// Malformed address in a `to` or `from` attribute
    #[error("Malformed JID: {0}")]
    Jid(#[from] jid::Error),

    /// Malformed language tag in an `xml:lang` attribute
    #[error("Malformed language tag: {0}")]
    Locale(#[from] unic_langid::LanguageIdentifierError),

    /// XML serialization error
    #[error("XML error: {0}")]
    Xml(#[from] minidom::Error),

    /// Structurally invalid request (wrong element, missing payload)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request is well-formed but lacks a required field
    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StanzaError {
    /// Create a new bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create a new not acceptable error.
    pub fn not_acceptable(msg: impl Into<String>) -> Self {
        Self::NotAcceptable(msg.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let error = StanzaError::InvalidArgument("element");
        assert_eq!(error.to_string(), "Invalid argument: element must not be absent");
    }

    #[test]
    fn test_jid_error_converts() {
        let parse: Result<jid::Jid, jid::Error> = "".parse();
        let error: StanzaError = parse.unwrap_err().into();
        assert!(matches!(error, StanzaError::Jid(_)));
        assert!(error.to_string().starts_with("Malformed JID"));
    }

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(StanzaError::bad_request("x"), StanzaError::BadRequest(m) if m == "x"));
        assert!(matches!(StanzaError::not_acceptable("y"), StanzaError::NotAcceptable(m) if m == "y"));
        assert!(matches!(StanzaError::config("z"), StanzaError::Config(m) if m == "z"));
    }
}
