//! Account registration stanza.

use crate::config::RegistrationConfig;
use crate::document::StanzaDocument;
use crate::registration::{RegistrationBuilder, RegistrationRequest};
use crate::stanza::Stanza;
use crate::StanzaError;

/// A registration stanza for a new account.
///
/// Fixes username, password and host at construction and owns the
/// synthesized registration document.
///
/// ```
/// use waddle_stanza::Account;
///
/// let account = Account::new("alice", "secret", "example.org");
/// assert_eq!(account.host(), Some("example.org"));
/// assert_eq!(account.document().root().attr("id"), Some("reg2"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    username: String,
    password: String,
    host: Option<String>,
    document: StanzaDocument,
}

impl Account {
    /// Build the registration request with the default configuration.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self::from_builder(RegistrationBuilder::new(username, password, host))
    }

    /// Build the registration request from configuration.
    pub fn with_config(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
        config: &RegistrationConfig,
    ) -> Self {
        Self::from_builder(RegistrationBuilder::with_config(
            username, password, host, config,
        ))
    }

    /// Build from a prepared registration builder (custom id, email, sink).
    pub fn from_builder(builder: RegistrationBuilder<'_>) -> Self {
        let RegistrationRequest {
            username,
            password,
            host,
            ..
        } = builder.request().clone();

        Self {
            username,
            password,
            host,
            document: builder.build(),
        }
    }

    /// Wrap an existing registration document, recovering its credentials.
    pub fn from_document(document: Option<StanzaDocument>) -> Result<Self, StanzaError> {
        let document = document.ok_or(StanzaError::InvalidArgument("document"))?;
        let request = RegistrationRequest::from_element(document.root())?.ok_or_else(|| {
            StanzaError::bad_request("Registration form request carries no credentials")
        })?;

        Ok(Self {
            username: request.username,
            password: request.password,
            host: request.host,
            document,
        })
    }

    /// The requested username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The target host, if any.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The registration document.
    pub fn document(&self) -> &StanzaDocument {
        &self.document
    }

    /// Consume the account and return its document-backed stanza.
    pub fn into_stanza(self) -> Stanza {
        Stanza::Document(self.document)
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.document, f)
    }
}
