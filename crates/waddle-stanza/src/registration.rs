//! XEP-0077: In-Band Registration requests.
//!
//! Builds the client side of the registration exchange as a complete
//! document:
//!
//! ```xml
//! <iq xmlns='jabber:client' type='set' id='reg2' to='example.org'>
//!   <query xmlns='jabber:iq:register'>
//!     <username>alice</username>
//!     <password>secret</password>
//!   </query>
//! </iq>
//! ```
//!
//! The `iq` sits in the `jabber:client` stream namespace. The `type` and `id`
//! attributes come from [`RegistrationConfig`] and can be
//! overridden per request. Synthesized documents are only reported to a
//! [`DocumentSink`] when one is supplied or `log_documents` is enabled.

use minidom::Element;
use tracing::debug;

use crate::attr;
use crate::config::RegistrationConfig;
use crate::document::StanzaDocument;
use crate::kind::{IqType, StanzaKind};
use crate::ns;
use crate::StanzaError;

/// Receives every registration document right after it is synthesized.
pub trait DocumentSink {
    /// Called once per built document.
    fn document_built(&self, document: &StanzaDocument);
}

/// Sink that emits the full document text through `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DocumentSink for TracingSink {
    fn document_built(&self, document: &StanzaDocument) {
        debug!(document = %document, "Synthesized registration document");
    }
}

static TRACING_SINK: TracingSink = TracingSink;

/// Fields of a registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// The requested username
    pub username: String,
    /// The password
    pub password: String,
    /// Target host (the iq `to` attribute)
    pub host: Option<String>,
    /// Optional email address
    pub email: Option<String>,
    /// IQ identifier
    pub id: String,
    /// IQ type
    pub iq_type: IqType,
}

impl RegistrationRequest {
    /// Parse a registration request from an `iq` element.
    ///
    /// Returns:
    /// - `Ok(None)` for a `get` request (the client asks for the form)
    /// - `Ok(Some(request))` for a `set` request with username and password
    /// - `Err(StanzaError)` for anything else
    pub fn from_element(element: &Element) -> Result<Option<Self>, StanzaError> {
        if element.name() != StanzaKind::Iq.as_str() {
            return Err(StanzaError::bad_request(format!(
                "Expected <iq/>, found <{}/>",
                element.name()
            )));
        }

        let query = element
            .get_child("query", ns::REGISTER)
            .ok_or_else(|| StanzaError::bad_request("Missing query element"))?;

        let iq_type = attr::get(element, attr::TYPE).unwrap_or_default();
        let id = attr::get(element, attr::ID).unwrap_or_default().to_string();

        match iq_type.parse::<IqType>() {
            Ok(IqType::Get) => {
                debug!(id = %id, "Registration form requested");
                Ok(None)
            }
            Ok(IqType::Set) => {
                let field = |name: &str| {
                    query
                        .get_child(name, ns::REGISTER)
                        .map(|e| e.text())
                        .unwrap_or_default()
                };

                let username = field("username");
                let password = field("password");
                let email = Some(field("email")).filter(|s| !s.is_empty());

                if username.is_empty() {
                    return Err(StanzaError::not_acceptable("Username is required"));
                }
                if password.is_empty() {
                    return Err(StanzaError::not_acceptable("Password is required"));
                }

                debug!(id = %id, username = %username, "Registration request parsed");

                Ok(Some(Self {
                    username,
                    password,
                    host: attr::get(element, attr::TO).map(str::to_string),
                    email,
                    id,
                    iq_type: IqType::Set,
                }))
            }
            _ => Err(StanzaError::bad_request(format!(
                "Invalid IQ type for registration: {}",
                iq_type
            ))),
        }
    }
}

/// Check if an element is an `iq` carrying a registration query.
pub fn is_registration_query(element: &Element) -> bool {
    element.name() == StanzaKind::Iq.as_str() && element.get_child("query", ns::REGISTER).is_some()
}

/// Builder for registration request documents.
pub struct RegistrationBuilder<'a> {
    request: RegistrationRequest,
    sink: Option<&'a dyn DocumentSink>,
}

impl std::fmt::Debug for RegistrationBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationBuilder")
            .field("request", &self.request)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl<'a> RegistrationBuilder<'a> {
    /// Start a registration request with the default configuration.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self::with_config(username, password, host, &RegistrationConfig::default())
    }

    /// Start a registration request from configuration.
    ///
    /// When `log_documents` is set the built document goes to [`TracingSink`].
    pub fn with_config(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
        config: &RegistrationConfig,
    ) -> Self {
        let host = host.into();
        let sink: Option<&'a dyn DocumentSink> = if config.log_documents {
            Some(&TRACING_SINK)
        } else {
            None
        };

        Self {
            request: RegistrationRequest {
                username: username.into(),
                password: password.into(),
                host: Some(host).filter(|h| !h.is_empty()),
                email: None,
                id: config.id.clone(),
                iq_type: config.iq_type,
            },
            sink,
        }
    }

    /// Override the IQ identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.request.id = id.into();
        self
    }

    /// Override the IQ type.
    pub fn iq_type(mut self, iq_type: IqType) -> Self {
        self.request.iq_type = iq_type;
        self
    }

    /// Include an email address field.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.request.email = Some(email.into()).filter(|e| !e.is_empty());
        self
    }

    /// Report the built document to `sink`.
    pub fn sink(mut self, sink: &'a dyn DocumentSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// The request as configured so far.
    pub fn request(&self) -> &RegistrationRequest {
        &self.request
    }

    /// Synthesize the registration document.
    pub fn build(self) -> StanzaDocument {
        let request = self.request;

        let mut query = Element::builder("query", ns::REGISTER)
            .append(text_element("username", &request.username))
            .append(text_element("password", &request.password));
        if let Some(email) = &request.email {
            query = query.append(text_element("email", email));
        }

        let mut iq = Element::builder(StanzaKind::Iq.as_str(), ns::JABBER_CLIENT)
            .attr(attr::TYPE, request.iq_type.as_str());
        if !request.id.is_empty() {
            iq = iq.attr(attr::ID, request.id.as_str());
        }
        if let Some(host) = &request.host {
            iq = iq.attr(attr::TO, host.as_str());
        }

        let document = StanzaDocument::from(iq.append(query.build()).build());

        debug!(
            id = %request.id,
            username = %request.username,
            "Built registration request"
        );

        if let Some(sink) = self.sink {
            sink.document_built(&document);
        }

        document
    }
}

/// Element in the register namespace holding `text`, left empty when `text` is.
fn text_element(name: &str, text: &str) -> Element {
    let builder = Element::builder(name, ns::REGISTER);
    if text.is_empty() {
        builder.build()
    } else {
        builder.append(text).build()
    }
}
