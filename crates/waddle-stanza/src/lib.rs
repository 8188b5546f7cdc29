//! # waddle-stanza
//!
//! XMPP stanza model for Waddle Social.
//!
//! Stanzas are the discrete XML units (message, presence, iq) exchanged over
//! an XMPP session. This crate provides their in-memory representation on
//! top of `minidom`, typed access to the shared stanza attributes, and the
//! construction of complete request documents such as XEP-0077 in-band
//! registration.
//!
//! ## Architecture
//!
//! - **Attributes**: `to`/`from` via `jid`, `xml:lang` via `unic-langid`,
//!   `id` as a raw string; empty values read as absent
//! - **Stanza**: element-backed ([`StanzaElement`]) or document-backed
//!   ([`StanzaDocument`]), serialized through one [`Stanza`] type
//! - **Registration**: [`RegistrationBuilder`] and the [`Account`] stanza
//! - **Config**: [`StanzaConfig`] loaded from TOML
//!
//! Transport, TLS and stream negotiation live elsewhere.

pub mod account;
pub mod attr;
pub mod config;
pub mod document;
pub mod kind;
pub mod ns;
pub mod registration;
pub mod stanza;

mod error;

pub use account::Account;
pub use config::{RegistrationConfig, StanzaConfig};
pub use document::StanzaDocument;
pub use error::StanzaError;
pub use kind::{IqType, StanzaKind};
pub use registration::{
    is_registration_query, DocumentSink, RegistrationBuilder, RegistrationRequest, TracingSink,
};
pub use stanza::{Stanza, StanzaBuilder, StanzaElement};

pub use jid;
pub use minidom;
pub use unic_langid;
