//! Namespace URIs used by stanzas.

/// XMPP client namespace
pub const JABBER_CLIENT: &str = "jabber:client";
/// XMPP server namespace
pub const JABBER_SERVER: &str = "jabber:server";
/// XEP-0077 In-Band Registration
pub const REGISTER: &str = "jabber:iq:register";
