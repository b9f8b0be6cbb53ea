use crate::mime::{Charset, ContentType, Encoding, Priority};

/// A validated, normalized address with an optional display name.
///
/// Only the address takes part in equality; two mailboxes with different names but the same
/// address are the same recipient.
#[derive(Clone, Debug)]
pub struct Mailbox {
    name: Option<String>,
    address: String,
}

impl Mailbox {
    /// `address` must already be validated and normalized.
    pub(crate) fn new(address: String, name: Option<String>) -> Self {
        Self { name, address }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn local_part(&self) -> &str {
        self.address
            .rsplit_once('@')
            .map_or(self.address.as_str(), |(local, _)| local)
    }

    pub fn domain(&self) -> &str {
        self.address
            .rsplit_once('@')
            .map_or("", |(_, domain)| domain)
    }
}

impl PartialEq for Mailbox {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Mailbox {}

impl core::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "<{}>", self.address),
        }
    }
}

/// A borrowed snapshot of a composed message, as handed to a [`Transport`](crate::Transport).
///
/// The content type is only final once the message has passed pre-send validation.
#[derive(Clone, Debug)]
pub struct Mail<'a> {
    pub from: Option<&'a Mailbox>,
    /// Envelope sender; empty when unset.
    pub sender: &'a str,
    pub to: &'a [Mailbox],
    pub cc: &'a [Mailbox],
    pub bcc: &'a [Mailbox],
    /// Reply-To entries, ordered by address.
    pub reply_to: Vec<&'a Mailbox>,
    pub subject: &'a str,
    pub body: &'a str,
    pub alt_body: &'a str,
    pub content_type: ContentType,
    pub charset: Charset,
    pub encoding: Encoding,
    pub priority: Option<Priority>,
}

impl<'a> Mail<'a> {
    /// Address for `MAIL FROM`: the envelope sender, or the From address if no sender is set.
    pub fn envelope_sender(&self) -> Option<&'a str> {
        if self.sender.is_empty() {
            self.from.map(Mailbox::address)
        } else {
            Some(self.sender)
        }
    }

    /// Addresses for `RCPT TO`: To, then CC, then BCC.
    pub fn envelope_recipients(&self) -> impl Iterator<Item = &'a str> {
        self.to
            .iter()
            .chain(self.cc)
            .chain(self.bcc)
            .map(Mailbox::address)
    }

    pub fn has_alternative(&self) -> bool {
        !self.alt_body.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mailbox(address: &str, name: Option<&str>) -> Mailbox {
        Mailbox::new(address.to_owned(), name.map(str::to_owned))
    }

    #[test]
    fn identity_ignores_name() {
        assert_eq!(
            mailbox("a@example.com", Some("A")),
            mailbox("a@example.com", Some("Someone else"))
        );
        assert_ne!(mailbox("a@example.com", None), mailbox("b@example.com", None));
    }

    #[test]
    fn parts_and_display() {
        let quoted = mailbox("\"x@y\"@example.com", Some("Quoted"));
        assert_eq!(quoted.local_part(), "\"x@y\"");
        assert_eq!(quoted.domain(), "example.com");
        assert_eq!(quoted.to_string(), "Quoted <\"x@y\"@example.com>");
        assert_eq!(mailbox("a@example.com", None).to_string(), "<a@example.com>");
    }

    #[test]
    fn envelope() {
        let from = mailbox("from@example.com", None);
        let to = [mailbox("to@example.com", None)];
        let bcc = [mailbox("bcc@example.com", None)];

        let mut mail = Mail {
            from: Some(&from),
            sender: "",
            to: &to,
            cc: &[],
            bcc: &bcc,
            reply_to: Vec::new(),
            subject: "",
            body: "hi",
            alt_body: "",
            content_type: ContentType::TextPlain,
            charset: Charset::Utf8,
            encoding: Encoding::EightBit,
            priority: None,
        };

        assert_eq!(mail.envelope_sender(), Some("from@example.com"));
        assert_eq!(
            mail.envelope_recipients().collect::<Vec<_>>(),
            ["to@example.com", "bcc@example.com"]
        );

        mail.sender = "bounces@example.com";
        assert_eq!(mail.envelope_sender(), Some("bounces@example.com"));
    }
}
