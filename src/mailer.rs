use core::fmt::Debug;

use crate::{
    address::{self, Rfc5322, ValidateAddress},
    debug::DebugOutput,
    error::{PreSendError, SendError},
    message::{Mail, Mailbox},
    mime::{Charset, ContentType, Encoding, Priority},
    recipients::{RecipientKind, Recipients},
    transport::{Transport, TransportConfig},
};

/// Where a message is on its way to the transport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SendState {
    /// Being populated. Any change to the message returns it here.
    #[default]
    Composing,
    /// Pre-send checks are running.
    Validating,
    /// Passed pre-send validation; the content type is final.
    Ready,
    /// Failed pre-send validation.
    Rejected,
}

/// Composition session for a single outgoing message.
///
/// Not meant to be shared between threads; wrap it in a lock if it must be.
pub struct Mailer {
    /// Handed to the transport on [`send`](Mailer::send).
    pub config: TransportConfig,
    priority: Option<Priority>,
    charset: Charset,
    content_type: ContentType,
    encoding: Encoding,
    from: Option<Mailbox>,
    sender: String,
    subject: String,
    body: String,
    alt_body: String,
    recipients: Recipients,
    validator: Box<dyn ValidateAddress + Send + Sync>,
    debug: DebugOutput,
    state: SendState,
}

impl Mailer {
    pub fn new() -> Self {
        Self {
            config: TransportConfig::default(),
            priority: None,
            charset: Charset::default(),
            content_type: ContentType::default(),
            encoding: Encoding::default(),
            from: None,
            sender: String::new(),
            subject: String::new(),
            body: String::new(),
            alt_body: String::new(),
            recipients: Recipients::new(),
            validator: Box::new(Rfc5322),
            debug: DebugOutput::default(),
            state: SendState::Composing,
        }
    }

    /// Replace the built-in address grammar with `validator`. The built-in rule, including its
    /// CR/LF check, is then skipped entirely.
    pub fn with_validator(mut self, validator: impl ValidateAddress + Send + Sync + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn with_debug_output(mut self, value: DebugOutput) -> Self {
        self.debug = value;
        self
    }

    pub fn with_config(mut self, value: TransportConfig) -> Self {
        self.config = value;
        self
    }

    /// Turn debug output on or off. Never affects validation results.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug.set_enabled(enabled);
    }

    pub fn state(&self) -> SendState {
        self.state
    }

    pub fn add_to(&mut self, address: &str, name: &str) -> bool {
        self.add_an_address(RecipientKind::To, address, name)
    }

    pub fn add_cc(&mut self, address: &str, name: &str) -> bool {
        self.add_an_address(RecipientKind::Cc, address, name)
    }

    pub fn add_bcc(&mut self, address: &str, name: &str) -> bool {
        self.add_an_address(RecipientKind::Bcc, address, name)
    }

    pub fn add_reply_to(&mut self, address: &str, name: &str) -> bool {
        self.add_an_address(RecipientKind::ReplyTo, address, name)
    }

    /// Returns `false` only if the address is invalid. Adding an address that is already present
    /// succeeds without changing anything.
    fn add_an_address(&mut self, kind: RecipientKind, address: &str, name: &str) -> bool {
        let Some(mailbox) = self.parse_mailbox(kind.as_str(), address, name) else {
            return false;
        };

        // duplicates are deliberately not logged
        self.recipients.insert(kind, mailbox);
        self.state = SendState::Composing;
        true
    }

    /// Set the From address. The envelope sender defaults to it if no sender is set yet.
    pub fn set_from(&mut self, address: &str, name: &str) -> bool {
        let Some(mailbox) = self.parse_mailbox("from", address, name) else {
            return false;
        };

        if self.sender.is_empty() {
            self.sender = mailbox.address().to_owned();
        }
        self.from = Some(mailbox);
        self.state = SendState::Composing;
        true
    }

    fn parse_mailbox(&self, role: &str, address: &str, name: &str) -> Option<Mailbox> {
        if !self.validator.validate(address) {
            self.debug
                .emit(|| tracing::debug!(role = %role, address = %address, "invalid address"));
            return None;
        }

        Some(Mailbox::new(
            address::normalize_address(address),
            address::normalize_name(name),
        ))
    }

    /// Set the envelope sender, which bounces are returned to. Not validated.
    pub fn set_sender(&mut self, value: impl Into<String>) {
        self.sender = value.into();
        self.state = SendState::Composing;
    }

    pub fn set_subject(&mut self, value: impl Into<String>) {
        self.subject = value.into();
        self.state = SendState::Composing;
    }

    /// HTML or plain text body. Call [`set_content_as_html`](Mailer::set_content_as_html) if HTML.
    pub fn set_body(&mut self, value: impl Into<String>) {
        self.body = value.into();
        self.state = SendState::Composing;
    }

    /// Plain text alternative to an HTML body.
    pub fn set_alt_body(&mut self, value: impl Into<String>) {
        self.alt_body = value.into();
        self.state = SendState::Composing;
    }

    pub fn set_content_as_html(&mut self, html: bool) {
        self.set_content_type(if html {
            ContentType::TextHtml
        } else {
            ContentType::TextPlain
        });
    }

    pub fn set_content_type(&mut self, value: ContentType) {
        self.content_type = value;
        self.state = SendState::Composing;
    }

    pub fn set_charset(&mut self, value: Charset) {
        self.charset = value;
        self.state = SendState::Composing;
    }

    pub fn set_encoding(&mut self, value: Encoding) {
        self.encoding = value;
        self.state = SendState::Composing;
    }

    pub fn set_priority(&mut self, value: impl Into<Option<Priority>>) {
        self.priority = value.into();
        self.state = SendState::Composing;
    }

    pub fn from(&self) -> Option<&Mailbox> {
        self.from.as_ref()
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn alt_body(&self) -> &str {
        &self.alt_body
    }

    /// Content type as it stands. Only final once the message is [`SendState::Ready`].
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn recipients(&self) -> &Recipients {
        &self.recipients
    }

    /// Snapshot of the message as a transport would see it.
    pub fn mail(&self) -> Mail<'_> {
        Mail {
            from: self.from.as_ref(),
            sender: &self.sender,
            to: self.recipients.to(),
            cc: self.recipients.cc(),
            bcc: self.recipients.bcc(),
            reply_to: self.recipients.reply_to(),
            subject: &self.subject,
            body: &self.body,
            alt_body: &self.alt_body,
            content_type: self.content_type,
            charset: self.charset,
            encoding: self.encoding,
            priority: self.priority,
        }
    }

    /// Validate the message and hand it to `transport`.
    ///
    /// A rejected message is not passed to the transport and is left as it was, so it can be fixed
    /// and sent again.
    pub fn send<T>(&mut self, mut transport: T) -> Result<(), SendError<T::Error>>
    where
        T: Transport,
    {
        self.pre_send()?;

        let mail = self.mail();
        transport
            .send(&self.config, &mail)
            .map_err(SendError::Transport)?;

        transport.post_send(&mail);
        self.post_send(&mail);
        Ok(())
    }

    /// Check the message can be sent and settle its content type.
    ///
    /// Only recipients and body are checked. A missing From address or subject is accepted.
    pub fn pre_send(&mut self) -> Result<(), PreSendError> {
        self.state = SendState::Validating;

        let checked = if self.recipients.is_empty() {
            Err(PreSendError::NoRecipients)
        } else if self.body.is_empty() {
            Err(PreSendError::EmptyBody)
        } else {
            Ok(())
        };

        match checked {
            Ok(()) => {
                self.negotiate_content_type();
                self.state = SendState::Ready;
            }
            Err(e) => {
                self.debug
                    .emit(|| tracing::debug!(reason = %e, "message rejected before sending"));
                self.state = SendState::Rejected;
            }
        }

        checked
    }

    /// A message with an alternative body is always multipart/alternative, whatever content type
    /// was set before.
    fn negotiate_content_type(&mut self) {
        if self.alternative_body_exists() {
            self.content_type = ContentType::MultipartAlternative;
        }
    }

    fn alternative_body_exists(&self) -> bool {
        !self.alt_body.is_empty()
    }

    fn post_send(&self, mail: &Mail<'_>) {
        self.debug.emit(|| {
            tracing::debug!(
                recipients = mail.envelope_recipients().count(),
                "message handed to transport"
            )
        });
    }
}

impl Default for Mailer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Mailer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mailer")
            .field("config", &self.config)
            .field("from", &self.from)
            .field("sender", &self.sender)
            .field("subject", &self.subject)
            .field("recipients", &self.recipients)
            .field("content_type", &self.content_type)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
