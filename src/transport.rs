use core::{fmt, time::Duration};

use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthMechanism, Credential},
    message::Mail,
};

/// Delivers a validated message, e.g. over an SMTP connection.
///
/// [`Mailer::send`](crate::Mailer::send) only calls a transport once the message has passed
/// pre-send validation.
pub trait Transport {
    type Error;

    fn send(&mut self, config: &TransportConfig, mail: &Mail<'_>) -> Result<(), Self::Error>;

    /// Called after a successful [`send`](Transport::send).
    fn post_send(&mut self, _mail: &Mail<'_>) {}
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn send(&mut self, config: &TransportConfig, mail: &Mail<'_>) -> Result<(), Self::Error> {
        (**self).send(config, mail)
    }

    fn post_send(&mut self, mail: &Mail<'_>) {
        (**self).post_send(mail)
    }
}

/// How the connection to the SMTP server is secured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encryption {
    #[default]
    #[serde(rename = "none")]
    None,
    /// Upgrade a plain connection with STARTTLS.
    #[serde(rename = "tls")]
    StartTls,
    /// TLS from the first byte (SMTPS).
    #[serde(rename = "ssl")]
    Implicit,
}

/// Connection settings for the transport. The composition layer carries them unchanged.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub encryption: Encryption,
    /// Mechanisms the transport may authenticate with. Empty means any, tried in preference order.
    pub auth: EnumSet<AuthMechanism>,
    /// Timeout in seconds.
    pub timeout: u64,
}

impl TransportConfig {
    /// Default SMTP port.
    pub const DEFAULT_PORT: u16 = 25;
    /// RFC 2821 section 4.5.3.2.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_credential(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_encryption(mut self, value: Encryption) -> Self {
        self.encryption = value;
        self
    }

    pub fn with_auth(mut self, value: impl Into<EnumSet<AuthMechanism>>) -> Self {
        self.auth = value.into();
        self
    }

    pub fn with_timeout(mut self, value: Duration) -> Self {
        self.timeout = value.as_secs();
        self
    }

    /// Both a username and a password are needed to authenticate.
    pub fn credential(&self) -> Option<Credential<'_>> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credential::new(username, password)),
            _ => None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Mechanism to use against a server that `offered` the given ones.
    pub fn select_auth(&self, offered: EnumSet<AuthMechanism>) -> Option<AuthMechanism> {
        AuthMechanism::select(self.auth, offered)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: Self::DEFAULT_PORT,
            username: None,
            password: None,
            encryption: Encryption::None,
            auth: EnumSet::empty(),
            timeout: Self::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("encryption", &self.encryption)
            .field("auth", &self.auth)
            .field("timeout", &self.timeout)
            .finish()
    }
}
