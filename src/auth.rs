use core::{fmt, str::FromStr};

use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

use crate::error::ParseTokenError;

pub struct Credential<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> Credential<'a> {
    pub fn new(username: &'a str, password: &'a str) -> Self {
        Self { username, password }
    }
}

impl fmt::Debug for Credential<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// SMTP AUTH mechanisms (https://www.rfc-editor.org/rfc/rfc4954).
///
/// Variants are declared in preference order, which is also the iteration order of an
/// `EnumSet<AuthMechanism>`.
#[derive(EnumSetType, Debug, Serialize, Deserialize)]
#[enumset(serialize_repr = "list")]
pub enum AuthMechanism {
    #[serde(rename = "CRAM-MD5")]
    CramMd5,
    #[serde(rename = "LOGIN")]
    Login,
    #[serde(rename = "PLAIN")]
    Plain,
    #[serde(rename = "XOAUTH2")]
    XOAuth2,
}

impl AuthMechanism {
    /// Keyword as advertised in the EHLO `AUTH` line.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::CramMd5 => "CRAM-MD5",
            Self::Login => "LOGIN",
            Self::Plain => "PLAIN",
            Self::XOAuth2 => "XOAUTH2",
        }
    }

    /// Pick the mechanism to authenticate with.
    ///
    /// An empty `pinned` set means any mechanism may be used. The first mechanism, in preference
    /// order, that is both allowed and `offered` by the server wins.
    pub fn select(
        pinned: EnumSet<AuthMechanism>,
        offered: EnumSet<AuthMechanism>,
    ) -> Option<AuthMechanism> {
        let allowed = if pinned.is_empty() {
            EnumSet::all()
        } else {
            pinned
        };

        (allowed & offered).iter().next()
    }
}

impl fmt::Display for AuthMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for AuthMechanism {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnumSet::<AuthMechanism>::all()
            .iter()
            .find(|mech| mech.keyword().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseTokenError::new("auth mechanism", s))
    }
}

/// Collect the mechanisms named by the parameters of an EHLO `AUTH` line. Unknown mechanisms are
/// skipped.
pub fn parse_auth_keywords<'a>(words: impl IntoIterator<Item = &'a str>) -> EnumSet<AuthMechanism> {
    words
        .into_iter()
        .filter_map(|word| word.parse::<AuthMechanism>().ok())
        .collect()
}
