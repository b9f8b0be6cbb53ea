//! Content metadata tokens carried on a message: content type, character set, transfer encoding
//! and priority.

use core::{fmt, str::FromStr};

use crate::error::ParseTokenError;

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// The token as written in message headers.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseTokenError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($token) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ParseTokenError::new($kind, s))
            }
        }
    };
}

token_enum! {
    /// MIME content type of the message.
    ContentType, "content type" {
        TextPlain => "text/plain",
        TextHtml => "text/html",
        TextCalendar => "text/calendar",
        MultipartAlternative => "multipart/alternative",
        MultipartMixed => "multipart/mixed",
        MultipartRelated => "multipart/related",
    }
}

impl Default for ContentType {
    fn default() -> Self {
        Self::TextPlain
    }
}

token_enum! {
    /// Character set of the message.
    Charset, "charset" {
        UsAscii => "us-ascii",
        Iso88591 => "iso-8859-1",
        Utf8 => "utf-8",
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::Utf8
    }
}

token_enum! {
    /// Content-Transfer-Encoding of the message.
    Encoding, "encoding" {
        SevenBit => "7bit",
        EightBit => "8bit",
        Base64 => "base64",
        Binary => "binary",
        QuotedPrintable => "quoted-printable",
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::EightBit
    }
}

/// `X-Priority` of the message. An unset priority is `None` on the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Priority {
    High = 1,
    Normal = 3,
    Low = 5,
}

impl Priority {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl FromStr for Priority {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::High),
            "3" => Ok(Self::Normal),
            "5" => Ok(Self::Low),
            other => Err(ParseTokenError::new("priority", other)),
        }
    }
}
