//! Address validation and normalization.
//!
//! The built-in rule follows the RFC 5322 `addr-spec` grammar: a dot-separated local part made of
//! atoms or quoted strings, then `@`, then either a hostname or a bracketed address literal
//! (`[203.0.113.1]`, `[IPv6:2001:db8::1]`).

use core::{iter::Peekable, str::Chars};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Longest accepted address, in characters.
pub const MAX_ADDRESS_LEN: usize = 254;
/// Longest accepted local part, in characters.
pub const MAX_LOCAL_PART_LEN: usize = 64;
/// Longest accepted hostname label, in characters.
pub const MAX_LABEL_LEN: usize = 63;
/// Most labels a hostname may have.
pub const MAX_LABELS: usize = 127;

/// Decides whether a string is an acceptable email address.
///
/// Any `Fn(&str) -> bool` is a validator, so a host application can swap the built-in grammar
/// for its own predicate. A custom validator replaces [`Rfc5322`] entirely.
pub trait ValidateAddress {
    fn validate(&self, address: &str) -> bool;
}

impl<F> ValidateAddress for F
where
    F: Fn(&str) -> bool,
{
    #[inline]
    fn validate(&self, address: &str) -> bool {
        self(address)
    }
}

/// The built-in validator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rfc5322;

impl ValidateAddress for Rfc5322 {
    fn validate(&self, address: &str) -> bool {
        validate(address)
    }
}

/// Check that a string looks like an email address.
///
/// Any CR or LF rejects the address outright. Surrounding spaces and tabs are tolerated.
pub fn validate(address: &str) -> bool {
    if address.contains(['\r', '\n']) {
        return false;
    }

    let address = address.trim_matches([' ', '\t']);
    if address.chars().count() > MAX_ADDRESS_LEN {
        return false;
    }

    // a quoted local part may itself contain '@'
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };

    valid_local_part(local) && valid_domain(domain)
}

/// Trim whitespace and strip CR/LF from a display name. An empty name becomes `None`.
pub fn normalize_name(name: &str) -> Option<String> {
    let name = strip_line_breaks(name);
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_owned())
}

/// Trim whitespace, strip CR/LF and lower-case an address. The result is the key used to tell
/// recipients apart.
pub fn normalize_address(address: &str) -> String {
    strip_line_breaks(address).trim().to_lowercase()
}

fn strip_line_breaks(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

fn valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.chars().count() > MAX_LOCAL_PART_LEN {
        return false;
    }

    let mut chars = local.chars().peekable();
    loop {
        match chars.peek() {
            Some('"') => {
                chars.next();
                if !quoted_string(&mut chars) {
                    return false;
                }
            }
            Some(&c) if is_atext(c) => while chars.next_if(|&c| is_atext(c)).is_some() {},
            _ => return false,
        }

        match chars.next() {
            None => return true,
            Some('.') => continue,
            Some(_) => return false,
        }
    }
}

/// Consume the rest of a quoted string, the opening quote already taken.
fn quoted_string(chars: &mut Peekable<Chars>) -> bool {
    while let Some(c) = chars.next() {
        match c {
            '"' => return true,
            '\\' => match chars.next() {
                Some(c) if c.is_ascii() => {}
                _ => return false,
            },
            '\0' => return false,
            c if c.is_ascii() => {}
            _ => return false,
        }
    }
    // unterminated
    false
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c)
}

fn valid_domain(domain: &str) -> bool {
    match domain
        .strip_prefix('[')
        .and_then(|literal| literal.strip_suffix(']'))
    {
        Some(literal) => valid_address_literal(literal),
        None => valid_hostname(domain),
    }
}

fn valid_hostname(domain: &str) -> bool {
    let mut labels = 0;
    for label in domain.split('.') {
        labels += 1;
        if labels > MAX_LABELS || !valid_label(label) {
            return false;
        }
    }
    true
}

fn valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            bytes.len() <= MAX_LABEL_LEN
                && first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        }
        _ => false,
    }
}

fn valid_address_literal(literal: &str) -> bool {
    const IPV6_TAG: &str = "IPv6:";

    match literal.get(..IPV6_TAG.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(IPV6_TAG) => {
            literal[IPV6_TAG.len()..].parse::<Ipv6Addr>().is_ok()
        }
        _ => literal.parse::<Ipv4Addr>().is_ok(),
    }
}
