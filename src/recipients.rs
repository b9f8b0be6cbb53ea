use std::collections::HashMap;

use crate::message::Mailbox;

/// The role an address is added under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecipientKind {
    To,
    Cc,
    Bcc,
    ReplyTo,
}

impl RecipientKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::To => "to",
            Self::Cc => "cc",
            Self::Bcc => "bcc",
            Self::ReplyTo => "Reply-To",
        }
    }
}

impl core::fmt::Display for RecipientKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// To, CC, BCC and Reply-To entries of one message.
///
/// An address is recorded at most once across To, CC and BCC, under whichever role added it
/// first. Reply-To is tracked on its own and holds each address at most once.
#[derive(Clone, Debug, Default)]
pub struct Recipients {
    to: Vec<Mailbox>,
    cc: Vec<Mailbox>,
    bcc: Vec<Mailbox>,
    reply_to: HashMap<String, Mailbox>,
    /// Address to display name, for every entry of `to`, `cc` and `bcc`.
    all: HashMap<String, Option<String>>,
}

impl Recipients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `mailbox` under `kind`. Returns `false` if the address was already present, in
    /// which case nothing changes.
    pub fn insert(&mut self, kind: RecipientKind, mailbox: Mailbox) -> bool {
        let list = match kind {
            RecipientKind::To => &mut self.to,
            RecipientKind::Cc => &mut self.cc,
            RecipientKind::Bcc => &mut self.bcc,
            RecipientKind::ReplyTo => {
                if self.reply_to.contains_key(mailbox.address()) {
                    return false;
                }
                self.reply_to.insert(mailbox.address().to_owned(), mailbox);
                return true;
            }
        };

        if self.all.contains_key(mailbox.address()) {
            return false;
        }
        self.all.insert(
            mailbox.address().to_owned(),
            mailbox.name().map(str::to_owned),
        );
        list.push(mailbox);
        true
    }

    pub fn to(&self) -> &[Mailbox] {
        &self.to
    }

    pub fn cc(&self) -> &[Mailbox] {
        &self.cc
    }

    pub fn bcc(&self) -> &[Mailbox] {
        &self.bcc
    }

    /// Reply-To entries, ordered by address.
    pub fn reply_to(&self) -> Vec<&Mailbox> {
        let mut entries: Vec<_> = self.reply_to.values().collect();
        entries.sort_unstable_by(|a, b| a.address().cmp(b.address()));
        entries
    }

    /// Whether a normalized address is already a To, CC or BCC recipient.
    pub fn contains(&self, address: &str) -> bool {
        self.all.contains_key(address)
    }

    /// Display name recorded for a recipient. `None` if the address is not a recipient or was
    /// added without a name.
    pub fn name_of(&self, address: &str) -> Option<&str> {
        self.all.get(address).and_then(Option::as_deref)
    }

    /// Number of To, CC and BCC recipients.
    pub fn len(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
