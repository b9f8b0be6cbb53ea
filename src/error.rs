use thiserror::Error;

/// A message that failed the final check before being handed to a transport. The composed state
/// is left intact, so the gap can be fixed and the send retried.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PreSendError {
    #[error("you must provide at least one recipient email address")]
    NoRecipients,
    #[error("message body empty")]
    EmptyBody,
}

#[derive(Debug, Error)]
pub enum SendError<E> {
    #[error(transparent)]
    PreSend(#[from] PreSendError),
    #[error("transport failed to deliver the message")]
    Transport(#[source] E),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognized {kind} `{value}`")]
pub struct ParseTokenError {
    kind: &'static str,
    value: String,
}

impl ParseTokenError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
