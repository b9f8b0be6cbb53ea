pub mod address;
pub mod auth;
pub mod debug;
pub mod error;
pub mod mailer;
pub mod message;
pub mod mime;
pub mod recipients;
pub mod transport;

pub use self::{
    error::{PreSendError, SendError},
    mailer::{Mailer, SendState},
    message::{Mail, Mailbox},
    transport::{Transport, TransportConfig},
};
