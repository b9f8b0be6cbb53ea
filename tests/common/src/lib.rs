use std::{
    io,
    sync::{Arc, Mutex},
};

use mailr_compose::{Mail, Transport, TransportConfig};

/// What a transport was handed for one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub host: String,
    pub port: u16,
    pub envelope_sender: Option<String>,
    pub envelope_recipients: Vec<String>,
    pub reply_to: Vec<String>,
    pub content_type: String,
    pub subject: String,
    pub body: String,
    pub alt_body: String,
}

impl Delivery {
    fn record(config: &TransportConfig, mail: &Mail<'_>) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            envelope_sender: mail.envelope_sender().map(str::to_owned),
            envelope_recipients: mail.envelope_recipients().map(str::to_owned).collect(),
            reply_to: mail
                .reply_to
                .iter()
                .map(|mailbox| mailbox.address().to_owned())
                .collect(),
            content_type: mail.content_type.to_string(),
            subject: mail.subject.to_owned(),
            body: mail.body.to_owned(),
            alt_body: mail.alt_body.to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("mock transport refused the message")]
pub struct Refused;

/// Transport that keeps every message it is given, optionally refusing them instead.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub deliveries: Vec<Delivery>,
    pub post_send_calls: usize,
    pub refuse: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }
}

impl Transport for RecordingTransport {
    type Error = Refused;

    fn send(&mut self, config: &TransportConfig, mail: &Mail<'_>) -> Result<(), Self::Error> {
        if self.refuse {
            return Err(Refused);
        }
        self.deliveries.push(Delivery::record(config, mail));
        Ok(())
    }

    fn post_send(&mut self, _mail: &Mail<'_>) {
        self.post_send_calls += 1;
    }
}

/// In-memory debug sink that can be read back while a session still holds a clone.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("buffer lock poisoned").clone();
        String::from_utf8(bytes).expect("debug output is utf-8")
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "buffer lock poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
