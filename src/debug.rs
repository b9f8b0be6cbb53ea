//! Per-session debug output.
//!
//! Each [`Mailer`](crate::Mailer) owns its own sink instead of sharing a process-wide logger, so
//! sessions can be observed independently. While enabled, the session's diagnostic events are
//! routed to the sink only; while disabled they go to whatever global `tracing` subscriber the
//! host installed.

use std::{io, sync::Mutex};

use tracing::{dispatcher, Dispatch, Level};

pub struct DebugOutput {
    enabled: bool,
    dispatch: Dispatch,
}

impl DebugOutput {
    /// Write debug lines to `writer`. Output starts disabled.
    pub fn new<W>(writer: W) -> Self
    where
        W: io::Write + Send + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(Mutex::new(writer))
            .with_max_level(Level::DEBUG)
            .with_target(false)
            .finish();

        Self {
            enabled: false,
            dispatch: Dispatch::new(subscriber),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn enabled(mut self, value: bool) -> Self {
        self.enabled = value;
        self
    }

    pub fn set_enabled(&mut self, value: bool) {
        self.enabled = value;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Run `f`, capturing the events it emits when output is enabled.
    pub(crate) fn emit<R>(&self, f: impl FnOnce() -> R) -> R {
        if self.enabled {
            dispatcher::with_default(&self.dispatch, f)
        } else {
            f()
        }
    }
}

impl Default for DebugOutput {
    fn default() -> Self {
        Self::stdout()
    }
}

impl core::fmt::Debug for DebugOutput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DebugOutput")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
