//! Injected logging capability.
//!
//! The file system never writes logs on its own. Callers hand in up to three
//! callbacks; any that are missing are no-ops. Structured data is passed as
//! a closure and only built when a callback for that level is installed.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A logging callback: message plus optional structured data.
pub type LoggerFunc = Arc<dyn Fn(&str, Option<&Value>) + Send + Sync>;

/// Passthrough logger with optional `debug`, `error` and `info` callbacks.
///
/// # Example
///
/// ```
/// use buffered_fs::Logger;
///
/// let logger = Logger::new().with_error(|msg, data| eprintln!("{msg} {data:?}"));
/// logger.error("lookup failed", || None);
/// logger.debug("ignored", || Some(serde_json::json!({ "never": "built" })));
/// ```
#[derive(Clone, Default)]
pub struct Logger {
    debug: Option<LoggerFunc>,
    error: Option<LoggerFunc>,
    info: Option<LoggerFunc>,
}

impl Logger {
    /// Create a silent logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger that forwards every level to `tracing`.
    #[cfg(feature = "tracing")]
    pub fn tracing() -> Self {
        Self::new()
            .with_debug(|msg, data| match data {
                Some(data) => tracing::debug!(%data, "{msg}"),
                None => tracing::debug!("{msg}"),
            })
            .with_error(|msg, data| match data {
                Some(data) => tracing::error!(%data, "{msg}"),
                None => tracing::error!("{msg}"),
            })
            .with_info(|msg, data| match data {
                Some(data) => tracing::info!(%data, "{msg}"),
                None => tracing::info!("{msg}"),
            })
    }

    /// Set the debug callback.
    pub fn with_debug(mut self, f: impl Fn(&str, Option<&Value>) + Send + Sync + 'static) -> Self {
        self.debug = Some(Arc::new(f));
        self
    }

    /// Set the error callback.
    pub fn with_error(mut self, f: impl Fn(&str, Option<&Value>) + Send + Sync + 'static) -> Self {
        self.error = Some(Arc::new(f));
        self
    }

    /// Set the info callback.
    pub fn with_info(mut self, f: impl Fn(&str, Option<&Value>) + Send + Sync + 'static) -> Self {
        self.info = Some(Arc::new(f));
        self
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str, data: impl FnOnce() -> Option<Value>) {
        emit(self.debug.as_ref(), message, data);
    }

    /// Log at error level.
    pub fn error(&self, message: &str, data: impl FnOnce() -> Option<Value>) {
        emit(self.error.as_ref(), message, data);
    }

    /// Log at info level.
    pub fn info(&self, message: &str, data: impl FnOnce() -> Option<Value>) {
        emit(self.info.as_ref(), message, data);
    }
}

#[inline]
fn emit(func: Option<&LoggerFunc>, message: &str, data: impl FnOnce() -> Option<Value>) {
    if let Some(func) = func {
        func(message, data().as_ref());
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("debug", &self.debug.is_some())
            .field("error", &self.error.is_some())
            .field("info", &self.info.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    #[test]
    fn test_missing_callbacks_are_noops() {
        let logger = Logger::new();
        logger.debug("a", || None);
        logger.error("b", || Some(json!({ "x": 1 })));
        logger.info("c", || None);
    }

    #[test]
    fn test_data_built_only_for_installed_levels() {
        let logger = Logger::new().with_error(|_, _| {});

        let mut built = false;
        logger.debug("skipped", || {
            built = true;
            Some(json!({ "x": 1 }))
        });
        assert!(!built);

        logger.error("kept", || {
            built = true;
            None
        });
        assert!(built);
    }

    #[test]
    fn test_callbacks_receive_message_and_data() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let logger = Logger::new().with_info(move |msg, data| {
            sink.lock().push((msg.to_string(), data.cloned()));
        });

        logger.info("ready", || Some(json!({ "entries": 3 })));
        logger.debug("dropped", || None);

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "ready");
        assert_eq!(seen[0].1, Some(json!({ "entries": 3 })));
    }

    #[test]
    fn test_debug_format_shows_configured_levels() {
        let logger = Logger::new().with_error(|_, _| {});
        let text = format!("{logger:?}");
        assert!(text.contains("error: true"));
        assert!(text.contains("debug: false"));
    }

    #[cfg(feature = "tracing")]
    mod tracing_bridge {
        use super::*;
        use std::io;
        use tracing_subscriber::fmt::MakeWriter;

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        impl<'a> MakeWriter<'a> for Capture {
            type Writer = Capture;

            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        #[test]
        fn test_tracing_forwards_every_level() {
            let capture = Capture::default();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(capture.clone())
                .with_max_level(tracing::Level::DEBUG)
                .with_ansi(false)
                .finish();

            let logger = Logger::tracing();
            tracing::subscriber::with_default(subscriber, || {
                logger.debug("reading", || Some(json!({ "file": "min" })));
                logger.info("initialized", || None);
                logger.error("lookup failed", || Some(json!({ "key": "x.js" })));
            });

            let output = String::from_utf8(capture.0.lock().clone()).unwrap();
            let lines: Vec<&str> = output.lines().collect();
            assert_eq!(lines.len(), 3);
            assert!(lines[0].contains("DEBUG") && lines[0].contains("reading"));
            assert!(lines[0].contains(r#"{"file":"min"}"#));
            assert!(lines[1].contains("INFO") && lines[1].contains("initialized"));
            assert!(lines[2].contains("ERROR") && lines[2].contains("x.js"));
        }
    }
}
