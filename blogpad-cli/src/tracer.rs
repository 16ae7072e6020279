//! Logging setup. Events go to stderr so command output stays clean.

use anyhow::{Context, Result};
use shared::config::client::{Config, LogFormat};
use std::io::{self, IsTerminal};
use tracing::{Subscriber, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, fmt::MakeWriter};

/// Install the global subscriber. Returns the configured level.
pub fn initialize_tracing(config: &Config) -> Result<String> {
    let subscriber = subscriber_with_writer(config, io::stderr, io::stderr().is_terminal());
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;
    Ok(config.logging.level.clone())
}

pub fn subscriber_with_writer<W>(
    config: &Config,
    writer: W,
    ansi: bool,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = fmt::fmt()
        .with_env_filter(build_env_filter(config))
        .with_writer(writer)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    match config.logging.format {
        LogFormat::Json => Box::new(builder.json().with_ansi(false).finish()),
        LogFormat::Text => Box::new(builder.with_ansi(ansi).finish()),
    }
}

/// `RUST_LOG` wins; otherwise the configured level.
fn build_env_filter(config: &Config) -> EnvFilter {
    let default_level = config
        .logging
        .level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::{
        io::Write,
        sync::{Arc, Mutex},
    };
    use tracing::{dispatcher::Dispatch, warn};

    #[derive(Clone)]
    struct BufferMakeWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    struct BufferWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl<'a> MakeWriter<'a> for BufferMakeWriter {
        type Writer = BufferWriter;

        fn make_writer(&'a self) -> Self::Writer {
            BufferWriter {
                buffer: Arc::clone(&self.buffer),
            }
        }
    }

    impl Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(config: &Config) -> String {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = BufferMakeWriter {
            buffer: buffer.clone(),
        };
        let dispatch = Dispatch::new(subscriber_with_writer(config, writer, false));

        tracing::dispatcher::with_default(&dispatch, || {
            warn!(event = "capture_test", "log entry");
        });

        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn json_log_format_produces_json_output() {
        let mut config = Config::with_defaults();
        config.logging.format = LogFormat::Json;

        let contents = capture(&config);
        let line = contents
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap();
        let value: Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["fields"]["message"], "log entry");
        assert_eq!(value["fields"]["event"], "capture_test");
    }

    #[test]
    fn text_log_format_emits_plain_events() {
        let mut config = Config::with_defaults();
        config.logging.format = LogFormat::Text;

        let contents = capture(&config);
        assert!(contents.contains("log entry"));
        assert!(serde_json::from_str::<Value>(contents.trim()).is_err());
    }
}
