use anyhow::{Context, Result, anyhow};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};
use tracing::{Event, Level, Subscriber, debug};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

const DEFAULT_FILTER: &str = "info,ledger_cli=debug";

// --- Formatter ---

struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        if ansi {
            write!(writer, "\x1b[2m")?
        }
        write!(
            writer,
            "{} ",
            Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )?;
        if ansi {
            write!(writer, "\x1b[0m")?
        }

        let (pre, post) = if ansi {
            match *meta.level() {
                Level::ERROR => ("\x1b[1;31m", "\x1b[0m"),
                Level::WARN => ("\x1b[1;33m", "\x1b[0m"),
                Level::INFO => ("\x1b[1;32m", "\x1b[0m"),
                Level::DEBUG => ("\x1b[1;34m", "\x1b[0m"),
                Level::TRACE => ("\x1b[1;35m", "\x1b[0m"),
            }
        } else {
            ("", "")
        };
        write!(writer, "{}{:>5}{} ", pre, meta.level(), post)?;

        // Crate name instead of file path; events come from three crates.
        let target = meta.target().split("::").next().unwrap_or_default();
        if ansi {
            write!(writer, "\x1b[36m{target}\x1b[0m ")?;
        } else {
            write!(writer, "{target} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Filter ---

/// Picks the filter directive: `--log-level`, then `RUST_LOG`, then the
/// config file, then the built-in default.
fn filter_directive(
    flag: Option<&str>,
    env: Option<&str>,
    configured: Option<&str>,
) -> String {
    flag.or(env)
        .or(configured)
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

fn make_filter(
    flag: Option<&str>,
    configured: Option<&str>,
) -> Result<EnvFilter> {
    let env = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(flag, env.as_deref(), configured);
    EnvFilter::try_new(&directive).map_err(|e| anyhow!("invalid log level '{directive}': {e}"))
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

// --- Public API ---

/// Installs the global subscriber. Call once at startup.
///
/// - Level: `level_flag` when given, otherwise `RUST_LOG`, otherwise
///   `settings.level`, otherwise info with debug for this crate.
/// - Console: on stderr when `settings.console`, colored on a terminal,
///   so command output on stdout stays machine-readable.
/// - File: appended to `settings.file` when set, without color.
pub fn init_logging(
    settings: &LoggingConfig,
    level_flag: Option<&str>,
) -> Result<()> {
    let filter = make_filter(level_flag, settings.level.as_deref())?;

    let console_layer = settings.console.then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(LocalFmt)
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr)
    });

    let file_layer = match &settings.file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(LocalFmt)
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("logging already initialized: {e}"))?;

    debug!(?settings, ?level_flag, "logging configured");
    Ok(())
}
