//! Log output for the `home-online` binary.
//!
//! Command results go to stdout, so log records are written to stderr and,
//! when configured, appended to a file. Both sinks share one level filter
//! that can be changed after startup; the stderr sink can also be muted on
//! its own for `--quiet`.

use anyhow::{Result, anyhow};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, Once, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

const DEFAULT_LEVEL: &str = "info";

/// `2026-10-18T14:05:00.123+10:00  WARN target message key=value`
struct LocalTimeFormat;

fn level_colour(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LocalTimeFormat
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
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{}\x1b[0m ",
                level_colour(meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log file that may be opened after the subscriber is installed.
/// Records are dropped while it is empty.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        // The handle is still usable after a panic elsewhere.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.lock())
    }
}

type Reload = Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>;

/// Runtime handles onto the installed subscriber.
struct Controls {
    level: Reload,
    console: Reload,
    file: LogFile,
}

static INIT: Once = Once::new();
static CONTROLS: OnceLock<Controls> = OnceLock::new();

fn reloader<S>(
    handle: reload::Handle<EnvFilter, S>,
    what: &'static str,
) -> Reload
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |filter| {
        handle
            .reload(filter)
            .map_err(|e| anyhow!("{what} filter reload failed: {e}"))
    })
}

fn controls() -> Result<&'static Controls> {
    CONTROLS
        .get()
        .ok_or_else(|| anyhow!("logging not yet initialized"))
}

/// `true` when `RUST_LOG` is set, in which case configured levels are ignored.
pub fn env_filter_is_set() -> bool {
    std::env::var_os(EnvFilter::DEFAULT_ENV).is_some()
}

/// Replaces the level filter for every sink. Takes a bare level such as
/// `debug` or a full directive such as `loan_core=trace,info`.
pub fn set_log_level(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| anyhow!("invalid log level '{directive}': {e}"))?;
    (controls()?.level)(filter)
}

/// Mutes or restores log output on stderr. The log file is unaffected.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    let gate = if enabled { "trace" } else { "off" };
    (controls()?.console)(EnvFilter::new(gate))
}

/// Appends log records to `path` from now on, replacing any earlier file.
/// The parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;

    *controls()?.file.lock() = Some(file);
    Ok(())
}

/// Installs the global subscriber. Later calls do nothing.
pub fn init_default_logging() {
    INIT.call_once(install);
}

fn install() {
    let file = LogFile::default();

    let (level, level_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    );
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let console = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(console_gate);

    let to_file = tracing_subscriber::fmt::layer()
        .event_format(LocalTimeFormat)
        .with_ansi(false)
        .with_writer(file.clone());

    let installed = tracing_subscriber::registry()
        .with(level)
        .with(console)
        .with(to_file)
        .try_init();

    if installed.is_ok() {
        let _ = CONTROLS.set(Controls {
            level: reloader(level_handle, "level"),
            console: reloader(console_handle, "console"),
            file,
        });
    }
}
