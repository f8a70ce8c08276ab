//! Log output for `ssik`.
//!
//! Records go to two sinks behind one level filter:
//!
//! | Sink     | Starts as               | Switched by             |
//! |----------|-------------------------|-------------------------|
//! | stderr   | on, coloured on a tty   | [`set_console_enabled`] |
//! | log file | closed, records dropped | [`enable_file_logging`] |
//!
//! The level filter comes from `RUST_LOG` (or `info`) and can be replaced
//! with [`set_log_level`]. [`apply_config`] drives all three from the
//! `[logging]` table and the command line.

use anyhow::{Result, anyhow};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
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

use crate::config::LoggingConfig;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";
const RESET: &str = "\x1b[0m";

/// One line per event: local timestamp, level, target, then the fields.
struct EventLine;

fn level_colour(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for EventLine
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
        let stamp = Local::now().format(TIMESTAMP_FORMAT);

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{stamp}{RESET} {}{:>5}{RESET} \x1b[36m{}{RESET} ",
                level_colour(meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{stamp} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type SharedLogFile = Arc<Mutex<Option<File>>>;

/// Writer factory for the log file sink. Holds no file until
/// [`enable_file_logging`] opens one; records written before that are dropped.
#[derive(Clone)]
struct LogFileSink(SharedLogFile);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), File::flush)
    }
}

impl<'a> MakeWriter<'a> for LogFileSink {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(lock_log_file(&self.0))
    }
}

/// A poisoned lock still holds a usable `Option<File>`.
fn lock_log_file(file: &Mutex<Option<File>>) -> MutexGuard<'_, Option<File>> {
    file.lock().unwrap_or_else(PoisonError::into_inner)
}

// Reload closures are boxed so the statics need not name the subscriber type.
type LevelControl = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
type ConsoleControl = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

static APP_NAME: OnceLock<String> = OnceLock::new();
static LEVEL_CONTROL: OnceLock<LevelControl> = OnceLock::new();
static CONSOLE_CONTROL: OnceLock<ConsoleControl> = OnceLock::new();
static LOG_FILE: OnceLock<SharedLogFile> = OnceLock::new();

fn not_initialised() -> anyhow::Error {
    anyhow!("logging has not been set up; call init_default_logging first")
}

fn initial_level() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn install_level_control<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = LEVEL_CONTROL.set(Box::new(move |directive: &str| {
        let filter = EnvFilter::try_new(directive)
            .map_err(|e| anyhow!("invalid log level '{directive}': {e}"))?;
        handle
            .reload(filter)
            .map_err(|e| anyhow!("cannot change log level: {e}"))
    }));
}

fn install_console_control<S>(handle: reload::Handle<EnvFilter, S>)
where
    S: Subscriber + Send + Sync + 'static,
{
    let _ = CONSOLE_CONTROL.set(Box::new(move |enabled: bool| {
        // The level filter sits above this gate, so "trace" means "whatever the level allows".
        let gate = EnvFilter::new(if enabled { "trace" } else { "off" });
        handle
            .reload(gate)
            .map_err(|e| anyhow!("cannot switch stderr logging: {e}"))
    }));
}

/// Replaces the level filter, e.g. `"debug"` or `"quote_core=trace,info"`.
pub fn set_log_level(directive: &str) -> Result<()> {
    let control = LEVEL_CONTROL.get().ok_or_else(not_initialised)?;
    control(directive)
}

/// Turns stderr logging on or off. The log file is unaffected.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    let control = CONSOLE_CONTROL.get().ok_or_else(not_initialised)?;
    control(enabled)
}

/// Appends records to `path` from now on, closing any previous log file.
/// The parent directory is not created.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let shared = LOG_FILE.get().ok_or_else(not_initialised)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;

    *lock_log_file(shared) = Some(file);
    Ok(())
}

/// File stem of the running executable, or `"ssik"`.
pub fn app_name() -> &'static str {
    APP_NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "ssik".to_string())
    })
}

/// Installs the global subscriber with stderr on and no log file.
///
/// Later calls leave the first subscriber in place.
pub fn init_default_logging() {
    let _ = app_name();

    let shared: SharedLogFile = Arc::new(Mutex::new(None));
    let _ = LOG_FILE.set(Arc::clone(&shared));

    let (level, level_handle) = reload::Layer::new(initial_level());
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(EventLine)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(console_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(EventLine)
        .with_ansi(false)
        .with_writer(LogFileSink(shared));

    let installed = tracing_subscriber::registry()
        .with(level)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();
    if installed {
        install_level_control(level_handle);
        install_console_control(console_handle);
    }
}

/// Applies `[logging]` settings on top of the defaults.
///
/// `level_override` (from the command line) wins over the configured level;
/// with neither, the level from RUST_LOG or INFO stays in place.
pub fn apply_config(
    config: &LoggingConfig,
    level_override: Option<&str>,
) -> Result<()> {
    if let Some(level) = level_override.or(config.level.as_deref()) {
        set_log_level(level)?;
    }
    if !config.console {
        set_console_enabled(false)?;
    }
    if let Some(path) = &config.file {
        enable_file_logging(path)?;
    }
    Ok(())
}
