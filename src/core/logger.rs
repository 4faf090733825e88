use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;
use once_cell::sync::Lazy;
use log::{
    LevelFilter,
    Metadata,
    Record
};

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

static CONSOLE_LOGGER: PhonebookLogger = PhonebookLogger;
struct PhonebookLogger;
impl log::Log for PhonebookLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] [{}] {}",
            record.target(),
            record.level(),
            record.args()
        );

        let Ok(mut guard) = LOG_FILE.lock() else {
            println!("{}", line);
            return;
        };

        match guard.as_mut() {
            Some(file) => { _ = writeln!(file, "{}", line); },
            None => println!("{}", line),
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(file) = guard.as_mut() {
                _ = file.flush();
            }
        }
        _ = io::stdout().flush();
    }
}

/// Installs the process-wide logger. Records go to `file` (appended)
/// when given, otherwise to stdout.
pub fn setup(level: LevelFilter, file: Option<&str>) {
    let sink = file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("Opening log file {} error: {}, fallback to stdout", path, e))
            .ok()
    });

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = sink;
    }

    _ = log::set_logger(&CONSOLE_LOGGER);
    log::set_max_level(level);
}

/// Flushes and closes the log file, then silences every record.
///
/// `log` accepts a logger only once per process, so the installed logger
/// stays in place and is muted through the max level. A later `setup`
/// raises the level again.
pub fn teardown() {
    log::logger().flush();
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = None;
    }
    log::set_max_level(LevelFilter::Off);
}
