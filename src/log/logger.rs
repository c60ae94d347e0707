use crate::{
    config::Config,
    log::{log_level::LogLevel, log_msg::LogMsg, logger_handle::LoggerHandle},
};

use std::{
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::mpsc::{self, TrySendError},
    thread,
    time::{SystemTime, UNIX_EPOCH},
};

#[cfg(feature = "log-debug")]
const FLUSH_BATCH_SIZE: u32 = 50;

#[cfg(not(feature = "log-debug"))]
const FLUSH_BATCH_SIZE: u32 = 500;

const DEFAULT_CAPACITY: usize = 1024;
const DEFAULT_SAMPLE_EVERY: u32 = 10;

/// Where and how the process log is written. Read from the `[Logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Directory for the log file; `logs/` next to the executable when unset.
    pub dir: Option<PathBuf>,
    /// Filename prefix, e.g. `offer_client`.
    pub file_prefix: Option<String>,
    /// Bounded queue size between producers and the writer thread.
    pub capacity: usize,
    /// Mirror lines to stderr: warnings and errors always, others one in `sample_every`.
    pub mirror_stderr: bool,
    pub sample_every: u32,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            dir: None,
            file_prefix: None,
            capacity: DEFAULT_CAPACITY,
            mirror_stderr: false,
            sample_every: DEFAULT_SAMPLE_EVERY,
        }
    }
}

impl LogSettings {
    #[must_use]
    pub fn from_config(config: &Config, default_prefix: &str) -> Self {
        let defaults = Self::default();
        Self {
            dir: config.get_non_empty("Logging", "log_path").map(expand_path),
            file_prefix: Some(
                config
                    .get_non_empty_or_default("Logging", "log_filename", default_prefix)
                    .to_owned(),
            ),
            capacity: config
                .get_parsed("Logging", "capacity")
                .unwrap_or(defaults.capacity),
            mirror_stderr: config
                .get_parsed("Logging", "mirror_stderr")
                .unwrap_or(defaults.mirror_stderr),
            sample_every: config
                .get_parsed("Logging", "sample_every")
                .unwrap_or(defaults.sample_every),
        }
    }
}

/// Non-blocking process logger backed by one writer thread and a log file.
///
/// Producers enqueue through [`LoggerHandle`]; the worker appends lines to the
/// file, flushes in batches and optionally mirrors a sample to stderr.
pub struct Logger {
    handle: LoggerHandle,
    worker: Option<thread::JoinHandle<()>>,
    file_path: PathBuf,
}

impl Logger {
    /// Starts the writer thread. The directory is created when missing.
    #[must_use]
    pub fn start(settings: &LogSettings) -> Self {
        let dir = settings
            .dir
            .clone()
            .unwrap_or_else(|| exe_dir_fallback_cwd().join("logs"));
        let _ = fs::create_dir_all(&dir);

        let stamp = timestamp_for_filename();
        let pid = std::process::id();
        let fname = match settings.file_prefix.as_deref() {
            Some(prefix) => format!("{prefix}-{stamp}-pid{pid}.log"),
            None => format!("{stamp}-pid{pid}.log"),
        };
        let file_path = dir.join(fname);

        let (tx, rx) = mpsc::sync_channel::<LogMsg>(settings.capacity.max(1));
        let sample_every = settings.sample_every.max(1);
        let mirror = settings.mirror_stderr;
        let path_for_worker = file_path.clone();

        let worker = thread::Builder::new()
            .name("logger-worker".into())
            .spawn(move || write_loop(&rx, &path_for_worker, mirror, sample_every))
            .ok();

        Self {
            handle: LoggerHandle { tx },
            worker,
            file_path,
        }
    }

    /// # Errors
    /// Returns the rejected message when the queue is full or the worker is gone.
    pub fn try_log<S: Into<String>>(
        &self,
        level: LogLevel,
        text: S,
        target: &'static str,
    ) -> Result<(), TrySendError<LogMsg>> {
        self.handle.try_log(level, text, target)
    }

    #[must_use]
    pub fn handle(&self) -> LoggerHandle {
        self.handle.clone()
    }

    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Drops the producer side held by the logger and waits for the worker to
    /// drain. Lines from handles still alive elsewhere keep the worker running,
    /// so callers drop their handles first.
    pub fn shutdown(mut self) {
        let Self { handle, worker, .. } = &mut self;
        let (dead_tx, _) = mpsc::sync_channel(1);
        drop(std::mem::replace(handle, LoggerHandle { tx: dead_tx }));
        if let Some(w) = worker.take() {
            let _ = w.join();
        }
    }
}

fn write_loop(rx: &mpsc::Receiver<LogMsg>, path: &Path, mirror: bool, sample_every: u32) {
    // target file -> temp file -> sink; the logger never panics the process
    let writer: Box<dyn Write + Send> =
        if let Ok(f) = OpenOptions::new().create(true).append(true).open(path) {
            Box::new(f)
        } else {
            let fallback = std::env::temp_dir().join("rtcoffer-fallback.log");
            match OpenOptions::new().create(true).append(true).open(&fallback) {
                Ok(f) => Box::new(f),
                Err(_) => Box::new(io::sink()),
            }
        };
    let mut out = BufWriter::new(writer);

    let mut since_flush: u32 = 0;
    let mut sampled: u32 = 0;

    while let Ok(m) = rx.recv() {
        let line = m.render();
        let _ = writeln!(out, "{line}");

        since_flush += 1;
        if since_flush >= FLUSH_BATCH_SIZE || m.level.is_severe() {
            let _ = out.flush();
            since_flush = 0;
        }

        if mirror {
            let forward = m.level.is_severe() || {
                sampled = sampled.wrapping_add(1);
                sampled % sample_every == 0
            };
            if forward {
                eprintln!("{line}");
            }
        }
    }

    let _ = out.flush();
}

fn exe_dir_fallback_cwd() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// `YYYYMMDD_HHMMSS` in UTC.
fn timestamp_for_filename() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (year, mon, day) = civil_from_days(secs / 86_400);
    let rem = secs % 86_400;
    format!(
        "{year:04}{mon:02}{day:02}_{:02}{:02}{:02}",
        rem / 3_600,
        (rem % 3_600) / 60,
        rem % 60
    )
}

/// Days since 1970-01-01 to a Gregorian date (Howard Hinnant's algorithm).
#[allow(clippy::many_single_char_names)]
fn civil_from_days(days: u64) -> (i64, u64, u64) {
    let z = i64::try_from(days).unwrap_or(i64::MAX / 2) + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i64::from(m <= 2);
    (y, m.unsigned_abs(), d.unsigned_abs())
}

fn expand_path(path_str: &str) -> PathBuf {
    if let Some(rest) = path_str.strip_prefix('~') {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from);
        if let Some(mut home) = home {
            if rest.is_empty() {
                return home;
            }
            if let Some(tail) = rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
                home.push(tail);
                return home;
            }
        }
    }
    PathBuf::from(path_str)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn civil_dates() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        // 2000-03-01 is day 11017
        assert_eq!(civil_from_days(11_017), (2000, 3, 1));
        // 2024-02-29 is day 19782
        assert_eq!(civil_from_days(19_782), (2024, 2, 29));
    }

    #[test]
    fn settings_read_logging_section() {
        let cfg = Config::parse(
            "[Logging]\nlog_path = /tmp/rtc-logs\ncapacity = 16\nmirror_stderr = true\n",
        );
        let s = LogSettings::from_config(&cfg, "offer_client");
        assert_eq!(s.dir, Some(PathBuf::from("/tmp/rtc-logs")));
        assert_eq!(s.file_prefix.as_deref(), Some("offer_client"));
        assert_eq!(s.capacity, 16);
        assert!(s.mirror_stderr);
        assert_eq!(s.sample_every, DEFAULT_SAMPLE_EVERY);
    }

    #[test]
    fn writes_lines_to_file() {
        let dir = std::env::temp_dir().join(format!("rtcoffer-log-test-{}", std::process::id()));
        let settings = LogSettings {
            dir: Some(dir.clone()),
            file_prefix: Some("unit".into()),
            ..LogSettings::default()
        };
        let logger = Logger::start(&settings);
        let path = logger.file_path().to_path_buf();
        logger
            .try_log(LogLevel::Warn, "posted offer", "rtcoffer::test")
            .unwrap();
        logger.shutdown();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[WARN]"));
        assert!(content.contains("posted offer"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(expand_path("~/logs"), PathBuf::from(home).join("logs"));
        }
        assert_eq!(expand_path("/var/log"), PathBuf::from("/var/log"));
    }
}
