use fern::colors::{Color, ColoredLevelConfig};
use rustc_hash::FxHashMap;

/// Crates that only log at warn level or above unless `verbose` is set
const QUIET_TARGETS: [&str; 6] = ["reqwest", "hyper", "hyper_util", "rustls", "png", "image"];

/// Configure the logs output
/// Lines start with an UTC timestamp `[year]-[month]-[day] [hour]:[minutes]:[seconds]`
#[derive(Clone, Debug)]
pub struct LogConfig {
    level: log::LevelFilter,
    levels_for: FxHashMap<String, log::LevelFilter>,
    colored: bool,
    verbose: bool,
    file_path: Option<std::path::PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        let level = if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        };

        Self::new(level)
    }
}

impl LogConfig {
    pub fn new(level: log::LevelFilter) -> Self {
        Self {
            level,
            levels_for: FxHashMap::default(),
            colored: cfg!(debug_assertions),
            verbose: false,
            file_path: None,
        }
    }

    pub fn level(mut self, level: log::LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Change the filter level for a target (a crate or module path)
    pub fn level_for(mut self, id: &str, level: log::LevelFilter) -> Self {
        self.levels_for.insert(id.to_string(), level);
        self
    }

    /// Enable colored text (Defaults to true on debug mode, never used with files)
    pub fn use_colors(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Log everything including the io and decoding dependencies
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Append logs to a file as well
    pub fn to_file<P>(mut self, path: P) -> Self
    where
        P: Into<std::path::PathBuf>,
    {
        self.file_path = Some(path.into());
        self
    }

    fn filters(&self) -> FxHashMap<String, log::LevelFilter> {
        let mut levels = self.levels_for.clone();
        if !self.verbose {
            for id in QUIET_TARGETS {
                levels
                    .entry(id.to_string())
                    .or_insert(log::LevelFilter::Warn);
            }
        }

        levels
    }

    fn dispatch(&self) -> Result<fern::Dispatch, fern::InitError> {
        let colors = (self.colored && self.file_path.is_none()).then(|| {
            ColoredLevelConfig::new()
                .error(Color::BrightRed)
                .warn(Color::BrightYellow)
                .info(Color::BrightGreen)
                .debug(Color::BrightCyan)
                .trace(Color::BrightBlack)
        });

        let dispatch = self.filters().into_iter().fold(
            fern::Dispatch::new().level(self.level),
            |dispatch, (id, lvl)| dispatch.level_for(id, lvl),
        );

        let dispatch = dispatch.format(move |out, message, record| {
            let time = get_time();
            let target = record.target();
            match &colors {
                Some(colors) => out.finish(format_args!(
                    "\x1b[0m{time} [{target}] {}\x1b[{}m: {message}",
                    colors.color(record.level()),
                    Color::White.to_fg_str()
                )),
                None => out.finish(format_args!(
                    "{time} [{target}] {}: {message}",
                    record.level()
                )),
            }
        });

        let dispatch = chain_output(dispatch);

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = &self.file_path {
            return Ok(dispatch.chain(fern::log_file(path)?));
        }

        Ok(dispatch)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn get_time() -> String {
    const FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
        time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    time::OffsetDateTime::now_utc()
        .format(FORMAT)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn get_time() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{}-{:02}-{:02} {:02}:{:02}:{:02}",
        now.get_utc_full_year(),
        now.get_utc_month() + 1,
        now.get_utc_date(),
        now.get_utc_hours(),
        now.get_utc_minutes(),
        now.get_utc_seconds()
    )
}

#[cfg(target_arch = "wasm32")]
fn chain_output(dispatch: fern::Dispatch) -> fern::Dispatch {
    dispatch.chain(fern::Output::call(console_log::log))
}

#[cfg(not(target_arch = "wasm32"))]
fn chain_output(dispatch: fern::Dispatch) -> fern::Dispatch {
    dispatch.chain(std::io::stdout())
}

#[cfg(target_arch = "wasm32")]
fn set_panic_hook() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

#[cfg(not(target_arch = "wasm32"))]
fn set_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = info.payload_as_str().unwrap_or("Unknown");
        match info.location() {
            Some(loc) => log::error!("Panic at '{}:{}': {payload}", loc.file(), loc.line()),
            None => log::error!("Panic: {payload}"),
        }
        default_hook(info);
    }));
}

/// Installs the global logger and a panic hook that reports through it.
/// Can only succeed once per process.
pub fn init_logs(config: LogConfig) -> Result<(), fern::InitError> {
    config.dispatch()?.apply()?;
    set_panic_hook();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter, Record};

    #[test]
    fn test_quiet_dependencies_by_default() {
        let filters = LogConfig::new(LevelFilter::Info).filters();
        assert_eq!(filters.get("reqwest"), Some(&LevelFilter::Warn));
        assert_eq!(filters.get("image"), Some(&LevelFilter::Warn));
    }

    #[test]
    fn test_verbose_keeps_user_filters_only() {
        let filters = LogConfig::new(LevelFilter::Info)
            .level_for("assets", LevelFilter::Trace)
            .verbose(true)
            .filters();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get("assets"), Some(&LevelFilter::Trace));
    }

    #[test]
    fn test_user_filter_wins() {
        let filters = LogConfig::new(LevelFilter::Warn)
            .level_for("png", LevelFilter::Debug)
            .filters();
        assert_eq!(filters.get("png"), Some(&LevelFilter::Debug));
    }

    #[test]
    fn test_timestamp_format() {
        let time = get_time();
        assert_eq!(time.len(), "2026-01-01 00:00:00".len());
        assert_eq!(&time[4..5], "-");
    }

    #[test]
    fn test_dispatch_filters_and_formats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dispatch.log");

        let (_, logger) = LogConfig::new(LevelFilter::Info)
            .to_file(&path)
            .dispatch()
            .unwrap()
            .into_log();

        logger.log(
            &Record::builder()
                .args(format_args!("Loaded json 'config'"))
                .level(Level::Info)
                .target("assets::loader")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("chunk decoded"))
                .level(Level::Info)
                .target("png")
                .build(),
        );
        logger.flush();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[assets::loader] INFO: Loaded json 'config'"));
        assert!(!text.contains("chunk decoded"));
        assert!(!text.contains("\x1b["));
    }

    // the only test installing the global logger
    #[test]
    fn test_init_logs_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loadkit.log");

        init_logs(LogConfig::new(LevelFilter::Info).to_file(&path)).unwrap();
        log::info!("Batch of 3 resources done");
        log::debug!("below the configured level");
        log::logger().flush();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("INFO: Batch of 3 resources done"));
        assert!(!text.contains("below the configured level"));
    }
}
