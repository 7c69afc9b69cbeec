//! Logger setup
//!
//! Everything logs through the `log` facade. `initialize_logger` wires it to
//! stderr and, when a path is given, a log file.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use std::path::{Path, PathBuf};

const LOGGING_PATTERN: &str = "{d(%H:%M:%S%.3f)} {l} {t} - {m}\n";

/// Timestamped log file under the per-user data directory
pub fn default_log_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dirs::data_local_dir()
        .map(|p| p.join("facehud").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
        .join(format!("facehud_{}.log", timestamp))
}

/// Installs the global logger
///
/// stderr only shows `console_level` and above; the log file (if any) gets
/// everything down to debug.
pub fn initialize_logger(console_level: LevelFilter, file_path: Option<&Path>) -> Result<(), String> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
        .build();

    let mut config_builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(console_level)))
            .build("stderr", Box::new(stderr)),
    );
    let mut root = Root::builder().appender("stderr");
    let mut root_level = console_level;

    if let Some(path) = file_path {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
            .build(path)
            .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;

        config_builder =
            config_builder.appender(Appender::builder().build("logfile", Box::new(logfile)));
        root = root.appender("logfile");
        root_level = root_level.max(LevelFilter::Debug);
    }

    let config = config_builder
        .build(root.build(root_level))
        .map_err(|e| format!("Invalid logger config: {}", e))?;

    log4rs::init_config(config).map_err(|e| format!("Failed to install logger: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_is_timestamped() {
        let path = default_log_path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with("facehud_"));
        assert!(name.ends_with(".log"));
        // facehud_YYYYMMDD_HHMMSS.log
        assert_eq!(name.len(), "facehud_".len() + 15 + ".log".len());
    }
}
