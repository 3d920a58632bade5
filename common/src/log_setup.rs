use std::path::Path;

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};

const LOG_FILE_BASENAME: &str = "geoviz";
const LOG_FILE_MAX_BYTES: u64 = 1024 * 1024;
const LOG_FILES_KEPT: usize = 5;

/// Initializes the global logger.
///
/// `base_level` is a flexi_logger spec such as `"info"` or `"geoviz=debug,warn"`;
/// `RUST_LOG` takes precedence when set. With `log_dir` the log goes to rotating
/// files there, warnings are duplicated to stderr. Without it everything goes
/// to stderr.
///
/// The returned handle must stay alive for as long as logging is needed.
pub fn setup_logging(
    base_level: &str,
    log_dir: Option<&Path>,
) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(base_level)?;

    match log_dir {
        Some(dir) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .duplicate_to_stderr(Duplicate::Warn)
            .rotate(
                Criterion::Size(LOG_FILE_MAX_BYTES),
                Naming::Timestamps,
                Cleanup::KeepLogFiles(LOG_FILES_KEPT),
            )
            .start(),
        None => logger.log_to_stderr().start(),
    }
}
