use std::path::Path;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

pub const LOG_FILE_PREFIX: &str = "server.log";

/// Daily-rotating appender under `log_dir`. Fails instead of panicking when
/// the directory cannot be created.
pub fn file_appender(log_dir: impl AsRef<Path>) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
}
