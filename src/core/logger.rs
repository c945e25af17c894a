use crate::config::settings::ConfigLogging;
use crate::core::error::{BotError, Result};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use log4rs::Handle;

pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} - {l} - {m}{n}";

/// Console gets INFO and above, the log file gets everything down to the
/// configured level. The file is appended to and never rotated.
pub fn build_config(logging: &ConfigLogging) -> Result<Config> {
    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let file = FileAppender::builder()
        .append(true)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&logging.log_file)?;

    Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Info)))
                .build("console", Box::new(console)),
        )
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(logging.level),
        )
        .map_err(|e| BotError::Logging(e.to_string()))
}

pub fn init(logging: &ConfigLogging) -> Result<Handle> {
    let config = build_config(logging)?;
    Ok(log4rs::init_config(config)?)
}
