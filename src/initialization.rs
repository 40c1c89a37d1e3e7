use std::env;
use log::info;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{load_config, Config, General};
use crate::errors::InitError;
use crate::manager_gismeteo::Gismeteo;
use crate::manager_telegram::Telegram;
use crate::status::{load_status, RunStatus};

const DEFAULT_CONFIG_FILE: &str = "meteobot.toml";

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Initializes logging and returns Config, Gismeteo and Telegram structs
/// together with the persisted run status
///
pub fn init() -> Result<(Config, Gismeteo, Telegram, RunStatus), InitError> {
    let config_file = env::var("CONFIG_FILE").unwrap_or(DEFAULT_CONFIG_FILE.to_string());
    let mut config = load_config(&config_file)?;

    config.bot.token = env::var("BOT_TOKEN")
        .map_err(|_| InitError("error getting BOT_TOKEN".to_string()))?;
    config.bot.channel = env::var("CHANNEL")
        .map_err(|_| InitError("error getting CHANNEL".to_string()))?;

    setup_logger(&config.general)?;

    info!("meteobot version: {}", env!("CARGO_PKG_VERSION"));
    if config.general.debug_mode {
        info!("running in debug mode, no messages will be sent");
    }

    let gismeteo = Gismeteo::new(&config.weather);
    let telegram = Telegram::new(&config.bot, config.general.debug_mode);
    let status = load_status(&config.files.status_file)?;

    Ok((config, gismeteo, telegram, status))
}

/// Sets up log4rs with a file appender and, when configured, a stdout
/// appender as well
///
/// # Arguments
///
/// * 'general' - the general section of the configuration
fn setup_logger(general: &General) -> Result<(), InitError> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&general.log_path)?;

    let mut config_builder = log4rs::Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root_builder = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        config_builder = config_builder
            .appender(Appender::builder().build("stdout", Box::new(stdout)));
        root_builder = root_builder.appender("stdout");
    }

    let log_config = config_builder.build(root_builder.build(general.log_level))?;
    log4rs::init_config(log_config)?;

    Ok(())
}
