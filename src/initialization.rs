use std::env;
use std::time::Duration;
use anyhow::Result;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::cache::ForecastCache;
use crate::config::{load_config, Config, FeedSourceId, General};
use crate::errors::InitError;
use crate::manager_swpc::Swpc;
use crate::manager_xras::Xras;
use crate::service::{ForecastService, KpSource};

/// Loads configuration, sets up logging and wires the forecast service
/// together with its configured feed manager.
///
/// The configuration path comes from KPWATCH_CONFIG, falling back to
/// kpwatch.toml in the working directory.
pub fn init() -> Result<(Config, ForecastService), InitError> {
    let config_file = env::var("KPWATCH_CONFIG").unwrap_or("kpwatch.toml".to_string());
    let config = load_config(&config_file)?;

    init_logging(&config.general)?;

    // Print version
    println!("kpwatch version: {}", env!("CARGO_PKG_VERSION"));

    let source: Box<dyn KpSource> = match config.upstream.source {
        FeedSourceId::Swpc => {
            Box::new(Swpc::new(&config.upstream.swpc_url, config.upstream.timeout_secs))
        }
        FeedSourceId::Xras => {
            Box::new(Xras::new(&config.upstream.xras_url, config.upstream.timeout_secs))
        }
    };

    let cache = ForecastCache::new(Duration::from_secs(config.forecast.cache_ttl_minutes * 60));
    let service = ForecastService::new(source, cache, config.forecast.window_days);

    Ok((config, service))
}

/// Builds the log4rs configuration from the general section: a console
/// appender, a file appender, or both
///
/// # Arguments
///
/// * 'general' - the general configuration section
fn init_logging(general: &General) -> Result<()> {
    let pattern = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

    let mut builder = log4rs::Config::builder();
    let mut root = Root::builder();

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build();

        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    if !general.log_path.is_empty() {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build(&general.log_path)?;

        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let log_config = builder.build(root.build(general.log_level))?;
    log4rs::init_config(log_config)?;

    Ok(())
}
