use anyhow::Context;
use qrgen::domain::config::AppConfig;
use qrgen::kernel::config::load_config;
use qrgen_logger::{LevelFilter, Logger};
use qrgen_server::Server;

#[qrgen_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let cfg: AppConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let level = if cfg.debug { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let logger = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level);
    let _log = match &cfg.logging.path {
        Some(path) => logger.path(path).json(cfg.logging.json).init()?,
        None => logger.init()?,
    };

    Server::builder().config(cfg).build()?.run().await
}
