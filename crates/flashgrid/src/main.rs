use flashgrid::FlashGridConfig;
use flashgrid_engine::logging::{init_logging, LoggingConfig};

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = flashgrid::run(FlashGridConfig::default()) {
        log::error!("{e:#}");
        println!("flashgrid: {e:#}");
        std::process::exit(-1);
    }
}
