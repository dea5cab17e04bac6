use env_logger::{Builder, Env};
use log::LevelFilter;

/// Start the global logger.
///
/// `RUST_LOG` overrides the level, otherwise `verbose` picks between debug
/// and info output.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    // Fails only if a logger is already installed.
    let _ = Builder::from_env(env).format_timestamp(None).try_init();
}
