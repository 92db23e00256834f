use log::LevelFilter;

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Warn }
}

/// Install the stderr logger, keeping stdout for results.
///
/// `RUST_LOG` is read first; `verbose` then sets the crate-wide level. Only
/// the first call installs a logger.
pub fn init(verbose: bool) {
    let installed = env_logger::Builder::from_default_env()
        .filter_level(level_for(verbose))
        .format_timestamp(None)
        .try_init();
    if installed.is_err() {
        log::debug!("logger already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Warn);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
        assert!(log::max_level() >= LevelFilter::Warn);
    }
}
