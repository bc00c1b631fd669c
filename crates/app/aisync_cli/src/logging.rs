pub mod formats;

use flexi_logger::Logger;

use crate::Error;

/// Log to stdout. `RUST_LOG` wins over `default_spec`.
pub fn init(default_spec: &str) -> Result<(), Error> {
    Logger::try_with_env_or_str(default_spec)?
        .format(formats::cli_format)
        .log_to_stdout()
        .start()?;

    Ok(())
}

/// Default log spec for the given verbosity flag.
pub fn spec(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}
