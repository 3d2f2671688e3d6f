//! Logger setup for the binary.
//!
//! Records go to stderr so they never mix with the terminal interface or the
//! selection printed on stdout. The `SIFT_LOG` environment variable takes the
//! usual filter syntax.

use env_logger::Env;

/// Initialise the global logger. Call before the terminal enters raw mode.
pub fn init() {
	env_logger::Builder::from_env(Env::new().filter_or("SIFT_LOG", "warn"))
		.format_timestamp(None)
		.init();
}
