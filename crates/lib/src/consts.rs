pub const APP_NAME: &str = "xenly-build";

/// Primary executable built (smoke test, if any, has run).
pub const EXIT_OK: i32 = 0;
/// The compiler argument was missing or not supported.
pub const EXIT_UNSUPPORTED_COMPILER: i32 = 1;
/// The command line could not be parsed. Shares the code of a bad compiler
/// argument so it never reads as a failed build.
pub const EXIT_USAGE: i32 = 1;
/// The primary executable did not build.
pub const EXIT_PRIMARY_FAILED: i32 = 2;
/// The session was interrupted before it could finish.
pub const EXIT_INTERRUPTED: i32 = 130;

pub const ENV_PLATFORM: &str = "XENLY_BUILD_PLATFORM";
pub const ENV_NO_RUN: &str = "XENLY_BUILD_NO_RUN";
pub const ENV_PROJECT_DIR: &str = "XENLY_PROJECT_DIR";
