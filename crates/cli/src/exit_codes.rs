//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | CLI usage error (bad args, value out of range)       |
//! | 3    | I/O error (cannot read answers, cannot write report) |
//! | 4    | Parse error in an answers file                       |
//! | 5    | Answers parsed but invalid (percentage above 100)    |
//! | 6    | Wizard input ended while a step gate was blocking    |
//! | 7    | Settings file unreadable or invalid                  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant below
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap reports its own parse failures with this code too.
pub const EXIT_USAGE: u8 = 2;

/// Reading input or writing output failed.
pub const EXIT_IO: u8 = 3;

/// An answers file is not valid JSON/TOML or has unknown keys.
pub const EXIT_PARSE: u8 = 4;

/// An answers file or flag set a percentage outside 0..=100.
pub const EXIT_INVALID_ANSWERS: u8 = 5;

/// `wizard` reached end of input while a forward gate was refusing.
pub const EXIT_NAVIGATION_BLOCKED: u8 = 6;

/// Settings file could not be read, parsed or validated.
pub const EXIT_CONFIG: u8 = 7;
