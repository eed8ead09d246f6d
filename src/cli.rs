//! CLI argument parsing
//!
//! Uses clap for argument parsing with derive macros. The command has no
//! flags: every argument after the program name is captured verbatim and
//! the count decides what happens.

use clap::Parser;
use std::ffi::OsString;

/// Line printed when the argument count is not exactly three
pub const INVALID_ARGUMENTS: &str = "Invalid arguments";

/// Schedule a local desktop notification: <title> <subtitle> <body>
#[derive(Parser, Debug)]
#[command(name = "notification-sender")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Positional values, expected to be title, subtitle and body
    #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
    pub values: Vec<OsString>,
}

/// The three positional fields of a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationArgs {
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

/// Parse the full argument list (program name first).
///
/// Returns `None` unless exactly three values follow the program name. A
/// literal `--` counts as a value, and bytes that are not valid UTF-8 are
/// replaced rather than rejected.
pub fn parse_args<I, T>(args: I) -> Option<NotificationArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let program = args.next()?;
    let raw: Vec<OsString> = args.collect();
    if raw.len() != 3 {
        return None;
    }

    // Leading escape: clap stops looking for options, so every raw
    // argument (a user `--` included) lands in `values` untouched
    let argv = [program, OsString::from("--")].into_iter().chain(raw);
    let cli = Cli::try_parse_from(argv).ok()?;
    from_values(cli.values)
}

fn from_values(values: Vec<OsString>) -> Option<NotificationArgs> {
    let [title, subtitle, body]: [OsString; 3] = values.try_into().ok()?;
    Some(NotificationArgs {
        title: title.to_string_lossy().into_owned(),
        subtitle: subtitle.to_string_lossy().into_owned(),
        body: body.to_string_lossy().into_owned(),
    })
}
