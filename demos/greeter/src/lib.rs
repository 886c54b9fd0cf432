//! Greeter demo: a configuration record bound to command-line flags.
//!
//! The record starts out holding its defaults. Parsing overwrites only the
//! fields whose flags were given.

use std::io::{self, Write};

use clap::Command;
use tagflags::{BindError, Counter, FlagRecord};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by the greeter.
#[derive(Debug, Error)]
pub enum GreeterError {
    /// The command line could not be bound or parsed.
    #[error(transparent)]
    Flags(#[from] BindError),
    /// Writing the greeting failed.
    #[error("failed to write greeting: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias for greeter results.
pub type Result<T> = std::result::Result<T, GreeterError>;

/// Options accepted by the greeter.
#[derive(Debug, Clone, PartialEq, Eq, FlagRecord)]
pub struct GreetArgs {
    /// Who to greet.
    #[flag(short = 'n')]
    pub recipient: String,
    /// Words placed before the recipient; repeat or separate with commas.
    pub salutation: Vec<String>,
    /// Ends the greeting with an exclamation mark.
    #[flag(short = 'x')]
    pub excited: bool,
    /// Prints the greeting this many times.
    #[flag(short = 'r')]
    pub repeat: u8,
    /// Adds detail to the output; repeat for more.
    #[flag(short = 'v')]
    pub verbose: Counter,
}

impl Default for GreetArgs {
    fn default() -> Self {
        Self {
            recipient: String::from("World"),
            salutation: vec![String::from("Hello")],
            excited: false,
            repeat: 1,
            verbose: Counter::default(),
        }
    }
}

impl GreetArgs {
    /// Renders the greeting line.
    #[must_use]
    pub fn greeting(&self) -> String {
        let mark = if self.excited { '!' } else { '.' };
        format!("{}, {}{mark}", self.salutation.join(" "), self.recipient)
    }
}

/// The command the greeter's flags are attached to.
#[must_use]
pub fn command() -> Command {
    Command::new("greeter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prints a greeting assembled from command-line flags")
}

/// Parses `args` into a [`GreetArgs`] starting from its defaults.
///
/// # Errors
///
/// Returns [`GreeterError::Flags`] when clap rejects the arguments or asks
/// for help or version output.
pub fn parse_args<I, T>(args: I) -> Result<GreetArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let mut greet = GreetArgs::default();
    greet.parse_args_from(command(), args)?;
    debug!(?greet, "parsed greeter options");
    Ok(greet)
}

/// Writes the greeting to `out`, followed by any detail `verbose` asks for.
///
/// # Errors
///
/// Returns [`GreeterError::Io`] when writing fails.
pub fn write_greeting<W: Write>(out: &mut W, greet: &GreetArgs) -> Result<()> {
    let line = greet.greeting();
    for _ in 0..greet.repeat {
        writeln!(out, "{line}")?;
    }
    if greet.verbose.get() > 0 {
        writeln!(out, "recipient: {}", greet.recipient)?;
    }
    if greet.verbose.get() > 1 {
        writeln!(out, "salutation words: {}", greet.salutation.len())?;
    }
    Ok(())
}
