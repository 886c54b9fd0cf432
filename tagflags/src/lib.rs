//! Core crate for the `tagflags` flag binder.
//!
//! A configuration struct annotated with `#[flag(...)]` metadata becomes a set
//! of [`clap::Arg`] descriptors. Each descriptor stays bound to the field it
//! came from, so once clap has parsed the command line the values land back
//! in the same struct without an intermediate copy.
//!
//! ```rust
//! use tagflags::{Counter, FlagRecord};
//!
//! #[derive(FlagRecord, Default)]
//! struct Settings {
//!     /// Name to greet.
//!     #[flag(short = 'n', required)]
//!     name: String,
//!     #[flag(short = 'v')]
//!     verbose: Counter,
//!     tags: Vec<String>,
//! }
//!
//! # fn main() -> Result<(), tagflags::BindError> {
//! let mut settings = Settings::default();
//! settings.parse_args_from(
//!     clap::Command::new("greet"),
//!     ["greet", "-n", "Ada", "-v", "-v", "--tags", "a,b"],
//! )?;
//! assert_eq!(settings.name, "Ada");
//! assert_eq!(settings.verbose, Counter::new(2));
//! assert_eq!(settings.tags, ["a", "b"]);
//! # Ok(())
//! # }
//! ```

pub use tagflags_macros::FlagRecord;

mod binder;
mod counter;
mod error;
mod names;
mod spec;
mod value;

pub use binder::{Binder, FlagDescriptor, Flags};
pub use counter::{Counter, CounterStep};
pub use error::{BindError, BindResult};
pub use spec::{FieldSpec, FlagKind};
pub use value::{FlagValue, Scalar};

use std::ffi::OsString;

/// Trait implemented by configuration records that can be bound to flags.
///
/// Implementations are normally generated by `#[derive(FlagRecord)]`. A
/// hand-written implementation registers every field with the [`Binder`]:
///
/// ```rust
/// use tagflags::{BindResult, Binder, FieldSpec, FlagRecord};
///
/// #[derive(Default)]
/// struct Manual {
///     host: String,
///     port: u16,
/// }
///
/// impl FlagRecord for Manual {
///     fn register<'a>(&'a mut self, binder: &mut Binder<'a>) -> BindResult<()> {
///         let Self { host, port } = self;
///         binder
///             .bind(FieldSpec::new("host").required(), host)?
///             .bind(FieldSpec::new("port").short('p'), port)?;
///         Ok(())
///     }
/// }
///
/// # fn main() -> tagflags::BindResult<()> {
/// let mut manual = Manual::default();
/// manual.parse_args_from(clap::Command::new("svc"), ["svc", "--host", "db", "-p", "5432"])?;
/// assert_eq!((manual.host.as_str(), manual.port), ("db", 5432));
/// # Ok(())
/// # }
/// ```
pub trait FlagRecord {
    /// Registers each field of `self` with `binder`.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] when a field's flag names are invalid,
    /// reserved, or already claimed by another field.
    fn register<'a>(&'a mut self, binder: &mut Binder<'a>) -> BindResult<()>;

    /// Binds `self`, parses `args` with `command`, and writes the parsed
    /// values back into `self`.
    ///
    /// The first item of `args` is the binary name, as with
    /// [`clap::Command::try_get_matches_from`].
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] when binding fails, or [`BindError::Cli`] with
    /// clap's own error when the arguments are rejected.
    fn parse_args_from<I, T>(&mut self, command: clap::Command, args: I) -> BindResult<()>
    where
        Self: Sized,
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        parse(self)?.parse_from(command, args)
    }
}

impl<R: FlagRecord + ?Sized> FlagRecord for &mut R {
    fn register<'a>(&'a mut self, binder: &mut Binder<'a>) -> BindResult<()> {
        (**self).register(binder)
    }
}

impl<R: FlagRecord + ?Sized> FlagRecord for Box<R> {
    fn register<'a>(&'a mut self, binder: &mut Binder<'a>) -> BindResult<()> {
        (**self).register(binder)
    }
}

/// Derives the flag descriptors for `record`.
///
/// Every registered field yields exactly one [`FlagDescriptor`], in
/// registration order. The record is not modified here; values are written
/// back by [`Flags::apply`] or [`Flags::parse_from`].
///
/// # Errors
///
/// Returns a [`BindError`] if any field's flag names are invalid, reserved,
/// or collide with another field. No descriptors are returned in that case.
pub fn parse<R: FlagRecord + ?Sized>(record: &mut R) -> BindResult<Flags<'_>> {
    let mut binder = Binder::new();
    record.register(&mut binder)?;
    Ok(binder.finish())
}
