//! Binding record fields to clap arguments.
//!
//! The [`Binder`] collects one [`FlagDescriptor`] per field. Each descriptor
//! owns the clap [`Arg`] for its field together with a setter holding the
//! field's mutable borrow. [`Flags`] drives clap and runs the setters.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::ffi::OsString;
use std::fmt;

use clap::{Arg, ArgMatches, Command};
use tracing::{debug, trace};

use crate::FlagRecord;
use crate::error::{BindError, BindResult};
use crate::names::{validate_long, validate_short};
use crate::spec::{FieldSpec, FlagKind};
use crate::value::FlagValue;

type Setter<'a> = Box<dyn FnOnce(&mut ArgMatches) -> bool + 'a>;

/// One command-line option bound to one record field.
pub struct FlagDescriptor<'a> {
    spec: FieldSpec,
    kind: FlagKind,
    default: Option<String>,
    arg: Arg,
    setter: Setter<'a>,
}

impl FlagDescriptor<'_> {
    /// Naming metadata, with any prefix already applied.
    #[must_use]
    pub const fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Shape of the flag.
    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        self.kind
    }

    /// Field value at bind time, rendered as text.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The clap argument handed to the parser.
    #[must_use]
    pub const fn arg(&self) -> &Arg {
        &self.arg
    }
}

impl fmt::Debug for FlagDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagDescriptor")
            .field("spec", &self.spec)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// Collects flag descriptors while a record registers its fields.
///
/// Long names and short aliases are claimed as fields are bound; the first
/// collision fails the whole registration.
#[derive(Default)]
pub struct Binder<'a> {
    prefix: String,
    descriptors: Vec<FlagDescriptor<'a>>,
    longs: HashMap<String, String>,
    shorts: HashMap<char, String>,
}

impl<'a> Binder<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Binds `slot` to the flag described by `requested`.
    ///
    /// The flag's kind comes from the slot's type and its default from the
    /// slot's current value. Nothing is written to `slot` until the returned
    /// [`Flags`] are applied.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] when the long name or short alias is invalid,
    /// reserved, or already claimed by another field.
    pub fn bind<V: FlagValue + 'a>(
        &mut self,
        requested: FieldSpec,
        slot: &'a mut V,
    ) -> BindResult<&mut Self> {
        let spec = requested.prefixed(&self.prefix);
        self.claim(&spec)?;

        let default = slot.default_text();
        let arg = V::configure(build_arg(&spec, default.as_deref()));
        debug!(
            field = spec.field(),
            long = spec.long_name(),
            short = ?spec.short_alias(),
            required = spec.is_required(),
            kind = %V::KIND,
            "bound flag"
        );

        let id = spec.long_name().to_owned();
        let setter: Setter<'a> = Box::new(move |matches: &mut ArgMatches| {
            let written = slot.assign(matches, &id);
            if written {
                trace!(flag = %id, "wrote parsed value");
            }
            written
        });
        self.descriptors.push(FlagDescriptor {
            spec,
            kind: V::KIND,
            default,
            arg,
            setter,
        });
        Ok(self)
    }

    /// Binds every field of a nested record, prefixing its long names.
    ///
    /// Prefixes stack, so a record flattened with `db-` inside a record
    /// flattened with `app-` yields `--app-db-host`.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] under the same conditions as [`Binder::bind`].
    pub fn flatten<R: FlagRecord + ?Sized>(
        &mut self,
        prefix: &str,
        record: &'a mut R,
    ) -> BindResult<&mut Self> {
        let outer_len = self.prefix.len();
        self.prefix.push_str(prefix);
        let result = record.register(self);
        self.prefix.truncate(outer_len);
        result?;
        Ok(self)
    }

    fn claim(&mut self, spec: &FieldSpec) -> BindResult<()> {
        let field = spec.field();
        let long = spec.long_name();
        validate_long(field, long)?;
        if let Some(short) = spec.short_alias() {
            validate_short(field, short)?;
            if let Some(first) = self.shorts.get(&short) {
                return Err(BindError::DuplicateShort {
                    short,
                    first: first.clone(),
                    second: field.to_owned(),
                });
            }
        }
        match self.longs.entry(long.to_owned()) {
            Entry::Occupied(entry) => {
                return Err(BindError::DuplicateLong {
                    long: long.to_owned(),
                    first: entry.get().clone(),
                    second: field.to_owned(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(field.to_owned());
            }
        }
        if let Some(short) = spec.short_alias() {
            self.shorts.insert(short, field.to_owned());
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Flags<'a> {
        Flags {
            descriptors: self.descriptors,
        }
    }
}

fn build_arg(spec: &FieldSpec, default: Option<&str>) -> Arg {
    let long = spec.long_name().to_owned();
    let arg = Arg::new(long.clone())
        .long(long)
        .short(spec.short_alias())
        .required(spec.is_required())
        .hide(spec.is_hidden());
    match (spec.help_text(), default) {
        (Some(text), Some(value)) => arg.help(format!("{text} [default: {value}]")),
        (Some(text), None) => arg.help(text.to_owned()),
        (None, Some(value)) => arg.help(format!("[default: {value}]")),
        (None, None) => arg,
    }
}

/// Flag descriptors derived from one record, in registration order.
///
/// The descriptors borrow the record's fields, so the record cannot be
/// touched again until the flags are applied or dropped.
#[derive(Debug)]
pub struct Flags<'a> {
    descriptors: Vec<FlagDescriptor<'a>>,
}

impl<'a> Flags<'a> {
    /// The descriptors, in registration order.
    #[must_use]
    pub fn descriptors(&self) -> &[FlagDescriptor<'a>] {
        &self.descriptors
    }

    /// Iterates over the descriptors.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, FlagDescriptor<'a>> {
        self.descriptors.iter()
    }

    /// Number of bound flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` when the record bound no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Clap arguments for every descriptor.
    #[must_use]
    pub fn args(&self) -> impl Iterator<Item = Arg> + '_ {
        self.descriptors.iter().map(|descriptor| descriptor.arg.clone())
    }

    /// Adds every descriptor's argument to `command`.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::DuplicateLong`] when `command` already has an
    /// argument whose id or long name matches a bound long name, and
    /// [`BindError::DuplicateShort`] when it already uses a bound short
    /// alias. `first` names the existing argument's id.
    pub fn augment(&self, command: Command) -> BindResult<Command> {
        for descriptor in &self.descriptors {
            check_free(&command, &descriptor.spec)?;
        }
        Ok(command.args(self.args()))
    }

    /// Writes the values clap parsed back into the bound fields.
    ///
    /// `matches` must come from a command that was passed through
    /// [`Flags::augment`]. Fields whose flags were not given keep their
    /// current values.
    pub fn apply(self, mut matches: ArgMatches) {
        let written = self
            .descriptors
            .into_iter()
            .map(|descriptor| (descriptor.setter)(&mut matches))
            .filter(|written| *written)
            .count();
        debug!(written, "applied parsed flags");
    }

    /// Parses `args` with `command` plus these flags, then applies the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Flags::augment`] when `command` already uses
    /// a bound name, and [`BindError::Cli`] carrying clap's error unchanged
    /// when the arguments are rejected. The record is left untouched in
    /// both cases.
    pub fn parse_from<I, T>(self, command: Command, args: I) -> BindResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.augment(command)?.try_get_matches_from(args)?;
        self.apply(matches);
        Ok(())
    }
}

fn check_free(command: &Command, spec: &FieldSpec) -> BindResult<()> {
    let long = spec.long_name();
    if let Some(existing) = command
        .get_arguments()
        .find(|arg| arg.get_id().as_str() == long || arg.get_long() == Some(long))
    {
        return Err(BindError::DuplicateLong {
            long: long.to_owned(),
            first: existing.get_id().to_string(),
            second: spec.field().to_owned(),
        });
    }
    if let Some(short) = spec.short_alias()
        && let Some(existing) = command
            .get_arguments()
            .find(|arg| arg.get_short() == Some(short))
    {
        return Err(BindError::DuplicateShort {
            short,
            first: existing.get_id().to_string(),
            second: spec.field().to_owned(),
        });
    }
    Ok(())
}

impl<'f, 'a> IntoIterator for &'f Flags<'a> {
    type Item = &'f FlagDescriptor<'a>;
    type IntoIter = std::slice::Iter<'f, FlagDescriptor<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
