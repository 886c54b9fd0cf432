//! Field types that can be bound to flags.
//!
//! [`FlagValue`] decides three things for a field type: the [`FlagKind`] it
//! maps to, how the clap [`Arg`] is configured, and how parsed matches are
//! written back into the field.

use std::path::PathBuf;

use clap::builder::ValueParser;
use clap::{Arg, ArgAction, ArgMatches};

use crate::counter::{Counter, CounterStep};
use crate::spec::FlagKind;

/// A field type that can be bound to a flag.
pub trait FlagValue {
    /// Shape of the flag generated for this type.
    const KIND: FlagKind;

    /// Renders the current value for help output, or `None` when there is
    /// nothing worth showing.
    fn default_text(&self) -> Option<String>;

    /// Sets the action, arity, and value parser on `arg`.
    fn configure(arg: Arg) -> Arg;

    /// Moves the parsed value for `id` out of `matches` into `self`.
    ///
    /// Returns `true` when the command line mentioned the flag and the field
    /// was written.
    fn assign(&mut self, matches: &mut ArgMatches, id: &str) -> bool;
}

/// A single value parsed from one flag argument.
pub trait Scalar: Clone + Send + Sync + 'static {
    /// `FlagKind::String` for text, `FlagKind::Primitive` otherwise.
    const KIND: FlagKind;

    /// Parser clap uses to turn the raw argument into `Self`.
    fn value_parser() -> ValueParser;

    /// Renders the value the way it would be typed on the command line.
    fn render(&self) -> String;
}

macro_rules! scalar {
    ($kind:expr => $($ty:ty),+ $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: FlagKind = $kind;

            fn value_parser() -> ValueParser {
                clap::value_parser!($ty).into()
            }

            fn render(&self) -> String {
                self.to_string()
            }
        }

        impl FlagValue for $ty {
            const KIND: FlagKind = <$ty as Scalar>::KIND;

            fn default_text(&self) -> Option<String> {
                Some(self.render()).filter(|text| !text.is_empty())
            }

            fn configure(arg: Arg) -> Arg {
                configure_single::<$ty>(arg)
            }

            fn assign(&mut self, matches: &mut ArgMatches, id: &str) -> bool {
                matches.remove_one::<$ty>(id).map(|value| *self = value).is_some()
            }
        }
    )+};
}

scalar!(FlagKind::String => String);
scalar!(FlagKind::Primitive => i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64, char);

impl Scalar for PathBuf {
    const KIND: FlagKind = FlagKind::Primitive;

    fn value_parser() -> ValueParser {
        ValueParser::path_buf()
    }

    fn render(&self) -> String {
        self.display().to_string()
    }
}

impl FlagValue for PathBuf {
    const KIND: FlagKind = FlagKind::Primitive;

    fn default_text(&self) -> Option<String> {
        Some(self.render()).filter(|text| !text.is_empty())
    }

    fn configure(arg: Arg) -> Arg {
        configure_single::<Self>(arg)
    }

    fn assign(&mut self, matches: &mut ArgMatches, id: &str) -> bool {
        matches
            .remove_one::<Self>(id)
            .map(|value| *self = value)
            .is_some()
    }
}

/// A repeated single-value flag keeps its last value.
fn overrides_self(arg: Arg) -> Arg {
    let id = arg.get_id().clone();
    arg.overrides_with(id)
}

fn configure_single<T: Scalar>(arg: Arg) -> Arg {
    overrides_self(arg)
        .action(ArgAction::Set)
        .num_args(1)
        .value_parser(T::value_parser())
}

impl<T: Scalar> FlagValue for Option<T> {
    const KIND: FlagKind = T::KIND;

    fn default_text(&self) -> Option<String> {
        self.as_ref().map(Scalar::render)
    }

    fn configure(arg: Arg) -> Arg {
        configure_single::<T>(arg)
    }

    fn assign(&mut self, matches: &mut ArgMatches, id: &str) -> bool {
        matches
            .remove_one::<T>(id)
            .map(|value| *self = Some(value))
            .is_some()
    }
}

/// Every occurrence is split on `,` and appended in order. When the flag
/// appears at all, the collected values replace the previous contents.
impl<T: Scalar> FlagValue for Vec<T> {
    const KIND: FlagKind = T::KIND.as_list();

    fn default_text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let rendered: Vec<String> = self.iter().map(Scalar::render).collect();
        Some(rendered.join(","))
    }

    fn configure(arg: Arg) -> Arg {
        arg.action(ArgAction::Append)
            .num_args(1)
            .value_delimiter(',')
            .value_parser(T::value_parser())
    }

    fn assign(&mut self, matches: &mut ArgMatches, id: &str) -> bool {
        matches
            .remove_many::<T>(id)
            .map(|values| *self = values.collect())
            .is_some()
    }
}

impl FlagValue for bool {
    const KIND: FlagKind = FlagKind::Switch;

    fn default_text(&self) -> Option<String> {
        None
    }

    fn configure(arg: Arg) -> Arg {
        overrides_self(arg).action(ArgAction::SetTrue)
    }

    fn assign(&mut self, matches: &mut ArgMatches, id: &str) -> bool {
        let seen = matches.get_flag(id);
        if seen {
            *self = true;
        }
        seen
    }
}

/// Each occurrence is read on its own: a bare `--flag` carries no value and
/// counts as one step up, while `--flag=N` carries `N`. `require_equals` keeps
/// clap from taking the next token as the count.
impl FlagValue for Counter {
    const KIND: FlagKind = FlagKind::Counter;

    fn default_text(&self) -> Option<String> {
        (self.get() != 0).then(|| self.to_string())
    }

    fn configure(arg: Arg) -> Arg {
        arg.action(ArgAction::Append)
            .num_args(0..=1)
            .require_equals(true)
            .value_name("N")
            .value_parser(clap::value_parser!(u64))
    }

    fn assign(&mut self, matches: &mut ArgMatches, id: &str) -> bool {
        matches
            .remove_occurrences::<u64>(id)
            .map(|occurrences| {
                *self = occurrences
                    .map(|mut values| CounterStep::from(values.next()))
                    .fold(*self, Counter::step);
            })
            .is_some()
    }
}
