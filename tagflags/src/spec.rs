//! Per-field flag metadata.

use std::fmt;

use crate::names::kebab_long;

/// Shape of the flag derived from a field's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlagKind {
    /// A single string value.
    String,
    /// Repeatable, comma-splittable string values.
    StringList,
    /// Bare occurrences increment; `=N` sets.
    Counter,
    /// Presence sets the field to `true`.
    Switch,
    /// A single non-string value parsed with `FromStr`.
    Primitive,
    /// Repeatable, comma-splittable non-string values.
    PrimitiveList,
}

impl FlagKind {
    /// Returns the list kind holding values of this kind.
    #[must_use]
    pub const fn as_list(self) -> Self {
        match self {
            Self::String | Self::StringList => Self::StringList,
            _ => Self::PrimitiveList,
        }
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::StringList => "string-list",
            Self::Counter => "counter",
            Self::Switch => "switch",
            Self::Primitive => "primitive",
            Self::PrimitiveList => "primitive-list",
        };
        f.write_str(name)
    }
}

/// Naming and requiredness metadata for one field.
///
/// Built with chained setters; anything not set keeps its default: the long
/// name is the kebab-case field identifier, there is no short alias, and the
/// flag is optional.
///
/// ```rust
/// use tagflags::FieldSpec;
///
/// let spec = FieldSpec::new("string_value2").long("string-value-two").short('s');
/// assert_eq!(spec.long_name(), "string-value-two");
/// assert_eq!(spec.short_alias(), Some('s'));
/// assert!(!spec.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    field: String,
    long: String,
    short: Option<char>,
    required: bool,
    help: Option<String>,
    hidden: bool,
}

impl FieldSpec {
    /// Starts a spec for the field named `field`.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        let name: String = field.into();
        let long = kebab_long(&name);
        Self {
            field: name,
            long,
            short: None,
            required: false,
            help: None,
            hidden: false,
        }
    }

    /// Overrides the long flag name.
    #[must_use]
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    /// Sets the short alias.
    #[must_use]
    pub const fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Marks the flag as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the help text shown by clap.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Hides the flag from help output.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub(crate) fn prefixed(mut self, prefix: &str) -> Self {
        if !prefix.is_empty() {
            self.long.insert_str(0, prefix);
        }
        self
    }

    /// Identifier of the field this spec describes.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Long flag name, without the leading `--`.
    #[must_use]
    pub fn long_name(&self) -> &str {
        &self.long
    }

    /// Short alias, if any.
    #[must_use]
    pub const fn short_alias(&self) -> Option<char> {
        self.short
    }

    /// Whether clap must see the flag on the command line.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Help text, if any.
    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Whether the flag is hidden from help output.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
}
