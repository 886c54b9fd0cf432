//! Flag name derivation and validation.
//!
//! Long names default to the kebab-case form of the field identifier. Both
//! long names and short aliases are checked before they reach clap, whose own
//! checks only fire as debug assertions.

use heck::ToKebabCase;

use crate::error::{BindError, BindResult};

const RESERVED_SHORTS: &[char] = &['h', 'V'];
const RESERVED_LONGS: &[&str] = &["help", "version"];

/// Converts a field identifier into its default long flag name.
///
/// Raw identifiers lose their `r#` prefix, so `r#type` becomes `type`.
pub(crate) fn kebab_long(field: &str) -> String {
    field.trim_start_matches("r#").to_kebab_case()
}

fn long_problem(long: &str) -> Option<&'static str> {
    if long.is_empty() {
        Some("must be non-empty")
    } else if long.starts_with('-') {
        Some("must not start with '-'")
    } else if long.starts_with('_') {
        Some("must not start with '_'")
    } else if !long.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Some("must contain only ASCII alphanumeric characters or '-'")
    } else {
        None
    }
}

pub(crate) fn validate_long(field: &str, long: &str) -> BindResult<()> {
    if let Some(reason) = long_problem(long) {
        return Err(BindError::InvalidLong {
            field: field.to_owned(),
            long: long.to_owned(),
            reason,
        });
    }
    if RESERVED_LONGS.contains(&long) {
        return Err(BindError::ReservedLong {
            field: field.to_owned(),
            long: long.to_owned(),
        });
    }
    Ok(())
}

pub(crate) fn validate_short(field: &str, short: char) -> BindResult<()> {
    if !short.is_ascii_alphanumeric() {
        return Err(BindError::InvalidShort {
            field: field.to_owned(),
            short,
        });
    }
    if RESERVED_SHORTS.contains(&short) {
        return Err(BindError::ReservedShort {
            field: field.to_owned(),
            short,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Tests for flag name derivation and validation.

    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("string_value1", "string-value1")]
    #[case::single("name", "name")]
    #[case::camel("StringValue1", "string-value1")]
    #[case::raw("r#type", "type")]
    #[case::slice("string_slice_value1", "string-slice-value1")]
    fn derives_kebab_case_longs(#[case] field: &str, #[case] expected: &str) {
        assert_eq!(kebab_long(field), expected);
    }

    #[rstest]
    #[case("alpha")]
    #[case("alpha-1")]
    #[case("string-value-two")]
    fn accepts_valid_long_flags(#[case] long: &str) -> Result<()> {
        validate_long("field", long).map_err(|err| anyhow!(err))
    }

    #[rstest]
    #[case("")]
    #[case("bad/flag")]
    #[case("alpha_beta")]
    #[case("has space")]
    #[case("_alpha")]
    #[case("-alpha")]
    fn rejects_invalid_long_flags(#[case] bad: &str) -> Result<()> {
        let Err(err) = validate_long("field", bad) else {
            return Err(anyhow!("expected invalid long flag for {bad:?}"));
        };
        ensure!(
            matches!(err, BindError::InvalidLong { .. }),
            "unexpected error: {err}"
        );
        Ok(())
    }

    #[rstest]
    #[case("help")]
    #[case("version")]
    fn rejects_reserved_long_flags(#[case] long: &str) -> Result<()> {
        let Err(err) = validate_long("field", long) else {
            return Err(anyhow!("expected reserved long flag error for {long}"));
        };
        ensure!(
            matches!(err, BindError::ReservedLong { .. }),
            "unexpected error: {err}"
        );
        Ok(())
    }

    #[rstest]
    #[case('s')]
    #[case('S')]
    #[case('7')]
    fn accepts_valid_short_flags(#[case] short: char) -> Result<()> {
        validate_short("field", short).map_err(|err| anyhow!(err))
    }

    #[rstest]
    #[case('-', false)]
    #[case('é', false)]
    #[case('h', true)]
    #[case('V', true)]
    fn rejects_bad_short_flags(#[case] short: char, #[case] reserved: bool) -> Result<()> {
        let Err(err) = validate_short("field", short) else {
            return Err(anyhow!("expected short flag error for {short}"));
        };
        ensure!(
            matches!(err, BindError::ReservedShort { .. }) == reserved,
            "unexpected error: {err}"
        );
        Ok(())
    }
}
