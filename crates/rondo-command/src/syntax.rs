//! Parsing of invocation syntax strings and flag specs.
//!
//! Command units declare their grammar as plain strings: an invocation
//! syntax like `"create:bundle <name>"` and flag specs like
//! `"-r, --rest [model]"`. This module turns those strings into the
//! typed pieces the grammar builder consumes.

use crate::CommandError;

/// A positional placeholder from an invocation syntax string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positional {
    pub name: String,
    pub required: bool,
}

/// Parsed invocation syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSyntax {
    /// Leading name token, used as the subcommand name.
    pub name: String,

    /// Positional placeholders in declaration order.
    pub positionals: Vec<Positional>,
}

/// Parse an invocation syntax string.
///
/// The first whitespace-separated token is the command name; every
/// following token must be a `<required>` or `[optional]` placeholder.
pub fn parse_invocation(syntax: &str) -> Result<InvocationSyntax, CommandError> {
    let mut tokens = syntax.split_whitespace();

    let name = tokens.next().ok_or_else(|| CommandError::InvalidSyntax {
        syntax: syntax.to_string(),
        reason: "empty invocation syntax".to_string(),
    })?;

    let mut positionals = Vec::new();
    for token in tokens {
        let positional = if let Some(name) = strip_delimiters(token, '<', '>') {
            Positional {
                name: name.to_string(),
                required: true,
            }
        } else if let Some(name) = strip_delimiters(token, '[', ']') {
            Positional {
                name: name.to_string(),
                required: false,
            }
        } else {
            return Err(CommandError::InvalidSyntax {
                syntax: syntax.to_string(),
                reason: format!("unrecognized token `{token}`"),
            });
        };
        positionals.push(positional);
    }

    Ok(InvocationSyntax {
        name: name.to_string(),
        positionals,
    })
}

/// Whether a flag takes a value, and whether that value is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueArity {
    None,
    Optional,
    Required,
}

/// Parsed flag syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub short: Option<char>,
    pub long: String,
    pub arity: ValueArity,
    pub value_name: Option<String>,
}

/// Parse a flag spec.
///
/// Accepts an optional short flag, a mandatory long flag, and an optional
/// value placeholder: `<value>` for a required value, `[value]` for an
/// optional one.
pub fn parse_flag(spec: &str) -> Result<FlagSpec, CommandError> {
    let invalid = |reason: String| CommandError::InvalidFlag {
        spec: spec.to_string(),
        reason,
    };

    let mut short = None;
    let mut long: Option<String> = None;
    let mut arity = ValueArity::None;
    let mut value_name = None;

    for token in spec.split_whitespace() {
        let token = token.trim_end_matches(',');
        if let Some(rest) = token.strip_prefix("--") {
            long = Some(rest.to_string());
        } else if let Some(rest) = token.strip_prefix('-') {
            short = rest.chars().next();
        } else if let Some(name) = strip_delimiters(token, '<', '>') {
            arity = ValueArity::Required;
            value_name = Some(name.to_string());
        } else if let Some(name) = strip_delimiters(token, '[', ']') {
            arity = ValueArity::Optional;
            value_name = Some(name.to_string());
        } else {
            return Err(invalid(format!("unrecognized token `{token}`")));
        }
    }

    let long = long
        .filter(|l| !l.is_empty())
        .ok_or_else(|| invalid("no long flag".to_string()))?;

    Ok(FlagSpec {
        short,
        long,
        arity,
        value_name,
    })
}

fn strip_delimiters(token: &str, open: char, close: char) -> Option<&str> {
    token
        .strip_prefix(open)
        .and_then(|t| t.strip_suffix(close))
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_with_required_positional() {
        let parsed = parse_invocation("create:bundle <name>").unwrap();
        assert_eq!(parsed.name, "create:bundle");
        assert_eq!(
            parsed.positionals,
            vec![Positional {
                name: "name".to_string(),
                required: true,
            }]
        );
    }

    #[test]
    fn invocation_with_mixed_positionals() {
        let parsed = parse_invocation("assets:install <bundle> [target]").unwrap();
        assert_eq!(parsed.positionals.len(), 2);
        assert!(parsed.positionals[0].required);
        assert!(!parsed.positionals[1].required);
    }

    #[test]
    fn invocation_without_positionals() {
        let parsed = parse_invocation("play").unwrap();
        assert_eq!(parsed.name, "play");
        assert!(parsed.positionals.is_empty());
    }

    #[test]
    fn invocation_rejects_stray_tokens() {
        assert!(parse_invocation("play now").is_err());
        assert!(parse_invocation("").is_err());
    }

    #[test]
    fn flag_with_short_and_optional_value() {
        let parsed = parse_flag("-r, --rest [model]").unwrap();
        assert_eq!(parsed.short, Some('r'));
        assert_eq!(parsed.long, "rest");
        assert_eq!(parsed.arity, ValueArity::Optional);
        assert_eq!(parsed.value_name.as_deref(), Some("model"));
    }

    #[test]
    fn flag_with_required_value() {
        let parsed = parse_flag("--out <dir>").unwrap();
        assert_eq!(parsed.short, None);
        assert_eq!(parsed.arity, ValueArity::Required);
    }

    #[test]
    fn bare_flag() {
        let parsed = parse_flag("--skip-install").unwrap();
        assert_eq!(parsed.long, "skip-install");
        assert_eq!(parsed.arity, ValueArity::None);
        assert_eq!(parsed.value_name, None);
    }

    #[test]
    fn flag_requires_a_long_form() {
        assert!(parse_flag("-r").is_err());
        assert!(parse_flag("").is_err());
    }
}
