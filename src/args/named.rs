use tracing::debug;

use crate::descriptor::Descriptors;
use crate::error::{ConfigError, Origin};

/// A flag token with its key and, when present, its value.
#[derive(Debug, PartialEq, Eq)]
struct Flag<'a> {
    long: bool,
    key: &'a str,
    value: Option<&'a str>,
    /// The value was written as `key=value` rather than taken from the next token.
    inline: bool,
}

/// Binds `--long`, `-s` and bundled `-abc` tokens left to right.
///
/// Unknown flags and unresolvable bundles are skipped.
pub(crate) fn bind_named<T>(
    target: &mut T,
    descriptors: &mut Descriptors<T>,
    tokens: &[&str],
) -> Result<(), ConfigError> {
    let mut cursor = 0;

    while cursor < tokens.len() {
        let Some(flag) = next_flag(tokens, &mut cursor) else {
            continue;
        };

        let found = if flag.long {
            descriptors.find_long(flag.key)
        } else {
            single_char(flag.key).and_then(|c| descriptors.find_short(c))
        };

        let Some(index) = found else {
            let bundled = !flag.long && bind_bundle(target, descriptors, &flag)?;
            if !bundled {
                debug!(key = flag.key, "ignoring unknown flag");
            }
            continue;
        };

        let desc = descriptors.get_mut(index);
        let value = match flag.value {
            Some(value) => value,
            None if desc.kind().is_flag() => "true",
            None => {
                return Err(ConfigError::MissingValue {
                    key: flag.key.to_owned(),
                })
            }
        };

        desc.assign(target, value, origin(&flag))?;
    }

    Ok(())
}

/// Reads the token at `cursor` as a flag, advancing past it and any value it
/// takes from the following token. Returns `None` for bare tokens.
fn next_flag<'a>(tokens: &[&'a str], cursor: &mut usize) -> Option<Flag<'a>> {
    let token = tokens[*cursor];
    *cursor += 1;

    let (long, body) = if let Some(body) = token.strip_prefix("--") {
        (true, body)
    } else if let Some(body) = token.strip_prefix('-') {
        (false, body)
    } else {
        return None;
    };

    if let Some((key, value)) = body.split_once('=') {
        return Some(Flag {
            long,
            key,
            value: Some(value),
            inline: true,
        });
    }

    let value = match tokens.get(*cursor) {
        Some(next) if !next.starts_with('-') => {
            *cursor += 1;
            Some(*next)
        }
        _ => None,
    };

    Some(Flag {
        long,
        key: body,
        value,
        inline: false,
    })
}

/// Sets every flag of a `-abc` bundle when each character names a boolean
/// field. Returns `false`, binding nothing, otherwise.
///
/// A bundle never carries a value; one taken from the next token is dropped
/// since a bare token there is inert anyway.
fn bind_bundle<T>(
    target: &mut T,
    descriptors: &mut Descriptors<T>,
    flag: &Flag<'_>,
) -> Result<bool, ConfigError> {
    if flag.inline || flag.key.chars().count() < 2 {
        return Ok(false);
    }

    let mut indices = Vec::new();
    for c in flag.key.chars() {
        match descriptors.find_short(c) {
            Some(index) if descriptors.get(index).kind().is_flag() => indices.push((c, index)),
            _ => return Ok(false),
        }
    }

    for (c, index) in indices {
        descriptors
            .get_mut(index)
            .assign(target, "true", Origin::Short(c.to_string()))?;
    }
    Ok(true)
}

fn single_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn origin(flag: &Flag<'_>) -> Origin {
    if flag.long {
        Origin::Long(flag.key.to_owned())
    } else {
        Origin::Short(flag.key.to_owned())
    }
}
