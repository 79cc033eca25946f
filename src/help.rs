//! Usage text generated from registered fields.

use std::fmt::Write;

use crate::descriptor::{Descriptor, Descriptors};
use crate::options::Options;

/// Renders a usage line followed by argument, option and environment tables.
///
/// Positional fields appear in position order, `<name>` when required and
/// `[name]` otherwise. Flags show their short and long forms, with a
/// `=VALUE` hint unless they are plain booleans.
pub fn usage<T: Options + Default>(program: &str) -> String {
    let descriptors = Descriptors::extract(&mut T::default());
    let positional: Vec<&Descriptor<T>> = descriptors
        .positional()
        .into_iter()
        .map(|i| descriptors.get(i))
        .collect();
    let flags: Vec<&Descriptor<T>> = descriptors
        .iter()
        .filter(|d| d.short().is_some() || d.long().is_some())
        .collect();
    let env_only: Vec<&Descriptor<T>> = descriptors
        .iter()
        .filter(|d| d.short().is_none() && d.long().is_none() && d.position().is_none())
        .filter(|d| d.env().is_some())
        .collect();

    let mut out = format!("Usage: {program}");
    if !flags.is_empty() {
        out.push_str(" [options]");
    }
    for desc in &positional {
        if desc.is_required() {
            let _ = write!(out, " <{}>", desc.name());
        } else {
            let _ = write!(out, " [{}]", desc.name());
        }
    }
    out.push('\n');

    let rows = |descs: &[&Descriptor<T>], left: &dyn Fn(&Descriptor<T>) -> String| {
        descs.iter().map(|&d| (left(d), notes(d))).collect::<Vec<_>>()
    };
    section(&mut out, "Arguments", rows(&positional, &|d| d.name().to_owned()));
    section(&mut out, "Options", rows(&flags, &flag_column::<T>));
    section(
        &mut out,
        "Environment",
        rows(&env_only, &|d| d.env().unwrap_or_default().to_owned()),
    );

    out
}

fn flag_column<T>(desc: &Descriptor<T>) -> String {
    let mut left = match (desc.short(), desc.long()) {
        (Some(short), Some(long)) => format!("-{short}, --{long}"),
        (Some(short), None) => format!("-{short}"),
        (None, Some(long)) => format!("    --{long}"),
        (None, None) => String::new(),
    };
    if !desc.kind().is_flag() {
        left.push_str("=VALUE");
    }
    left
}

fn notes<T>(desc: &Descriptor<T>) -> String {
    let mut text = desc.description().unwrap_or_default().to_owned();
    let mut note = |s: &str| {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(s);
    };

    if desc.is_required() {
        note("(required)");
    }
    if desc.kind().is_array() {
        note("(multiple allowed)");
    }
    if let Some(env) = desc.env() {
        if desc.short().is_some() || desc.long().is_some() || desc.position().is_some() {
            note(&format!("[env: {env}]"));
        }
    }
    text
}

fn section(out: &mut String, title: &str, rows: Vec<(String, String)>) {
    if rows.is_empty() {
        return;
    }
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);

    let _ = write!(out, "\n{title}:\n");
    for (left, right) in rows {
        if right.is_empty() {
            let _ = writeln!(out, "  {left}");
        } else {
            let _ = writeln!(out, "  {left:<width$}  {right}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Field;

    #[derive(Debug, Default)]
    struct App {
        source: String,
        destination: String,
        verbose: bool,
        threads: i64,
        include: Vec<String>,
        token: String,
    }

    impl Options for App {
        fn fields() -> Vec<Field<Self>> {
            vec![
                Field::new("destination", |o: &mut Self| (&mut o.destination).into())
                    .position(1)
                    .description("Destination file path"),
                Field::new("source", |o: &mut Self| (&mut o.source).into())
                    .position(0)
                    .required()
                    .description("Source file path"),
                Field::new("verbose", |o: &mut Self| (&mut o.verbose).into())
                    .short('v')
                    .long("verbose")
                    .description("Enable verbose output"),
                Field::new("threads", |o: &mut Self| (&mut o.threads).into())
                    .short('t')
                    .long("threads")
                    .env("APP_THREADS"),
                Field::new("include", |o: &mut Self| (&mut o.include).into())
                    .long("include")
                    .description("Files to include"),
                Field::new("token", |o: &mut Self| (&mut o.token).into())
                    .env("APP_TOKEN")
                    .description("API token"),
            ]
        }
    }

    #[test]
    fn test_usage_text() {
        let text = usage::<App>("app");
        let expected = "\
Usage: app [options] <source> [destination]

Arguments:
  source       Source file path (required)
  destination  Destination file path

Options:
  -v, --verbose        Enable verbose output
  -t, --threads=VALUE  [env: APP_THREADS]
      --include=VALUE  Files to include (multiple allowed)

Environment:
  APP_TOKEN  API token
";
        assert_eq!(text, expected);
    }

    #[derive(Debug, Default)]
    struct Bare {
        flag: bool,
    }

    impl Options for Bare {
        fn fields() -> Vec<Field<Self>> {
            vec![Field::new("flag", |o: &mut Self| (&mut o.flag).into()).short('f')]
        }
    }

    #[test]
    fn test_usage_without_descriptions() {
        assert_eq!(usage::<Bare>("bare"), "Usage: bare [options]\n\nOptions:\n  -f\n");
    }
}
