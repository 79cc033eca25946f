//! Command-line binding.

mod named;
mod positional;
mod tokenize;

use tracing::debug;

use crate::descriptor::Descriptors;
use crate::error::ConfigError;
use crate::options::Options;

use named::bind_named;
use positional::bind_positional;
use tokenize::tokenize;

/// Binds `args` into `target`, ignoring files and the environment.
///
/// Positional arguments must come before the first token starting with `-`.
/// Named arguments take the forms `-x`, `-x=value`, `-x value`, `--name`,
/// `--name=value`, `--name value`, and `-xy` for bundled boolean flags.
/// Unknown flags are ignored. After binding, every required field must
/// have been set.
///
/// ## Example
///
/// ```
/// use cfgbind::{Field, Options};
///
/// #[derive(Debug, Default)]
/// struct Archive {
///     logs: Vec<String>,
///     backup: bool,
///     ratio: f64,
/// }
///
/// impl Options for Archive {
///     fn fields() -> Vec<Field<Self>> {
///         vec![
///             Field::new("logs", |o: &mut Self| (&mut o.logs).into()).short('l'),
///             Field::new("backup", |o: &mut Self| (&mut o.backup).into()).short('b'),
///             Field::new("ratio", |o: &mut Self| (&mut o.ratio).into()).long("ratio"),
///         ]
///     }
/// }
///
/// let mut archive = Archive::default();
/// cfgbind::parse(&mut archive, &["-l=a.log", "-b", "-l", "b.log", "--ratio=0.5"])?;
/// assert_eq!(archive.logs, ["a.log", "b.log"]);
/// assert!(archive.backup);
/// assert_eq!(archive.ratio, 0.5);
/// # Ok::<(), cfgbind::ConfigError>(())
/// ```
pub fn parse<T: Options, S: AsRef<str>>(target: &mut T, args: &[S]) -> Result<(), ConfigError> {
    let mut descriptors = Descriptors::extract(target);
    descriptors.validate()?;
    bind_args(target, &mut descriptors, args)?;
    descriptors.ensure_required()
}

/// Runs the command-line stage: tokenize, then positional, then named binding.
pub(crate) fn bind_args<T, S: AsRef<str>>(
    target: &mut T,
    descriptors: &mut Descriptors<T>,
    args: &[S],
) -> Result<(), ConfigError> {
    descriptors.begin_stage();

    let tokens = tokenize(args);
    debug!(
        positional = tokens.positional.len(),
        named = tokens.named.len(),
        "binding command-line arguments"
    );

    bind_positional(target, descriptors, &tokens.positional)?;
    bind_named(target, descriptors, &tokens.named)
}
