use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::env::EnvSource;
use super::file::FileSource;
use crate::args::bind_args;
use crate::descriptor::Descriptors;
use crate::error::ConfigError;
use crate::options::Options;

/// Builder for a layered configuration load.
///
/// Sources are applied in a fixed order, each overriding the one before:
///
/// 1. field defaults (`T::default()`),
/// 2. the configuration file, deserialized by field name,
/// 3. the environment variable each field declares with [`Field::env`],
/// 4. command-line arguments, bound as by [`parse`](crate::parse).
///
/// Finally every [`required`](crate::Field::required) field must have been
/// set by one of the stages. A field counts as set by the file when its name
/// is a top-level key there.
///
/// Scalars set by the file or environment may be overridden on the command
/// line; binding the same scalar twice on the command line is a conflict.
/// Sequence fields append in every stage.
///
/// [`Field::env`]: crate::Field::env
///
/// ## Example
///
/// ```no_run
/// use cfgbind::{Config, Field, Options};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(default)]
/// struct Server {
///     host: String,
///     port: i64,
/// }
///
/// impl Options for Server {
///     fn fields() -> Vec<Field<Self>> {
///         vec![
///             Field::new("host", |o: &mut Self| (&mut o.host).into())
///                 .long("host")
///                 .env("SERVER_HOST"),
///             Field::new("port", |o: &mut Self| (&mut o.port).into())
///                 .short('p')
///                 .env("SERVER_PORT")
///                 .required(),
///         ]
///     }
/// }
///
/// let server: Server = Config::builder()
///     .with_file("server.json", false)
///     .with_args(std::env::args().skip(1))
///     .build()?;
/// # Ok::<(), cfgbind::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    file: Option<FileSource>,
    env: EnvSource,
    args: Option<Vec<String>>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Sets the configuration file.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// An optional file that is missing is skipped. Files ending in `.toml`
    /// are read as TOML, everything else as JSON.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.file = Some(FileSource::new(path, required));
        self
    }

    /// Sets the command-line arguments, without the program name.
    ///
    /// Without this call the command-line stage is skipped entirely.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Reads environment variables from `vars` instead of the process
    /// environment.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.env = EnvSource::Vars(vars);
        self
    }

    /// Runs every stage and returns the populated configuration.
    pub fn build<T>(self) -> Result<T, ConfigError>
    where
        T: Options + Default + DeserializeOwned,
    {
        let mut target = T::default();
        let mut descriptors = Descriptors::extract(&mut target);
        descriptors.validate()?;

        if let Some(file) = &self.file {
            if let Some(loaded) = file.load::<T>()? {
                target = loaded.value;
                descriptors.mark_present(loaded.keys.iter().map(String::as_str));
            }
        }

        self.env.apply(&mut target, &mut descriptors)?;

        match &self.args {
            Some(args) => bind_args(&mut target, &mut descriptors, args.as_slice())?,
            None => debug!("no command-line arguments supplied"),
        }

        descriptors.ensure_required()?;
        Ok(target)
    }
}

/// Loads `T` from an optional file, the environment and optional arguments.
///
/// Shorthand for [`Config::builder`] with the process environment.
pub fn load<T>(
    file: Option<&Path>,
    args: Option<&[String]>,
    file_required: bool,
) -> Result<T, ConfigError>
where
    T: Options + Default + DeserializeOwned,
{
    let mut config = Config::builder();
    if let Some(path) = file {
        config = config.with_file(path, file_required);
    }
    if let Some(args) = args {
        config = config.with_args(args.iter().cloned());
    }
    config.build()
}
