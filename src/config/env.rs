use std::collections::HashMap;

use tracing::{debug, trace};

use crate::descriptor::Descriptors;
use crate::error::{ConfigError, Origin};

#[derive(Debug, Clone, Default)]
pub(crate) enum EnvSource {
    #[default]
    Process,
    Vars(HashMap<String, String>),
}

impl EnvSource {
    fn get(&self, name: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(name).ok(),
            Self::Vars(vars) => vars.get(name).cloned(),
        }
    }

    /// Assigns every field that declares a variable which is set and non-blank.
    pub(crate) fn apply<T>(&self, target: &mut T, descriptors: &mut Descriptors<T>) -> Result<(), ConfigError> {
        descriptors.begin_stage();

        for desc in descriptors.iter_mut() {
            let Some(name) = desc.env() else {
                continue;
            };

            match self.get(name) {
                Some(value) if !value.trim().is_empty() => {
                    debug!(field = desc.name(), var = name, "applying environment variable");
                    desc.assign(target, &value, Origin::Env(name.to_owned()))?;
                }
                _ => trace!(var = name, "environment variable unset or blank"),
            }
        }

        Ok(())
    }
}
