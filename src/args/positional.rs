use tracing::debug;

use crate::descriptor::Descriptors;
use crate::error::{ConfigError, Origin};

/// Binds positional tokens to positional fields in ascending position order.
///
/// The first field without a token ends binding: an error if that field is
/// required, otherwise it and every later positional field keep their values.
/// Surplus tokens are ignored.
pub(crate) fn bind_positional<T>(
    target: &mut T,
    descriptors: &mut Descriptors<T>,
    tokens: &[&str],
) -> Result<(), ConfigError> {
    let order = descriptors.positional();

    for (i, &index) in order.iter().enumerate() {
        let desc = descriptors.get_mut(index);
        let position = desc.position().unwrap_or(i);

        let Some(&token) = tokens.get(i) else {
            if desc.is_required() {
                return Err(ConfigError::MissingArgument { position });
            }
            break;
        };

        desc.assign(target, token, Origin::Position(position))?;
    }

    if tokens.len() > order.len() {
        debug!(
            ignored = tokens.len() - order.len(),
            "more positional arguments than positional fields"
        );
    }

    Ok(())
}
