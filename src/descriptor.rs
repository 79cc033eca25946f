//! Per-call binding state for the registered fields of a target.

use std::collections::HashMap;

use tracing::trace;

use crate::convert::store;
use crate::error::{ConfigError, Origin};
use crate::options::{Field, Options, ValueKind};

/// One registered field plus its set-state for the current call.
#[derive(Debug)]
pub(crate) struct Descriptor<T> {
    field: Field<T>,
    kind: ValueKind,
    /// Set by any stage so far.
    set: bool,
    /// Set by the stage currently running.
    bound_in_stage: bool,
}

impl<T> Descriptor<T> {
    pub(crate) fn name(&self) -> &'static str {
        self.field.name
    }

    pub(crate) fn kind(&self) -> ValueKind {
        self.kind
    }

    pub(crate) fn short(&self) -> Option<char> {
        self.field.short
    }

    pub(crate) fn long(&self) -> Option<&'static str> {
        self.field.long
    }

    pub(crate) fn env(&self) -> Option<&'static str> {
        self.field.env
    }

    pub(crate) fn description(&self) -> Option<&'static str> {
        self.field.description
    }

    pub(crate) fn position(&self) -> Option<usize> {
        self.field.position
    }

    pub(crate) fn is_required(&self) -> bool {
        self.field.required
    }

    #[cfg(test)]
    pub(crate) fn is_set(&self) -> bool {
        self.set
    }

    /// Converts `raw` and stores it into the target.
    ///
    /// Scalars may be bound once per stage; arrays append.
    pub(crate) fn assign(&mut self, target: &mut T, raw: &str, origin: Origin) -> Result<(), ConfigError> {
        if self.bound_in_stage && !self.kind.is_array() {
            return Err(ConfigError::Conflict {
                field: self.name().to_owned(),
                origin,
            });
        }

        store((self.field.accessor)(target), raw).map_err(|source| ConfigError::Format {
            field: self.name().to_owned(),
            origin: origin.clone(),
            value: raw.to_owned(),
            source,
        })?;

        trace!(field = self.name(), %origin, "bound value");
        self.set = true;
        self.bound_in_stage = true;
        Ok(())
    }
}

/// The descriptor set of one `parse`/`load` call.
#[derive(Debug)]
pub(crate) struct Descriptors<T> {
    items: Vec<Descriptor<T>>,
}

impl<T: Options> Descriptors<T> {
    /// Builds fresh descriptors for every registered field of `T`.
    ///
    /// The target is only used to read each field's type.
    pub(crate) fn extract(target: &mut T) -> Self {
        let items = T::fields()
            .into_iter()
            .map(|field| {
                let kind = (field.accessor)(target).kind();
                Descriptor {
                    field,
                    kind,
                    set: false,
                    bound_in_stage: false,
                }
            })
            .collect();
        Self { items }
    }
}

impl<T> Descriptors<T> {
    /// Checks the structural invariants of the field set.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let mut positions: HashMap<usize, &'static str> = HashMap::new();

        for desc in &self.items {
            let Some(position) = desc.position() else {
                continue;
            };
            if desc.kind().is_flag() {
                return Err(ConfigError::BooleanPositional {
                    field: desc.name().to_owned(),
                });
            }
            if let Some(first) = positions.insert(position, desc.name()) {
                return Err(ConfigError::PositionCollision {
                    position,
                    first: first.to_owned(),
                    second: desc.name().to_owned(),
                });
            }
        }

        Ok(())
    }

    /// Starts a new binding stage; earlier stages no longer count as conflicts.
    pub(crate) fn begin_stage(&mut self) {
        for desc in &mut self.items {
            desc.bound_in_stage = false;
        }
    }

    /// Marks every descriptor whose name appears in `keys` as set.
    pub(crate) fn mark_present<'k>(&mut self, keys: impl IntoIterator<Item = &'k str>) {
        for key in keys {
            if let Some(desc) = self.items.iter_mut().find(|d| d.name() == key) {
                desc.set = true;
            }
        }
    }

    /// Fails on the first required descriptor that no stage has set.
    pub(crate) fn ensure_required(&self) -> Result<(), ConfigError> {
        match self.items.iter().find(|d| d.is_required() && !d.set) {
            Some(desc) => Err(ConfigError::RequiredField {
                field: desc.name().to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Indices of positional descriptors, ascending by declared position.
    pub(crate) fn positional(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.items.len())
            .filter(|&i| self.items[i].position().is_some())
            .collect();
        indices.sort_by_key(|&i| self.items[i].position());
        indices
    }

    pub(crate) fn find_long(&self, key: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|d| d.long().is_some_and(|long| eq_ignore_case(long, key)))
    }

    pub(crate) fn find_short(&self, key: char) -> Option<usize> {
        self.items
            .iter()
            .position(|d| d.short().is_some_and(|short| char_eq_ignore_case(short, key)))
    }

    pub(crate) fn get(&self, index: usize) -> &Descriptor<T> {
        &self.items[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Descriptor<T> {
        &mut self.items[index]
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Descriptor<T>> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Descriptor<T>> {
        self.items.iter_mut()
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn char_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, Default)]
    struct Sample {
        first: String,
        second: i64,
        flag: bool,
        items: Vec<String>,
    }

    impl Options for Sample {
        fn fields() -> Vec<Field<Self>> {
            vec![
                Field::new("second", |o: &mut Self| (&mut o.second).into()).position(1),
                Field::new("first", |o: &mut Self| (&mut o.first).into())
                    .position(0)
                    .required(),
                Field::new("flag", |o: &mut Self| (&mut o.flag).into())
                    .short('F')
                    .long("Flag"),
                Field::new("items", |o: &mut Self| (&mut o.items).into()).short('i'),
            ]
        }
    }

    #[derive(Debug, Default)]
    struct BoolAtPosition {
        flag: bool,
    }

    impl Options for BoolAtPosition {
        fn fields() -> Vec<Field<Self>> {
            vec![Field::new("flag", |o: &mut Self| (&mut o.flag).into()).position(0)]
        }
    }

    #[derive(Debug, Default)]
    struct SharedPosition {
        a: String,
        b: String,
    }

    impl Options for SharedPosition {
        fn fields() -> Vec<Field<Self>> {
            vec![
                Field::new("a", |o: &mut Self| (&mut o.a).into()).position(0),
                Field::new("b", |o: &mut Self| (&mut o.b).into()).position(0),
            ]
        }
    }

    #[test]
    fn test_extract_reads_kinds_in_declaration_order() {
        let descriptors = Descriptors::extract(&mut Sample::default());
        let names: Vec<_> = descriptors.iter().map(|d| d.name()).collect();

        assert_eq!(names, ["second", "first", "flag", "items"]);
        assert!(descriptors.get(2).kind().is_flag());
        assert!(descriptors.get(3).kind().is_array());
        assert!(descriptors.iter().all(|d| !d.is_set()));
    }

    #[test]
    fn test_positional_sorted_by_position() {
        let descriptors = Descriptors::extract(&mut Sample::default());
        assert_eq!(descriptors.positional(), vec![1, 0]);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let descriptors = Descriptors::extract(&mut Sample::default());

        assert_eq!(descriptors.find_long("flag"), Some(2));
        assert_eq!(descriptors.find_long("FLAG"), Some(2));
        assert_eq!(descriptors.find_short('f'), Some(2));
        assert_eq!(descriptors.find_short('I'), Some(3));
        assert_eq!(descriptors.find_short('x'), None);
    }

    #[test]
    fn test_validate_rejects_boolean_position() {
        let descriptors = Descriptors::extract(&mut BoolAtPosition::default());
        let err = descriptors.validate().unwrap_err();

        assert!(matches!(err, ConfigError::BooleanPositional { ref field } if field == "flag"));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_validate_rejects_shared_position() {
        let descriptors = Descriptors::extract(&mut SharedPosition::default());
        let err = descriptors.validate().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::PositionCollision { position: 0, .. }
        ));
    }

    #[test]
    fn test_assign_conflicts_within_stage_only() {
        let mut target = Sample::default();
        let mut descriptors = Descriptors::extract(&mut target);

        descriptors
            .get_mut(1)
            .assign(&mut target, "a", Origin::Position(0))
            .unwrap();
        let err = descriptors
            .get_mut(1)
            .assign(&mut target, "b", Origin::Short("f".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Conflict { .. }));

        descriptors.begin_stage();
        descriptors
            .get_mut(1)
            .assign(&mut target, "c", Origin::Long("first".into()))
            .unwrap();
        assert_eq!(target.first, "c");
    }

    #[test]
    fn test_assign_appends_to_arrays() {
        let mut target = Sample::default();
        let mut descriptors = Descriptors::extract(&mut target);

        for value in ["x", "y", "z"] {
            descriptors
                .get_mut(3)
                .assign(&mut target, value, Origin::Short("i".into()))
                .unwrap();
        }

        assert_eq!(target.items, ["x", "y", "z"]);
        assert!(descriptors.get(3).is_set());
    }

    #[test]
    fn test_ensure_required() {
        let mut target = Sample::default();
        let mut descriptors = Descriptors::extract(&mut target);

        let err = descriptors.ensure_required().unwrap_err();
        assert!(matches!(err, ConfigError::RequiredField { ref field } if field == "first"));

        descriptors.mark_present(["first"]);
        descriptors.ensure_required().unwrap();
    }
}
