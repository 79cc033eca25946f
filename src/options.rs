//! Field registration for bindable configuration types.

use std::fmt;

/// A type whose fields can be populated by [`parse`](crate::parse) and
/// [`Config::build`](crate::Config::build).
///
/// Implementors list the fields that take part in binding. Fields that are
/// not registered are left alone by the argument and environment stages,
/// although the file stage still deserializes them.
///
/// ## Example
///
/// ```
/// use cfgbind::{Field, Options};
///
/// #[derive(Debug, Default)]
/// struct CopyJob {
///     source: String,
///     verbose: bool,
///     threads: i64,
/// }
///
/// impl Options for CopyJob {
///     fn fields() -> Vec<Field<Self>> {
///         vec![
///             Field::new("source", |o: &mut Self| (&mut o.source).into())
///                 .position(0)
///                 .required(),
///             Field::new("verbose", |o: &mut Self| (&mut o.verbose).into())
///                 .short('v')
///                 .long("verbose"),
///             Field::new("threads", |o: &mut Self| (&mut o.threads).into())
///                 .short('t')
///                 .env("COPY_THREADS"),
///         ]
///     }
/// }
///
/// let mut copy = CopyJob::default();
/// cfgbind::parse(&mut copy, &["in.txt", "-v", "-t=4"])?;
/// assert_eq!(copy.source, "in.txt");
/// assert!(copy.verbose);
/// assert_eq!(copy.threads, 4);
/// # Ok::<(), cfgbind::ConfigError>(())
/// ```
pub trait Options: Sized {
    /// Returns the bindable fields in declaration order.
    fn fields() -> Vec<Field<Self>>;
}

/// Mutable access to one field of a target, tagged with its type.
#[derive(Debug)]
pub enum Slot<'a> {
    Str(&'a mut String),
    Int(&'a mut i64),
    Bool(&'a mut bool),
    Float(&'a mut f64),
    StrList(&'a mut Vec<String>),
    IntList(&'a mut Vec<i64>),
    BoolList(&'a mut Vec<bool>),
    FloatList(&'a mut Vec<f64>),
}

impl Slot<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Str(_) => ValueKind::Scalar(ScalarKind::String),
            Self::Int(_) => ValueKind::Scalar(ScalarKind::Integer),
            Self::Bool(_) => ValueKind::Scalar(ScalarKind::Boolean),
            Self::Float(_) => ValueKind::Scalar(ScalarKind::Float),
            Self::StrList(_) => ValueKind::Array(ScalarKind::String),
            Self::IntList(_) => ValueKind::Array(ScalarKind::Integer),
            Self::BoolList(_) => ValueKind::Array(ScalarKind::Boolean),
            Self::FloatList(_) => ValueKind::Array(ScalarKind::Float),
        }
    }
}

macro_rules! impl_slot_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $ty> for Slot<'a> {
                fn from(value: &'a mut $ty) -> Self {
                    Slot::$variant(value)
                }
            }
        )*
    };
}

impl_slot_from! {
    String => Str,
    i64 => Int,
    bool => Bool,
    f64 => Float,
    Vec<String> => StrList,
    Vec<i64> => IntList,
    Vec<bool> => BoolList,
    Vec<f64> => FloatList,
}

/// Element type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Integer,
    Boolean,
    Float,
}

/// Semantic type of a field: a single value or a growable sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar(ScalarKind),
    Array(ScalarKind),
}

impl ValueKind {
    pub fn is_array(self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// True only for a single boolean; boolean arrays still take values.
    pub fn is_flag(self) -> bool {
        self == Self::Scalar(ScalarKind::Boolean)
    }
}

/// Binding metadata for one field of `T`.
///
/// Built with [`Field::new`] and the chained setters; immutable once handed
/// to the binder.
pub struct Field<T> {
    pub(crate) name: &'static str,
    pub(crate) short: Option<char>,
    pub(crate) long: Option<&'static str>,
    pub(crate) env: Option<&'static str>,
    pub(crate) description: Option<&'static str>,
    pub(crate) required: bool,
    pub(crate) position: Option<usize>,
    pub(crate) accessor: fn(&mut T) -> Slot<'_>,
}

impl<T> Field<T> {
    /// Registers a field.
    ///
    /// `name` must match the field's serialized name so the file stage can
    /// report it as present.
    pub fn new(name: &'static str, accessor: fn(&mut T) -> Slot<'_>) -> Self {
        Self {
            name,
            short: None,
            long: None,
            env: None,
            description: None,
            required: false,
            position: None,
            accessor,
        }
    }

    /// Binds `-c`, `-c=value` and `-c value`.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Binds `--name`, `--name=value` and `--name value`, case-insensitively.
    pub fn long(mut self, long: &'static str) -> Self {
        self.long = Some(long);
        self
    }

    /// Reads the field from the named environment variable during a layered load.
    pub fn env(mut self, name: &'static str) -> Self {
        self.env = Some(name);
        self
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Fails the call unless some stage sets the field.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Binds the field to the positional argument at `position` (0-based,
    /// ordered among the other positional fields).
    pub fn position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("long", &self.long)
            .field("env", &self.env)
            .field("required", &self.required)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
