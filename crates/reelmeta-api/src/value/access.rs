//! Lazy, composable field accessors over a decoded [`Value`] tree.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use super::{Kind, Object, Value};
use crate::view::View;

/// Failure of a single field access. Local to that field: sibling
/// accessors over the same object are unaffected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccessError {
    /// The object has no member at this path.
    #[error("field not found: {key}")]
    FieldNotFound {
        /// Dotted path of the missing member.
        key: String,
    },

    /// Array index is negative or past the end.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: i64,
        /// Array length.
        len: usize,
    },

    /// The value has a different tag than requested.
    #[error("type mismatch at {path}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Dotted path of the value.
        path: String,
        /// Requested tag.
        expected: Kind,
        /// Actual tag.
        actual: Kind,
    },

    /// The number is fractional or does not fit the integer target.
    #[error("{value} at {key} is not representable as {target}")]
    RangeError {
        /// Dotted path of the value.
        key: String,
        /// Offending number.
        value: f64,
        /// Target integer type name.
        target: &'static str,
    },

    /// The value has the right tag but unparseable content.
    #[error("malformed value at {key}: {reason}")]
    Malformed {
        /// Dotted path of the value.
        key: String,
        /// Parser message.
        reason: String,
    },
}

/// Deferred computation body.
type Eval<'a, T> = dyn Fn() -> Result<T, AccessError> + Send + Sync + 'a;

/// A lazy accessor: a deferred, repeatable computation that extracts a `T`
/// from a borrowed value tree.
///
/// Building a `Data` does no work. [`Data::force`] walks the tree from the
/// root each time it is called; against the same (immutable) tree it
/// always yields the same result.
///
/// ```
/// use reelmeta_api::value::{Data, Value};
///
/// let value = Value::from_slice(br#"{"credits": {"cast": [{"name": "Edward Norton"}]}}"#)?;
/// let root = value.as_object().ok_or("not an object")?;
/// let name = Data::root(root)
///     .field("credits")
///     .object()
///     .field("cast")
///     .array()
///     .index(0)
///     .object()
///     .field("name")
///     .str();
/// assert_eq!(name.force()?, "Edward Norton");
/// assert_eq!(name.path(), "credits.cast[0].name");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Data<'a, T> {
    /// Dotted path from the root, used in error reports.
    path: Arc<str>,
    /// Shared computation.
    eval: Arc<Eval<'a, T>>,
}

impl<T> Clone for Data<'_, T> {
    fn clone(&self) -> Self {
        Self {
            path: Arc::clone(&self.path),
            eval: Arc::clone(&self.eval),
        }
    }
}

impl<T> fmt::Debug for Data<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data").field("path", &self.path).finish_non_exhaustive()
    }
}

impl<'a, T: 'a> Data<'a, T> {
    /// Wraps an arbitrary computation.
    pub fn from_fn<F>(path: impl Into<Arc<str>>, eval: F) -> Self
    where
        F: Fn() -> Result<T, AccessError> + Send + Sync + 'a,
    {
        Self {
            path: path.into(),
            eval: Arc::new(eval),
        }
    }

    /// Evaluates the accessor.
    ///
    /// # Errors
    ///
    /// Returns the first [`AccessError`] raised along the accessor chain.
    pub fn force(&self) -> Result<T, AccessError> {
        (self.eval)()
    }

    /// Evaluates the accessor, reporting an absent field as `None`.
    ///
    /// # Errors
    ///
    /// Returns any [`AccessError`] other than
    /// [`AccessError::FieldNotFound`].
    pub fn optional(&self) -> Result<Option<T>, AccessError> {
        match self.force() {
            Ok(value) => Ok(Some(value)),
            Err(AccessError::FieldNotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Dotted path from the root (`""` for the root itself).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Composes a fallible transformation. Upstream failures short-circuit
    /// and `wrap` is not called.
    #[must_use]
    pub fn map<U: 'a, F>(self, wrap: F) -> Data<'a, U>
    where
        F: Fn(T) -> Result<U, AccessError> + Send + Sync + 'a,
    {
        let parent = self.eval;
        Data {
            path: self.path,
            eval: Arc::new(move || parent().and_then(&wrap)),
        }
    }
}

impl<'a> Data<'a, &'a Object> {
    /// Accessor that yields `object` itself.
    #[must_use]
    pub fn root(object: &'a Object) -> Self {
        Self::from_fn("", move || Ok(object))
    }

    /// Projects member `key`. Fails with [`AccessError::FieldNotFound`] when
    /// the member is absent.
    #[must_use]
    pub fn field(self, key: &str) -> Data<'a, &'a Value> {
        let path: Arc<str> = if self.path.is_empty() {
            Arc::from(key)
        } else {
            Arc::from(format!("{}.{key}", self.path))
        };
        let at = Arc::clone(&path);
        let key = String::from(key);
        let parent = self.eval;
        Data {
            path,
            eval: Arc::new(move || {
                let object = parent()?;
                object
                    .get(&key)
                    .ok_or_else(|| AccessError::FieldNotFound {
                        key: String::from(&*at),
                    })
            }),
        }
    }
}

impl<'a> Data<'a, &'a [Value]> {
    /// Projects element `index`. Fails with
    /// [`AccessError::IndexOutOfRange`] when `index` is negative or not
    /// below the length.
    #[must_use]
    pub fn index(self, index: i64) -> Data<'a, &'a Value> {
        let parent = self.eval;
        Data {
            path: Arc::from(format!("{}[{index}]", self.path)),
            eval: Arc::new(move || {
                let items = parent()?;
                usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .ok_or(AccessError::IndexOutOfRange {
                        index,
                        len: items.len(),
                    })
            }),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn count(self) -> Data<'a, usize> {
        self.map(|items| Ok(items.len()))
    }
}

impl<'a> Data<'a, &'a Value> {
    /// Coerces to `T`, checking the dynamic tag (and range, for integers).
    #[must_use]
    pub fn coerce<T: FromValue<'a> + 'a>(self) -> Data<'a, T> {
        let at = Arc::clone(&self.path);
        let parent = self.eval;
        Data {
            path: self.path,
            eval: Arc::new(move || T::from_value(parent()?, &at)),
        }
    }

    /// Coerces to `bool`.
    #[must_use]
    pub fn bool(self) -> Data<'a, bool> {
        self.coerce()
    }

    /// Coerces to `f64`.
    #[must_use]
    pub fn number(self) -> Data<'a, f64> {
        self.coerce()
    }

    /// Coerces to a borrowed string.
    #[must_use]
    pub fn str(self) -> Data<'a, &'a str> {
        self.coerce()
    }

    /// Coerces to an owned string.
    #[must_use]
    pub fn string(self) -> Data<'a, String> {
        self.coerce()
    }

    /// Coerces to an array.
    #[must_use]
    pub fn array(self) -> Data<'a, &'a [Value]> {
        self.coerce()
    }

    /// Coerces to an object.
    #[must_use]
    pub fn object(self) -> Data<'a, &'a Object> {
        self.coerce()
    }

    /// Coerces to `i32`.
    #[must_use]
    pub fn int32(self) -> Data<'a, i32> {
        self.coerce()
    }

    /// Coerces to `i64`.
    #[must_use]
    pub fn int64(self) -> Data<'a, i64> {
        self.coerce()
    }

    /// Coerces to `u32`.
    #[must_use]
    pub fn uint32(self) -> Data<'a, u32> {
        self.coerce()
    }

    /// Coerces to `u64`.
    #[must_use]
    pub fn uint64(self) -> Data<'a, u64> {
        self.coerce()
    }

    /// Parses a `YYYY-MM-DD` string.
    #[must_use]
    pub fn date(self) -> Data<'a, NaiveDate> {
        let at = Arc::clone(&self.path);
        self.str().map(move |text| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| AccessError::Malformed {
                key: String::from(&*at),
                reason: e.to_string(),
            })
        })
    }

    /// Wraps an object as a typed view.
    #[must_use]
    pub fn view<V: View<'a> + 'a>(self) -> Data<'a, V> {
        self.object().map(|object| Ok(V::from_object(object)))
    }

    /// Wraps an array of objects as typed views.
    #[must_use]
    pub fn views<V: View<'a> + 'a>(self) -> Data<'a, Vec<V>> {
        self.list::<&'a Object>()
            .map(|objects| Ok(objects.into_iter().map(V::from_object).collect()))
    }

    /// Coerces every element of an array to `T`.
    #[must_use]
    pub fn list<T: FromValue<'a> + 'a>(self) -> Data<'a, Vec<T>> {
        let at = Arc::clone(&self.path);
        self.array().map(move |items| {
            items
                .iter()
                .enumerate()
                .map(|(i, item)| T::from_value(item, &format!("{at}[{i}]")))
                .collect()
        })
    }
}

/// Types a [`Value`] can be coerced into.
pub trait FromValue<'a>: Sized {
    /// Tag a value must carry to be coerced into `Self`.
    const KIND: Kind;

    /// Converts `value`, reporting failures against `path`.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] on a tag mismatch, or
    /// [`AccessError::RangeError`] for numbers that do not fit.
    fn from_value(value: &'a Value, path: &str) -> Result<Self, AccessError>;
}

/// Builds a [`AccessError::TypeMismatch`].
fn mismatch(path: &str, expected: Kind, actual: &Value) -> AccessError {
    AccessError::TypeMismatch {
        path: String::from(path),
        expected,
        actual: actual.kind(),
    }
}

impl<'a> FromValue<'a> for bool {
    const KIND: Kind = Kind::Bool;

    fn from_value(value: &'a Value, path: &str) -> Result<Self, AccessError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch(path, Self::KIND, other)),
        }
    }
}

impl<'a> FromValue<'a> for f64 {
    const KIND: Kind = Kind::Number;

    fn from_value(value: &'a Value, path: &str) -> Result<Self, AccessError> {
        match value {
            Value::Number(n) => Ok(*n),
            other => Err(mismatch(path, Self::KIND, other)),
        }
    }
}

impl<'a> FromValue<'a> for &'a str {
    const KIND: Kind = Kind::String;

    fn from_value(value: &'a Value, path: &str) -> Result<Self, AccessError> {
        match value {
            Value::String(s) => Ok(s.as_str()),
            other => Err(mismatch(path, Self::KIND, other)),
        }
    }
}

impl<'a> FromValue<'a> for String {
    const KIND: Kind = Kind::String;

    fn from_value(value: &'a Value, path: &str) -> Result<Self, AccessError> {
        <&str>::from_value(value, path).map(String::from)
    }
}

impl<'a> FromValue<'a> for &'a [Value] {
    const KIND: Kind = Kind::Array;

    fn from_value(value: &'a Value, path: &str) -> Result<Self, AccessError> {
        match value {
            Value::Array(items) => Ok(items.as_slice()),
            other => Err(mismatch(path, Self::KIND, other)),
        }
    }
}

impl<'a> FromValue<'a> for &'a Object {
    const KIND: Kind = Kind::Object;

    fn from_value(value: &'a Value, path: &str) -> Result<Self, AccessError> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(mismatch(path, Self::KIND, other)),
        }
    }
}

/// Accepts `value` only if it is integral and within `[min, upper)`.
#[allow(clippy::float_cmp)]
fn checked_integer(
    value: f64,
    path: &str,
    target: &'static str,
    min: f64,
    upper: f64,
) -> Result<f64, AccessError> {
    if value.trunc() == value && value >= min && value < upper {
        Ok(value)
    } else {
        Err(AccessError::RangeError {
            key: String::from(path),
            value,
            target,
        })
    }
}

/// Implements [`FromValue`] for an integer type. `$upper` is the exclusive
/// upper bound (`MAX + 1`), exactly representable as `f64`.
macro_rules! integer_from_value {
    ($($ty:ty => [$min:expr, $upper:expr]),* $(,)?) => {$(
        impl<'a> FromValue<'a> for $ty {
            const KIND: Kind = Kind::Number;

            #[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn from_value(value: &'a Value, path: &str) -> Result<Self, AccessError> {
                let n = f64::from_value(value, path)?;
                checked_integer(n, path, stringify!($ty), $min, $upper).map(|n| n as $ty)
            }
        }
    )*};
}

integer_from_value! {
    i32 => [-2_147_483_648.0, 2_147_483_648.0],
    u32 => [0.0, 4_294_967_296.0],
    i64 => [-9_223_372_036_854_775_808.0, 9_223_372_036_854_775_808.0],
    u64 => [0.0, 18_446_744_073_709_551_616.0],
}
