//! Value-to-string conversion for failure messages
//!
//! Failure messages and diffs render values through a [`StringMappers`]
//! registry keyed by [`Type`]. A type without a registered mapper falls
//! back to its `Debug` representation.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::error::ValidationError;

// ============================================================================
// TYPE DESCRIPTOR
// ============================================================================

/// The primitive types the registry knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    Char,
    Str,
    String,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Unit,
}

macro_rules! primitive_types {
    ($($variant:ident => $ty:ty, $name:literal;)+) => {
        impl PrimitiveType {
            /// Returns the Rust spelling of the type.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            fn from_type_id(id: TypeId) -> Option<Self> {
                $(if id == TypeId::of::<$ty>() {
                    return Some(Self::$variant);
                })+
                None
            }
        }
    };
}

primitive_types! {
    Bool => bool, "bool";
    Char => char, "char";
    Str => &'static str, "&str";
    String => String, "String";
    I8 => i8, "i8";
    I16 => i16, "i16";
    I32 => i32, "i32";
    I64 => i64, "i64";
    I128 => i128, "i128";
    Isize => isize, "isize";
    U8 => u8, "u8";
    U16 => u16, "u16";
    U32 => u32, "u32";
    U64 => u64, "u64";
    U128 => u128, "u128";
    Usize => usize, "usize";
    F32 => f32, "f32";
    F64 => f64, "f64";
    Unit => (), "()";
}

/// Identifies a type for mapper lookup.
///
/// Primitives are matched by kind; everything else by [`TypeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// A built-in primitive.
    Primitive(PrimitiveType),
    /// Any other `'static` type.
    Named {
        /// The type's name as reported by [`std::any::type_name`].
        name: &'static str,
        /// The type's identity.
        id: TypeId,
    },
}

impl Type {
    /// Returns the descriptor of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        let id = TypeId::of::<T>();
        PrimitiveType::from_type_id(id).map_or_else(
            || Self::Named {
                name: type_name::<T>(),
                id,
            },
            Self::Primitive,
        )
    }

    /// Returns the type's name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Primitive(primitive) => primitive.name(),
            Self::Named { name, .. } => name,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// STRING MAPPERS
// ============================================================================

/// A type-erased value renderer.
///
/// Receives the registry so that mappers for containers can render their
/// elements consistently.
pub type StringMapper = Arc<dyn Fn(&dyn Any, &StringMappers) -> String + Send + Sync>;

static DEFAULT_MAPPERS: LazyLock<StringMappers> = LazyLock::new(|| {
    StringMappers::empty()
        .with_mapper(|value: &String, _| quote(value))
        .with_mapper(|value: &&'static str, _| quote(value))
        .with_mapper(|value: &char, _| format!("'{value}'"))
        .with_mapper(|value: &Type, _| value.name().to_owned())
        .with_mapper(|value: &ValidationError, _| value.to_string())
});

/// An immutable registry of value renderers.
///
/// Updates return a new registry; clones share storage.
#[derive(Clone)]
pub struct StringMappers {
    mappers: Arc<HashMap<Type, StringMapper>>,
}

impl StringMappers {
    /// Returns a registry without any mappers.
    pub fn empty() -> Self {
        Self {
            mappers: Arc::new(HashMap::new()),
        }
    }

    /// Returns a registry that also renders `T` with `mapper`.
    ///
    /// An existing mapper for `T` is replaced.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_mapper<T: 'static>(
        &self,
        mapper: impl Fn(&T, &StringMappers) -> String + Send + Sync + 'static,
    ) -> Self {
        let erased: StringMapper = Arc::new(move |value: &dyn Any, mappers: &StringMappers| {
            value
                .downcast_ref::<T>()
                .map_or_else(String::new, |value| mapper(value, mappers))
        });
        let mut mappers = HashMap::clone(&self.mappers);
        mappers.insert(Type::of::<T>(), erased);
        Self {
            mappers: Arc::new(mappers),
        }
    }

    /// Returns a registry that no longer has a mapper for `T`.
    #[must_use = "builder methods must be chained or built"]
    pub fn without_mapper<T: 'static>(&self) -> Self {
        let mut mappers = HashMap::clone(&self.mappers);
        mappers.remove(&Type::of::<T>());
        Self {
            mappers: Arc::new(mappers),
        }
    }

    /// Returns `true` if a mapper is registered for `T`.
    pub fn contains<T: 'static>(&self) -> bool {
        self.mappers.contains_key(&Type::of::<T>())
    }

    /// Renders `value`.
    pub fn to_string<T: fmt::Debug + 'static>(&self, value: &T) -> String {
        match self.mappers.get(&Type::of::<T>()) {
            Some(mapper) => mapper(value as &dyn Any, self),
            None => format!("{value:?}"),
        }
    }

    /// Renders a borrowed string the way a `String` would be rendered.
    pub fn str_to_string(&self, value: &str) -> String {
        match self.mappers.get(&Type::of::<String>()) {
            Some(mapper) => {
                let owned = value.to_owned();
                mapper(&owned as &dyn Any, self)
            }
            None => format!("{value:?}"),
        }
    }

    /// Renders a sequence of already-rendered items between two delimiters.
    pub fn join(open: &str, items: impl IntoIterator<Item = String>, close: &str) -> String {
        let mut out = String::from(open);
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            out.push_str(&item);
        }
        out.push_str(close);
        out
    }
}

impl Default for StringMappers {
    fn default() -> Self {
        DEFAULT_MAPPERS.clone()
    }
}

impl fmt::Debug for StringMappers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&'static str> = self.mappers.keys().map(Type::name).collect();
        types.sort_unstable();
        f.debug_struct("StringMappers").field("types", &types).finish()
    }
}

fn quote(value: &str) -> String {
    format!("\"{value}\"")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_type_descriptors() {
        assert_eq!(Type::of::<i32>(), Type::Primitive(PrimitiveType::I32));
        assert_eq!(Type::of::<String>().name(), "String");
        assert_eq!(Type::of::<&'static str>(), Type::Primitive(PrimitiveType::Str));
        assert!(matches!(Type::of::<Point>(), Type::Named { .. }));
        assert_ne!(Type::of::<Point>(), Type::of::<Vec<i32>>());
    }

    #[test]
    fn test_default_quotes_strings_without_escaping() {
        let mappers = StringMappers::default();
        assert_eq!(mappers.to_string(&String::from("a\"b")), "\"a\"b\"");
        assert_eq!(mappers.to_string(&"text"), "\"text\"");
        assert_eq!(mappers.str_to_string("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(mappers.to_string(&'c'), "'c'");
    }

    #[test]
    fn test_unregistered_types_use_debug() {
        let mappers = StringMappers::default();
        assert_eq!(mappers.to_string(&42_u8), "42");
        assert_eq!(mappers.to_string(&Point { x: 1, y: 2 }), "Point { x: 1, y: 2 }");
    }

    #[test]
    fn test_with_mapper_returns_new_registry() {
        let base = StringMappers::default();
        let custom = base.with_mapper(|point: &Point, _| format!("({}, {})", point.x, point.y));

        assert_eq!(custom.to_string(&Point { x: 1, y: 2 }), "(1, 2)");
        assert!(!base.contains::<Point>());
        assert!(custom.contains::<Point>());
    }

    #[test]
    fn test_mappers_can_recurse_through_the_registry() {
        let mappers = StringMappers::default().with_mapper(|values: &Vec<String>, mappers| {
            StringMappers::join("<", values.iter().map(|v| mappers.to_string(v)), ">")
        });
        let values = vec![String::from("a"), String::from("b")];
        assert_eq!(mappers.to_string(&values), "<\"a\", \"b\">");
    }

    #[test]
    fn test_without_mapper() {
        let mappers = StringMappers::default().without_mapper::<String>();
        assert_eq!(mappers.to_string(&String::from("x")), "\"x\"");
        assert!(!mappers.contains::<String>());
    }
}
