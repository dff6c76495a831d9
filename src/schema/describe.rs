use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::binder::Dynamic;

/// Shape of a type, as far as the schema builder is concerned.
///
/// Implemented here for primitives and std containers; user structs get it
/// from the [`attribs!`](crate::attribs) macro.
pub trait Describe: 'static {
    fn describe() -> TypeInfo;
}

#[derive(Debug, Clone)]
pub enum TypeInfo {
    Integer { signed: bool, width: u32 },
    Float { width: u32 },
    Boolean,
    String,
    /// `Option<T>`: nullable slot around `T`.
    Optional(TypeHandle),
    /// `Box<T>`: transparent indirection around `T`.
    Indirect(TypeHandle),
    Array(TypeHandle),
    Map { key: TypeHandle, value: TypeHandle },
    Any,
    Struct(Vec<FieldInfo>),
    Unsupported,
}

/// Lazy reference to another type's description.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    id: TypeId,
    name: &'static str,
    describe: fn() -> TypeInfo,
}

impl TypeHandle {
    pub fn of<T: Describe>() -> Self {
        TypeHandle {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            describe: T::describe,
        }
    }

    /// Handle for the type a field accessor points at, e.g. `|s: &User| &s.name`.
    pub fn of_field<S, T, F>(_accessor: F) -> Self
    where
        T: Describe,
        F: for<'a> Fn(&'a S) -> &'a T,
    {
        Self::of::<T>()
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn info(&self) -> TypeInfo {
        (self.describe)()
    }
}

impl std::fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// One field of a struct description.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub name: &'static str,
    /// Tag text in the attribute syntax, e.g. `name=id` or `disabled`.
    pub tag: &'static str,
    /// Embedded fields have their properties merged into the parent.
    pub embedded: bool,
    pub ty: TypeHandle,
}

impl FieldInfo {
    pub fn new(name: &'static str, tag: &'static str, ty: TypeHandle) -> Self {
        FieldInfo {
            name,
            tag,
            embedded: false,
            ty,
        }
    }

    pub fn embedded(name: &'static str, ty: TypeHandle) -> Self {
        FieldInfo {
            name,
            tag: "",
            embedded: true,
            ty,
        }
    }
}

macro_rules! describe_integer {
    ($($ty:ty => $signed:expr),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeInfo {
                    TypeInfo::Integer { signed: $signed, width: <$ty>::BITS }
                }
            }
        )*
    };
}

describe_integer! {
    i8 => true, i16 => true, i32 => true, i64 => true, isize => true,
    u8 => false, u16 => false, u32 => false, u64 => false, usize => false,
}

impl Describe for f32 {
    fn describe() -> TypeInfo {
        TypeInfo::Float { width: 32 }
    }
}

impl Describe for f64 {
    fn describe() -> TypeInfo {
        TypeInfo::Float { width: 64 }
    }
}

impl Describe for bool {
    fn describe() -> TypeInfo {
        TypeInfo::Boolean
    }
}

impl Describe for String {
    fn describe() -> TypeInfo {
        TypeInfo::String
    }
}

impl Describe for char {
    fn describe() -> TypeInfo {
        TypeInfo::Unsupported
    }
}

impl Describe for () {
    fn describe() -> TypeInfo {
        TypeInfo::Unsupported
    }
}

impl Describe for Dynamic {
    fn describe() -> TypeInfo {
        TypeInfo::Any
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeInfo {
        TypeInfo::Optional(TypeHandle::of::<T>())
    }
}

impl<T: Describe> Describe for Box<T> {
    fn describe() -> TypeInfo {
        TypeInfo::Indirect(TypeHandle::of::<T>())
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeInfo {
        TypeInfo::Array(TypeHandle::of::<T>())
    }
}

impl<K: Describe, V: Describe> Describe for HashMap<K, V> {
    fn describe() -> TypeInfo {
        TypeInfo::Map {
            key: TypeHandle::of::<K>(),
            value: TypeHandle::of::<V>(),
        }
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeInfo {
        TypeInfo::Map {
            key: TypeHandle::of::<K>(),
            value: TypeHandle::of::<V>(),
        }
    }
}

impl<K: Describe, V: Describe> Describe for IndexMap<K, V> {
    fn describe() -> TypeInfo {
        TypeInfo::Map {
            key: TypeHandle::of::<K>(),
            value: TypeHandle::of::<V>(),
        }
    }
}
