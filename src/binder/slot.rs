use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use indexmap::IndexMap;

use super::Dynamic;

/// A scalar already parsed to the width the schema asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
    String(&'a str),
}

/// The destination cannot take the requested write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch;

/// Caller-owned storage the binder writes into.
///
/// Every method defaults to refusing the write; implementors override the
/// ones that match their shape. `Option<T>` materializes `T::default()` on
/// the first write of any kind.
pub trait Slot {
    fn assign(&mut self, _value: Scalar<'_>) -> Result<(), Mismatch> {
        Err(Mismatch)
    }

    fn assign_dynamic(&mut self, _value: Dynamic) -> Result<(), Mismatch> {
        Err(Mismatch)
    }

    /// Mark a struct as present, even if no field gets written.
    fn begin_struct(&mut self) -> Result<(), Mismatch> {
        Err(Mismatch)
    }

    /// Storage of the struct field named `name`.
    fn field(&mut self, _name: &str) -> Option<&mut dyn Slot> {
        None
    }

    /// Replace the content with an empty collection.
    fn begin_array(&mut self) -> Result<(), Mismatch> {
        Err(Mismatch)
    }

    /// Append a default element and return its storage.
    fn push_item(&mut self) -> Option<&mut dyn Slot> {
        None
    }

    /// Replace the content with an empty map.
    fn begin_map(&mut self) -> Result<(), Mismatch> {
        Err(Mismatch)
    }

    /// Storage for `key`, inserting a default value if absent.
    fn entry(&mut self, _key: &str) -> Option<&mut dyn Slot> {
        None
    }
}

macro_rules! slot_integer {
    ($variant:ident => $($ty:ty),*) => {
        $(
            impl Slot for $ty {
                fn assign(&mut self, value: Scalar<'_>) -> Result<(), Mismatch> {
                    match value {
                        Scalar::$variant(v) => {
                            *self = <$ty>::try_from(v).map_err(|_| Mismatch)?;
                            Ok(())
                        }
                        _ => Err(Mismatch),
                    }
                }
            }
        )*
    };
}

slot_integer!(Signed => i8, i16, i32, i64, isize);
slot_integer!(Unsigned => u8, u16, u32, u64, usize);

impl Slot for f32 {
    fn assign(&mut self, value: Scalar<'_>) -> Result<(), Mismatch> {
        match value {
            Scalar::Float(v) => {
                *self = v as f32;
                Ok(())
            }
            _ => Err(Mismatch),
        }
    }
}

impl Slot for f64 {
    fn assign(&mut self, value: Scalar<'_>) -> Result<(), Mismatch> {
        match value {
            Scalar::Float(v) => {
                *self = v;
                Ok(())
            }
            _ => Err(Mismatch),
        }
    }
}

impl Slot for bool {
    fn assign(&mut self, value: Scalar<'_>) -> Result<(), Mismatch> {
        match value {
            Scalar::Boolean(v) => {
                *self = v;
                Ok(())
            }
            _ => Err(Mismatch),
        }
    }
}

impl Slot for String {
    fn assign(&mut self, value: Scalar<'_>) -> Result<(), Mismatch> {
        match value {
            Scalar::String(v) => {
                v.clone_into(self);
                Ok(())
            }
            _ => Err(Mismatch),
        }
    }
}

impl Slot for Dynamic {
    fn assign_dynamic(&mut self, value: Dynamic) -> Result<(), Mismatch> {
        *self = value;
        Ok(())
    }
}

impl<T: Slot + Default> Slot for Option<T> {
    fn assign(&mut self, value: Scalar<'_>) -> Result<(), Mismatch> {
        self.get_or_insert_with(T::default).assign(value)
    }

    fn assign_dynamic(&mut self, value: Dynamic) -> Result<(), Mismatch> {
        self.get_or_insert_with(T::default).assign_dynamic(value)
    }

    fn begin_struct(&mut self) -> Result<(), Mismatch> {
        self.get_or_insert_with(T::default).begin_struct()
    }

    fn field(&mut self, name: &str) -> Option<&mut dyn Slot> {
        self.get_or_insert_with(T::default).field(name)
    }

    fn begin_array(&mut self) -> Result<(), Mismatch> {
        self.get_or_insert_with(T::default).begin_array()
    }

    fn push_item(&mut self) -> Option<&mut dyn Slot> {
        self.get_or_insert_with(T::default).push_item()
    }

    fn begin_map(&mut self) -> Result<(), Mismatch> {
        self.get_or_insert_with(T::default).begin_map()
    }

    fn entry(&mut self, key: &str) -> Option<&mut dyn Slot> {
        self.get_or_insert_with(T::default).entry(key)
    }
}

impl<T: Slot> Slot for Box<T> {
    fn assign(&mut self, value: Scalar<'_>) -> Result<(), Mismatch> {
        (**self).assign(value)
    }

    fn assign_dynamic(&mut self, value: Dynamic) -> Result<(), Mismatch> {
        (**self).assign_dynamic(value)
    }

    fn begin_struct(&mut self) -> Result<(), Mismatch> {
        (**self).begin_struct()
    }

    fn field(&mut self, name: &str) -> Option<&mut dyn Slot> {
        (**self).field(name)
    }

    fn begin_array(&mut self) -> Result<(), Mismatch> {
        (**self).begin_array()
    }

    fn push_item(&mut self) -> Option<&mut dyn Slot> {
        (**self).push_item()
    }

    fn begin_map(&mut self) -> Result<(), Mismatch> {
        (**self).begin_map()
    }

    fn entry(&mut self, key: &str) -> Option<&mut dyn Slot> {
        (**self).entry(key)
    }
}

impl<T: Slot + Default> Slot for Vec<T> {
    fn begin_array(&mut self) -> Result<(), Mismatch> {
        self.clear();
        Ok(())
    }

    fn push_item(&mut self) -> Option<&mut dyn Slot> {
        self.push(T::default());
        self.last_mut().map(|item| item as &mut dyn Slot)
    }
}

// Maps are generic over the key so that any map type can be described; only
// `String` keys can be written, which the schema builder already enforces.

impl<K: Eq + Hash + 'static, V: Slot + Default + 'static> Slot for HashMap<K, V> {
    fn begin_map(&mut self) -> Result<(), Mismatch> {
        self.clear();
        Ok(())
    }

    fn entry(&mut self, key: &str) -> Option<&mut dyn Slot> {
        let map = (self as &mut dyn Any).downcast_mut::<HashMap<String, V>>()?;
        Some(map.entry(key.to_string()).or_default())
    }
}

impl<K: Ord + 'static, V: Slot + Default + 'static> Slot for BTreeMap<K, V> {
    fn begin_map(&mut self) -> Result<(), Mismatch> {
        self.clear();
        Ok(())
    }

    fn entry(&mut self, key: &str) -> Option<&mut dyn Slot> {
        let map = (self as &mut dyn Any).downcast_mut::<BTreeMap<String, V>>()?;
        Some(map.entry(key.to_string()).or_default())
    }
}

impl<K: Eq + Hash + 'static, V: Slot + Default + 'static> Slot for IndexMap<K, V> {
    fn begin_map(&mut self) -> Result<(), Mismatch> {
        self.clear();
        Ok(())
    }

    fn entry(&mut self, key: &str) -> Option<&mut dyn Slot> {
        let map = (self as &mut dyn Any).downcast_mut::<IndexMap<String, V>>()?;
        Some(map.entry(key.to_string()).or_default())
    }
}
