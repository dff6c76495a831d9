/// Make a struct bindable: implements [`Describe`](crate::Describe) and
/// [`Slot`](crate::Slot) for it.
///
/// Each entry is one of:
/// - `field`: bound under its own name
/// - `field: "tag"`: tag text in the attribute syntax, e.g. `"name='id'"` or `"disabled"`
/// - `..field`: an embedded struct whose properties are merged into this one
///
/// ```
/// #[derive(Debug, Default, PartialEq)]
/// struct Interval {
///     start: i64,
///     end: i64,
/// }
///
/// #[derive(Debug, Default)]
/// struct Query {
///     limit: u32,
///     range: Option<Interval>,
///     internal: String,
/// }
///
/// attribs::attribs! {
///     Interval { start, end }
///     Query { limit, range: "name='interval'", internal: "disabled" }
/// }
///
/// let query = attribs::Definition::<Query>::must_new()
///     .parse("limit=10, interval(start=1, end=2)")
///     .unwrap();
/// assert_eq!(query.range, Some(Interval { start: 1, end: 2 }));
/// ```
#[macro_export]
macro_rules! attribs {
    ($($ty:ident { $($body:tt)* })*) => {
        $(
            impl $crate::Describe for $ty {
                fn describe() -> $crate::schema::TypeInfo {
                    let mut fields = ::std::vec::Vec::new();
                    $crate::__attribs_fields!(fields, $ty; $($body)*);
                    $crate::schema::TypeInfo::Struct(fields)
                }
            }

            impl $crate::Slot for $ty {
                fn begin_struct(&mut self) -> ::std::result::Result<(), $crate::binder::Mismatch> {
                    ::std::result::Result::Ok(())
                }

                fn field(&mut self, name: &str) -> ::std::option::Option<&mut dyn $crate::Slot> {
                    $crate::__attribs_slots!(self, name; $($body)*);
                    ::std::option::Option::None
                }
            }
        )*
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __attribs_fields {
    ($fields:ident, $ty:ident;) => {};
    ($fields:ident, $ty:ident; .. $f:ident $(, $($rest:tt)*)?) => {
        $fields.push($crate::schema::FieldInfo::embedded(
            stringify!($f),
            $crate::schema::TypeHandle::of_field(|s: &$ty| &s.$f),
        ));
        $crate::__attribs_fields!($fields, $ty; $($($rest)*)?);
    };
    ($fields:ident, $ty:ident; $f:ident : $tag:literal $(, $($rest:tt)*)?) => {
        $fields.push($crate::schema::FieldInfo::new(
            stringify!($f),
            $tag,
            $crate::schema::TypeHandle::of_field(|s: &$ty| &s.$f),
        ));
        $crate::__attribs_fields!($fields, $ty; $($($rest)*)?);
    };
    ($fields:ident, $ty:ident; $f:ident $(, $($rest:tt)*)?) => {
        $fields.push($crate::schema::FieldInfo::new(
            stringify!($f),
            "",
            $crate::schema::TypeHandle::of_field(|s: &$ty| &s.$f),
        ));
        $crate::__attribs_fields!($fields, $ty; $($($rest)*)?);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __attribs_slots {
    ($this:ident, $name:ident;) => {};
    ($this:ident, $name:ident; .. $f:ident $(, $($rest:tt)*)?) => {
        $crate::__attribs_slots!($this, $name; $f $(, $($rest)*)?);
    };
    ($this:ident, $name:ident; $f:ident : $tag:literal $(, $($rest:tt)*)?) => {
        $crate::__attribs_slots!($this, $name; $f $(, $($rest)*)?);
    };
    ($this:ident, $name:ident; $f:ident $(, $($rest:tt)*)?) => {
        if $name == stringify!($f) {
            return ::std::option::Option::Some(&mut $this.$f as &mut dyn $crate::Slot);
        }
        $crate::__attribs_slots!($this, $name; $($($rest)*)?);
    };
}
