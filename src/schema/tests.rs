use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use super::*;
use crate::attribs;
use crate::binder::Dynamic;

#[derive(Debug, Default)]
struct Interval {
    start: i64,
    end: i64,
}

#[derive(Debug, Default)]
struct Record {
    id: i32,
    category_id: Option<u16>,
    ratio: f32,
    label: String,
    interval: Option<Interval>,
    internal: String,
}

#[derive(Debug, Default)]
struct Node {
    value: i64,
    children: Vec<Node>,
    next: Option<Box<Node>>,
}

#[derive(Debug, Default)]
struct Base {
    x: i64,
    y: i64,
}

#[derive(Debug, Default)]
struct Derived {
    base: Base,
    z: i64,
}

#[derive(Debug, Default)]
struct OtherX {
    x: String,
}

#[derive(Debug, Default)]
struct Clash {
    base: Base,
    other: OtherX,
}

#[derive(Debug, Default)]
struct AliasClash {
    a: i64,
    b: i64,
}

#[derive(Debug, Default)]
struct BadKey {
    lookup: HashMap<i32, String>,
}

#[derive(Debug, Default)]
struct HasChar {
    ok: i64,
    letter: char,
}

#[derive(Debug, Default)]
struct SelfEmbed {
    value: i64,
    inner: Option<Box<SelfEmbed>>,
}

#[derive(Debug, Default)]
struct EmbedScalar {
    count: i64,
}

#[derive(Debug, Default)]
struct UnknownTagKey {
    a: i64,
}

#[derive(Debug, Default)]
struct BadAlias {
    a: i64,
}

#[derive(Debug, Default)]
struct NumericAlias {
    a: i64,
}

#[derive(Debug, Default)]
struct StringDisabled {
    a: i64,
}

#[derive(Debug, Default)]
struct Owner {
    member: Option<Box<Member>>,
}

#[derive(Debug, Default)]
struct Member {
    owner: Owner,
    rank: i64,
}

#[derive(Debug, Default)]
struct Maps {
    hash: HashMap<String, i64>,
    tree: BTreeMap<String, Vec<u8>>,
    ordered: IndexMap<String, Dynamic>,
}

// `attribs!` requires every field to be a `Slot`; `char` refuses all writes.
impl crate::Slot for char {}

attribs! {
    Interval { start, end }
    Record {
        id,
        category_id: "name=category_id",
        ratio: "name='r'",
        label,
        interval,
        internal: "disabled",
    }
    Node { value, children, next }
    Base { x, y }
    Derived { ..base, z }
    OtherX { x }
    Clash { ..base, ..other }
    AliasClash { a, b: "name=a" }
    BadKey { lookup }
    HasChar { ok, letter }
    SelfEmbed { value, ..inner }
    EmbedScalar { ..count }
    UnknownTagKey { a: "alias=b" }
    BadAlias { a: "name='not valid'" }
    NumericAlias { a: "name=1" }
    StringDisabled { a: "disabled='yes'" }
    Maps { hash, tree, ordered }
    Owner { member }
    Member { ..owner, rank }
}

fn schema_of<T: Describe>(cache: &SchemaCache) -> &'static str {
    cache.build::<T>().unwrap().schema.type_name()
}

#[test]
fn test_struct_properties() {
    let cache = SchemaCache::new();
    let element = cache.build::<Record>().unwrap();
    assert!(!element.nullable);

    let schema = element.schema.resolve().unwrap();
    assert!(schema.is_struct());

    let aliases: Vec<_> = schema.properties().unwrap().keys().cloned().collect();
    assert_eq!(aliases, vec!["id", "category_id", "r", "label", "interval"]);

    let id = schema.property("id").unwrap();
    assert!(!id.nullable);
    assert!(matches!(
        id.schema.resolve().unwrap().kind(),
        SchemaKind::Integer { signed: true, width: 32 }
    ));

    let category = schema.property("category_id").unwrap();
    assert!(category.nullable);
    assert_eq!(category.field, "category_id");
    assert!(matches!(
        category.schema.resolve().unwrap().kind(),
        SchemaKind::Integer { signed: false, width: 16 }
    ));

    let ratio = schema.property("r").unwrap();
    assert_eq!(ratio.field, "ratio");
    assert!(matches!(ratio.schema.resolve().unwrap().kind(), SchemaKind::Float { width: 32 }));

    let interval = schema.property("interval").unwrap();
    assert!(interval.nullable);
    assert!(interval.schema.resolve().unwrap().is_struct());

    assert!(schema.property("internal").is_none());
}

#[test]
fn test_cache_returns_same_node() {
    let cache = SchemaCache::new();
    let first = cache.build::<Interval>().unwrap();
    let second = cache.build::<Interval>().unwrap();
    assert!(first.schema.ptr_eq(&second.schema));

    // also reached through Record's field
    let record = cache.build::<Record>().unwrap();
    let nested = &record.schema.resolve().unwrap().property("interval").unwrap().schema;
    assert!(nested.ptr_eq(&first.schema));

    assert!(cache.get::<Interval>().unwrap().ptr_eq(&first.schema));
}

#[test]
fn test_private_caches_are_independent() {
    let a = SchemaCache::new();
    let b = SchemaCache::new();
    let from_a = a.build::<Interval>().unwrap();
    let from_b = b.build::<Interval>().unwrap();

    assert!(!from_a.schema.ptr_eq(&from_b.schema));
    assert!(b.get::<Record>().is_none());
}

#[test]
fn test_recursive_type_resolves() {
    let cache = SchemaCache::new();
    let root = cache.build::<Node>().unwrap().schema;
    let schema = root.resolve().unwrap();

    let children = schema.property("children").unwrap().schema.resolve().unwrap();
    let element = children.element().unwrap();
    assert!(!element.nullable);
    assert!(element.schema.ptr_eq(&root));

    let next = schema.property("next").unwrap();
    assert!(next.nullable);
    assert!(next.schema.ptr_eq(&root));
}

#[test]
fn test_embedded_properties_are_merged() {
    let cache = SchemaCache::new();
    let schema = cache.build::<Derived>().unwrap().schema;
    let schema = schema.resolve().unwrap();

    let aliases: Vec<_> = schema.properties().unwrap().keys().cloned().collect();
    assert_eq!(aliases, vec!["x", "y", "z"]);

    assert_eq!(schema.property("x").unwrap().path, vec!["base", "x"]);
    assert_eq!(schema.property("z").unwrap().path, vec!["z"]);
    assert!(schema.property("base").is_none());
}

#[test]
fn test_duplicate_embedded_alias() {
    let cache = SchemaCache::new();
    let err = cache.build::<Clash>().unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField { ref alias, .. } if alias == "x"));
}

#[test]
fn test_duplicate_plain_alias() {
    let cache = SchemaCache::new();
    let err = cache.build::<AliasClash>().unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField { ref alias, .. } if alias == "a"));
}

#[test]
fn test_invalid_tags() {
    let cache = SchemaCache::new();

    for err in [
        cache.build::<UnknownTagKey>().unwrap_err(),
        cache.build::<BadAlias>().unwrap_err(),
        cache.build::<NumericAlias>().unwrap_err(),
        cache.build::<StringDisabled>().unwrap_err(),
    ] {
        assert!(
            matches!(err, SchemaError::InvalidTag { ref field, .. } if field == "a"),
            "got {:?}",
            err
        );
    }
}

#[test]
fn test_tag_parsing() {
    use super::tag::parse_tag;

    let tag = parse_tag("f", "").unwrap();
    assert_eq!(tag.alias, None);
    assert!(!tag.disabled);

    let tag = parse_tag("f", "name=id").unwrap();
    assert_eq!(tag.alias.as_deref(), Some("id"));

    let tag = parse_tag("f", "name='größe_2'").unwrap();
    assert_eq!(tag.alias.as_deref(), Some("größe_2"));

    assert!(parse_tag("f", "disabled").unwrap().disabled);

    // only the bare shorthand disables; `disabled=false` is a string value
    assert!(parse_tag("f", "disabled=false").is_err());

    let tag = parse_tag("f", "name=true").unwrap();
    assert_eq!(tag.alias.as_deref(), Some("true"));

    let err = parse_tag("f", "name=(").unwrap_err();
    assert!(err.to_string().starts_with("[attribs] Invalid tag on field `f`"));
}

#[test]
fn test_map_key_must_be_string() {
    let cache = SchemaCache::new();
    let err = cache.build::<BadKey>().unwrap_err();
    assert!(matches!(err, SchemaError::MapKeyNotString { .. }));
}

#[test]
fn test_map_schemas() {
    let cache = SchemaCache::new();
    let schema = cache.build::<Maps>().unwrap().schema;
    let schema = schema.resolve().unwrap();

    let element = |alias: &str| {
        let map = schema.property(alias).unwrap().schema.resolve().unwrap();
        assert!(matches!(map.kind(), SchemaKind::Map { .. }));
        map.element().unwrap().schema.resolve().unwrap()
    };

    assert!(matches!(element("hash").kind(), SchemaKind::Integer { signed: true, width: 64 }));
    assert!(matches!(element("tree").kind(), SchemaKind::Array { .. }));
    assert!(matches!(element("ordered").kind(), SchemaKind::Any));
}

#[test]
fn test_unsupported_type() {
    let cache = SchemaCache::new();
    let err = cache.build::<HasChar>().unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedType { type_name: "char", .. }));
}

#[test]
fn test_failed_build_rolls_back() {
    let cache = SchemaCache::new();
    assert!(cache.build::<HasChar>().is_err());

    // the i64 node registered for `ok` went away with the rest
    assert!(cache.is_empty());
    assert!(cache.get::<HasChar>().is_none());

    // entries from earlier builds survive a later failure
    schema_of::<Interval>(&cache);
    let before = cache.len();
    assert!(cache.build::<Clash>().is_err());
    assert_eq!(cache.len(), before);
}

#[test]
fn test_embedding_rules() {
    let cache = SchemaCache::new();

    let err = cache.build::<SelfEmbed>().unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedType { .. }));

    let err = cache.build::<EmbedScalar>().unwrap_err();
    assert!(matches!(err, SchemaError::NotStruct { type_name: "i64" }));
}

#[test]
fn test_embedding_a_type_under_construction() {
    fn member_aliases(cache: &SchemaCache) -> Vec<String> {
        let member = cache.get::<Member>().unwrap();
        member.resolve().unwrap().properties().unwrap().keys().cloned().collect()
    }

    let owner_first = SchemaCache::new();
    owner_first.build::<Owner>().unwrap();
    owner_first.build::<Member>().unwrap();

    let member_first = SchemaCache::new();
    member_first.build::<Member>().unwrap();
    member_first.build::<Owner>().unwrap();

    assert_eq!(member_aliases(&owner_first), vec!["member", "rank"]);
    assert_eq!(member_aliases(&member_first), member_aliases(&owner_first));

    let member = owner_first.get::<Member>().unwrap();
    let merged = member.resolve().unwrap().property("member").unwrap();
    assert_eq!(merged.path, vec!["owner", "member"]);
    assert!(merged.nullable);
    assert!(merged.schema.ptr_eq(&member));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "filled twice")]
fn test_schema_node_filled_once() {
    let node = SchemaRef::pending("Twice");
    node.fill(Schema {
        type_name: "Twice",
        kind: SchemaKind::Boolean,
    });
    node.fill(Schema {
        type_name: "Twice",
        kind: SchemaKind::Boolean,
    });
}

#[test]
fn test_non_struct_roots() {
    let cache = SchemaCache::new();

    let element = cache.build::<Option<Vec<String>>>().unwrap();
    assert!(element.nullable);
    let schema = element.schema.resolve().unwrap();
    assert!(!schema.is_struct());
    assert!(matches!(
        schema.element().unwrap().schema.resolve().unwrap().kind(),
        SchemaKind::String
    ));

    assert!(matches!(
        cache.build::<Box<bool>>().unwrap().schema.resolve().unwrap().kind(),
        SchemaKind::Boolean
    ));
}

#[test]
fn test_concurrent_builds_share_one_node() {
    let cache = SchemaCache::new();

    let handles: Vec<_> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8).map(|_| scope.spawn(|| cache.build::<Node>().unwrap())).collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for element in &handles[1..] {
        assert!(element.schema.ptr_eq(&handles[0].schema));
    }
}

#[test]
fn test_debug_of_recursive_schema_terminates() {
    let cache = SchemaCache::new();
    let schema = cache.build::<Node>().unwrap().schema;
    let text = format!("{:?}", schema.resolve().unwrap());
    assert!(text.contains("children"));
}
