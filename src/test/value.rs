use super::compound;
use crate::error::ErrorKind;
use crate::{Compound, List, NamedTag, Tag, Value};

#[test]
fn list_requires_one_element_type() {
    let err = List::new(Tag::Int, vec![Value::Int(1), Value::Byte(2)]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Structure);

    let err = List::new(Tag::End, vec![Value::Int(1)]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Structure);

    assert!(List::new(Tag::Compound, vec![]).is_ok());
    assert!(List::from_values(vec![Value::Short(1), Value::Long(2)]).is_err());
}

#[test]
fn list_from_values_takes_first_type() {
    let list = List::from_values(vec![Value::Short(1), Value::Short(2)]).unwrap();
    assert_eq!(list.element_tag(), Tag::Short);
    assert_eq!(list.len(), 2);

    let list = List::from_values(vec![]).unwrap();
    assert_eq!(list, List::empty());
}

#[test]
fn list_push() {
    let mut list = List::empty();
    list.push(Value::String("a".into())).unwrap();
    assert_eq!(list.element_tag(), Tag::String);

    let err = list.push(Value::Int(1)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Structure);
    assert_eq!(list.len(), 1);

    assert!(list.push(Value::End).is_err());

    let mut typed = List::new(Tag::Int, vec![]).unwrap();
    assert!(typed.push(Value::Long(1)).is_err());
    typed.push(Value::Int(1)).unwrap();
    assert_eq!(typed.into_vec(), vec![Value::Int(1)]);
}

#[test]
fn empty_lists_differ_by_declared_type() {
    assert_ne!(List::empty(), List::new(Tag::Int, vec![]).unwrap());
}

#[test]
fn compound_refuses_end() {
    let mut c = Compound::new();
    let err = c.insert("a", Value::End).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Structure);
    assert!(c.is_empty());
}

#[test]
fn compound_overwrite_keeps_position() {
    let mut c = compound(vec![("a", Value::Int(1)), ("b", Value::Int(2))]);

    let old = c.insert("a", Value::String("x".into())).unwrap();
    assert_eq!(old, Some(Value::Int(1)));

    let entries: Vec<(&String, &Value)> = c.iter().collect();
    assert_eq!(entries[0], (&"a".to_owned(), &Value::String("x".into())));
    assert_eq!(entries[1], (&"b".to_owned(), &Value::Int(2)));
}

#[test]
fn compound_remove_keeps_order() {
    let mut c = compound(vec![
        ("a", Value::Int(1)),
        ("b", Value::Int(2)),
        ("c", Value::Int(3)),
    ]);

    assert_eq!(c.remove("a"), Some(Value::Int(1)));
    assert_eq!(c.remove("a"), None);
    assert!(!c.contains_key("a"));

    let keys: Vec<&String> = c.keys().collect();
    assert_eq!(keys, ["b", "c"]);
}

#[test]
fn compound_equality_includes_order() {
    let ab = compound(vec![("a", Value::Int(1)), ("b", Value::Int(2))]);
    let ba = compound(vec![("b", Value::Int(2)), ("a", Value::Int(1))]);

    assert_ne!(ab, ba);
    assert_eq!(ab, ab.clone());
}

#[test]
fn literals() {
    let cases = [
        (Value::Byte(-8), "-8b"),
        (Value::Short(16), "16s"),
        (Value::Int(2), "2"),
        (Value::Long(64), "64L"),
        (Value::Float(32.0), "32.0f"),
        (Value::Float(0.1), "0.1f"),
        (Value::Double(-64.5), "-64.5d"),
        (Value::String("hi".into()), "\"hi\""),
        (Value::ByteArray(vec![1, -2]), "[B;1B,-2B]"),
        (Value::IntArray(vec![1, 2, 3]), "[I;1,2,3]"),
        (Value::LongArray(vec![5]), "[L;5L]"),
        (Value::List(List::empty()), "[]"),
        (Value::Compound(Compound::new()), "{}"),
        (Value::End, ""),
    ];

    for (value, literal) in cases.iter() {
        assert_eq!(&value.to_string(), literal);
    }
}

#[test]
fn nested_literal() {
    let list = List::new(
        Tag::Compound,
        vec![Value::Compound(compound(vec![("x", Value::Byte(1))]))],
    )
    .unwrap();
    let value = Value::Compound(compound(vec![
        ("items", Value::List(list)),
        ("display name", Value::String("Sword".into())),
    ]));

    assert_eq!(value.to_string(), r#"{items:[{x:1b}],"display name":"Sword"}"#);
}

#[test]
fn from_impls() {
    assert_eq!(Value::from(1i8), Value::Byte(1));
    assert_eq!(Value::from(true), Value::Byte(1));
    assert_eq!(Value::from(1i16), Value::Short(1));
    assert_eq!(Value::from(1i32), Value::Int(1));
    assert_eq!(Value::from(1i64), Value::Long(1));
    assert_eq!(Value::from(1f32), Value::Float(1.0));
    assert_eq!(Value::from(1f64), Value::Double(1.0));
    assert_eq!(Value::from("a"), Value::String("a".into()));
    assert_eq!(Value::from(vec![1i8]), Value::ByteArray(vec![1]));
    assert_eq!(Value::from(vec![1i32]), Value::IntArray(vec![1]));
    assert_eq!(Value::from(vec![1i64]), Value::LongArray(vec![1]));
    assert_eq!(Value::from(Compound::new()), Value::Compound(Compound::new()));
}

#[test]
fn accessors() {
    assert_eq!(Value::Byte(3).as_i64(), Some(3));
    assert_eq!(Value::Double(2.5).as_i64(), Some(2));
    assert_eq!(Value::Short(3).as_f64(), Some(3.0));
    assert_eq!(Value::String("x".into()).as_i64(), None);
    assert_eq!(Value::String("x".into()).as_str(), Some("x"));
    assert_eq!(Value::Int(1).as_str(), None);
    assert!(Value::Int(1).as_list().is_none());
    assert!(Value::Compound(Compound::new()).as_compound().is_some());
    assert!(Value::List(List::empty()).is_container());
    assert!(!Value::IntArray(vec![]).is_container());
}

#[test]
fn named_tag_parts() {
    let nbt = NamedTag::new("name", 5i64);
    assert_eq!(nbt.name(), "name");
    assert_eq!(nbt.value(), &Value::Long(5));

    let (name, value) = nbt.into_parts();
    assert_eq!(name, "name");
    assert_eq!(value.tag(), Tag::Long);
}
