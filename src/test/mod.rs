use crate::{Compound, Tag, Value};



pub mod builder;
mod value;

/// A compound from entries, in order.
pub fn compound(entries: Vec<(&str, Value)>) -> Compound {
    let mut c = Compound::new();
    for (k, v) in entries {
        c.insert(k, v).unwrap();
    }
    c
}

macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(Tag::$tag), $val);
            assert_eq!(Tag::try_from($val as u8).unwrap(), Tag::$tag);
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
        LongArray = 12,
    }

    for value in 13..=u8::MAX {
        assert!(Tag::try_from(value).is_err())
    }
}

#[test]
fn only_lists_and_compounds_are_containers() {
    assert!(Tag::List.is_container());
    assert!(Tag::Compound.is_container());
    assert!(!Tag::ByteArray.is_container());
    assert!(!Tag::String.is_container());
    assert!(!Tag::End.is_container());
}
