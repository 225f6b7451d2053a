#![no_main]
use libfuzzer_sys::fuzz_target;

use mcnbt::mson::{self, Parser};

fuzz_target!(|text: &str| {
    if let Ok(nbt) = Parser::new(text).with_max_depth(64).parse() {
        let printed = mson::to_string(&nbt).unwrap();
        mson::from_str(&printed).unwrap();
    }
});
