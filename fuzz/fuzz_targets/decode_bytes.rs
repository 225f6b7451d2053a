#![no_main]
use libfuzzer_sys::fuzz_target;

use mcnbt::io::Decoder;
use mcnbt::{mson, to_bytes, Config};

fuzz_target!(|data: &[u8]| {
    let mut decoder = Decoder::new(data).with_max_depth(64);
    while let Ok(Some(nbt)) = decoder.next_named() {
        // Anything that decodes must encode and print again.
        to_bytes(&nbt, &Config::default()).unwrap();
        mson::to_string_pretty(&nbt).unwrap();
    }
});
