#![no_main]
use libfuzzer_sys::fuzz_target;

use mcnbt::error::ErrorKind;
use mcnbt::{from_bytes, to_bytes, Config, NamedTag, Value};

fuzz_target!(|v: Value| {
    let nbt = NamedTag::new("", v);
    let config = Config::default();

    if let Ok(bs) = to_bytes(&nbt, &config) {
        match from_bytes(&bs, &config) {
            // NaN never equals itself, so only compare trees that do.
            Ok(back) if nbt == nbt => assert_eq!(back, nbt),
            Ok(_) => {}
            // Trees nested past the depth limit still encode.
            Err(e) => assert_eq!(e.kind(), &ErrorKind::Structure, "{}", e),
        }
    }
});
