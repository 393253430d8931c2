#![no_main]

use libfuzzer_sys::fuzz_target;
use objbom::ParseContext;
use objbom::parser::parse_material_library;

fuzz_target!(|data: &[u8]| {
    let mut context = ParseContext::new();
    let _ = parse_material_library("fuzz.mtl", data, &mut context);
});
