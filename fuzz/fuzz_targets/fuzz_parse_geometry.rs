#![no_main]

use libfuzzer_sys::fuzz_target;
use objbom::{Converter, MemoryResolver, ParserConfig, VertexMode};

fuzz_target!(|data: &[u8]| {
    let resolver = MemoryResolver::new().with_library("a.mtl", "newmtl a\nKd 1 0 0\n");

    for mode in [VertexMode::Deduplicated, VertexMode::Expanded] {
        let mut converter = Converter::new(ParserConfig::new().with_vertex_mode(mode));
        if converter.add_document("fuzz", data, &resolver).is_ok() {
            let _ = converter.finish().to_writer(Vec::new());
        }
    }
});
