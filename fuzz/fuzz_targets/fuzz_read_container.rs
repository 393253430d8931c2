#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must encode again
    if let Ok(container) = objbom::Container::from_reader(data) {
        let _ = container.to_writer(Vec::new());
    }
});
