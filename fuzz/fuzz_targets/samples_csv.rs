#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let header = "time,name,label,value\n";
        let mut content = String::with_capacity(header.len().saturating_add(input.len()));
        content.push_str(header);
        content.push_str(input);
        debug_assert!(ratechart::fuzzing::derive_presets_from_csv(&content).is_ok());
        let _ = ratechart::fuzzing::derive_presets_from_csv(input);
    }
});
