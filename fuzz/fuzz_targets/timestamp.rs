#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Some(parsed) = ratechart::fuzzing::parse_timestamp_input(input) {
            let rendered = parsed.to_string();
            if let Some(again) = ratechart::fuzzing::parse_timestamp_input(&rendered) {
                debug_assert_eq!(again, parsed);
            }
        }
    }
});
