#![no_main]

use libfuzzer_sys::fuzz_target;
use ratechart::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    let parsed: Option<ConfigFile> = serde_json::from_slice(data).ok();
    let applied = ratechart::fuzzing::apply_config_from_json(data);
    if applied.is_ok() {
        if let Some(config) = parsed {
            if let Some(window) = config.window {
                debug_assert!(window >= 1);
            }
            for family in &config.family {
                if let Some(window) = family.window {
                    debug_assert!(window >= 1);
                }
                if let Some(labels) = family.labels.as_ref() {
                    debug_assert!(!labels.is_empty());
                }
            }
        }
    }
});
