#![no_main]

use libfuzzer_sys::fuzz_target;
use ratechart::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed: Option<ConfigFile> = toml::from_str(input).ok();
        let applied = ratechart::fuzzing::apply_config_from_toml(input);
        if applied.is_ok() {
            if let Some(config) = parsed {
                if let Some(window) = config.window {
                    debug_assert!(window >= 1);
                }
                for family in &config.family {
                    if let Some(window) = family.window {
                        debug_assert!(window >= 1);
                    }
                    if family.preset.is_none() {
                        debug_assert!(family.metric.is_some());
                        debug_assert!(family.kind.is_some());
                    }
                }
            }
        }
    }
});
