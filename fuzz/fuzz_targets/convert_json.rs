#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(instance) = serde_json::from_slice::<cspconv_model::Instance>(data) {
        let config = cspconv_core::ConvertConfig::default();
        if let Ok(program) = cspconv_core::convert_instance(&instance, &config) {
            assert!(program.statements.iter().all(|s| !s.is_empty()));
        }
    }
});
