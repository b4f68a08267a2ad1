#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(tree) = serde_json::from_slice::<cspconv_model::Node>(data) {
        let mut registry = cspconv_core::VariableRegistry::new();
        for (id, ty) in [("x", cspconv_core::Type::Int), ("p", cspconv_core::Type::Bool)] {
            let _ = registry.declare(id, ty, id.to_string());
        }
        if let Ok(e) = cspconv_core::convert_tree(&tree, &registry) {
            assert_eq!(e.as_bool().as_bool(), e.as_bool());
        }
    }
});
