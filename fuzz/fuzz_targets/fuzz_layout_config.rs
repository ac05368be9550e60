#![no_main]

use docshell_layout::{LayoutConfig, LayoutState, PanelSide};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Anything that parses must also be usable.
    for parsed in [LayoutConfig::from_toml_str(text), LayoutConfig::from_json_str(text)] {
        let Ok(config) = parsed else {
            continue;
        };
        assert!(config.validate().is_empty());
        let breakpoints = config.breakpoints();
        let state = LayoutState::new(&config, breakpoints.mobile.saturating_sub(1), 40);
        assert!(state.is_mobile() || breakpoints.mobile == 0);
        for panel in PanelSide::ALL {
            let bounds = config.bounds(panel);
            assert!(bounds.min() <= bounds.max());
            assert_eq!(bounds.clamp(config.default_width(panel)), state.width(panel));
        }
    }
});
