//! Engine configuration from JavaScript.
//!
//! Every binding that depends on configuration takes an optional plain
//! object shaped like `EngineConfig`. `undefined` or `null` means defaults;
//! a partial object only overrides the keys it names.

use retoque_core::EngineConfig;
use wasm_bindgen::prelude::*;

/// Default engine configuration as a plain object.
///
/// # Example (TypeScript)
/// ```typescript
/// const config = default_config();
/// config.transfer.max_width = 1024;
/// const original = load_image(bytes, config);
/// ```
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&EngineConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read and validate a configuration object.
pub(crate) fn engine_config(value: JsValue) -> Result<EngineConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EngineConfig::default());
    }
    let config: EngineConfig =
        serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}
