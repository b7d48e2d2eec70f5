#![cfg(target_arch = "wasm32")]

use crate::config::SimulationConfig;
use crate::engine::{preset_catalog, Engine, PresetInfo, PRESET_DROP};
use crate::scene::{BodySpec, SceneDescription};
use wasm_bindgen::prelude::*;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub fn available_presets() -> js_sys::Array {
    let out = js_sys::Array::new();
    for info in preset_catalog() {
        out.push(&preset_info_to_js(info));
    }
    out
}

#[wasm_bindgen]
pub fn default_config() -> JsValue {
    serde_wasm_bindgen::to_value(&SimulationConfig::default()).unwrap_or(JsValue::NULL)
}

fn preset_info_to_js(info: &PresetInfo) -> JsValue {
    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&obj, &JsValue::from_str("id"), &JsValue::from_str(info.id));
    let _ = js_sys::Reflect::set(&obj, &JsValue::from_str("name"), &JsValue::from_str(info.name));
    let _ = js_sys::Reflect::set(
        &obj,
        &JsValue::from_str("description"),
        &JsValue::from_str(info.description),
    );
    let _ = js_sys::Reflect::set(
        &obj,
        &JsValue::from_str("gravityMode"),
        &JsValue::from_str(info.gravity_mode.as_str()),
    );
    JsValue::from(obj)
}

#[wasm_bindgen]
pub struct WasmSandbox {
    engine: Engine,
}

#[wasm_bindgen]
impl WasmSandbox {
    /// Build from a scene object `{ gravity_mode?, objects: [...] }` and an optional
    /// config object `{ gravityMode?, customGravity?, restitution?, friction?, showVectors? }`.
    #[wasm_bindgen(constructor)]
    pub fn new(scene: JsValue, config: JsValue) -> Result<WasmSandbox, JsValue> {
        let scene: SceneDescription = serde_wasm_bindgen::from_value(scene)
            .map_err(|e| JsValue::from_str(&format!("invalid scene: {}", e)))?;
        let config = parse_config(config)?;
        Ok(WasmSandbox { engine: Engine::new(scene, config) })
    }

    #[wasm_bindgen(js_name = "newPreset")]
    pub fn new_preset(id: &str) -> Result<WasmSandbox, JsValue> {
        let engine = Engine::new_preset(id).map_err(js_err)?;
        Ok(WasmSandbox { engine })
    }

    #[wasm_bindgen(js_name = "newFromJson")]
    pub fn new_from_json(scene: &str, config: JsValue) -> Result<WasmSandbox, JsValue> {
        let config = parse_config(config)?;
        let engine = Engine::from_json(scene, config).map_err(js_err)?;
        Ok(WasmSandbox { engine })
    }

    pub fn new_demo() -> Result<WasmSandbox, JsValue> {
        Self::new_preset(PRESET_DROP)
    }

    pub fn len(&self) -> usize { self.engine.len() }

    pub fn time(&self) -> f64 { self.engine.time() }

    /// Advance one displayed frame; `delta` is the wall-clock frame time in seconds.
    pub fn step(&mut self, delta: f64) { self.engine.step(delta); }

    pub fn play(&mut self) { self.engine.play(); }

    pub fn pause(&mut self) { self.engine.pause(); }

    pub fn is_playing(&self) -> bool { self.engine.is_playing() }

    #[wasm_bindgen(js_name = "loadScene")]
    pub fn load_scene(&mut self, scene: JsValue) -> Result<(), JsValue> {
        let scene: SceneDescription = serde_wasm_bindgen::from_value(scene)
            .map_err(|e| JsValue::from_str(&format!("invalid scene: {}", e)))?;
        self.engine.load_scene(scene);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setConfig")]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config = parse_config(config)?;
        self.engine.set_config(config);
        Ok(())
    }

    #[wasm_bindgen(js_name = "updateBody")]
    pub fn update_body(&mut self, spec: JsValue) -> Result<(), JsValue> {
        let spec: BodySpec = serde_wasm_bindgen::from_value(spec)
            .map_err(|e| JsValue::from_str(&format!("invalid body: {}", e)))?;
        self.engine.update_body(spec);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setBodyFixed")]
    pub fn set_body_fixed(&mut self, label: &str, fixed: bool) -> Result<(), JsValue> {
        self.engine.set_body_fixed(label, fixed).map_err(js_err)
    }

    #[wasm_bindgen(js_name = "removeBody")]
    pub fn remove_body(&mut self, label: &str) -> Result<(), JsValue> {
        self.engine.remove_body(label).map_err(js_err)
    }

    pub fn labels(&self) -> js_sys::Array {
        let out = js_sys::Array::new();
        for label in self.engine.labels() {
            out.push(&JsValue::from_str(&label));
        }
        out
    }

    pub fn positions(&self) -> Vec<f32> { self.engine.positions_flat() }

    pub fn states(&self) -> Vec<f32> { self.engine.state_matrix_flat() }

    pub fn rotations(&self) -> Vec<f32> { self.engine.rotations_flat() }

    #[wasm_bindgen(js_name = "metricsFlat")]
    pub fn metrics_flat(&self) -> Vec<f32> { self.engine.metrics_flat() }

    pub fn metrics(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.engine.metrics()).unwrap_or(JsValue::NULL)
    }

    pub fn bodies(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.engine.snapshots()).unwrap_or(JsValue::NULL)
    }

    pub fn vectors(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.engine.vector_overlays()).unwrap_or(JsValue::NULL)
    }

    pub fn trajectory(&self, label: &str) -> Result<Vec<f32>, JsValue> {
        self.engine.trajectory_flat(label).map_err(js_err)
    }
}

fn parse_config(config: JsValue) -> Result<SimulationConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(SimulationConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("invalid config: {}", e)))
}
