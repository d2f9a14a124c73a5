use glam::Vec3;
use log::info;
use pointfield_core::{Animator, Camera, FieldConfig, FieldSource, MeshStrategy, SurfaceRect, TriangleMesh};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Set the console log level (`"off"`, `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    log::set_max_level(level.parse().unwrap_or(log::LevelFilter::Info));
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_config(json: &str) -> Result<FieldConfig, JsValue> {
    if json.trim().is_empty() {
        return Ok(FieldConfig::default());
    }
    FieldConfig::from_json(json).map_err(to_js)
}

/// One animated point field bound to a canvas.
///
/// The renderer reads `positions_len()` floats starting at `positions_ptr()`
/// out of wasm memory after every `step` that returns with `take_redraw()`
/// set. The pointer is only valid until the next call that regenerates the
/// field.
#[wasm_bindgen]
pub struct PointFieldWorld {
    animator: Animator,
    rect: SurfaceRect,
}

#[wasm_bindgen]
impl PointFieldWorld {
    /// Build from a JSON config (empty string for defaults), seeded from OS entropy.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<PointFieldWorld, JsValue> {
        let config = parse_config(config_json)?;
        let world = PointFieldWorld {
            animator: Animator::from_entropy(config),
            rect: SurfaceRect::default(),
        };
        info!("PointFieldWorld created: {} points", world.point_count());
        Ok(world)
    }

    /// Deterministic variant of the constructor.
    #[wasm_bindgen]
    pub fn with_seed(config_json: &str, seed: u32) -> Result<PointFieldWorld, JsValue> {
        let config = parse_config(config_json)?;
        Ok(PointFieldWorld {
            animator: Animator::new(config, seed as u64),
            rect: SurfaceRect::default(),
        })
    }

    /// Advance one frame of `dt` seconds. Returns the time spent in ms.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();
        self.animator.step(dt);
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    #[wasm_bindgen]
    pub fn positions_ptr(&self) -> *const f32 {
        self.animator.positions().as_ptr()
    }

    /// Number of `f32` values in the position buffer (three per point).
    #[wasm_bindgen]
    pub fn positions_len(&self) -> usize {
        self.animator.positions().len()
    }

    #[wasm_bindgen]
    pub fn point_count(&self) -> usize {
        self.animator.field().len()
    }

    /// True once after every change to the position buffer.
    #[wasm_bindgen]
    pub fn take_redraw(&mut self) -> bool {
        self.animator.take_redraw()
    }

    #[wasm_bindgen]
    pub fn set_config_json(&mut self, config_json: &str) -> Result<(), JsValue> {
        let config = parse_config(config_json)?;
        self.animator.set_config(config);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn config_json(&self) -> Result<String, JsValue> {
        self.animator.config().to_json().map_err(to_js)
    }

    /// Linear RGB of the configured colour.
    #[wasm_bindgen]
    pub fn color(&self) -> Vec<f32> {
        self.animator.config().color.to_array().to_vec()
    }

    #[wasm_bindgen]
    pub fn point_size(&self) -> f32 {
        self.animator.config().point_size
    }

    /// Canvas bounding rectangle, as from `getBoundingClientRect()`.
    #[wasm_bindgen]
    pub fn set_surface_rect(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.rect = SurfaceRect::new(left, top, width, height);
        let camera = Camera {
            aspect: self.rect.aspect(),
            ..*self.animator.camera()
        };
        self.animator.set_camera(camera);
    }

    #[wasm_bindgen]
    pub fn set_camera(
        &mut self,
        x: f32, y: f32, z: f32,
        look_x: f32, look_y: f32, look_z: f32,
        fov_y: f32,
    ) {
        let camera = Camera {
            position: Vec3::new(x, y, z),
            look_at: Vec3::new(look_x, look_y, look_z),
            fov_y,
            ..*self.animator.camera()
        };
        self.animator.set_camera(camera);
    }

    #[wasm_bindgen]
    pub fn pointer_enter(&mut self) {
        self.animator.pointer_enter();
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.animator.pointer_move(client_x, client_y, &self.rect);
    }

    #[wasm_bindgen]
    pub fn pointer_leave(&mut self) {
        self.animator.pointer_leave();
    }

    /// Replace the field with points taken from a triangle mesh.
    ///
    /// `positions` is a flat `xyz` buffer; without `indices` every three
    /// vertices form a triangle. `surface_sampling` picks area-weighted
    /// surface samples, otherwise every n-th vertex is used.
    #[wasm_bindgen]
    pub fn load_mesh(
        &mut self,
        positions: &[f32],
        indices: Option<Vec<u32>>,
        surface_sampling: bool,
    ) -> Result<(), JsValue> {
        let mesh = TriangleMesh::from_flat(positions, indices.as_deref()).map_err(to_js)?;
        let strategy = if surface_sampling {
            MeshStrategy::Surface
        } else {
            MeshStrategy::Vertices
        };
        self.animator.set_source(FieldSource::Mesh { mesh, strategy });
        info!("mesh loaded: {} points", self.point_count());
        Ok(())
    }

    /// Go back to the configured primitive shape.
    #[wasm_bindgen]
    pub fn use_primitive(&mut self) {
        self.animator.set_source(FieldSource::Primitive);
    }

    /// Tear down: empties the field so events delivered before the JS side
    /// detaches its listeners do nothing.
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.animator.clear();
    }
}
