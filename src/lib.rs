//! block-world
//!
//! A voxel block-placement demo for native windows and the browser. Unit
//! cubes are placed on and removed from a ground plane with the mouse, their
//! texture is chosen from an on-screen picker drawn as a second scene on top
//! of the first.
//!
//! High-level modules
//! - `grid`: snapping hit points to block cells
//! - `pick`: rays and ray/shape intersection
//! - `world`: the placed objects, chosen texture and ghost block
//! - `overlay`: the texture picker swatches and indicator
//! - `interaction`: pointer gestures turned into world edits
//! - `camera`: perspective orbit camera, overlay camera and controls
//! - `scene`: winit events routed into the interaction controller
//! - `render`: frame composition and the two render passes
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `pipelines`: the opaque, transparent and overlay pipelines
//! - `resources`: asynchronous texture loading
//! - `data_structures`: texture keys, meshes, instances, GPU textures
//! - `flow`: the event loop
//! - `config`: runtime settings
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod grid;
pub mod interaction;
pub mod overlay;
pub mod pick;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod world;

pub use config::Settings;
pub use flow::{run, run_with};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    run().map_err(|e| wasm_bindgen::JsValue::from_str(&format!("{:#}", e)))
}
