pub mod runner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wyrm_engine::{InputEvent, SceneConfig};

pub use runner::SceneRunner;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Scene not initialized. Call scene_init() first.");
        f(runner)
    })
}

/// Parse the optional JSON config. An empty string selects the defaults;
/// a missing seed is drawn from `Math.random()`.
fn load_config(config_json: &str) -> SceneConfig {
    let parsed = if config_json.trim().is_empty() {
        Ok(SceneConfig::default())
    } else {
        SceneConfig::from_json(config_json)
    };
    let mut config = match parsed {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid scene config: {}", e);
            panic!("invalid scene config: {e}");
        }
    };
    if config.seed.is_none() {
        config.seed = Some((js_sys::Math::random() * u32::MAX as f64) as u64);
    }
    config
}

#[wasm_bindgen]
pub fn scene_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = load_config(config_json);
    let seed = config.seed();
    let runner = match SceneRunner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("scene init failed: {}", e);
            panic!("scene init failed: {e}");
        }
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    with_runner(|r| r.init());
    log::info!("nightwyrm: initialized (seed {})", seed);
}

#[wasm_bindgen]
pub fn scene_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn scene_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn scene_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn scene_reset() {
    with_runner(|r| r.push_input(InputEvent::Reset));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_segments_ptr() -> *const f32 {
    with_runner(|r| r.segments_ptr())
}

#[wasm_bindgen]
pub fn get_segment_count() -> u32 {
    with_runner(|r| r.segment_count())
}

#[wasm_bindgen]
pub fn get_particles_ptr() -> *const f32 {
    with_runner(|r| r.particles_ptr())
}

#[wasm_bindgen]
pub fn get_particle_count() -> u32 {
    with_runner(|r| r.particle_count())
}

#[wasm_bindgen]
pub fn get_actors_ptr() -> *const f32 {
    with_runner(|r| r.actors_ptr())
}

#[wasm_bindgen]
pub fn get_actor_count() -> u32 {
    with_runner(|r| r.actor_count())
}

#[wasm_bindgen]
pub fn get_viewport_width() -> f32 {
    with_runner(|r| r.viewport_width())
}

#[wasm_bindgen]
pub fn get_viewport_height() -> f32 {
    with_runner(|r| r.viewport_height())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_segments() -> u32 {
    with_runner(|r| r.max_segments())
}

#[wasm_bindgen]
pub fn get_max_particles() -> u32 {
    with_runner(|r| r.max_particles())
}

#[wasm_bindgen]
pub fn get_max_actors() -> u32 {
    with_runner(|r| r.max_actors())
}
