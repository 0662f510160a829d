//! wasm-bindgen exports driving one sandbox from the page.
//!
//! The page calls `sandbox_init` once, forwards pointer, resize and window
//! events as they happen, calls `sandbox_tick` from `requestAnimationFrame`,
//! then reads the ink and marble buffers through the pointer accessors.
//! Every export is a no-op before `sandbox_init`.

pub mod runner;

use std::cell::RefCell;

use inkfall_engine::InputEvent;
use wasm_bindgen::prelude::*;

pub use runner::SandboxRunner;

thread_local! {
    static RUNNER: RefCell<Option<SandboxRunner>> = const { RefCell::new(None) };
}

fn with_runner<R: Default>(f: impl FnOnce(&mut SandboxRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => R::default(),
    })
}

#[wasm_bindgen]
pub fn sandbox_init(width: f32, height: f32, config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut runner = SandboxRunner::new(config_json.as_deref());
    runner.mount(width, height);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("inkfall: initialized");
}

#[wasm_bindgen]
pub fn sandbox_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn sandbox_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn sandbox_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn sandbox_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn sandbox_pointer_cancel() {
    with_runner(|r| r.push_input(InputEvent::PointerCancel));
}

#[wasm_bindgen]
pub fn sandbox_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn sandbox_clear() {
    with_runner(|r| r.push_input(InputEvent::Clear));
}

#[wasm_bindgen]
pub fn sandbox_spawn() {
    with_runner(|r| r.push_input(InputEvent::Spawn));
}

/// Drop the sandbox. A later `sandbox_init` starts fresh.
#[wasm_bindgen]
pub fn sandbox_dispose() {
    RUNNER.with(|cell| {
        if let Some(mut runner) = cell.borrow_mut().take() {
            runner.dispose();
        }
    });
}

// ---- Windows ----

/// Returns the id the page must use for this window's later updates.
#[wasm_bindgen]
pub fn window_open() -> String {
    with_runner(|r| r.open_window())
}

#[wasm_bindgen]
pub fn window_update(id: &str, x: f32, y: f32, width: f32, height: f32) {
    with_runner(|r| r.window_moved(id, x, y, width, height));
}

#[wasm_bindgen]
pub fn window_removed(id: &str) {
    with_runner(|r| r.window_removed(id));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_ink_vertices_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.ink_vertices_ptr())
    })
}

#[wasm_bindgen]
pub fn get_ink_vertex_count() -> u32 {
    with_runner(|r| r.ink_vertex_count())
}

#[wasm_bindgen]
pub fn get_marble_instances_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.marble_instances_ptr())
    })
}

#[wasm_bindgen]
pub fn get_marble_instance_count() -> u32 {
    with_runner(|r| r.marble_instance_count())
}

#[wasm_bindgen]
pub fn get_marble_count() -> u32 {
    with_runner(|r| r.marble_count())
}

#[wasm_bindgen]
pub fn has_spawn_point() -> bool {
    with_runner(|r| r.has_spawn_point())
}
