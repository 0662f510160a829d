use inkfall_engine::{
    InputEvent, Sandbox, SandboxConfig, WindowId, WindowRect, WindowUpdate,
};

/// Owns the sandbox behind the wasm exports and hands out window ids.
///
/// Lives in a `thread_local!` in the crate root because wasm-bindgen exports
/// are free functions.
pub struct SandboxRunner {
    sandbox: Sandbox,
    next_window: u32,
}

impl SandboxRunner {
    /// Build a runner from an optional JSON config. A config that fails to
    /// parse is logged and replaced by the defaults.
    pub fn new(config_json: Option<&str>) -> Self {
        let config = match config_json {
            Some(json) if !json.trim().is_empty() => SandboxConfig::from_json(json)
                .unwrap_or_else(|e| {
                    log::error!("invalid sandbox config, using defaults: {}", e);
                    SandboxConfig::default()
                }),
            _ => SandboxConfig::default(),
        };
        Self {
            sandbox: Sandbox::new(config),
            next_window: 1,
        }
    }

    pub fn mount(&mut self, width: f32, height: f32) {
        self.sandbox.mount(width, height);
    }

    pub fn tick(&mut self, dt: f32) {
        self.sandbox.tick(dt);
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.sandbox.push_input(event);
    }

    /// Allocate an id for a newly opened window (`window-1`, `window-2`, ...).
    pub fn open_window(&mut self) -> String {
        let id = format!("window-{}", self.next_window);
        self.next_window += 1;
        id
    }

    pub fn window_moved(&mut self, id: &str, x: f32, y: f32, width: f32, height: f32) {
        self.push_input(InputEvent::Window(WindowUpdate::Geometry {
            id: WindowId::from(id),
            rect: WindowRect::new(x, y, width, height),
        }));
    }

    pub fn window_removed(&mut self, id: &str) {
        self.push_input(InputEvent::Window(WindowUpdate::Removed {
            id: WindowId::from(id),
        }));
    }

    pub fn dispose(&mut self) {
        self.sandbox.dispose();
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    // ---- Pointer accessors for buffer reads ----

    pub fn ink_vertices_ptr(&self) -> *const f32 {
        self.sandbox.frame().ink.buffer_ptr()
    }

    pub fn ink_vertex_count(&self) -> u32 {
        self.sandbox.frame().ink.vertex_count() as u32
    }

    pub fn marble_instances_ptr(&self) -> *const f32 {
        self.sandbox.frame().marbles.instances_ptr()
    }

    pub fn marble_instance_count(&self) -> u32 {
        self.sandbox.frame().marbles.instance_count()
    }

    pub fn marble_count(&self) -> u32 {
        self.sandbox.world().marble_count() as u32
    }

    pub fn has_spawn_point(&self) -> bool {
        self.sandbox.world().spawn_point().is_some()
    }
}
