use wyrm_engine::bridge::protocol::{
    HEADER_ACTOR_COUNT, HEADER_FRAME_COUNTER, HEADER_MAX_PARTICLES, HEADER_PARTICLE_COUNT,
    HEADER_PROTOCOL_VERSION, HEADER_SEGMENT_COUNT, HEADER_VIEWPORT_HEIGHT, HEADER_VIEWPORT_WIDTH,
    PROTOCOL_VERSION,
};
use wyrm_engine::{
    build_frame_buffer, ConfigError, FixedTimestep, FrameBuffer, InputEvent, InputQueue, ProtocolLayout,
    SceneConfig, WyrmScene,
};

/// Scene runner that wires the engine loop to the browser.
///
/// The web crate keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`.
pub struct SceneRunner {
    scene: WyrmScene,
    input: InputQueue,
    frame: FrameBuffer,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    /// Header plus all instance sections, laid out per `layout`.
    shared: Vec<f32>,
    initialized: bool,
}

impl SceneRunner {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        let layout = ProtocolLayout::from_config(&config);
        let timestep = FixedTimestep::new(config.timing.reference_dt);
        let frame = FrameBuffer::with_capacity(layout.max_segments, layout.max_particles, layout.max_actors);
        let scene = WyrmScene::new(config)?;

        Ok(Self {
            scene,
            input: InputQueue::new(),
            frame,
            timestep,
            shared: vec![0.0; layout.buffer_total_floats],
            layout,
            initialized: false,
        })
    }

    /// Build the first frame. Call once after construction.
    pub fn init(&mut self) {
        self.shared[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        self.shared[HEADER_MAX_PARTICLES] = self.layout.max_particles as f32;
        self.rebuild();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame: apply input, advance the scene, rebuild buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        for event in self.input.drain() {
            match event {
                InputEvent::PointerMove { x, y } => self.scene.set_pointer_ndc(x, y),
                InputEvent::Resize { width, height } => self.scene.resize(width, height),
                InputEvent::Reset => {
                    self.scene.reset();
                    self.timestep.reset();
                }
            }
        }

        if self.scene.config().timing.fixed_step {
            let steps = self.timestep.accumulate(dt);
            for _ in 0..steps {
                self.scene.tick(self.timestep.dt());
            }
        } else {
            self.scene.tick(dt);
        }

        self.rebuild();
    }

    fn rebuild(&mut self) {
        build_frame_buffer(&self.scene, &mut self.frame);

        let viewport = self.scene.viewport();
        self.shared[HEADER_FRAME_COUNTER] = self.scene.frame() as f32;
        self.shared[HEADER_SEGMENT_COUNT] = self.frame.segment_count() as f32;
        self.shared[HEADER_PARTICLE_COUNT] = self.frame.particle_count() as f32;
        self.shared[HEADER_ACTOR_COUNT] = self.frame.actor_count() as f32;
        self.shared[HEADER_VIEWPORT_WIDTH] = viewport.width;
        self.shared[HEADER_VIEWPORT_HEIGHT] = viewport.height;

        let layout = &self.layout;
        copy_section(
            &mut self.shared,
            layout.segment_data_offset,
            layout.segment_data_floats,
            self.frame.segment_floats(),
        );
        copy_section(
            &mut self.shared,
            layout.particle_data_offset,
            layout.particle_data_floats,
            self.frame.particle_floats(),
        );
        copy_section(
            &mut self.shared,
            layout.actor_data_offset,
            layout.actor_data_floats,
            self.frame.actor_floats(),
        );
    }

    pub fn scene(&self) -> &WyrmScene {
        &self.scene
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    // ---- Data accessors ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.shared.as_ptr()
    }

    pub fn buffer(&self) -> &[f32] {
        &self.shared
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn segments_ptr(&self) -> *const f32 {
        self.frame.segments_ptr()
    }

    pub fn segment_count(&self) -> u32 {
        self.frame.segment_count()
    }

    pub fn particles_ptr(&self) -> *const f32 {
        self.frame.particles_ptr()
    }

    pub fn particle_count(&self) -> u32 {
        self.frame.particle_count()
    }

    pub fn actors_ptr(&self) -> *const f32 {
        self.frame.actors_ptr()
    }

    pub fn actor_count(&self) -> u32 {
        self.frame.actor_count()
    }

    // ---- Capacity accessors ----

    pub fn max_segments(&self) -> u32 {
        self.layout.max_segments as u32
    }

    pub fn max_particles(&self) -> u32 {
        self.layout.max_particles as u32
    }

    pub fn max_actors(&self) -> u32 {
        self.layout.max_actors as u32
    }

    pub fn viewport_width(&self) -> f32 {
        self.scene.viewport().width
    }

    pub fn viewport_height(&self) -> f32 {
        self.scene.viewport().height
    }
}

/// Copy `src` into its section and zero whatever the section has left over.
fn copy_section(shared: &mut [f32], offset: usize, len: usize, src: &[f32]) {
    let section = &mut shared[offset..offset + len];
    let n = src.len().min(len);
    section[..n].copy_from_slice(&src[..n]);
    section[n..].fill(0.0);
}
