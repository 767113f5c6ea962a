// Recording stand-in for the WebGPU surface, shared by the host-side tests.

#![allow(dead_code)]

use fisheye_core::{EffectError, EffectSurface, EffectUniforms, LayoutBox, SurfaceInput, SurfaceSize};
use std::cell::RefCell;
use std::rc::Rc;

pub const DEFAULT_LAYOUT: LayoutBox = LayoutBox {
    width: 300.0,
    height: 200.0,
    device_pixel_ratio: 1.0,
};

/// What the engine did to one surface.
#[derive(Debug)]
pub struct Probe {
    pub renders: u32,
    pub uniform_writes: u32,
    pub releases: u32,
    pub resizes: Vec<SurfaceSize>,
    pub last_uniforms: Option<EffectUniforms>,
    pub layout: Option<LayoutBox>,
    pub pending_input: SurfaceInput,
    pub fail_render: bool,
}

impl Default for Probe {
    fn default() -> Self {
        Self {
            renders: 0,
            uniform_writes: 0,
            releases: 0,
            resizes: Vec::new(),
            last_uniforms: None,
            layout: Some(DEFAULT_LAYOUT),
            pending_input: SurfaceInput::default(),
            fail_render: false,
        }
    }
}

pub type SharedProbe = Rc<RefCell<Probe>>;

pub struct MockSurface {
    probe: SharedProbe,
}

impl MockSurface {
    pub fn new() -> (Self, SharedProbe) {
        let probe = Rc::new(RefCell::new(Probe::default()));
        (
            Self {
                probe: probe.clone(),
            },
            probe,
        )
    }
}

impl EffectSurface for MockSurface {
    fn write_uniforms(&mut self, uniforms: &EffectUniforms) {
        let mut p = self.probe.borrow_mut();
        p.uniform_writes += 1;
        p.last_uniforms = Some(*uniforms);
    }

    fn render(&mut self) -> Result<(), EffectError> {
        let mut p = self.probe.borrow_mut();
        if p.fail_render {
            return Err(EffectError::Render("mock failure".into()));
        }
        p.renders += 1;
        Ok(())
    }

    fn layout(&self) -> Option<LayoutBox> {
        self.probe.borrow().layout
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.probe.borrow_mut().resizes.push(size);
    }

    fn poll_input(&mut self) -> SurfaceInput {
        std::mem::take(&mut self.probe.borrow_mut().pending_input)
    }

    fn release(&mut self) {
        self.probe.borrow_mut().releases += 1;
    }
}

pub fn tile_markup() -> fisheye_core::TileMarkup {
    fisheye_core::TileMarkup {
        has_image: true,
        has_surface: true,
        in_grid_item: true,
        large: false,
    }
}
