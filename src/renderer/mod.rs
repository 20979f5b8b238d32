//! Rendering module
//!
//! The game produces [`DrawCommand`]s; a [`DrawTarget`] consumes them. The
//! browser build tessellates them into triangles and draws with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

use std::cell::RefCell;
use std::rc::Rc;

pub use pipeline::RenderState;
pub use scene::{DrawCommand, draw_commands};

/// Anything that can present a frame of draw commands
pub trait DrawTarget {
    fn draw(&mut self, commands: &[DrawCommand]);
}

impl<T: DrawTarget + ?Sized> DrawTarget for Rc<RefCell<T>> {
    fn draw(&mut self, commands: &[DrawCommand]) {
        self.borrow_mut().draw(commands);
    }
}

/// Tessellates but never presents; used by headless runs
#[derive(Debug, Default)]
pub struct HeadlessTarget {
    pub frames: u64,
    pub last_vertex_count: usize,
}

impl DrawTarget for HeadlessTarget {
    fn draw(&mut self, commands: &[DrawCommand]) {
        let frame = shapes::tessellate(commands);
        self.frames += 1;
        self.last_vertex_count = frame.vertices.len();
    }
}
