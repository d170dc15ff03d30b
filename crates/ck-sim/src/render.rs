//! Frame hand-off to the rendering collaborator.

use ck_core::{Point, Rect, Tick};
use ck_spatial::{MetaRoom, PartRef};

/// One part to draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Renderable {
    pub part:   PartRef,
    pub zorder: i32,
    /// World-space rectangle.  Add [`Frame::offset`] for screen space.
    pub rect:   Rect,
}

/// What the renderer gets once per tick.
#[derive(Debug)]
pub struct Frame<'a> {
    pub tick:        Tick,
    /// Add to world coordinates to get screen coordinates.
    pub offset:      Point,
    pub metaroom:    &'a MetaRoom,
    /// Back-most first (painter's order).
    pub renderables: &'a [Renderable],
}

pub trait Renderer {
    fn present(&mut self, frame: &Frame<'_>);
}
