//! Renderable parts and their hit-test geometry.
//!
//! An agent is either *simple* (a single root part) or *compound* (a root
//! part plus numbered sub-parts, e.g. the buttons of a machine).  Every part
//! is positioned relative to its owning agent's world position and carries
//! its own z-order offset on top of the agent's rank.
//!
//! Transparency is an explicit capability: a part has an [`AlphaMask`] only
//! if its sprite has see-through pixels, and hit-testing asks the part
//! directly rather than inspecting what kind of agent owns it.

use std::sync::Arc;

use ck_core::{PartId, Point, Rect};

// ── AlphaMask ─────────────────────────────────────────────────────────────────

/// Per-pixel opacity of a part's current sprite frame.
///
/// Supplied by the asset collaborator; the kernel only reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    width:  u32,
    height: u32,
    /// Row-major, `true` = opaque.
    opaque: Vec<bool>,
}

impl AlphaMask {
    /// Build from row-major alpha bytes; `0` is fully transparent.
    ///
    /// # Panics
    /// Panics if `alpha.len() != width * height`.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Self {
        assert_eq!(Some(alpha.len()), pixel_count(width, height), "alpha buffer size mismatch");
        Self { width, height, opaque: alpha.iter().map(|&a| a != 0).collect() }
    }

    /// Build from a predicate over local pixel coordinates.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut opaque = Vec::with_capacity(pixel_count(width, height).unwrap_or(0));
        for y in 0..height {
            for x in 0..width {
                opaque.push(f(x, y));
            }
        }
        Self { width, height, opaque }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` if the pixel at `local` is see-through.  Pixels outside the
    /// mask are see-through.
    pub fn transparent_at(&self, local: Point) -> bool {
        if local.x < 0 || local.y < 0 {
            return true;
        }
        let (x, y) = (local.x as u32, local.y as u32);
        if x >= self.width || y >= self.height {
            return true;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.opaque.get(index).is_none_or(|&opaque| !opaque)
    }
}

/// `width * height` in `usize`, or `None` if it overflows.
fn pixel_count(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)
}

// ── Part ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Part {
    pub id:       PartId,
    /// Top-left corner relative to the owning agent's position.
    pub offset:   Point,
    pub width:    u32,
    pub height:   u32,
    /// Added to the agent's z-order rank to give this part's draw rank.
    pub z_offset: i32,
    /// Present only for sprites with see-through pixels.
    pub mask:     Option<Arc<AlphaMask>>,
}

impl Part {
    pub fn new(id: PartId, offset: Point, width: u32, height: u32) -> Self {
        Self { id, offset, width, height, z_offset: 0, mask: None }
    }

    pub fn with_z_offset(mut self, z_offset: i32) -> Self {
        self.z_offset = z_offset;
        self
    }

    pub fn with_mask(mut self, mask: Arc<AlphaMask>) -> Self {
        self.mask = Some(mask);
        self
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.id == PartId::ROOT
    }

    /// Rectangle in the owner's local space.
    #[inline]
    pub fn local_rect(&self) -> Rect {
        Rect::new(self.offset.x, self.offset.y, self.width, self.height)
    }

    /// Whether the sprite has any see-through pixels at all.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.mask.is_some()
    }

    /// `true` if the pixel at `local` (relative to this part's own top-left)
    /// is see-through.  Parts without a mask are opaque everywhere.
    #[inline]
    pub fn transparent_at(&self, local: Point) -> bool {
        self.mask.as_ref().is_some_and(|m| m.transparent_at(local))
    }
}

// ── PartSet ───────────────────────────────────────────────────────────────────

/// The closed set of agent shapes.
#[derive(Clone, Debug)]
pub enum PartSet {
    Simple(Part),
    Compound { root: Part, subparts: Vec<Part> },
}

impl PartSet {
    pub fn root(&self) -> &Part {
        match self {
            PartSet::Simple(p) => p,
            PartSet::Compound { root, .. } => root,
        }
    }

    pub fn root_mut(&mut self) -> &mut Part {
        match self {
            PartSet::Simple(p) => p,
            PartSet::Compound { root, .. } => root,
        }
    }

    /// All parts, root first, sub-parts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Part> + '_ {
        let subparts: &[Part] = match self {
            PartSet::Simple(_) => &[],
            PartSet::Compound { subparts, .. } => subparts,
        };
        std::iter::once(self.root()).chain(subparts.iter())
    }

    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PartId) -> Option<&mut Part> {
        match self {
            PartSet::Simple(p) => (p.id == id).then_some(p),
            PartSet::Compound { root, subparts } => {
                if root.id == id {
                    Some(root)
                } else {
                    subparts.iter_mut().find(|p| p.id == id)
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PartSet::Simple(_) => 1,
            PartSet::Compound { subparts, .. } => 1 + subparts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, PartSet::Compound { .. })
    }
}
