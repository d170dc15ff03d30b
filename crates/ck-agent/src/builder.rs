//! Fluent builder for agent state.
//!
//! # Usage
//!
//! ```rust
//! use ck_agent::{AgentBuilder, Classifier, Part};
//! use ck_core::{PartId, Point};
//!
//! let state = AgentBuilder::new(Classifier::new(2, 10, 1))
//!     .position(100, 40)
//!     .size(32, 32)
//!     .zorder(3000)
//!     .mouseable(true)
//!     .subpart(Part::new(PartId(1), Point::new(4, 4), 8, 8).with_z_offset(1))
//!     .build()
//!     .unwrap();
//!
//! assert!(state.parts.is_compound());
//! assert_eq!(state.bounds().width, 32);
//! ```

use std::sync::Arc;

use ck_core::{PartId, Point};

use crate::{AgentError, AgentResult, AgentState, AlphaMask, Classifier, Part, PartSet};

/// Builds a validated [`AgentState`] ready for `AgentTable::insert`.
pub struct AgentBuilder {
    classifier: Classifier,
    position:   Point,
    width:      u32,
    height:     u32,
    zorder:     i32,
    mouseable:  bool,
    root_mask:  Option<Arc<AlphaMask>>,
    subparts:   Vec<Part>,
}

impl AgentBuilder {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            position:  Point::default(),
            width:     1,
            height:    1,
            zorder:    0,
            mouseable: false,
            root_mask: None,
            subparts:  Vec::new(),
        }
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Size of the root part (the agent's bounding extent).
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn zorder(mut self, zorder: i32) -> Self {
        self.zorder = zorder;
        self
    }

    pub fn mouseable(mut self, mouseable: bool) -> Self {
        self.mouseable = mouseable;
        self
    }

    /// Give the root part see-through pixels.
    pub fn root_mask(mut self, mask: Arc<AlphaMask>) -> Self {
        self.root_mask = Some(mask);
        self
    }

    /// Add a sub-part; any sub-part makes the agent compound.
    pub fn subpart(mut self, part: Part) -> Self {
        self.subparts.push(part);
        self
    }

    pub fn build(self) -> AgentResult<AgentState> {
        let mut root = Part::new(PartId::ROOT, Point::default(), self.width, self.height);
        root.mask = self.root_mask;

        let mut seen = Vec::with_capacity(self.subparts.len());
        for part in std::iter::once(&root).chain(self.subparts.iter()) {
            if let Some(mask) = &part.mask {
                if mask.width() != part.width || mask.height() != part.height {
                    return Err(AgentError::MaskSizeMismatch {
                        part:   part.id,
                        mask_w: mask.width(),
                        mask_h: mask.height(),
                        part_w: part.width,
                        part_h: part.height,
                    });
                }
            }
            if part.is_root() && !seen.is_empty() {
                return Err(AgentError::SubPartIsRoot);
            }
            if seen.contains(&part.id) {
                return Err(AgentError::DuplicatePart { part: part.id });
            }
            seen.push(part.id);
        }

        let parts = if self.subparts.is_empty() {
            PartSet::Simple(root)
        } else {
            PartSet::Compound { root, subparts: self.subparts }
        };

        let mut state = AgentState::new(self.classifier, self.position, self.zorder, parts);
        state.mouseable = self.mouseable;
        Ok(state)
    }
}
