use thiserror::Error;

use ck_core::PartId;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("part {part} appears more than once")]
    DuplicatePart { part: PartId },

    #[error("sub-part may not use the root part id")]
    SubPartIsRoot,

    #[error("alpha mask is {mask_w}x{mask_h} but part {part} is {part_w}x{part_h}")]
    MaskSizeMismatch {
        part:   PartId,
        mask_w: u32,
        mask_h: u32,
        part_w: u32,
        part_h: u32,
    },
}

pub type AgentResult<T> = Result<T, AgentError>;
