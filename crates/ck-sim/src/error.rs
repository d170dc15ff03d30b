use ck_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    /// Nothing to show and nothing to fall back to.  Fatal for a driver.
    #[error("no metarooms registered and no fallback available")]
    NoMetaRooms,

    #[error("spatial error: {0}")]
    Spatial(SpatialError),
}

impl From<SpatialError> for SimError {
    fn from(e: SpatialError) -> Self {
        match e {
            SpatialError::NoMetaRooms => SimError::NoMetaRooms,
            other => SimError::Spatial(other),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
