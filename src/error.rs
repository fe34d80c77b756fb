use thiserror::Error;

use crate::frame::FRAME_SIZE;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed frame: got {len} bytes, need {need}", need = FRAME_SIZE)]
    MalformedFrame { len: usize },

    #[error("not a scroll device (identification byte {id:#04x})")]
    NotScrollDevice { id: u8 },

    #[error("unknown scroll device model {id:#04x}")]
    UnknownVariant { id: u8 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
