//! Crate-level error types.

use std::path::PathBuf;
use std::time::Duration;

use crate::types::{ComponentIndex, DeviceType, ImageId, RunState, SequenceId};

/// Crate-level error type.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A bitmap or pattern was requested with a zero dimension.
    #[error("invalid bitmap geometry: {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    /// Pixel data length does not match the declared geometry.
    #[error("pixel buffer holds {actual} bytes, geometry {width}x{height} needs {expected}")]
    GeometryMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// An image with this id was already added to the project.
    #[error("duplicate image id {0}")]
    DuplicateImage(ImageId),

    /// A sequence with this id was already added to the project.
    #[error("duplicate sequence id {0}")]
    DuplicateSequence(SequenceId),

    /// A frame references an image the project does not contain.
    #[error("frame references unknown image {0}")]
    UnknownImage(ImageId),

    /// A frame or item references a sequence the project does not contain.
    #[error("unknown sequence {0}")]
    UnknownSequence(SequenceId),

    /// A frame was added to a sequence that has no sequence item yet.
    #[error("sequence {0} has no sequence item to attach frames to")]
    NoSequenceItem(SequenceId),

    /// Playback was requested for a sequence missing from the project.
    #[error("sequence {0} not found in project")]
    SequenceNotFound(SequenceId),

    /// The controller reported no component of the required device type.
    #[error("no component with device type {0}")]
    NoMatchingComponent(DeviceType),

    /// The device did not reach the expected run state within the timeout.
    #[error("component {component} did not reach state {expected:?} within {timeout:?}")]
    StateTimeout {
        component: ComponentIndex,
        expected: RunState,
        timeout: Duration,
    },

    /// The driver reported a failure.
    #[error("device error: {0}")]
    Device(String),

    /// An image file could not be read or decoded.
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a device error from a driver diagnostic.
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }
}

/// Crate-level result type.
pub type Result<T> = std::result::Result<T, Error>;
