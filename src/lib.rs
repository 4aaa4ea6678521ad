//! Host-side project assembly and playback control for DMD projectors.
//!
//! This crate builds in-memory playback *projects* (named collections of
//! images, sequences, and frame timings) and drives them through a controller
//! [`Driver`]: upload, start, run-state polling, stop. The hardware transport
//! and wire protocol live behind the driver trait; the crate's own logic is
//! the data model, the test-pattern generator, and the playback orchestration.
//!
//! # Getting Started
//!
//! Assemble a slideshow and play it through a session:
//!
//! ```no_run
//! use dmd_host::{
//!     assemble_slideshow, checkerboard_pair, CheckerboardConfig, ConnectionConfig,
//!     HostSession, PlaybackOptions, SlideshowConfig,
//! };
//!
//! # fn open_vendor_driver() -> Box<dyn dmd_host::Driver> { unimplemented!() }
//! // A driver wrapping the vendor SDK (or the in-process mock).
//! let driver = open_vendor_driver();
//! let mut session = HostSession::start(driver, ConnectionConfig::default())?;
//!
//! // Size the pattern to the controller's DMD.
//! let dmd = session.dmd_component()?.clone();
//! let (board, inverse) =
//!     checkerboard_pair(dmd.num_columns, dmd.num_rows, &CheckerboardConfig::default())?;
//!
//! let project = assemble_slideshow(
//!     "checkerboard",
//!     dmd.device_type,
//!     vec![board, inverse],
//!     &SlideshowConfig::default(),
//! )?;
//!
//! let component = session.play(&project, &PlaybackOptions::default())?;
//! // ... later
//! session.stop_and_drain(component, &Default::default())?;
//! # Ok::<(), dmd_host::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` derives on the data model and configs
//! - `testutils`: the in-process [`mock`] driver used by e2e tests and demos

pub mod assembler;
pub mod config;
pub mod driver;
pub mod error;
pub mod media;
pub mod pattern;
pub mod project;
pub mod session;
pub mod types;

#[cfg(feature = "testutils")]
pub mod mock;

// Crate-level error types
pub use error::{Error, Result};

// Driver trait
pub use driver::Driver;

// Core types
pub use types::{
    CommInterface, Component, ComponentIndex, DeviceState, DeviceType, ImageId, RunState,
    SequenceId,
};

// Project model
pub use project::{Bitmap, Frame, Image, Project, Sequence, SequenceItem};

// Pattern generation and assembly
pub use assembler::{assemble_slideshow, SlideshowConfig, DEFAULT_FRAME_TIME};
pub use pattern::{checkerboard_pair, CheckerboardConfig};

// Configuration
pub use config::{ConnectionConfig, PollConfig};

// Session
pub use session::{HostSession, PlaybackOptions};

// Image file loading
pub use media::load_grayscale_bitmap;
