//! Driver trait: the seam behind which the vendor SDK lives.
//!
//! This module provides the [`Driver`] trait that all controller drivers must
//! implement. The hardware transport, wire encoding of projects, and firmware
//! protocol all live behind this boundary; the rest of the crate only builds
//! data structures a driver can consume and orchestrates calls against it.

use std::time::Duration;

use crate::error::Result;
use crate::project::Project;
use crate::types::{Component, ComponentIndex, DeviceState, SequenceId};

/// Controller driver contract.
///
/// Implementations wrap the vendor transport (USB or network). The
/// [`MockDriver`](crate::mock::MockDriver) implements the same contract
/// in-process for tests and hardware-free demos.
///
/// # Contract
///
/// 1. `start_system` must be called once before any other operation; a
///    failure means the controller is unreachable over the configured
///    interface.
/// 2. `load_project` begins an asynchronous upload; `wait_for_load_complete`
///    blocks until the device has the full project (or the timeout expires).
/// 3. `device_state` is cheap enough to poll at millisecond intervals.
pub trait Driver: Send {
    /// Bring up the controller connection.
    fn start_system(&mut self) -> Result<()>;

    /// Components of the project currently on the device.
    ///
    /// Freshly powered controllers report their installed hardware here even
    /// before any host project is loaded.
    fn components(&self) -> Result<Vec<Component>>;

    /// Stop whatever sequence the component is running. A no-op when the
    /// component is already stopped.
    fn stop_sequence(&mut self, component: ComponentIndex) -> Result<()>;

    /// Begin uploading a project to the device.
    fn load_project(&mut self, project: &Project) -> Result<()>;

    /// Block until the last `load_project` upload has completed.
    ///
    /// `None` waits forever.
    fn wait_for_load_complete(&mut self, timeout: Option<Duration>) -> Result<()>;

    /// Start playback of a loaded sequence on the given component.
    fn start_sequence(&mut self, sequence: SequenceId, component: ComponentIndex) -> Result<()>;

    /// Current playback state of the given component.
    fn device_state(&self, component: ComponentIndex) -> Result<DeviceState>;
}
