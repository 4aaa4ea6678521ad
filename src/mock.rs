//! Scriptable in-process driver for tests and hardware-free demos.
//!
//! [`MockDriver`] implements the full [`Driver`] contract against simulated
//! device state, with timing and failure knobs exposed through the
//! [`MockBehavior`] trait. It is used by:
//! - End-to-end playback tests
//! - The demo programs, so they run without a controller attached
//!
//! # Example
//!
//! ```
//! use dmd_host::mock::{DefaultBehavior, MockDriver};
//! use dmd_host::{ConnectionConfig, HostSession};
//!
//! let driver = MockDriver::new(DefaultBehavior);
//! let session = HostSession::start(Box::new(driver), ConnectionConfig::default()).unwrap();
//! assert_eq!(session.components().len(), 1);
//! ```

use std::time::{Duration, Instant};

use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::project::Project;
use crate::types::{Component, ComponentIndex, DeviceState, DeviceType, SequenceId};

/// Behavior hooks for the mock driver.
///
/// The default methods describe a healthy device with instant transitions;
/// override individual hooks to script failures and latency.
pub trait MockBehavior: Send {
    /// Diagnostic to fail `start_system` with, or `None` to succeed.
    fn fail_start(&self) -> Option<String> {
        None
    }

    /// Simulated upload duration consumed by `wait_for_load_complete`.
    fn load_delay(&self) -> Duration {
        Duration::ZERO
    }

    /// How long after `start_sequence` the device reports `Running`.
    fn start_delay(&self) -> Duration {
        Duration::ZERO
    }

    /// When true, `start_sequence` is accepted but the device never reaches
    /// `Running` (a wedged controller).
    fn stall_start(&self) -> bool {
        false
    }

    /// Called with every project handed to `load_project`.
    fn on_project_loaded(&mut self, _project: &Project) {}
}

/// The always-healthy default behavior.
pub struct DefaultBehavior;

impl MockBehavior for DefaultBehavior {}

/// Record of a driver call, for test assertions.
///
/// `device_state` queries are not recorded; polling makes their count
/// meaningless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    StartSystem,
    StopSequence(ComponentIndex),
    LoadProject(String),
    WaitForLoadComplete,
    StartSequence(SequenceId, ComponentIndex),
}

/// In-process driver simulating a single controller.
pub struct MockDriver<B: MockBehavior> {
    behavior: B,
    components: Vec<Component>,
    started: bool,
    loaded: Option<Project>,
    /// Per-component playback while a start is in flight or running.
    playing: Vec<Option<Playback>>,
    calls: Vec<DriverCall>,
}

#[derive(Debug, Clone, Copy)]
struct Playback {
    sequence: SequenceId,
    started_at: Instant,
    /// Total play time for finite repeat counts; `None` runs until stopped.
    duration: Option<Duration>,
}

impl<B: MockBehavior> MockDriver<B> {
    /// Creates a mock with a single full-geometry DMD 4500 component.
    pub fn new(behavior: B) -> Self {
        Self::with_components(
            behavior,
            vec![Component::with_full_geometry(
                ComponentIndex(0),
                DeviceType::Dmd4500,
            )],
        )
    }

    /// Creates a mock reporting the given components.
    pub fn with_components(behavior: B, components: Vec<Component>) -> Self {
        let playing = components.iter().map(|_| None).collect();
        Self {
            behavior,
            components,
            started: false,
            loaded: None,
            playing,
            calls: Vec::new(),
        }
    }

    /// Calls made against this driver, in order.
    pub fn calls(&self) -> &[DriverCall] {
        &self.calls
    }

    /// The last project handed to `load_project`, if any.
    pub fn loaded_project(&self) -> Option<&Project> {
        self.loaded.as_ref()
    }

    fn ensure_started(&self) -> Result<()> {
        if self.started {
            Ok(())
        } else {
            Err(Error::device("system not started"))
        }
    }

    fn slot(&self, component: ComponentIndex) -> Result<usize> {
        self.components
            .iter()
            .position(|c| c.index == component)
            .ok_or_else(|| Error::device(format!("no component at index {}", component)))
    }
}

impl<B: MockBehavior> Driver for MockDriver<B> {
    fn start_system(&mut self) -> Result<()> {
        self.calls.push(DriverCall::StartSystem);
        if let Some(diagnostic) = self.behavior.fail_start() {
            return Err(Error::Device(diagnostic));
        }
        self.started = true;
        Ok(())
    }

    fn components(&self) -> Result<Vec<Component>> {
        self.ensure_started()?;
        Ok(self.components.clone())
    }

    fn stop_sequence(&mut self, component: ComponentIndex) -> Result<()> {
        self.ensure_started()?;
        let slot = self.slot(component)?;
        self.calls.push(DriverCall::StopSequence(component));
        self.playing[slot] = None;
        Ok(())
    }

    fn load_project(&mut self, project: &Project) -> Result<()> {
        self.ensure_started()?;
        self.calls
            .push(DriverCall::LoadProject(project.name().to_string()));
        self.behavior.on_project_loaded(project);
        self.loaded = Some(project.clone());
        Ok(())
    }

    fn wait_for_load_complete(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.ensure_started()?;
        self.calls.push(DriverCall::WaitForLoadComplete);
        if self.loaded.is_none() {
            return Err(Error::device("no project load in progress"));
        }
        let delay = self.behavior.load_delay();
        match timeout {
            Some(timeout) if delay > timeout => {
                std::thread::sleep(timeout);
                Err(Error::device("timed out waiting for project load"))
            }
            _ => {
                std::thread::sleep(delay);
                Ok(())
            }
        }
    }

    fn start_sequence(&mut self, sequence: SequenceId, component: ComponentIndex) -> Result<()> {
        self.ensure_started()?;
        let slot = self.slot(component)?;
        self.calls.push(DriverCall::StartSequence(sequence, component));

        let loaded = self
            .loaded
            .as_ref()
            .ok_or_else(|| Error::device("no project loaded"))?;
        let on_device = loaded
            .find_sequence(sequence)
            .ok_or_else(|| Error::device(format!("sequence {} not on device", sequence)))?;

        // Finite repeat counts play out and stop on their own.
        let duration = match on_device.repeat_count() {
            0 => None,
            repeats => {
                let per_pass: Duration = on_device
                    .items()
                    .iter()
                    .flat_map(|item| item.frames())
                    .map(|frame| frame.frame_time())
                    .sum();
                Some(per_pass * repeats)
            }
        };

        if !self.behavior.stall_start() {
            self.playing[slot] = Some(Playback {
                sequence,
                started_at: Instant::now(),
                duration,
            });
        }
        Ok(())
    }

    fn device_state(&self, component: ComponentIndex) -> Result<DeviceState> {
        self.ensure_started()?;
        let slot = self.slot(component)?;
        let state = match self.playing[slot] {
            Some(playback) if playback.started_at.elapsed() >= self.behavior.start_delay() => {
                let play_elapsed = playback.started_at.elapsed() - self.behavior.start_delay();
                match playback.duration {
                    Some(duration) if play_elapsed >= duration => DeviceState::stopped(),
                    _ => DeviceState::running(playback.sequence),
                }
            }
            _ => DeviceState::stopped(),
        };
        Ok(state)
    }
}
