//! Host-side playback session.
//!
//! [`HostSession`] owns a boxed [`Driver`] and orchestrates the playback
//! lifecycle: bring the system up, upload a project, start a sequence, poll
//! run state, stop. The project-building modules ([`pattern`](crate::pattern),
//! [`assembler`](crate::assembler)) never touch the session; they only
//! produce data the session hands to the driver.
//!
//! Run-state waits poll with a short sleep between queries instead of
//! spinning, bounded by the [`PollConfig`] timeout.

use std::time::{Duration, Instant};

use crate::config::{ConnectionConfig, PollConfig};
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::project::Project;
use crate::types::{Component, ComponentIndex, DeviceState, DeviceType, RunState, SequenceId};

/// Options for the full [`HostSession::play`] flow.
#[derive(Debug, Clone)]
pub struct PlaybackOptions {
    /// The sequence to play.
    pub sequence_id: SequenceId,
    /// Maximum time to wait for the project upload; `None` waits forever.
    pub load_timeout: Option<Duration>,
    /// Polling parameters for run-state waits.
    pub poll: PollConfig,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            sequence_id: SequenceId(1),
            load_timeout: None,
            poll: PollConfig::default(),
        }
    }
}

impl PlaybackOptions {
    /// Set the sequence to play (builder pattern).
    pub fn with_sequence_id(mut self, sequence_id: SequenceId) -> Self {
        self.sequence_id = sequence_id;
        self
    }

    /// Set the upload timeout; `None` waits forever (builder pattern).
    pub fn with_load_timeout(mut self, load_timeout: Option<Duration>) -> Self {
        self.load_timeout = load_timeout;
        self
    }

    /// Set the run-state polling parameters (builder pattern).
    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}

/// A live connection to a controller.
///
/// Single-threaded and blocking throughout; every method runs to completion
/// or returns an error.
pub struct HostSession {
    driver: Box<dyn Driver>,
    config: ConnectionConfig,
    components: Vec<Component>,
}

impl HostSession {
    /// Starts the controller system and caches its reported components.
    ///
    /// Fails with the driver's diagnostic when the controller is unreachable
    /// over the configured interface.
    pub fn start(mut driver: Box<dyn Driver>, config: ConnectionConfig) -> Result<Self> {
        log::info!(
            "starting system over {} ({}:{}, device {})",
            config.interface,
            config.ip_address,
            config.port,
            config.device_number
        );
        driver.start_system()?;
        let components = driver.components()?;
        log::debug!("controller reported {} component(s)", components.len());
        Ok(Self {
            driver,
            config,
            components,
        })
    }

    /// The connection settings this session was started with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Components reported by the controller at startup.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// First component of the given device type.
    pub fn component_for(&self, device_type: DeviceType) -> Result<ComponentIndex> {
        self.components
            .iter()
            .find(|c| c.device_type == device_type)
            .map(|c| c.index)
            .ok_or(Error::NoMatchingComponent(device_type))
    }

    /// First DMD component, preferring device types in lookup order.
    pub fn dmd_component(&self) -> Result<&Component> {
        for device_type in DeviceType::all() {
            if let Some(component) = self
                .components
                .iter()
                .find(|c| c.device_type == *device_type)
            {
                return Ok(component);
            }
        }
        Err(Error::NoMatchingComponent(DeviceType::Dmd4500))
    }

    /// Current playback state of a component.
    pub fn device_state(&self, component: ComponentIndex) -> Result<DeviceState> {
        self.driver.device_state(component)
    }

    /// Stops any sequence running on the resolved component, uploads the
    /// project, and waits for the upload to complete.
    ///
    /// Returns the component the sequence will run on.
    pub fn prepare(
        &mut self,
        project: &Project,
        sequence_id: SequenceId,
        load_timeout: Option<Duration>,
    ) -> Result<ComponentIndex> {
        let sequence = project
            .find_sequence(sequence_id)
            .ok_or(Error::SequenceNotFound(sequence_id))?;
        let component = self.component_for(sequence.device_type())?;

        log::debug!("stopping component {} before upload", component);
        self.driver.stop_sequence(component)?;

        log::info!(
            "loading project \"{}\" ({} image(s), {} frame(s) in sequence {})",
            project.name(),
            project.images().len(),
            project.frame_count(sequence_id),
            sequence_id
        );
        self.driver.load_project(project)?;
        self.driver.wait_for_load_complete(load_timeout)?;
        log::debug!("project load complete");

        Ok(component)
    }

    /// Starts playback of a loaded sequence.
    pub fn start_sequence(
        &mut self,
        sequence_id: SequenceId,
        component: ComponentIndex,
    ) -> Result<()> {
        log::info!("starting sequence {} on component {}", sequence_id, component);
        self.driver.start_sequence(sequence_id, component)
    }

    /// Stops playback on a component.
    pub fn stop_sequence(&mut self, component: ComponentIndex) -> Result<()> {
        log::info!("stopping component {}", component);
        self.driver.stop_sequence(component)
    }

    /// Blocks until the component reports the expected run state.
    pub fn wait_for_run_state(
        &mut self,
        component: ComponentIndex,
        expected: RunState,
        poll: &PollConfig,
    ) -> Result<()> {
        self.wait_until(component, expected, poll, |state| {
            state.run_state == expected
        })
    }

    /// Blocks until the component is no longer running.
    pub fn wait_until_stopped(
        &mut self,
        component: ComponentIndex,
        poll: &PollConfig,
    ) -> Result<()> {
        self.wait_until(component, RunState::Stopped, poll, |state| {
            state.run_state != RunState::Running
        })
    }

    /// The full playback flow: prepare, start, wait until running.
    ///
    /// Returns the component playback is running on, so callers can stop it
    /// and wait for drain.
    pub fn play(&mut self, project: &Project, options: &PlaybackOptions) -> Result<ComponentIndex> {
        let component = self.prepare(project, options.sequence_id, options.load_timeout)?;
        self.start_sequence(options.sequence_id, component)?;
        self.wait_for_run_state(component, RunState::Running, &options.poll)?;
        Ok(component)
    }

    /// Stops playback and waits for the component to report it.
    pub fn stop_and_drain(&mut self, component: ComponentIndex, poll: &PollConfig) -> Result<()> {
        self.stop_sequence(component)?;
        self.wait_until_stopped(component, poll)
    }

    fn wait_until(
        &mut self,
        component: ComponentIndex,
        expected: RunState,
        poll: &PollConfig,
        matches: impl Fn(&DeviceState) -> bool,
    ) -> Result<()> {
        let started = Instant::now();
        loop {
            let state = self.driver.device_state(component)?;
            if matches(&state) {
                log::debug!("component {} reached state {}", component, state.run_state);
                return Ok(());
            }
            if let Some(timeout) = poll.timeout {
                if started.elapsed() >= timeout {
                    return Err(Error::StateTimeout {
                        component,
                        expected,
                        timeout,
                    });
                }
            }
            std::thread::sleep(poll.interval);
        }
    }
}
