//! Core types for DMD projector control.
//!
//! Provides device-agnostic types for projector hardware enumeration,
//! communication interfaces, and device run state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Types of DMD controller hardware supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceType {
    /// DMD 4500 controller (912 x 1140 mirror array).
    Dmd4500,
    /// DMD 3000 controller (608 x 684 mirror array).
    Dmd3000,
}

impl DeviceType {
    /// Returns all supported device types, in lookup-preference order.
    pub fn all() -> &'static [DeviceType] {
        &[DeviceType::Dmd4500, DeviceType::Dmd3000]
    }

    /// Returns the display name for this device type.
    pub fn display_name(&self) -> &'static str {
        match self {
            DeviceType::Dmd4500 => "DMD 4500",
            DeviceType::Dmd3000 => "DMD 3000",
        }
    }

    /// Maximum image width in pixels for this device type.
    pub fn image_width_max(&self) -> u32 {
        match self {
            DeviceType::Dmd4500 => 912,
            DeviceType::Dmd3000 => 608,
        }
    }

    /// Maximum image height in pixels for this device type.
    pub fn image_height_max(&self) -> u32 {
        match self {
            DeviceType::Dmd4500 => 1140,
            DeviceType::Dmd3000 => 684,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Host-to-controller communication interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommInterface {
    /// USB 2.0 (default).
    #[default]
    Usb2,
    /// USB 3.0.
    Usb3,
    /// Gigabit Ethernet.
    Ethernet,
    /// PCI Express.
    Pcie,
}

impl CommInterface {
    /// Returns the display name for this interface.
    pub fn display_name(&self) -> &'static str {
        match self {
            CommInterface::Usb2 => "USB2",
            CommInterface::Usb3 => "USB3",
            CommInterface::Ethernet => "Ethernet",
            CommInterface::Pcie => "PCIe",
        }
    }
}

impl fmt::Display for CommInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Identifier of a sequence within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequenceId(pub u32);

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an image within a project. Assigned 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageId(pub u32);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a component within the controller's component list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentIndex(pub usize);

impl fmt::Display for ComponentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hardware component reported by the controller.
///
/// Each controller carries one or more components; a component's mirror-array
/// geometry determines the image size a project targeting it should use.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    pub index: ComponentIndex,
    pub device_type: DeviceType,
    pub num_rows: u32,
    pub num_columns: u32,
}

impl Component {
    /// Creates a component descriptor with the device type's full geometry.
    pub fn with_full_geometry(index: ComponentIndex, device_type: DeviceType) -> Self {
        Self {
            index,
            device_type,
            num_rows: device_type.image_height_max(),
            num_columns: device_type.image_width_max(),
        }
    }
}

/// Playback run state reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunState {
    /// No sequence is running.
    Stopped,
    /// A sequence is actively displaying frames.
    Running,
    /// A sequence is loaded and paused.
    Paused,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused => "paused",
        };
        write!(f, "{}", name)
    }
}

/// Snapshot of a component's playback state, as polled from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceState {
    pub run_state: RunState,
    /// The sequence currently running, when the device reports one.
    pub active_sequence: Option<SequenceId>,
}

impl DeviceState {
    /// A stopped device with no active sequence.
    pub fn stopped() -> Self {
        Self {
            run_state: RunState::Stopped,
            active_sequence: None,
        }
    }

    /// A running device playing the given sequence.
    pub fn running(sequence: SequenceId) -> Self {
        Self {
            run_state: RunState::Running,
            active_sequence: Some(sequence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_type_all_returns_both_types() {
        let all = DeviceType::all();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&DeviceType::Dmd4500));
        assert!(all.contains(&DeviceType::Dmd3000));
    }

    #[test]
    fn test_device_type_display_uses_display_name() {
        assert_eq!(
            format!("{}", DeviceType::Dmd4500),
            DeviceType::Dmd4500.display_name()
        );
    }

    #[test]
    fn test_device_type_geometry() {
        assert_eq!(DeviceType::Dmd4500.image_width_max(), 912);
        assert_eq!(DeviceType::Dmd4500.image_height_max(), 1140);
        assert_eq!(DeviceType::Dmd3000.image_width_max(), 608);
        assert_eq!(DeviceType::Dmd3000.image_height_max(), 684);
    }

    #[test]
    fn test_comm_interface_defaults_to_usb2() {
        assert_eq!(CommInterface::default(), CommInterface::Usb2);
    }

    #[test]
    fn test_component_with_full_geometry_matches_device_type() {
        let component = Component::with_full_geometry(ComponentIndex(0), DeviceType::Dmd3000);
        assert_eq!(component.num_columns, 608);
        assert_eq!(component.num_rows, 684);
        assert_eq!(component.device_type, DeviceType::Dmd3000);
    }

    #[test]
    fn test_device_state_constructors() {
        let stopped = DeviceState::stopped();
        assert_eq!(stopped.run_state, RunState::Stopped);
        assert_eq!(stopped.active_sequence, None);

        let running = DeviceState::running(SequenceId(3));
        assert_eq!(running.run_state, RunState::Running);
        assert_eq!(running.active_sequence, Some(SequenceId(3)));
    }
}
