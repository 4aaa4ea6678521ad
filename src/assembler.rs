//! Slideshow project assembly.
//!
//! Builds a playback [`Project`] from an ordered list of bitmaps: one image
//! per bitmap, one sequence holding a single sequence item, and one frame per
//! image in input order.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Result;
use crate::project::{Bitmap, Frame, Image, Project, Sequence, SequenceItem};
use crate::types::{DeviceType, ImageId, SequenceId};

/// Default per-frame display time.
pub const DEFAULT_FRAME_TIME: Duration = Duration::from_millis(100);

/// Timing and identity parameters for slideshow assembly.
///
/// Every option carries an explicit default; construct with
/// [`Default::default`] and override via the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlideshowConfig {
    /// Id of the single sequence the assembler creates.
    pub sequence_id: SequenceId,
    /// Number of times the sequence repeats; 0 repeats forever.
    pub repeat_count: u32,
    /// Display time for every frame.
    pub frame_time: Duration,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            sequence_id: SequenceId(1),
            repeat_count: 0,
            frame_time: DEFAULT_FRAME_TIME,
        }
    }
}

impl SlideshowConfig {
    /// Set the sequence id (builder pattern).
    pub fn with_sequence_id(mut self, sequence_id: SequenceId) -> Self {
        self.sequence_id = sequence_id;
        self
    }

    /// Set the repeat count; 0 repeats forever (builder pattern).
    pub fn with_repeat_count(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    /// Set the per-frame display time (builder pattern).
    pub fn with_frame_time(mut self, frame_time: Duration) -> Self {
        self.frame_time = frame_time;
        self
    }
}

/// Assembles a slideshow project from an ordered list of bitmaps.
///
/// Image ids are assigned sequentially starting at 1, in input order; these
/// are the ids the frames reference. The project contains exactly one
/// sequence (with the configured id and repeat count) holding exactly one
/// sequence item, and one frame per bitmap appended in input order, which
/// defines playback order.
///
/// An empty bitmap list produces a valid project whose sequence has zero
/// frames; rejecting that is the driver's call, not the assembler's.
pub fn assemble_slideshow(
    name: impl Into<String>,
    device_type: DeviceType,
    bitmaps: Vec<Bitmap>,
    config: &SlideshowConfig,
) -> Result<Project> {
    let name = name.into();
    let mut project = Project::new(name.clone());

    let image_count = bitmaps.len();
    for (i, bitmap) in bitmaps.into_iter().enumerate() {
        let id = ImageId(i as u32 + 1);
        project.add_image(Image::new(id, device_type, bitmap))?;
    }

    project.add_sequence(Sequence::new(
        config.sequence_id,
        name,
        device_type,
        config.repeat_count,
    ))?;
    project.add_sequence_item(SequenceItem::new(config.sequence_id))?;

    for i in 0..image_count {
        project.add_frame(Frame::new(
            config.sequence_id,
            ImageId(i as u32 + 1),
            config.frame_time,
        ))?;
    }

    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmaps(count: usize) -> Vec<Bitmap> {
        (0..count)
            .map(|i| Bitmap::filled(4, 4, i as u8).unwrap())
            .collect()
    }

    #[test]
    fn test_n_bitmaps_produce_n_images_and_frames() {
        let config = SlideshowConfig::default();
        let project =
            assemble_slideshow("slides", DeviceType::Dmd4500, bitmaps(3), &config).unwrap();

        assert_eq!(project.images().len(), 3);
        assert_eq!(project.sequences().count(), 1);
        let sequence = project.find_sequence(SequenceId(1)).unwrap();
        assert_eq!(sequence.items().len(), 1);
        assert_eq!(sequence.frame_count(), 3);
    }

    #[test]
    fn test_image_ids_are_one_based_in_input_order() {
        let config = SlideshowConfig::default();
        let project =
            assemble_slideshow("slides", DeviceType::Dmd4500, bitmaps(4), &config).unwrap();

        for (i, image) in project.images().iter().enumerate() {
            assert_eq!(image.id(), ImageId(i as u32 + 1));
            // Input order is preserved: the fill value tracks the input index.
            assert_eq!(image.bitmap().get(0, 0), Some(i as u8));
        }
    }

    #[test]
    fn test_frame_order_matches_input_order() {
        let config = SlideshowConfig::default();
        let project =
            assemble_slideshow("slides", DeviceType::Dmd4500, bitmaps(5), &config).unwrap();

        let sequence = project.find_sequence(SequenceId(1)).unwrap();
        let frames = sequence.items()[0].frames();
        let ids: Vec<u32> = frames.iter().map(|f| f.image_id().0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_every_frame_gets_the_configured_time() {
        let config = SlideshowConfig::default().with_frame_time(Duration::from_millis(250));
        let project =
            assemble_slideshow("slides", DeviceType::Dmd4500, bitmaps(3), &config).unwrap();

        let sequence = project.find_sequence(SequenceId(1)).unwrap();
        for frame in sequence.items()[0].frames() {
            assert_eq!(frame.frame_time(), Duration::from_millis(250));
        }
    }

    #[test]
    fn test_default_frame_time_is_100ms() {
        let config = SlideshowConfig::default();
        assert_eq!(config.frame_time, Duration::from_millis(100));

        let project =
            assemble_slideshow("slides", DeviceType::Dmd4500, bitmaps(1), &config).unwrap();
        let sequence = project.find_sequence(SequenceId(1)).unwrap();
        assert_eq!(
            sequence.items()[0].frames()[0].frame_time(),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_sequence_carries_configured_id_and_repeat_count() {
        let config = SlideshowConfig::default()
            .with_sequence_id(SequenceId(7))
            .with_repeat_count(12);
        let project =
            assemble_slideshow("slides", DeviceType::Dmd3000, bitmaps(2), &config).unwrap();

        assert!(project.find_sequence(SequenceId(1)).is_none());
        let sequence = project.find_sequence(SequenceId(7)).unwrap();
        assert_eq!(sequence.repeat_count(), 12);
        assert_eq!(sequence.device_type(), DeviceType::Dmd3000);
    }

    #[test]
    fn test_empty_input_produces_zero_frame_project() {
        let config = SlideshowConfig::default();
        let project =
            assemble_slideshow("slides", DeviceType::Dmd4500, Vec::new(), &config).unwrap();

        assert!(project.images().is_empty());
        let sequence = project.find_sequence(SequenceId(1)).unwrap();
        assert_eq!(sequence.items().len(), 1);
        assert_eq!(sequence.frame_count(), 0);
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_assembled_project_satisfies_referential_invariant() {
        let config = SlideshowConfig::default();
        let project =
            assemble_slideshow("slides", DeviceType::Dmd4500, bitmaps(6), &config).unwrap();
        assert!(project.validate().is_ok());

        let sequence = project.find_sequence(SequenceId(1)).unwrap();
        for frame in sequence.items()[0].frames() {
            assert!(project.image(frame.image_id()).is_some());
            assert_eq!(frame.sequence_id(), sequence.id());
        }
    }
}
