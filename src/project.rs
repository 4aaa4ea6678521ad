//! In-memory playback project model.
//!
//! A [`Project`] is the unit of upload to the controller: a named collection
//! of [`Image`]s, [`Sequence`]s, and the [`Frame`]s attached to each
//! sequence's items. All entities live in host memory for the duration of one
//! run; the driver consumes the assembled project and owns the wire encoding.
//!
//! # Referential invariant
//!
//! Every frame references an image and a sequence that are already part of
//! the project. [`Project::add_frame`] enforces this at insertion time, and
//! [`Project::validate`] re-checks the fully assembled project.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::{DeviceType, ImageId, SequenceId};

// =============================================================================
// Bitmap
// =============================================================================

/// A flat 8-bit grayscale pixel buffer, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap from existing pixel data.
    ///
    /// The buffer length must equal `width * height`; zero dimensions are
    /// rejected.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidGeometry { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::GeometryMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a bitmap with every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidGeometry { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel value at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: u32, col: u32) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row as usize * self.width as usize + col as usize])
    }

    /// Returns the tonal inverse: every pixel is `255 - value`.
    ///
    /// The result is a fresh allocation; the original is untouched.
    pub fn complement(&self) -> Bitmap {
        Bitmap {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|v| 255 - v).collect(),
        }
    }
}

// =============================================================================
// Image, Frame, Sequence
// =============================================================================

/// A bitmap with a project-unique identifier and a target device type.
///
/// Immutable once added to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Image {
    id: ImageId,
    device_type: DeviceType,
    name: Option<String>,
    bitmap: Bitmap,
}

impl Image {
    /// Creates an image targeting the given device type.
    pub fn new(id: ImageId, device_type: DeviceType, bitmap: Bitmap) -> Self {
        Self {
            id,
            device_type,
            name: None,
            bitmap,
        }
    }

    /// Sets a human-readable name (used by preview tooling).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }
}

/// One timed display of a single image within a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    sequence_id: SequenceId,
    image_id: ImageId,
    frame_time: Duration,
}

impl Frame {
    /// Creates a frame showing `image_id` for `frame_time` within `sequence_id`.
    pub fn new(sequence_id: SequenceId, image_id: ImageId, frame_time: Duration) -> Self {
        Self {
            sequence_id,
            image_id,
            frame_time,
        }
    }

    pub fn sequence_id(&self) -> SequenceId {
        self.sequence_id
    }

    pub fn image_id(&self) -> ImageId {
        self.image_id
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Frame time in whole milliseconds, as the device consumes it.
    pub fn frame_time_ms(&self) -> u64 {
        self.frame_time.as_millis() as u64
    }
}

/// A group of frames within a sequence. Frame order is insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequenceItem {
    sequence_id: SequenceId,
    frames: Vec<Frame>,
}

impl SequenceItem {
    /// Creates an empty item belonging to `sequence_id`.
    pub fn new(sequence_id: SequenceId) -> Self {
        Self {
            sequence_id,
            frames: Vec::new(),
        }
    }

    pub fn sequence_id(&self) -> SequenceId {
        self.sequence_id
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

/// An ordered, optionally repeating playback unit composed of sequence items.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sequence {
    id: SequenceId,
    name: String,
    device_type: DeviceType,
    repeat_count: u32,
    items: Vec<SequenceItem>,
}

impl Sequence {
    /// Creates an empty sequence.
    ///
    /// A `repeat_count` of 0 repeats forever.
    pub fn new(
        id: SequenceId,
        name: impl Into<String>,
        device_type: DeviceType,
        repeat_count: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            device_type,
            repeat_count,
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> SequenceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Number of times the sequence repeats; 0 means forever.
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn items(&self) -> &[SequenceItem] {
        &self.items
    }

    /// Total frame count across all items.
    pub fn frame_count(&self) -> usize {
        self.items.iter().map(|item| item.frames.len()).sum()
    }
}

// =============================================================================
// Project
// =============================================================================

/// The top-level container of images, sequences, and frames uploaded to the
/// device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Project {
    name: String,
    images: Vec<Image>,
    sequences: BTreeMap<SequenceId, Sequence>,
    /// GUI-only preview bitmaps, keyed by the project image they preview.
    previews: BTreeMap<ImageId, Image>,
}

impl Project {
    /// Creates an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            images: Vec::new(),
            sequences: BTreeMap::new(),
            previews: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Images in insertion order.
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Looks up an image by id.
    pub fn image(&self, id: ImageId) -> Option<&Image> {
        self.images.iter().find(|image| image.id() == id)
    }

    /// Sequences ordered by id.
    pub fn sequences(&self) -> impl Iterator<Item = &Sequence> + '_ {
        self.sequences.values()
    }

    /// Looks up a sequence by id.
    pub fn find_sequence(&self, id: SequenceId) -> Option<&Sequence> {
        self.sequences.get(&id)
    }

    /// Preview image registered for a project image, if any.
    pub fn preview_image(&self, id: ImageId) -> Option<&Image> {
        self.previews.get(&id)
    }

    /// Adds an image. Image ids must be unique within the project.
    pub fn add_image(&mut self, image: Image) -> Result<()> {
        if self.image(image.id()).is_some() {
            return Err(Error::DuplicateImage(image.id()));
        }
        self.images.push(image);
        Ok(())
    }

    /// Adds a sequence. Sequence ids must be unique within the project.
    pub fn add_sequence(&mut self, sequence: Sequence) -> Result<()> {
        if self.sequences.contains_key(&sequence.id()) {
            return Err(Error::DuplicateSequence(sequence.id()));
        }
        self.sequences.insert(sequence.id(), sequence);
        Ok(())
    }

    /// Appends an item to its sequence.
    ///
    /// The referenced sequence must already be part of the project.
    pub fn add_sequence_item(&mut self, item: SequenceItem) -> Result<()> {
        let sequence = self
            .sequences
            .get_mut(&item.sequence_id())
            .ok_or(Error::UnknownSequence(item.sequence_id()))?;
        sequence.items.push(item);
        Ok(())
    }

    /// Appends a frame to the last item of its sequence.
    ///
    /// The referenced image and sequence must already be part of the project,
    /// and the sequence must have at least one item.
    pub fn add_frame(&mut self, frame: Frame) -> Result<()> {
        if self.image(frame.image_id()).is_none() {
            return Err(Error::UnknownImage(frame.image_id()));
        }
        let sequence = self
            .sequences
            .get_mut(&frame.sequence_id())
            .ok_or(Error::UnknownSequence(frame.sequence_id()))?;
        let item = sequence
            .items
            .last_mut()
            .ok_or(Error::NoSequenceItem(frame.sequence_id()))?;
        item.frames.push(frame);
        Ok(())
    }

    /// Registers a preview image for an existing project image.
    ///
    /// Previews are display-only metadata for GUI tooling; the device ignores
    /// them.
    pub fn add_preview_image(&mut self, preview: Image, for_image: ImageId) -> Result<()> {
        if self.image(for_image).is_none() {
            return Err(Error::UnknownImage(for_image));
        }
        self.previews.insert(for_image, preview);
        Ok(())
    }

    /// Total frame count of the given sequence, or 0 when absent.
    pub fn frame_count(&self, sequence_id: SequenceId) -> usize {
        self.find_sequence(sequence_id)
            .map(Sequence::frame_count)
            .unwrap_or(0)
    }

    /// Re-checks the referential invariant over the assembled project.
    ///
    /// Every frame must reference an image present in the project, and must
    /// carry the id of the sequence that contains it.
    pub fn validate(&self) -> Result<()> {
        for sequence in self.sequences.values() {
            for item in &sequence.items {
                if item.sequence_id() != sequence.id() {
                    return Err(Error::UnknownSequence(item.sequence_id()));
                }
                for frame in &item.frames {
                    if frame.sequence_id() != sequence.id() {
                        return Err(Error::UnknownSequence(frame.sequence_id()));
                    }
                    if self.image(frame.image_id()).is_none() {
                        return Err(Error::UnknownImage(frame.image_id()));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap_2x2() -> Bitmap {
        Bitmap::new(2, 2, vec![0, 255, 255, 0]).unwrap()
    }

    fn project_with_sequence() -> Project {
        let mut project = Project::new("test");
        project
            .add_image(Image::new(ImageId(1), DeviceType::Dmd4500, bitmap_2x2()))
            .unwrap();
        project
            .add_sequence(Sequence::new(SequenceId(1), "test", DeviceType::Dmd4500, 0))
            .unwrap();
        project
            .add_sequence_item(SequenceItem::new(SequenceId(1)))
            .unwrap();
        project
    }

    // ==========================================================================
    // Bitmap Tests
    // ==========================================================================

    #[test]
    fn test_bitmap_rejects_zero_geometry() {
        assert!(matches!(
            Bitmap::new(0, 10, vec![]),
            Err(Error::InvalidGeometry { .. })
        ));
        assert!(matches!(
            Bitmap::filled(10, 0, 0),
            Err(Error::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_bitmap_rejects_length_mismatch() {
        assert!(matches!(
            Bitmap::new(3, 3, vec![0; 8]),
            Err(Error::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn test_bitmap_get_is_row_major() {
        let bitmap = Bitmap::new(3, 2, vec![10, 11, 12, 20, 21, 22]).unwrap();
        assert_eq!(bitmap.get(0, 0), Some(10));
        assert_eq!(bitmap.get(0, 2), Some(12));
        assert_eq!(bitmap.get(1, 0), Some(20));
        assert_eq!(bitmap.get(1, 2), Some(22));
        assert_eq!(bitmap.get(2, 0), None);
        assert_eq!(bitmap.get(0, 3), None);
    }

    #[test]
    fn test_bitmap_complement_inverts_every_pixel() {
        let bitmap = Bitmap::new(2, 2, vec![0, 255, 100, 1]).unwrap();
        let inverse = bitmap.complement();
        assert_eq!(inverse.data(), &[255, 0, 155, 254]);
        // Original untouched
        assert_eq!(bitmap.data(), &[0, 255, 100, 1]);
    }

    // ==========================================================================
    // Project Tests
    // ==========================================================================

    #[test]
    fn test_add_image_rejects_duplicate_id() {
        let mut project = Project::new("test");
        project
            .add_image(Image::new(ImageId(1), DeviceType::Dmd4500, bitmap_2x2()))
            .unwrap();
        let result = project.add_image(Image::new(ImageId(1), DeviceType::Dmd4500, bitmap_2x2()));
        assert!(matches!(result, Err(Error::DuplicateImage(ImageId(1)))));
    }

    #[test]
    fn test_add_sequence_rejects_duplicate_id() {
        let mut project = Project::new("test");
        project
            .add_sequence(Sequence::new(SequenceId(1), "a", DeviceType::Dmd4500, 0))
            .unwrap();
        let result =
            project.add_sequence(Sequence::new(SequenceId(1), "b", DeviceType::Dmd4500, 0));
        assert!(matches!(result, Err(Error::DuplicateSequence(_))));
    }

    #[test]
    fn test_add_sequence_item_requires_existing_sequence() {
        let mut project = Project::new("test");
        let result = project.add_sequence_item(SequenceItem::new(SequenceId(9)));
        assert!(matches!(result, Err(Error::UnknownSequence(SequenceId(9)))));
    }

    #[test]
    fn test_add_frame_requires_existing_image() {
        let mut project = project_with_sequence();
        let frame = Frame::new(SequenceId(1), ImageId(42), Duration::from_millis(100));
        assert!(matches!(
            project.add_frame(frame),
            Err(Error::UnknownImage(ImageId(42)))
        ));
    }

    #[test]
    fn test_add_frame_requires_existing_sequence() {
        let mut project = project_with_sequence();
        let frame = Frame::new(SequenceId(9), ImageId(1), Duration::from_millis(100));
        assert!(matches!(
            project.add_frame(frame),
            Err(Error::UnknownSequence(SequenceId(9)))
        ));
    }

    #[test]
    fn test_add_frame_requires_sequence_item() {
        let mut project = Project::new("test");
        project
            .add_image(Image::new(ImageId(1), DeviceType::Dmd4500, bitmap_2x2()))
            .unwrap();
        project
            .add_sequence(Sequence::new(SequenceId(1), "test", DeviceType::Dmd4500, 0))
            .unwrap();
        let frame = Frame::new(SequenceId(1), ImageId(1), Duration::from_millis(100));
        assert!(matches!(
            project.add_frame(frame),
            Err(Error::NoSequenceItem(SequenceId(1)))
        ));
    }

    #[test]
    fn test_add_frame_appends_to_last_item() {
        let mut project = project_with_sequence();
        project
            .add_sequence_item(SequenceItem::new(SequenceId(1)))
            .unwrap();

        project
            .add_frame(Frame::new(
                SequenceId(1),
                ImageId(1),
                Duration::from_millis(50),
            ))
            .unwrap();

        let sequence = project.find_sequence(SequenceId(1)).unwrap();
        assert_eq!(sequence.items().len(), 2);
        assert!(sequence.items()[0].frames().is_empty());
        assert_eq!(sequence.items()[1].frames().len(), 1);
    }

    #[test]
    fn test_find_sequence_hit_and_miss() {
        let project = project_with_sequence();
        assert!(project.find_sequence(SequenceId(1)).is_some());
        assert!(project.find_sequence(SequenceId(2)).is_none());
    }

    #[test]
    fn test_preview_image_requires_target() {
        let mut project = project_with_sequence();
        let preview = Image::new(ImageId(1), DeviceType::Dmd4500, bitmap_2x2()).with_name("p");
        assert!(matches!(
            project.add_preview_image(preview.clone(), ImageId(7)),
            Err(Error::UnknownImage(ImageId(7)))
        ));
        project.add_preview_image(preview, ImageId(1)).unwrap();
        assert_eq!(project.preview_image(ImageId(1)).unwrap().name(), Some("p"));
    }

    #[test]
    fn test_validate_accepts_well_formed_project() {
        let mut project = project_with_sequence();
        project
            .add_frame(Frame::new(
                SequenceId(1),
                ImageId(1),
                Duration::from_millis(100),
            ))
            .unwrap();
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_zero_frame_sequence() {
        let project = project_with_sequence();
        assert_eq!(project.frame_count(SequenceId(1)), 0);
        assert!(project.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_project_serde_roundtrip() {
        let mut project = project_with_sequence();
        project
            .add_frame(Frame::new(
                SequenceId(1),
                ImageId(1),
                Duration::from_millis(100),
            ))
            .unwrap();

        let json = serde_json::to_string(&project).expect("serialize to JSON");
        let restored: Project = serde_json::from_str(&json).expect("deserialize from JSON");
        assert_eq!(restored, project);
    }

    #[test]
    fn test_frame_time_ms_truncates_to_whole_milliseconds() {
        let frame = Frame::new(SequenceId(1), ImageId(1), Duration::from_micros(100_900));
        assert_eq!(frame.frame_time_ms(), 100);
    }
}
