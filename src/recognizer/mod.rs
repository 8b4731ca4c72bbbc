//! Text recognition seam. The OCR backend is an opaque capability: given an
//! image and metadata it produces a block → line → element hierarchy with
//! pixel-space bounding boxes, or fails. Any engine satisfying the trait is
//! substitutable; nothing here binds to a concrete library.

use serde::{Deserialize, Serialize};

use crate::frame::Nv21Frame;
use crate::geometry::Rect;

/// Image formats the pipeline hands to a recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Nv21,
}

/// Fixed frame rotation, set once per pipeline (not per frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

/// Metadata accompanying every frame handed to the recognizer. Bounding
/// boxes in the result are in the same pixel coordinate space as the input.
#[derive(Debug, Clone)]
pub struct ImageMetadata {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub rotation: Rotation,
}

/// A word-like unit of recognized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedElement {
    pub text: String,
    pub bounding_box: Rect,
}

/// One line of elements.
#[derive(Debug, Clone, Default)]
pub struct TextLine {
    pub elements: Vec<RecognizedElement>,
}

/// A paragraph-like group of lines.
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
}

/// The full recognition result hierarchy.
#[derive(Debug, Clone, Default)]
pub struct RecognizedText {
    pub blocks: Vec<TextBlock>,
}

impl RecognizedText {
    /// Flatten in block → line → element traversal order. The selector's
    /// last-wins tie-break is defined over exactly this order.
    pub fn flatten(&self) -> impl Iterator<Item = &RecognizedElement> {
        self.blocks
            .iter()
            .flat_map(|block| block.lines.iter())
            .flat_map(|line| line.elements.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.flatten().next().is_none()
    }
}

#[derive(Debug)]
pub enum RecognizerError {
    Closed,
    ProcessingFailed(String),
}

impl std::fmt::Display for RecognizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognizerError::Closed => write!(f, "recognizer is closed"),
            RecognizerError::ProcessingFailed(msg) => write!(f, "recognition failed: {msg}"),
        }
    }
}

impl std::error::Error for RecognizerError {}

/// On-device text recognition backend.
///
/// `recognize` may block; the pipeline always calls it from the blocking
/// pool. `close` releases backend resources and must be idempotent —
/// `recognize` after `close` returns [`RecognizerError::Closed`].
pub trait TextRecognizer: Send + Sync {
    fn recognize(
        &self,
        frame: &Nv21Frame,
        metadata: &ImageMetadata,
    ) -> Result<RecognizedText, RecognizerError>;

    fn close(&self) -> Result<(), RecognizerError>;
}

/// Backend that recognizes nothing. Stands in where no engine is wired up
/// yet; every frame completes with an empty hierarchy.
pub struct NullRecognizer;

impl TextRecognizer for NullRecognizer {
    fn recognize(
        &self,
        _frame: &Nv21Frame,
        _metadata: &ImageMetadata,
    ) -> Result<RecognizedText, RecognizerError> {
        Ok(RecognizedText::default())
    }

    fn close(&self) -> Result<(), RecognizerError> {
        Ok(())
    }
}
