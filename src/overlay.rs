//! Overlay seam: where the cursor sits, which region feeds recognition,
//! and the highlight state the pipeline pushes back after each cycle.
//! Rendering itself belongs to the host UI; the pipeline only reads
//! geometry and writes the highlight flag.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::PipelineConfig;
use crate::geometry::Rect;

/// Geometry provider + highlight sink, supplied by the host overlay layer.
/// All rectangles are in image pixel coordinates.
pub trait CursorOverlay: Send + Sync {
    /// Current cursor rectangle. `None` while the overlay has no layout yet.
    fn cursor_rect(&self) -> Option<Rect>;

    /// Region of interest for masking. `None` disables masking.
    fn recognition_rect(&self) -> Option<Rect>;

    /// Highlight state after a completed cycle: true when an element is
    /// under the cursor. Must be cheap and non-blocking; completion runs
    /// on a context the recognizer chooses.
    fn set_highlight(&self, recognizing: bool);
}

/// Fixed cursor at the frame center with a centered recognition area, both
/// sized from config and clamped to the frame.
pub struct FixedCursorOverlay {
    cursor: Rect,
    roi: Rect,
    highlight: AtomicBool,
}

impl FixedCursorOverlay {
    pub fn centered(frame_width: u32, frame_height: u32, config: &PipelineConfig) -> Self {
        let cx = frame_width as i32 / 2;
        let cy = frame_height as i32 / 2;
        Self {
            cursor: centered_rect(cx, cy, config.cursor_size, config.cursor_size),
            roi: clamp_to_frame(
                centered_rect(
                    cx,
                    cy,
                    config.recognition_area_width,
                    config.recognition_area_height,
                ),
                frame_width,
                frame_height,
            ),
            highlight: AtomicBool::new(false),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight.load(Ordering::Acquire)
    }
}

impl CursorOverlay for FixedCursorOverlay {
    fn cursor_rect(&self) -> Option<Rect> {
        Some(self.cursor)
    }

    fn recognition_rect(&self) -> Option<Rect> {
        Some(self.roi)
    }

    fn set_highlight(&self, recognizing: bool) {
        self.highlight.store(recognizing, Ordering::Release);
    }
}

fn centered_rect(cx: i32, cy: i32, width: u32, height: u32) -> Rect {
    let half_w = width as i32 / 2;
    let half_h = height as i32 / 2;
    Rect::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
}

fn clamp_to_frame(rect: Rect, frame_width: u32, frame_height: u32) -> Rect {
    Rect::new(
        rect.left.max(0),
        rect.top.max(0),
        rect.right.min(frame_width as i32),
        rect.bottom.min(frame_height as i32),
    )
}
