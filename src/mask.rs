//! Region-of-interest masking: zero every byte outside the ROI in both
//! planes so the recognizer only sees the cursor neighbourhood. This is not
//! a crop — buffer size and geometry are unchanged, so the result is still a
//! valid NV21 image of the original dimensions.

use tracing::trace;

use crate::frame::Nv21Frame;
use crate::geometry::Rect;

/// Half a plane coordinate, rounded to nearest with halves up:
/// `floor(v * 0.5 + 0.5)`. Used for both chroma bounds so the blanked
/// chroma band stays symmetric with the luma band it shadows.
fn half(v: usize) -> usize {
    (v + 1) / 2
}

/// Blank everything outside `roi` in place. `None` leaves the frame
/// untouched. ROI edges are clamped to the frame, so a region touching or
/// crossing the boundary degenerates to empty fill ranges on that side.
pub fn apply_mask(frame: &mut Nv21Frame, roi: Option<&Rect>) {
    let Some(roi) = roi else {
        return;
    };

    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let luma_len = frame.luma_len();

    let roi = roi.normalized();
    let top = roi.top.clamp(0, height as i32) as usize;
    let bottom = roi.bottom.clamp(top as i32, height as i32) as usize;
    let left = roi.left.clamp(0, width as i32) as usize;
    let right = roi.right.clamp(left as i32, width as i32) as usize;

    trace!(top, bottom, left, right, "mask bounds");

    let buf = frame.buffer_mut();

    // Luma plane: full rows above and below the ROI band.
    buf[..top * width].fill(0);
    buf[bottom * width..luma_len].fill(0);

    // Luma plane: columns outside [left, right) within the band.
    for row in top..bottom {
        let offset = row * width;
        buf[offset..offset + left].fill(0);
        buf[offset + right..offset + width].fill(0);
    }

    // Chroma plane: same shape at half vertical resolution. Rows keep the
    // full luma stride; only the row count is halved.
    let chroma_rows = (buf.len() - luma_len) / width;
    let chroma_top = half(top).min(chroma_rows);
    let chroma_bottom = half(bottom).min(chroma_rows);

    buf[luma_len..luma_len + chroma_top * width].fill(0);
    buf[luma_len + chroma_bottom * width..].fill(0);

    for row in chroma_top..chroma_bottom {
        let offset = luma_len + row * width;
        buf[offset..offset + left].fill(0);
        buf[offset + right..offset + width].fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_frame(width: u32, height: u32, value: u8) -> Nv21Frame {
        let len = crate::frame::nv21_buffer_len(width, height);
        Nv21Frame::new(vec![value; len], width, height).unwrap()
    }

    #[test]
    fn no_roi_is_a_no_op() {
        let mut frame = filled_frame(16, 8, 255);
        apply_mask(&mut frame, None);
        assert!(frame.buffer().iter().all(|&b| b == 255));
    }

    #[test]
    fn full_frame_roi_is_a_no_op() {
        let mut frame = filled_frame(16, 8, 255);
        let roi = Rect::new(0, 0, 16, 8);
        apply_mask(&mut frame, Some(&roi));
        assert!(frame.buffer().iter().all(|&b| b == 255));
    }

    #[test]
    fn masks_outside_and_preserves_inside() {
        // The 640x480 reference case: luma kept in rows [100,200) x cols
        // [100,200), chroma band kept in rows [50,100).
        let mut frame = filled_frame(640, 480, 255);
        let roi = Rect::new(100, 100, 200, 200);
        apply_mask(&mut frame, Some(&roi));

        let width = 640usize;
        let luma = frame.luma();
        for row in 0..480 {
            for col in 0..width {
                let expected = if (100..200).contains(&row) && (100..200).contains(&col) {
                    255
                } else {
                    0
                };
                assert_eq!(luma[row * width + col], expected, "luma ({row}, {col})");
            }
        }

        let chroma = frame.chroma();
        for row in 0..240 {
            for col in 0..width {
                let expected = if (50..100).contains(&row) && (100..200).contains(&col) {
                    255
                } else {
                    0
                };
                assert_eq!(chroma[row * width + col], expected, "chroma ({row}, {col})");
            }
        }
    }

    #[test]
    fn masking_is_idempotent() {
        let mut once = filled_frame(64, 48, 200);
        let roi = Rect::new(10, 8, 40, 32);
        apply_mask(&mut once, Some(&roi));
        let mut twice = once.clone();
        apply_mask(&mut twice, Some(&roi));
        assert_eq!(once.buffer(), twice.buffer());
    }

    #[test]
    fn roi_crossing_frame_boundary_is_clamped() {
        let mut frame = filled_frame(32, 16, 255);
        let roi = Rect::new(-10, -10, 100, 100);
        apply_mask(&mut frame, Some(&roi));
        // ROI covers the whole frame after clamping, so nothing is blanked.
        assert!(frame.buffer().iter().all(|&b| b == 255));
    }

    #[test]
    fn flipped_roi_edges_are_normalized_not_undefined() {
        let mut frame = filled_frame(32, 16, 255);
        let roi = Rect::new(20, 12, 8, 4);
        apply_mask(&mut frame, Some(&roi));
        let luma = frame.luma();
        assert_eq!(luma[6 * 32 + 10], 255); // inside (8,4)-(20,12)
        assert_eq!(luma[0], 0);
    }

    #[test]
    fn chroma_band_uses_round_half_up() {
        // top=5 -> chroma row 3, bottom=9 -> chroma row 5.
        let mut frame = filled_frame(16, 16, 255);
        let roi = Rect::new(0, 5, 16, 9);
        apply_mask(&mut frame, Some(&roi));
        let chroma = frame.chroma();
        assert!(chroma[..3 * 16].iter().all(|&b| b == 0));
        assert!(chroma[3 * 16..5 * 16].iter().all(|&b| b == 255));
        assert!(chroma[5 * 16..].iter().all(|&b| b == 0));
    }
}
