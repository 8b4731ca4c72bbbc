//! Cursor hit testing: which recognized element is under the cursor.

use crate::geometry::Rect;
use crate::recognizer::RecognizedElement;

/// Pick the element whose bounding box strictly contains the cursor center.
///
/// Candidates are visited in the order the caller provides (the recognizer's
/// block → line → element traversal); when several boxes contain the cursor
/// the last one visited wins. No distance-based tie-break is applied.
/// `None` means the cursor is not over recognizable text — an expected
/// per-frame outcome, not an error.
pub fn select_element<'a, I>(cursor: &Rect, elements: I) -> Option<&'a RecognizedElement>
where
    I: IntoIterator<Item = &'a RecognizedElement>,
{
    let center = cursor.center();
    let mut hit = None;
    for element in elements {
        if element.bounding_box.contains_strict(center) {
            hit = Some(element);
        }
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(text: &str, bounding_box: Rect) -> RecognizedElement {
        RecognizedElement {
            text: text.into(),
            bounding_box,
        }
    }

    /// Degenerate cursor rect centered at (x, y).
    fn cursor_at(x: i32, y: i32) -> Rect {
        Rect::new(x, y, x, y)
    }

    #[test]
    fn last_qualifying_element_wins() {
        let a = element("a", Rect::new(0, 0, 20, 20));
        let b = element("b", Rect::new(5, 5, 15, 15));
        let hit = select_element(&cursor_at(10, 10), [&a, &b]).unwrap();
        assert_eq!(hit.text, "b");

        // Same boxes, reversed traversal order: the other one wins.
        let hit = select_element(&cursor_at(10, 10), [&b, &a]).unwrap();
        assert_eq!(hit.text, "a");
    }

    #[test]
    fn cursor_on_box_edge_does_not_qualify() {
        let a = element("a", Rect::new(0, 0, 20, 20));
        assert!(select_element(&cursor_at(20, 10), [&a]).is_none());
        assert!(select_element(&cursor_at(10, 0), [&a]).is_none());
    }

    #[test]
    fn empty_candidates_select_nothing() {
        assert!(select_element(&cursor_at(10, 10), std::iter::empty()).is_none());
    }

    #[test]
    fn miss_selects_nothing() {
        let a = element("a", Rect::new(100, 100, 120, 110));
        assert!(select_element(&cursor_at(10, 10), [&a]).is_none());
    }

    #[test]
    fn x_is_horizontal_y_is_vertical() {
        // A wide, short box: only the horizontal/vertical reading of the
        // cursor coordinates puts (30, 10) inside it.
        let a = element("a", Rect::new(0, 0, 60, 20));
        assert!(select_element(&cursor_at(30, 10), [&a]).is_some());
        assert!(select_element(&cursor_at(10, 30), [&a]).is_none());
    }

    #[test]
    fn small_cursor_rect_uses_its_center() {
        let a = element("a", Rect::new(8, 8, 16, 16));
        let cursor = Rect::new(10, 10, 14, 14); // center (12, 12)
        assert!(select_element(&cursor, [&a]).is_some());
    }
}
