/// Index state for a multi-image strip.
///
/// The index stays within `[0, count)` for a non-empty image set. Explicit
/// navigation wraps around; the scroll-derived transition rounds the pane
/// offset so stepping and dragging cannot disagree about the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    count: usize,
}

impl Carousel {
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Step forward, wrapping from the last image to the first.
    pub fn next(&mut self) {
        if self.count == 0 {
            return;
        }
        self.index = if self.index == self.count - 1 {
            0
        } else {
            self.index + 1
        };
    }

    /// Step backward, wrapping from the first image to the last.
    pub fn prev(&mut self) {
        if self.count == 0 {
            return;
        }
        self.index = if self.index == 0 {
            self.count - 1
        } else {
            self.index - 1
        };
    }

    /// Jump straight to an image, clamped into range.
    pub fn jump(&mut self, index: usize) {
        if self.count == 0 {
            return;
        }
        self.index = index.min(self.count - 1);
    }

    /// Derive the index from a scroll offset over panes of `pane_width`:
    /// `round(offset / pane_width)`, clamped into range.
    pub fn sync_scroll(&mut self, offset: f64, pane_width: f64) {
        if self.count == 0 || pane_width <= 0.0 {
            return;
        }
        let derived = (offset / pane_width).round().max(0.0) as usize;
        self.index = derived.min(self.count - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut carousel = Carousel::new(3);
        carousel.jump(2);
        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn prev_wraps_from_first_to_last() {
        let mut carousel = Carousel::new(3);
        carousel.prev();
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn empty_carousel_ignores_navigation() {
        let mut carousel = Carousel::new(0);
        carousel.next();
        carousel.prev();
        carousel.jump(4);
        carousel.sync_scroll(100.0, 10.0);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn jump_clamps_to_last_image() {
        let mut carousel = Carousel::new(3);
        carousel.jump(9);
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn scroll_offset_at_pane_boundaries_derives_exact_index() {
        let width = 600.0;
        let mut carousel = Carousel::new(5);
        for k in 0..5 {
            carousel.sync_scroll(k as f64 * width, width);
            assert_eq!(carousel.index(), k);
        }
    }

    #[test]
    fn scroll_between_panes_rounds_to_nearest() {
        let mut carousel = Carousel::new(4);
        carousel.sync_scroll(340.0, 600.0);
        assert_eq!(carousel.index(), 1);
        carousel.sync_scroll(280.0, 600.0);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn scroll_beyond_range_clamps() {
        let mut carousel = Carousel::new(3);
        carousel.sync_scroll(5000.0, 600.0);
        assert_eq!(carousel.index(), 2);
        carousel.sync_scroll(-300.0, 600.0);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn viewer_opened_mid_strip_keeps_wrapping() {
        // images [a, b, c], viewer opened at inline index 1, next twice
        // lands on the first image again
        let mut carousel = Carousel::new(3);
        carousel.jump(1);
        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    proptest! {
        #[test]
        fn prop_next_then_prev_is_identity(count in 1usize..32, start in 0usize..32) {
            let mut carousel = Carousel::new(count);
            carousel.jump(start);
            let before = carousel.index();
            carousel.next();
            carousel.prev();
            prop_assert_eq!(carousel.index(), before);
        }

        #[test]
        fn prop_n_steps_wrap_modulo_count(count in 1usize..32, steps in 0usize..128) {
            let mut carousel = Carousel::new(count);
            for _ in 0..steps {
                carousel.next();
            }
            prop_assert_eq!(carousel.index(), steps % count);
        }

        #[test]
        fn prop_index_always_in_range(
            count in 1usize..32,
            offsets in prop::collection::vec(-2000.0f64..2000.0, 0..16)
        ) {
            let mut carousel = Carousel::new(count);
            for offset in offsets {
                carousel.sync_scroll(offset, 600.0);
                prop_assert!(carousel.index() < count);
            }
        }
    }
}
