/// Scroll position of the result screen, in wrapped lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultScroll {
    pub offset: usize,
}

impl ResultScroll {
    pub fn scroll_by(&mut self, delta: isize, max_offset: usize) {
        self.offset = self.offset.saturating_add_signed(delta).min(max_offset);
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self, max_offset: usize) {
        self.offset = max_offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_is_clamped() {
        let mut scroll = ResultScroll::default();
        scroll.scroll_by(-3, 10);
        assert_eq!(scroll.offset, 0);
        scroll.scroll_by(25, 10);
        assert_eq!(scroll.offset, 10);
        scroll.scroll_by(-4, 10);
        assert_eq!(scroll.offset, 6);
        scroll.to_top();
        assert_eq!(scroll.offset, 0);
    }
}
