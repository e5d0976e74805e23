//! Pixel-space layout rectangle.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Shrinks the rect by `amount` on every side, saturating at zero size.
    pub fn inset(&self, amount: u32) -> Self {
        let twice = amount.saturating_mul(2);
        Self {
            x: self.x.saturating_add(amount),
            y: self.y.saturating_add(amount),
            w: self.w.saturating_sub(twice),
            h: self.h.saturating_sub(twice),
        }
    }

    /// Places a `w`x`h` rect centered inside `self`. Oversized children are pinned to the
    /// top-left corner rather than clipped.
    pub fn centered(&self, w: u32, h: u32) -> Self {
        Self {
            x: self.x.saturating_add(self.w.saturating_sub(w) / 2),
            y: self.y.saturating_add(self.h.saturating_sub(h) / 2),
            w,
            h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_splits_slack_evenly() {
        let outer = Rect::from_size(100, 50);
        assert_eq!(outer.centered(20, 10), Rect::new(40, 20, 20, 10));
        assert_eq!(outer.centered(200, 10), Rect::new(0, 20, 200, 10));
    }

    #[test]
    fn inset_saturates() {
        let r = Rect::new(5, 5, 4, 4);
        assert_eq!(r.inset(1), Rect::new(6, 6, 2, 2));
        assert_eq!(r.inset(3).w, 0);
    }
}
