//! Lightbox navigation model.
//!
//! The viewer is either closed or showing photo `i` of `len`. Navigation
//! wraps at both ends. The inline page script follows the `prev`/`next`
//! links the renderer computes from this model, so server and browser agree
//! on the order.

/// Viewer state over a fixed number of photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lightbox {
    Closed,
    Open(usize),
}

/// Lightbox bound to a gallery of `len` photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    len: usize,
    state: Lightbox,
}

impl Viewer {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            state: Lightbox::Closed,
        }
    }

    #[must_use]
    pub fn state(&self) -> Lightbox {
        self.state
    }

    /// Show photo `index`. Out-of-range indices leave the state unchanged.
    pub fn open(&mut self, index: usize) {
        if index < self.len {
            self.state = Lightbox::Open(index);
        }
    }

    pub fn close(&mut self) {
        self.state = Lightbox::Closed;
    }

    /// Advance to `(i + 1) mod len`. No-op while closed.
    pub fn next(&mut self) {
        if let Lightbox::Open(i) = self.state {
            self.state = Lightbox::Open(next_index(i, self.len));
        }
    }

    /// Step back to `(i - 1 + len) mod len`. No-op while closed.
    pub fn prev(&mut self) {
        if let Lightbox::Open(i) = self.state {
            self.state = Lightbox::Open(prev_index(i, self.len));
        }
    }
}

/// Index after `i` in a ring of `len` items (`len` must be non-zero).
#[must_use]
pub fn next_index(i: usize, len: usize) -> usize {
    (i + 1) % len
}

/// Index before `i` in a ring of `len` items (`len` must be non-zero).
#[must_use]
pub fn prev_index(i: usize, len: usize) -> usize {
    (i + len - 1) % len
}
