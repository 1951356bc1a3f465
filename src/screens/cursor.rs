//! Selection cursor over a list whose length changes under it.

/// Index into a list of `len` entries.
///
/// The cursor never stores the length. Every operation takes the current
/// length so the index is re-validated against the list as it is now.
/// With an empty list the index is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    index: usize,
}

impl SelectionCursor {
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    pub fn index(self) -> usize {
        self.index
    }

    /// Current index, or `None` when the list is empty.
    pub fn selected(self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.index.min(len - 1))
    }

    /// Step back one entry, wrapping from the first to the last.
    pub fn move_up(&mut self, len: usize) {
        self.index = match len {
            0 => 0,
            _ if self.index == 0 || self.index >= len => len - 1,
            _ => self.index - 1,
        };
    }

    /// Step forward one entry, wrapping from the last to the first.
    pub fn move_down(&mut self, len: usize) {
        self.index = match len {
            0 => 0,
            _ if self.index + 1 >= len => 0,
            _ => self.index + 1,
        };
    }

    /// Jump to `index` if it exists. Returns false and stays put otherwise.
    pub fn select(&mut self, index: usize, len: usize) -> bool {
        if index < len {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Pull the index back inside the list after it shrank.
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }
}
