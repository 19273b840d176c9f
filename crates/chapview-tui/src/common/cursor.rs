/// Highlighted row of a table.
///
/// The index is clamped against the current row count on every read, so a
/// cursor left over from a longer list never points past the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
}

impl ListCursor {
    pub fn selected(self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.index.min(len - 1))
        }
    }

    pub fn up(&mut self, len: usize) {
        self.up_by(1, len);
    }

    pub fn down(&mut self, len: usize) {
        self.down_by(1, len);
    }

    pub fn up_by(&mut self, step: usize, len: usize) {
        if let Some(current) = self.selected(len) {
            self.index = current.saturating_sub(step);
        }
    }

    pub fn down_by(&mut self, step: usize, len: usize) {
        if let Some(current) = self.selected(len) {
            self.index = current.saturating_add(step).min(len - 1);
        }
    }

    pub fn first(&mut self) {
        self.index = 0;
    }

    pub fn last(&mut self, len: usize) {
        self.index = len.saturating_sub(1);
    }
}
