//! Cursor and accordion state of the result screen.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Review {
    cursor: usize,
    expanded: Option<usize>,
}

impl Review {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn move_down(&mut self, total: usize) {
        self.cursor = (self.cursor + 1).min(total.saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Expands the entry under the cursor; only one entry is open at a time.
    pub fn toggle(&mut self) {
        self.expanded = if self.expanded == Some(self.cursor) {
            None
        } else {
            Some(self.cursor)
        };
    }
}
