/// Transient selection shared by the list and the viewport
///
/// Starts `Unselected`; every row or mesh click moves to `Selected(index)`.
/// Nothing moves back to `Unselected`, and the index is not re-validated when
/// the store changes, so readers go through [`Selection::highlighted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(usize),
}

impl Selection {
    pub fn select(&mut self, index: usize) {
        *self = Selection::Selected(index);
    }

    /// Raw index, possibly stale
    pub fn index(&self) -> Option<usize> {
        match *self {
            Selection::Unselected => None,
            Selection::Selected(index) => Some(index),
        }
    }

    /// Index to highlight in a store of `len` records; stale indices give `None`
    pub fn highlighted(&self, len: usize) -> Option<usize> {
        self.index().filter(|&i| i < len)
    }

    pub fn is_highlighted(&self, index: usize, len: usize) -> bool {
        self.highlighted(len) == Some(index)
    }
}
