use super::types::RecordId;

/// Records checked for batch scoring.
///
/// Keeps ids in the order they were checked; scoring walks them in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<RecordId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of one id. Returns true if the id is now selected.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// "Select all" checkbox: clears when every id in `all` is already
    /// selected, otherwise selects exactly `all`.
    pub fn toggle_all(&mut self, all: &[RecordId]) {
        if self.covers(all) {
            self.ids.clear();
        } else {
            self.ids = all.to_vec();
        }
    }

    /// True when `all` is non-empty and every id in it is selected.
    pub fn covers(&self, all: &[RecordId]) -> bool {
        !all.is_empty() && all.iter().all(|id| self.contains(*id))
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn retain<F: FnMut(&RecordId) -> bool>(&mut self, f: F) {
        self.ids.retain(f);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[RecordId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
