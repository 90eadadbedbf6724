//! Eingegebene Button-Reihenfolge

use heapless::Vec;

use crate::types::{BUTTON_COUNT, ButtonId};

/// Reihenfolge der gedrückten Buttons, ohne Duplikate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceBuffer {
    entries: Vec<ButtonId, BUTTON_COUNT>,
}

impl SequenceBuffer {
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Hängt `id` an; `false` wenn schon enthalten oder voll
    pub fn record(&mut self, id: ButtonId) -> bool {
        if self.entries.contains(&id) {
            return false;
        }
        self.entries.push(id).is_ok()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[ButtonId] {
        &self.entries
    }

    /// Exakte Gleichheit inklusive Reihenfolge
    pub fn matches(&self, target: &[ButtonId]) -> bool {
        self.entries.as_slice() == target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ignores_duplicates() {
        let mut buffer = SequenceBuffer::new();
        assert!(buffer.record(3));
        assert!(buffer.record(1));
        assert!(!buffer.record(3));
        assert_eq!(buffer.as_slice(), &[3, 1]);
    }

    #[test]
    fn test_matches_is_order_sensitive() {
        let mut buffer = SequenceBuffer::new();
        buffer.record(1);
        buffer.record(2);
        assert!(buffer.matches(&[1, 2]));
        assert!(!buffer.matches(&[2, 1]));
        assert!(!buffer.matches(&[1, 2, 3]));
    }

    #[test]
    fn test_clear() {
        let mut buffer = SequenceBuffer::new();
        buffer.record(0);
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.record(0));
    }
}
