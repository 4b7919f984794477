//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The qubit index as a bit position in a basis-state index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Consecutive qubit ids `start, start + 1, ..` of length `count`.
    pub fn range(start: u32, count: u32) -> Vec<QubitId> {
        (start..start + count).map(QubitId).collect()
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", QubitId(12)), "q12");
    }

    #[test]
    fn test_qubit_range() {
        let wires = QubitId::range(3, 2);
        assert_eq!(wires, vec![QubitId(3), QubitId(4)]);
        assert!(QubitId::range(0, 0).is_empty());
    }
}
