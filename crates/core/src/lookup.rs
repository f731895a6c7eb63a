use common::types::LookupElement;

/// Total number of multipliers in the table.
pub const NUM_ENTRIES: usize = 52;

/// Exponents of the power-of-two multipliers placed at the head of the table,
/// coarsest first.
pub const SEED_EXPONENTS: [i32; 4] = [8, 4, 2, 1];

/// Ordered table of reduction multipliers.
///
/// Layout:
/// - entries `0..4`: `2^8, 2^4, 2^2, 2^1`
/// - entries `4..52`: `1 + 2^-(i-3)`, i.e. `1.5, 1.25, 1.125, ...` approaching 1 from above
///
/// The order is part of the contract: factor search takes the first entry that
/// passes its threshold test, so coarse multipliers must come before fine ones.
/// The table is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    entries: Vec<LookupElement>,
}

impl LookupTable {
    /// Builds the standard 52-entry table.
    pub fn build() -> Self {
        let mut entries = Vec::with_capacity(NUM_ENTRIES);

        for &exp in &SEED_EXPONENTS {
            entries.push(LookupElement::new(2f64.powi(exp)));
        }

        for i in SEED_EXPONENTS.len()..NUM_ENTRIES {
            let k = 2f64.powi(-(i as i32 - 3)) + 1.0;
            entries.push(LookupElement::new(k));
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LookupElement> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LookupElement> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[LookupElement] {
        &self.entries
    }

    /// The first (largest) multiplier. Inputs at or above it are not reduced
    /// by the division search.
    pub fn largest(&self) -> f64 {
        self.entries.first().map_or(1.0, |e| e.k)
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::build()
    }
}

impl<'a> IntoIterator for &'a LookupTable {
    type Item = &'a LookupElement;
    type IntoIter = std::slice::Iter<'a, LookupElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[test]
    fn table_has_expected_size() {
        let table = LookupTable::build();
        assert_eq!(table.len(), NUM_ENTRIES);
        assert!(!table.is_empty());
    }

    #[test]
    fn seed_entries_are_powers_of_two_in_order() {
        let table = LookupTable::build();
        let expected = [256.0, 16.0, 4.0, 2.0];

        for (i, &k) in expected.iter().enumerate() {
            let entry = table.get(i).unwrap();
            assert_eq!(entry.k, k);
            assert_eq!(entry.ln_k, f64::ln(k));
        }
        assert_eq!(table.largest(), 256.0);
    }

    #[test]
    fn fine_entries_approach_one_from_above() {
        let table = LookupTable::build();

        assert_eq!(table.get(4).unwrap().k, 1.5);
        assert_eq!(table.get(5).unwrap().k, 1.25);
        assert_eq!(table.get(6).unwrap().k, 1.125);
        assert_eq!(table.get(51).unwrap().k, 1.0 + 2f64.powi(-48));

        let fine = &table.as_slice()[4..];
        for pair in fine.windows(2) {
            assert!(pair[0].k > pair[1].k);
            assert!(pair[1].k > 1.0);
        }
    }

    #[test]
    fn every_entry_stores_its_logarithm() {
        for entry in &LookupTable::build() {
            assert!(entry.k > 0.0);
            assert_eq!(entry.ln_k, entry.k.ln());
        }
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(LookupTable::build(), LookupTable::default());
    }
}
