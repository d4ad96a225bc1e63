//! Positional key/value pairing of extra log arguments

use super::value::Value;

/// One extras entry. `value` is `None` for a dangling trailing key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtraPair<'a> {
    pub key: &'a Value,
    pub value: Option<&'a Value>,
}

/// Ordered key/value view over a flat argument slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extras<'a> {
    pairs: Vec<ExtraPair<'a>>,
}

impl<'a> Extras<'a> {
    /// Pair `values` positionally: `(v0, v1), (v2, v3), ...`.
    ///
    /// An odd trailing element becomes a key with no value.
    pub fn pair(values: &'a [Value]) -> Self {
        let pairs = values
            .chunks(2)
            .map(|chunk| ExtraPair {
                key: &chunk[0],
                value: chunk.get(1),
            })
            .collect();
        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtraPair<'a>> {
        self.pairs.iter()
    }
}

impl<'a> IntoIterator for &'a Extras<'a> {
    type Item = &'a ExtraPair<'a>;
    type IntoIter = std::slice::Iter<'a, ExtraPair<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
