use std::cmp::Ordering;
use std::fmt;

const WORD_BITS: usize = 64;

#[inline]
fn words_for(capacity: usize) -> usize {
    capacity.div_ceil(WORD_BITS)
}

/// Mask selecting the bits of a word whose index is below `bits`.
#[inline]
fn low_mask(bits: usize) -> u64 {
    if bits >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Fixed-width set of indices in `0..capacity`.
///
/// Used for both attribute sets and object sets. Bits past `capacity` are
/// kept zero, so the derived `Eq` and `Hash` are set equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    words: Vec<u64>,
    capacity: usize,
}

impl BitSet {
    /// Creates an empty set over `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; words_for(capacity)],
            capacity,
        }
    }

    /// Creates the set containing every index in `0..capacity`.
    pub fn full(capacity: usize) -> Self {
        let mut set = Self {
            words: vec![u64::MAX; words_for(capacity)],
            capacity,
        };
        set.clear_padding();
        set
    }

    /// Creates a set from indices. Panics if an index is out of range.
    pub fn from_indices<I: IntoIterator<Item = usize>>(capacity: usize, indices: I) -> Self {
        let mut set = Self::new(capacity);
        for index in indices {
            set.insert(index);
        }
        set
    }

    fn clear_padding(&mut self) {
        let tail = self.capacity % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= low_mask(tail);
            }
        }
    }

    /// Number of addressable positions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Inserts `index`, returning true if it was not present.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    pub fn insert(&mut self, index: usize) -> bool {
        assert!(
            index < self.capacity,
            "index {} out of range for bit set of capacity {}",
            index,
            self.capacity
        );
        let word = &mut self.words[index / WORD_BITS];
        let bit = 1u64 << (index % WORD_BITS);
        let added = *word & bit == 0;
        *word |= bit;
        added
    }

    /// Removes `index`, returning true if it was present.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let word = &mut self.words[index / WORD_BITS];
        let bit = 1u64 << (index % WORD_BITS);
        let present = *word & bit != 0;
        *word &= !bit;
        present
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.capacity && self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns true if every index in `0..capacity` is present.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    fn check_width(&self, other: &BitSet) {
        assert_eq!(
            self.capacity, other.capacity,
            "bit set capacity mismatch: {} vs {}",
            self.capacity, other.capacity
        );
    }

    /// In-place intersection.
    ///
    /// # Panics
    ///
    /// Panics if the two sets have different capacities, as do the other
    /// operations taking a second set.
    pub fn intersect_with(&mut self, other: &BitSet) {
        self.check_width(other);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= *b;
        }
    }

    pub fn intersection(&self, other: &BitSet) -> BitSet {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// In-place union.
    pub fn union_with(&mut self, other: &BitSet) {
        self.check_width(other);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
    }

    pub fn is_subset(&self, other: &BitSet) -> bool {
        self.check_width(other);
        self.words.iter().zip(&other.words).all(|(a, b)| a & !b == 0)
    }

    /// Proper subset.
    pub fn is_strict_subset(&self, other: &BitSet) -> bool {
        self.is_subset(other) && self != other
    }

    /// Returns true if both sets hold the same elements below `bound`.
    pub fn agrees_below(&self, other: &BitSet, bound: usize) -> bool {
        self.check_width(other);
        let bound = bound.min(self.capacity);
        let full_words = bound / WORD_BITS;
        if self.words[..full_words] != other.words[..full_words] {
            return false;
        }
        let tail = bound % WORD_BITS;
        if tail == 0 {
            return true;
        }
        let mask = low_mask(tail);
        self.words[full_words] & mask == other.words[full_words] & mask
    }

    /// Returns true if `self` has an element below `bound` that `other` lacks.
    pub fn has_extra_below(&self, other: &BitSet, bound: usize) -> bool {
        self.check_width(other);
        let bound = bound.min(self.capacity);
        let full_words = bound / WORD_BITS;
        if self.words[..full_words]
            .iter()
            .zip(&other.words[..full_words])
            .any(|(a, b)| a & !b != 0)
        {
            return true;
        }
        let tail = bound % WORD_BITS;
        tail != 0 && self.words[full_words] & !other.words[full_words] & low_mask(tail) != 0
    }

    /// Returns the elements strictly below `bound`.
    pub fn truncated_below(&self, bound: usize) -> BitSet {
        let mut result = self.clone();
        let bound = bound.min(self.capacity);
        let full_words = bound / WORD_BITS;
        let tail = bound % WORD_BITS;
        for (w, word) in result.words.iter_mut().enumerate() {
            if w > full_words || (w == full_words && tail == 0) {
                *word = 0;
            } else if w == full_words {
                *word &= low_mask(tail);
            }
        }
        result
    }

    /// Smallest index at which the two sets differ.
    pub fn lowest_difference(&self, other: &BitSet) -> Option<usize> {
        self.check_width(other);
        self.words
            .iter()
            .zip(&other.words)
            .enumerate()
            .find_map(|(w, (a, b))| {
                let diff = a ^ b;
                (diff != 0).then(|| w * WORD_BITS + diff.trailing_zeros() as usize)
            })
    }

    /// Compares two sets in lectic order: `self < other` iff the smallest
    /// index where they differ is in `other`.
    ///
    /// This is the order NextClosure visits closed sets in: a successor
    /// agrees with its predecessor below some index `i` and adds `i`.
    pub fn lectic_cmp(&self, other: &BitSet) -> Ordering {
        match self.lowest_difference(other) {
            None => Ordering::Equal,
            Some(index) if other.contains(index) => Ordering::Less,
            Some(_) => Ordering::Greater,
        }
    }

    /// Ascending iterator over the elements.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            word_index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Elements as an ascending vector.
    pub fn to_indices(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the elements of a [`BitSet`] in ascending order.
pub struct Iter<'a> {
    words: &'a [u64],
    word_index: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.word_index * WORD_BITS + bit);
            }
            self.word_index += 1;
            self.current = *self.words.get(self.word_index)?;
        }
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let set = BitSet::new(70);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.capacity(), 70);
    }

    #[test]
    fn test_full_clears_padding() {
        let set = BitSet::full(70);
        assert_eq!(set.len(), 70);
        assert!(set.is_full());
        assert_eq!(set, BitSet::from_indices(70, 0..70));
    }

    #[test]
    fn test_zero_capacity() {
        let set = BitSet::full(0);
        assert!(set.is_empty());
        assert!(set.is_full());
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_insert_remove() {
        let mut set = BitSet::new(130);
        assert!(set.insert(129));
        assert!(!set.insert(129));
        assert!(set.contains(129));
        assert!(set.remove(129));
        assert!(!set.contains(129));
        assert!(!set.remove(500));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_insert_out_of_range() {
        let mut set = BitSet::new(3);
        set.insert(3);
    }

    #[test]
    #[should_panic(expected = "capacity mismatch")]
    fn test_intersect_width_mismatch() {
        let mut narrow = BitSet::full(3);
        narrow.intersect_with(&BitSet::full(70));
    }

    #[test]
    #[should_panic(expected = "capacity mismatch")]
    fn test_subset_width_mismatch() {
        BitSet::new(70).is_subset(&BitSet::new(3));
    }

    #[test]
    fn test_iter_across_words() {
        let set = BitSet::from_indices(200, [0, 63, 64, 127, 199]);
        assert_eq!(set.to_indices(), vec![0, 63, 64, 127, 199]);
    }

    #[test]
    fn test_subset() {
        let a = BitSet::from_indices(10, [1, 3]);
        let b = BitSet::from_indices(10, [1, 3, 5]);
        assert!(a.is_subset(&b));
        assert!(a.is_strict_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(!b.is_strict_subset(&b));
    }

    #[test]
    fn test_agrees_below() {
        let a = BitSet::from_indices(100, [1, 70, 90]);
        let b = BitSet::from_indices(100, [1, 70, 95]);
        assert!(a.agrees_below(&b, 90));
        assert!(!a.agrees_below(&b, 91));
        assert!(a.agrees_below(&b, 0));
    }

    #[test]
    fn test_has_extra_below() {
        let parent = BitSet::from_indices(100, [2, 80]);
        let child = BitSet::from_indices(100, [2, 5, 80, 81]);
        assert!(!child.has_extra_below(&parent, 5));
        assert!(child.has_extra_below(&parent, 6));
        assert!(!child.has_extra_below(&parent, 1));
    }

    #[test]
    fn test_truncated_below() {
        let a = BitSet::from_indices(130, [0, 5, 64, 65, 128]);
        assert_eq!(a.truncated_below(65).to_indices(), vec![0, 5, 64]);
        assert_eq!(a.truncated_below(64).to_indices(), vec![0, 5]);
        assert_eq!(a.truncated_below(0).to_indices(), Vec::<usize>::new());
        assert_eq!(a.truncated_below(1000), a);
    }

    #[test]
    fn test_lectic_cmp() {
        let empty = BitSet::new(3);
        let a0 = BitSet::from_indices(3, [0]);
        let a2 = BitSet::from_indices(3, [2]);
        let a12 = BitSet::from_indices(3, [1, 2]);
        assert_eq!(empty.lectic_cmp(&a2), Ordering::Less);
        // {1,2} < {0}: smallest difference is 0
        assert_eq!(a12.lectic_cmp(&a0), Ordering::Less);
        assert_eq!(a2.lectic_cmp(&a12), Ordering::Less);
        assert_eq!(a12.lectic_cmp(&a12), Ordering::Equal);
        assert_eq!(a0.lectic_cmp(&a2), Ordering::Greater);
    }

    #[test]
    fn test_lowest_difference_across_words() {
        let a = BitSet::from_indices(130, [3, 100]);
        let b = BitSet::from_indices(130, [3, 101]);
        assert_eq!(a.lowest_difference(&b), Some(100));
        assert_eq!(a.lowest_difference(&a), None);
    }

    #[test]
    fn test_debug_format() {
        let set = BitSet::from_indices(8, [1, 4]);
        assert_eq!(format!("{:?}", set), "{1, 4}");
    }
}
