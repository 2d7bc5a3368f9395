use crate::error::{Error, Result};

const WORD_BITS: usize = 64;

/// Validity bitmask for nullable columns
///
/// A set bit means the value at that position is valid (not null). Bits past
/// `len` in the last word are always kept at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitset {
    words: Vec<u64>,
    len: usize,
}

impl Bitset {
    /// Creates a bitset of `len` bits, all valid
    pub fn new(len: usize) -> Self {
        let mut bitset = Self {
            words: vec![u64::MAX; words_for(len)],
            len,
        };
        bitset.mask_tail();
        bitset
    }

    /// Builds a bitset from a validity slice (`true` = valid)
    pub fn from_bools(valid: &[bool]) -> Self {
        let mut bitset = Self {
            words: vec![0; words_for(valid.len())],
            len: valid.len(),
        };
        for (i, &is_valid) in valid.iter().enumerate() {
            if is_valid {
                bitset.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
            }
        }
        bitset
    }

    /// Grows the bitset to hold at least `len` bits; new bits are valid
    pub fn ensure_capacity(&mut self, len: usize) {
        if len <= self.len {
            return;
        }
        let old_len = self.len;
        self.words.resize(words_for(len), u64::MAX);
        // bits of the old last word past the old length were zero
        for i in old_len..len.min(words_for(old_len) * WORD_BITS) {
            self.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
        }
        self.len = len;
        self.mask_tail();
    }

    /// Marks position `i` as valid
    pub fn set(&mut self, i: usize) -> Result<()> {
        self.check(i)?;
        self.words[i / WORD_BITS] |= 1 << (i % WORD_BITS);
        Ok(())
    }

    /// Marks position `i` as null
    pub fn clear(&mut self, i: usize) -> Result<()> {
        self.check(i)?;
        self.words[i / WORD_BITS] &= !(1 << (i % WORD_BITS));
        Ok(())
    }

    /// Returns whether position `i` is valid; out-of-range positions are not
    pub fn get(&self, i: usize) -> bool {
        if i >= self.len {
            return false;
        }
        self.words[i / WORD_BITS] & (1 << (i % WORD_BITS)) != 0
    }

    /// Number of valid positions
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Ascending list of valid positions
    pub fn to_indices(&self) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.count());
        for (wi, &word) in self.words.iter().enumerate() {
            let mut w = word;
            while w != 0 {
                let idx = wi * WORD_BITS + w.trailing_zeros() as usize;
                if idx >= self.len {
                    break;
                }
                indices.push(idx);
                w &= w - 1;
            }
        }
        indices
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn check(&self, i: usize) -> Result<()> {
        if i >= self.len {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: self.len,
            });
        }
        Ok(())
    }

    fn mask_tail(&mut self) {
        let rem = self.len % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }
}

fn words_for(len: usize) -> usize {
    (len + WORD_BITS - 1) / WORD_BITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_every_bit() {
        let b = Bitset::new(130);
        assert_eq!(b.len(), 130);
        assert!(b.get(0) && b.get(64) && b.get(129));
        assert!(!b.get(130));
        assert_eq!(b.count(), 130);
    }

    #[test]
    fn clear_and_clone_are_independent() {
        let mut b = Bitset::new(130);
        b.clear(64).unwrap();
        assert!(!b.get(64));
        assert_eq!(b.count(), 129);

        let mut b2 = b.clone();
        b2.set(64).unwrap();
        assert!(!b.get(64));
        assert!(b2.get(64));
        assert_eq!(b2.to_indices().len(), 130);
    }

    #[test]
    fn out_of_range_writes_fail() {
        let mut b = Bitset::new(3);
        assert!(b.set(3).is_err());
        assert!(b.clear(10).is_err());
    }

    #[test]
    fn ensure_capacity_extends_with_valid_bits() {
        let mut b = Bitset::new(63);
        b.clear(5).unwrap();
        b.ensure_capacity(70);
        assert_eq!(b.len(), 70);
        assert!(b.get(63) && b.get(69));
        assert!(!b.get(5));
        assert_eq!(b.count(), 69);
        assert_eq!(b.to_indices().last(), Some(&69));
    }

    #[test]
    fn zero_length_is_empty() {
        let b = Bitset::new(0);
        assert!(b.is_empty());
        assert_eq!(b.count(), 0);
        assert!(b.to_indices().is_empty());
    }
}
