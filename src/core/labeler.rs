//! core::labeler
//!
//! Fixed-width lexicographic label generation.
//!
//! # Overview
//!
//! Given N ordered items, [`Labeler::label`] pairs each with one of the first
//! N strings of the base-`b` counting sequence, where `b` is the alphabet
//! size and every string has the same width. With a sorted alphabet,
//! sorting the labels reproduces the item order.
//!
//! The width is the smallest `w >= 1` with `b^w >= N`, so a scope that grows
//! past `b^w` siblings is relabeled at width `w + 1`.
//!
//! # Example
//!
//! ```
//! use ltreework::core::labeler::Labeler;
//!
//! let labeler = Labeler::new("01").unwrap();
//! let labels: Vec<_> = labeler.label(["a", "b", "c", "d"]).collect();
//! assert_eq!(
//!     labels,
//!     vec![
//!         ("00".to_string(), "a"),
//!         ("01".to_string(), "b"),
//!         ("10".to_string(), "c"),
//!         ("11".to_string(), "d"),
//!     ]
//! );
//! ```

use std::iter::FusedIterator;

use super::alphabet::{Alphabet, AlphabetError};

/// Generator of fixed-width, order-preserving labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeler {
    alphabet: Alphabet,
}

impl Labeler {
    /// Create a labeler from at least two unique symbols.
    ///
    /// # Errors
    ///
    /// Returns `AlphabetError` if the alphabet is too short or repeats a
    /// symbol.
    pub fn new(alphabet: &str) -> Result<Self, AlphabetError> {
        Ok(Self {
            alphabet: Alphabet::new(alphabet)?,
        })
    }

    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Label width needed for `count` items.
    ///
    /// Computed with integer arithmetic; `count` of 0 or 1 gives width 1.
    pub fn width_for(&self, count: usize) -> usize {
        let base = self.alphabet.base();
        let mut width = 1;
        let mut capacity = base;
        while capacity < count {
            capacity = capacity.saturating_mul(base);
            width += 1;
        }
        width
    }

    /// Pair every item with a label, preserving order.
    ///
    /// The returned iterator is lazy and single-pass. Empty input yields
    /// nothing.
    pub fn label<I>(&self, items: I) -> Labels<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        let width = self.width_for(items.len());
        Labels {
            symbols: self.alphabet.symbols(),
            digits: vec![0; width],
            started: false,
            items,
        }
    }
}

impl Default for Labeler {
    fn default() -> Self {
        Self::with_alphabet(Alphabet::default())
    }
}

/// Iterator returned by [`Labeler::label`].
#[derive(Debug)]
pub struct Labels<'a, I> {
    symbols: &'a [char],
    /// Digit indexes of the most recently yielded label, most significant first.
    digits: Vec<usize>,
    started: bool,
    items: I,
}

impl<I> Labels<'_, I> {
    pub fn width(&self) -> usize {
        self.digits.len()
    }

    fn advance(&mut self) {
        let base = self.symbols.len();
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < base {
                return;
            }
            *digit = 0;
        }
    }
}

impl<I: Iterator> Iterator for Labels<'_, I> {
    type Item = (String, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.next()?;
        if self.started {
            self.advance();
        }
        self.started = true;
        let label = self.digits.iter().map(|&d| self.symbols[d]).collect();
        Some((label, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<I: ExactSizeIterator> ExactSizeIterator for Labels<'_, I> {}

impl<I: FusedIterator> FusedIterator for Labels<'_, I> {}
