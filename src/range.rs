//! Generic sequence algorithms with no knowledge of arrays.
//!
//! These are thin and lazy. [`zip()`] takes a tuple of sequences and yields
//! tuples of their items, which is how [`Sequence`] equality, stride offsets
//! and materialization walk several sequences in lockstep without being
//! written out once per rank.
//!
//! [`Sequence`]: super::Sequence

/// Returns a restartable sequence of the integers `0..count`.
///
/// ```
/// use ndprovider::range::range;
/// let r = range(3);
/// assert_eq!(r.into_iter().collect::<Vec<_>>(), [0, 1, 2]);
/// assert_eq!(r.into_iter().sum::<usize>(), 3);
/// ```
pub fn range(count: usize) -> Range { Range(count) }

/// The return type of [`range()`].
///
/// `Range` is `Copy`, so iterating it does not consume it.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Range(usize);

impl Range {
    pub fn len(&self) -> usize { self.0 }

    pub fn is_empty(&self) -> bool { self.0 == 0 }
}

impl IntoIterator for Range {
    type Item = usize;
    type IntoIter = std::ops::Range<usize>;
    fn into_iter(self) -> Self::IntoIter { 0..self.0 }
}

// ----------------------------------------------------------------------------

/// Implemented by tuples of sequences that [`zip()`] accepts.
pub trait IntoZip {
    /// The tuple of iterators that the zip advances.
    type Cursors;

    fn into_cursors(self) -> Self::Cursors;
}

/// The return type of [`zip()`] and [`enumerate()`].
#[derive(Debug, Clone)]
pub struct Zip<C>(C);

/// Walks every sequence in `sequences` in lockstep, yielding a tuple of one
/// item from each.
///
/// The zip ends as soon as any constituent runs out. Callers that need every
/// item of every sequence must pass sequences of equal length.
///
/// ```
/// use ndprovider::range::{range, zip};
/// let pairs: Vec<_> = zip((range(3), ["a", "b", "c"])).collect();
/// assert_eq!(pairs, [(0, "a"), (1, "b"), (2, "c")]);
/// ```
pub fn zip<S: IntoZip>(sequences: S) -> Zip<S::Cursors> { Zip(sequences.into_cursors()) }

macro_rules! impl_zip {
    ($($s:ident),+) => {
        impl<$($s: IntoIterator),+> IntoZip for ($($s,)+) {
            type Cursors = ($($s::IntoIter,)+);

            #[allow(non_snake_case)]
            fn into_cursors(self) -> Self::Cursors {
                let ($($s,)+) = self;
                ($($s.into_iter(),)+)
            }
        }

        impl<$($s: Iterator),+> Iterator for Zip<($($s,)+)> {
            type Item = ($($s::Item,)+);

            #[allow(non_snake_case)]
            #[inline(always)]
            fn next(&mut self) -> Option<Self::Item> {
                let ($($s,)+) = &mut self.0;
                Some(($($s.next()?,)+))
            }
        }
    };
}

impl_zip!(A);
impl_zip!(A, B);
impl_zip!(A, B, C);
impl_zip!(A, B, C, D);

// ----------------------------------------------------------------------------

/// Pairs each item of `sequence` with its position, i.e.
/// `zip((range(distance(sequence)), sequence))`.
///
/// ```
/// use ndprovider::range::enumerate;
/// let items: Vec<_> = enumerate(["x", "y"]).collect();
/// assert_eq!(items, [(0, "x"), (1, "y")]);
/// ```
pub fn enumerate<S>(sequence: S) -> Zip<(std::ops::Range<usize>, S::IntoIter)> where
    S: IntoIterator,
    S::IntoIter: Clone,
{
    let cursor = sequence.into_iter();
    zip((range(distance(cursor.clone())), cursor))
}

/// Folds `f` over `sequence`, starting from `seed`.
pub fn reduce<S: IntoIterator, A>(sequence: S, seed: A, f: impl FnMut(A, S::Item) -> A) -> A {
    sequence.into_iter().fold(seed, f)
}

/// Returns `true` if `pred` holds for every item. Short-circuits.
pub fn all<S: IntoIterator>(sequence: S, pred: impl FnMut(S::Item) -> bool) -> bool {
    sequence.into_iter().all(pred)
}

/// Returns `true` if `pred` holds for some item. Short-circuits.
pub fn any<S: IntoIterator>(sequence: S, pred: impl FnMut(S::Item) -> bool) -> bool {
    sequence.into_iter().any(pred)
}

/// The number of items in `sequence`.
pub fn distance<S: IntoIterator>(sequence: S) -> usize {
    sequence.into_iter().count()
}

/// Lazily applies `f` to each item of `sequence`.
pub fn transform<S: IntoIterator, U, F>(sequence: S, f: F) -> std::iter::Map<S::IntoIter, F> where
    F: FnMut(S::Item) -> U,
{
    sequence.into_iter().map(f)
}

// ----------------------------------------------------------------------------
