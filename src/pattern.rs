use std::iter::{FusedIterator};

use super::range::{any, range, reduce, zip};
use super::{Index, Jumps, Shape};

/// A strided, half-open region of an `N`-dimensional index space.
///
/// Along each axis `a` the region covers `start[a]`, `start[a] + jumps[a]`,
/// and so on, strictly below `stop[a]`. An `AccessPattern` is used two ways:
///
/// - As a sequence: iterating it visits the physical indices of the region in
///   row-major order, last axis fastest.
/// - As a transform: [`map_index()`] turns an index relative to the region
///   into the physical index it stands for.
///
/// Jumps are expected to be positive. A zero jump makes [`shape()`] panic.
///
/// ```
/// use ndprovider::{index, jumps, AccessPattern};
/// let p = AccessPattern::new(index![0, 1], index![2, 6], jumps![1, 2]);
/// let visited: Vec<_> = p.iter().map(|i| i.into_array()).collect();
/// assert_eq!(visited, [[0, 1], [0, 3], [0, 5], [1, 1], [1, 3], [1, 5]]);
/// assert_eq!(p.map_index(&index![1, 2]), index![1, 5]);
/// ```
///
/// [`map_index()`]: Self::map_index()
/// [`shape()`]: Self::shape()
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct AccessPattern<const N: usize> {
    start: Index<N>,
    stop: Index<N>,
    jumps: Jumps<N>,
}

impl<const N: usize> AccessPattern<N> {
    pub fn new(start: Index<N>, stop: Index<N>, jumps: Jumps<N>) -> Self {
        Self {start, stop, jumps}
    }

    /// The identity pattern covering all of `shape` with unit jumps.
    pub fn over(shape: &Shape<N>) -> Self {
        Self::default().with_stop(Index::new(shape.into_array()))
    }

    pub fn start(&self) -> Index<N> { self.start }

    /// The exclusive upper bound. This is also where iteration parks once
    /// the region is exhausted.
    pub fn stop(&self) -> Index<N> { self.stop }

    pub fn jumps(&self) -> Jumps<N> { self.jumps }

    pub fn with_start(&self, start: Index<N>) -> Self { Self {start, ..*self} }

    pub fn with_stop(&self, stop: Index<N>) -> Self { Self {stop, ..*self} }

    pub fn with_jumps(&self, jumps: Jumps<N>) -> Self { Self {jumps, ..*self} }

    /// The number of visitable indices along each axis:
    /// `stop[a] / jumps[a] - start[a] / jumps[a]` with floor division,
    /// clamped at zero.
    ///
    /// ```
    /// use ndprovider::{index, jumps, shape, AccessPattern};
    /// let p = AccessPattern::new(index![1], index![10], jumps![3]);
    /// assert_eq!(p.shape(), shape![3]);
    /// ```
    pub fn shape(&self) -> Shape<N> {
        let mut shape = Shape::default();
        for a in range(N) {
            // i128 holds every usize, so no bound is truncated.
            let jump = self.jumps[a] as i128;
            let extent = (self.stop[a] as i128).div_euclid(jump) - (self.start[a] as i128).div_euclid(jump);
            shape[a] = usize::try_from(extent.max(0)).unwrap_or(usize::MAX);
        }
        shape
    }

    pub fn size(&self) -> usize { reduce(self.shape(), 1, |total, s| total * s) }

    /// Returns `true` if some axis of [`shape()`] is zero.
    ///
    /// [`shape()`]: Self::shape()
    pub fn is_empty(&self) -> bool { any(self.shape(), |s| s == 0) }

    /// Returns `start + jumps * index`, elementwise.
    #[inline(always)]
    pub fn map_index(&self, index: &Index<N>) -> Index<N> {
        let mut result = Index::default();
        for (a, i) in zip((range(N), index)) {
            result[a] = self.start[a].wrapping_add_signed(self.jumps[a] * (*i as isize));
        }
        result
    }

    /// Returns `true` if `index` lies within [`shape()`], i.e. if it is a
    /// valid argument to [`map_index()`].
    ///
    /// [`shape()`]: Self::shape()
    /// [`map_index()`]: Self::map_index()
    pub fn contains(&self, index: &Index<N>) -> bool { self.shape().contains(index) }

    /// Steps `index` to the next index of the region, odometer-style.
    ///
    /// The last axis advances by its jump. Any axis that reaches its `stop`
    /// resets to its `start` and carries into the axis before it. When the
    /// carry runs off axis `0`, `index` is set to `stop` and this returns
    /// `false`.
    pub fn advance(&self, index: &mut Index<N>) -> bool {
        let Some(mut n) = N.checked_sub(1) else {
            *index = self.stop;
            return false;
        };
        index[n] = index[n].wrapping_add_signed(self.jumps[n]);
        while index[n] >= self.stop[n] {
            if n == 0 {
                *index = self.stop;
                return false;
            }
            index[n] = self.start[n];
            n -= 1;
            index[n] = index[n].wrapping_add_signed(self.jumps[n]);
        }
        true
    }

    /// Iterates over the physical indices of the region.
    ///
    /// Iteration begins at `start` unless some axis has `start >= stop`, in
    /// which case nothing is visited.
    pub fn iter(&self) -> Indices<N> {
        let is_open = zip((&self.start, &self.stop)).all(|(b, e)| b < e);
        Indices {pattern: *self, current: is_open.then_some(self.start)}
    }
}

impl<const N: usize> IntoIterator for AccessPattern<N> {
    type Item = Index<N>;
    type IntoIter = Indices<N>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<const N: usize> IntoIterator for &AccessPattern<N> {
    type Item = Index<N>;
    type IntoIter = Indices<N>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

// ----------------------------------------------------------------------------

/// The return type of [`AccessPattern::iter()`].
#[derive(Debug, Clone)]
pub struct Indices<const N: usize> {
    pattern: AccessPattern<N>,
    current: Option<Index<N>>,
}

impl<const N: usize> Iterator for Indices<N> {
    type Item = Index<N>;

    fn next(&mut self) -> Option<Index<N>> {
        let index = self.current?;
        let mut next = index;
        self.current = self.pattern.advance(&mut next).then_some(next);
        Some(index)
    }
}

impl<const N: usize> FusedIterator for Indices<N> {}

// ----------------------------------------------------------------------------
