//! Strategies for producing the value at an [`Index`].
//!
//! A provider knows its [`Shape`] and can map any `Index` inside it to a
//! value. What it does not know is which indices anyone will ask for, or in
//! what order; that is the business of an [`AccessPattern`].
//!
//! Capabilities are layered as traits:
//!
//! - [`Provider`]: compute or clone the value at an index. Everything
//!   implements this.
//! - [`ProviderRef`]: borrow the value at an index. Implemented by providers
//!   backed by memory.
//! - [`ProviderMut`]: mutably borrow the value at an index. Implemented only
//!   by [`UniqueProvider`], the one provider whose storage is never shared.
//!
//! [`SharedProvider`] implements `ProviderRef` but not `ProviderMut`, so no
//! array built on shared storage can write through it.

use std::rc::{Rc};

use super::range::{zip};
use super::{AccessPattern, Buffer, Error, Index, MemoryStrides, Result, Shape};

/// Implemented by types that behave like an `N`-dimensional collection of
/// `Self::Value`s, whether computed on demand or stored.
///
/// If `P` implements `Provider<N>` then so does `&P`, so arrays can be built
/// over borrowed providers as well as owned ones.
pub trait Provider<const N: usize> {
    /// The element type.
    type Value: Clone;

    /// The extent of the index space along each axis.
    fn shape(&self) -> Shape<N>;

    /// The number of elements, i.e. the product of [`shape()`].
    ///
    /// [`shape()`]: Self::shape()
    fn size(&self) -> usize { self.shape().size() }

    /// Compute the element at `index`.
    ///
    /// May panic if `index` is not contained in [`shape()`].
    ///
    /// [`shape()`]: Self::shape()
    fn at(&self, index: Index<N>) -> Self::Value;
}

/// Implemented by [`Provider`]s whose elements live in memory.
pub trait ProviderRef<const N: usize>: Provider<N> {
    /// Borrow the element at `index`.
    fn at_ref(&self, index: Index<N>) -> &Self::Value;
}

/// Implemented by [`Provider`]s that own their elements exclusively.
pub trait ProviderMut<const N: usize>: ProviderRef<N> {
    /// Mutably borrow the element at `index`.
    fn at_mut(&mut self, index: Index<N>) -> &mut Self::Value;
}

impl<const N: usize, P: Provider<N>> Provider<N> for &P {
    type Value = P::Value;
    #[inline(always)]
    fn shape(&self) -> Shape<N> { P::shape(self) }
    #[inline(always)]
    fn at(&self, index: Index<N>) -> Self::Value { P::at(self, index) }
}

impl<const N: usize, P: ProviderRef<N>> ProviderRef<N> for &P {
    #[inline(always)]
    fn at_ref(&self, index: Index<N>) -> &Self::Value { P::at_ref(self, index) }
}

fn check_sizes<const N: usize>(shape: &Shape<N>, buffer_size: usize) -> Result<()> {
    let shape_size = shape.size();
    if shape_size != buffer_size {
        log::debug!("rejecting buffer of {} elements for {:?}", buffer_size, shape);
        return Err(Error::ShapeMismatch {shape_size, buffer_size});
    }
    Ok(())
}

// ----------------------------------------------------------------------------

/// A [`Provider`] whose value at each index is the index itself.
///
/// ```
/// use ndprovider::{index, shape, IndexProvider, Provider};
/// let p = IndexProvider::new(shape![2, 3]);
/// assert_eq!(p.at(index![1, 2]), index![1, 2]);
/// assert_eq!(p.size(), 6);
/// ```
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct IndexProvider<const N: usize> {
    shape: Shape<N>,
}

impl<const N: usize> IndexProvider<N> {
    pub fn new(shape: Shape<N>) -> Self { Self {shape} }
}

impl<const N: usize> Provider<N> for IndexProvider<N> {
    type Value = Index<N>;
    #[inline(always)]
    fn shape(&self) -> Shape<N> { self.shape }
    #[inline(always)]
    fn at(&self, index: Index<N>) -> Index<N> { index }
}

// ----------------------------------------------------------------------------

/// A read-only [`Provider`] over a reference-counted [`Buffer`], laid out in
/// row-major order.
///
/// Any number of `SharedProvider`s may share one `Buffer`. None of them can
/// modify it.
#[derive(Debug)]
pub struct SharedProvider<const N: usize, T> {
    shape: Shape<N>,
    strides: MemoryStrides<N>,
    buffer: Rc<Buffer<T>>,
}

impl<const N: usize, T> SharedProvider<N, T> {
    /// Fails with [`Error::ShapeMismatch`] unless `buffer` holds exactly
    /// `shape.size()` elements.
    ///
    /// ```
    /// use std::rc::Rc;
    /// use ndprovider::{shape, Buffer, Error, SharedProvider};
    /// let buffer = Rc::new(Buffer::filled(6, 0.0));
    /// assert!(SharedProvider::new(shape![2, 3], buffer.clone()).is_ok());
    /// assert_eq!(
    ///     SharedProvider::new(shape![4, 4], buffer).unwrap_err(),
    ///     Error::ShapeMismatch { shape_size: 16, buffer_size: 6 },
    /// );
    /// ```
    pub fn new(shape: Shape<N>, buffer: Rc<Buffer<T>>) -> Result<Self> {
        check_sizes(&shape, buffer.len())?;
        Ok(Self::from_parts(shape, buffer))
    }

    pub(crate) fn from_parts(shape: Shape<N>, buffer: Rc<Buffer<T>>) -> Self {
        Self {shape, strides: MemoryStrides::row_major(&shape), buffer}
    }

    /// The elements in row-major order.
    pub fn data(&self) -> &[T] { self.buffer.as_slice() }

    /// The shared storage.
    pub fn buffer(&self) -> &Rc<Buffer<T>> { &self.buffer }
}

impl<const N: usize, T> Clone for SharedProvider<N, T> {
    fn clone(&self) -> Self {
        Self {shape: self.shape, strides: self.strides, buffer: Rc::clone(&self.buffer)}
    }
}

impl<const N: usize, T: Clone> Provider<N> for SharedProvider<N, T> {
    type Value = T;
    #[inline(always)]
    fn shape(&self) -> Shape<N> { self.shape }
    #[inline(always)]
    fn at(&self, index: Index<N>) -> T { self.at_ref(index).clone() }
}

impl<const N: usize, T: Clone> ProviderRef<N> for SharedProvider<N, T> {
    #[inline(always)]
    fn at_ref(&self, index: Index<N>) -> &T { &self.buffer[self.strides.compute_offset(&index)] }
}

// ----------------------------------------------------------------------------

/// A read-write [`Provider`] that exclusively owns its [`Buffer`], laid out in
/// row-major order.
///
/// Cloning a `UniqueProvider` clones its elements.
///
/// ```
/// use ndprovider::{index, make_unique_provider, Provider, ProviderMut};
/// let mut p = make_unique_provider::<i32, 2>([2, 2].into());
/// *p.at_mut(index![1, 0]) = 7;
/// assert_eq!(p.data(), [0, 0, 7, 0]);
/// let s = p.into_shared();
/// assert_eq!(s.at(index![1, 0]), 7);
/// ```
#[derive(Debug, Clone)]
pub struct UniqueProvider<const N: usize, T> {
    shape: Shape<N>,
    strides: MemoryStrides<N>,
    buffer: Buffer<T>,
}

impl<const N: usize, T> UniqueProvider<N, T> {
    /// Fails with [`Error::ShapeMismatch`] unless `buffer` holds exactly
    /// `shape.size()` elements.
    pub fn new(shape: Shape<N>, buffer: Buffer<T>) -> Result<Self> {
        check_sizes(&shape, buffer.len())?;
        Ok(Self::from_parts(shape, buffer))
    }

    pub(crate) fn from_parts(shape: Shape<N>, buffer: Buffer<T>) -> Self {
        Self {shape, strides: MemoryStrides::row_major(&shape), buffer}
    }

    /// Copies the elements into new shared storage. `self` is unaffected.
    pub fn to_shared(&self) -> SharedProvider<N, T> where T: Clone {
        log::debug!("copying {} elements into shared storage", self.buffer.len());
        SharedProvider::from_parts(self.shape, Rc::new(self.buffer.clone()))
    }

    /// Moves the elements into shared storage without copying them.
    pub fn into_shared(self) -> SharedProvider<N, T> {
        SharedProvider::from_parts(self.shape, Rc::new(self.buffer))
    }

    /// The elements in row-major order.
    pub fn data(&self) -> &[T] { self.buffer.as_slice() }

    pub fn data_mut(&mut self) -> &mut [T] { self.buffer.as_mut_slice() }

    pub fn into_buffer(self) -> Buffer<T> { self.buffer }
}

impl<const N: usize, T: Clone> Provider<N> for UniqueProvider<N, T> {
    type Value = T;
    #[inline(always)]
    fn shape(&self) -> Shape<N> { self.shape }
    #[inline(always)]
    fn at(&self, index: Index<N>) -> T { self.at_ref(index).clone() }
}

impl<const N: usize, T: Clone> ProviderRef<N> for UniqueProvider<N, T> {
    #[inline(always)]
    fn at_ref(&self, index: Index<N>) -> &T { &self.buffer[self.strides.compute_offset(&index)] }
}

impl<const N: usize, T: Clone> ProviderMut<N> for UniqueProvider<N, T> {
    #[inline(always)]
    fn at_mut(&mut self, index: Index<N>) -> &mut T {
        let offset = self.strides.compute_offset(&index);
        &mut self.buffer[offset]
    }
}

// ----------------------------------------------------------------------------

/// Copies the region of `source` selected by `accessor` into new storage.
///
/// The result has shape `accessor.shape()`. Elements are read once each, in
/// row-major order of the region, and written to the corresponding position
/// of the result. If the region visits more indices than its shape counts,
/// the extra ones are ignored.
///
/// ```
/// use ndprovider::{evaluate_as_unique, index, jumps, shape, AccessPattern, IndexProvider};
/// let source = IndexProvider::new(shape![4, 4]);
/// let every_other = AccessPattern::over(&shape![4, 4]).with_jumps(jumps![2, 2]);
/// let p = evaluate_as_unique(&source, &every_other);
/// assert_eq!(p.data(), [index![0, 0], index![0, 2], index![2, 0], index![2, 2]]);
/// ```
pub fn evaluate_as_unique<const N: usize, P: Provider<N>>(
    source: &P,
    accessor: &AccessPattern<N>,
) -> UniqueProvider<N, P::Value> where
    P::Value: Default,
{
    let target_shape = accessor.shape();
    let target_accessor = AccessPattern::over(&target_shape);
    log::trace!("materializing {:?} ({} elements)", target_shape, target_shape.size());
    let mut target = UniqueProvider::from_parts(
        target_shape,
        Buffer::filled(target_shape.size(), P::Value::default()),
    );
    for (target_index, source_index) in zip((target_accessor, accessor)) {
        *target.at_mut(target_index) = source.at(source_index);
    }
    target
}

/// Like [`evaluate_as_unique()`], but returns shared storage. The elements
/// are not copied a second time.
pub fn evaluate_as_shared<const N: usize, P: Provider<N>>(
    source: &P,
    accessor: &AccessPattern<N>,
) -> SharedProvider<N, P::Value> where
    P::Value: Default,
{
    evaluate_as_unique(source, accessor).into_shared()
}

/// Copies the whole of `source` into new storage.
pub fn evaluate_whole_as_unique<const N: usize, P: Provider<N>>(
    source: &P,
) -> UniqueProvider<N, P::Value> where
    P::Value: Default,
{
    evaluate_as_unique(source, &AccessPattern::over(&source.shape()))
}

/// Copies the whole of `source` into new shared storage.
pub fn evaluate_whole_as_shared<const N: usize, P: Provider<N>>(
    source: &P,
) -> SharedProvider<N, P::Value> where
    P::Value: Default,
{
    evaluate_whole_as_unique(source).into_shared()
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::Jumps;

    fn counting(shape: Shape<2>) -> UniqueProvider<2, usize> {
        UniqueProvider::new(shape, (0..shape.size()).collect()).unwrap()
    }

    #[test]
    fn sizes_must_agree() {
        let shape = Shape::new([2, 3]);
        assert!(UniqueProvider::new(shape, Buffer::filled(6, 0u8)).is_ok());
        assert_eq!(
            UniqueProvider::new(shape, Buffer::filled(5, 0u8)).unwrap_err(),
            Error::ShapeMismatch { shape_size: 6, buffer_size: 5 },
        );
        assert_eq!(
            SharedProvider::new(shape, Rc::new(Buffer::filled(7, 0u8))).unwrap_err(),
            Error::ShapeMismatch { shape_size: 6, buffer_size: 7 },
        );
    }

    #[test]
    fn row_major_lookup() {
        let p = counting(Shape::new([2, 3]));
        assert_eq!(p.shape(), Shape::new([2, 3]));
        assert_eq!(p.size(), 6);
        assert_eq!(p.at(Index::new([0, 2])), 2);
        assert_eq!(p.at(Index::new([1, 0])), 3);
        assert_eq!(*p.at_ref(Index::new([1, 2])), 5);
    }

    #[test]
    fn unique_is_writable() {
        let mut p = counting(Shape::new([2, 2]));
        *p.at_mut(Index::new([0, 1])) = 10;
        assert_eq!(p.data(), [0, 10, 2, 3]);
        p.data_mut()[3] = 30;
        assert_eq!(p.at(Index::new([1, 1])), 30);
        assert_eq!(p.into_buffer().as_slice(), [0, 10, 2, 30]);
    }

    #[test]
    fn clone_of_unique_is_independent() {
        let a = counting(Shape::new([1, 2]));
        let mut b = a.clone();
        *b.at_mut(Index::new([0, 0])) = 99;
        assert_eq!(a.data(), [0, 1]);
        assert_eq!(b.data(), [99, 1]);
    }

    #[test]
    fn to_shared_copies_into_shared_moves() {
        let mut p = counting(Shape::new([1, 3]));
        let copied = p.to_shared();
        *p.at_mut(Index::new([0, 0])) = 7;
        assert_eq!(copied.data(), [0, 1, 2]);
        let moved = p.into_shared();
        assert_eq!(moved.data(), [7, 1, 2]);
        assert_eq!(Rc::strong_count(moved.buffer()), 1);
    }

    #[test]
    fn shared_providers_share_one_buffer() {
        let a = counting(Shape::new([2, 2])).into_shared();
        let b = a.clone();
        assert!(Rc::ptr_eq(a.buffer(), b.buffer()));
        assert_eq!(Rc::strong_count(a.buffer()), 2);
        assert_eq!(b.at(Index::new([1, 1])), 3);
    }

    #[test]
    fn index_provider_is_identity() {
        let p = IndexProvider::new(Shape::new([3, 3]));
        for i in AccessPattern::over(&p.shape()) {
            assert_eq!(p.at(i), i);
        }
    }

    #[test]
    fn materialize_slice() {
        let source = counting(Shape::new([3, 4]));
        let accessor = AccessPattern::new(Index::new([1, 1]), Index::new([3, 4]), Jumps::new([1, 2]));
        let target = evaluate_as_unique(&source, &accessor);
        assert_eq!(target.shape(), Shape::new([2, 2]));
        assert_eq!(target.data(), [5, 7, 9, 11]);
    }

    #[test]
    fn materialize_ignores_indices_beyond_shape() {
        // 7/2 - 0/2 = 3, but 0, 2, 4 and 6 are all visited.
        let source = UniqueProvider::new(Shape::new([7]), (10..17).collect()).unwrap();
        let accessor = AccessPattern::new(Index::new([0]), Index::new([7]), Jumps::new([2]));
        let target = evaluate_as_unique(&source, &accessor);
        assert_eq!(target.data(), [10, 12, 14]);
    }

    #[test]
    fn materialize_whole_is_a_copy() {
        let source = counting(Shape::new([2, 3]));
        let copy = evaluate_whole_as_unique(&source);
        assert_eq!(copy.data(), source.data());
        let shared = evaluate_whole_as_shared(&copy);
        assert_eq!(shared.data(), source.data());
        let twice = evaluate_whole_as_unique(&evaluate_whole_as_unique(&source));
        assert_eq!(twice.data(), source.data());
    }

    #[test]
    fn materialize_through_reference() {
        let source = IndexProvider::new(Shape::new([2]));
        let shared = evaluate_as_shared(&&source, &AccessPattern::over(&Shape::new([2])));
        assert_eq!(shared.data(), [Index::new([0]), Index::new([1])]);
    }
}
