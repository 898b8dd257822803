//! Factory functions and macros.
//!
//! The macros build sequences whose rank is the number of arguments:
//!
//! ```
//! use ndprovider::{index, jumps, shape, Index, Jumps, Shape};
//! let s: Shape<3> = shape![2, 3, 4];
//! let i: Index<2> = index![1, 0];
//! let j: Jumps<1> = jumps![-1];
//! assert_eq!(s.size(), 24);
//! ```
//!
//! The functions take arrays, so the rank is again inferred from the
//! argument. Provider factories take a [`Shape`]; pass the extents inline
//! with the macro to build the shape at the call site:
//!
//! ```
//! use ndprovider::{make_index_provider, make_unique_provider, shape, Provider};
//! let p = make_unique_provider::<f32, 3>(shape![2, 2, 5]);
//! assert_eq!(p.size(), 20);
//! assert_eq!(make_index_provider(shape![4, 1]).shape(), shape![4, 1]);
//! ```

use std::rc::{Rc};

use super::{
    AccessPattern, Array, Buffer, Index, IndexProvider, Jumps, MemoryStrides, Provider, Shape,
    SharedProvider, UniqueProvider,
};

/// Builds a [`Shape`] from its extents.
///
/// [`Shape`]: crate::Shape
#[macro_export]
macro_rules! shape {
    ($($x:expr),* $(,)?) => { $crate::Shape::new([$($x as usize),*]) };
}

/// Builds an [`Index`] from its components.
///
/// [`Index`]: crate::Index
#[macro_export]
macro_rules! index {
    ($($x:expr),* $(,)?) => { $crate::Index::new([$($x as usize),*]) };
}

/// Builds a [`Jumps`] from its components.
///
/// [`Jumps`]: crate::Jumps
#[macro_export]
macro_rules! jumps {
    ($($x:expr),* $(,)?) => { $crate::Jumps::new([$($x as isize),*]) };
}

// ----------------------------------------------------------------------------

pub fn make_shape<const N: usize>(extents: [usize; N]) -> Shape<N> { Shape::new(extents) }

pub fn make_index<const N: usize>(components: [usize; N]) -> Index<N> { Index::new(components) }

pub fn make_jumps<const N: usize>(components: [isize; N]) -> Jumps<N> { Jumps::new(components) }

/// A rank-`N` [`Shape`] with every extent equal to `extent`.
pub fn make_uniform_shape<const N: usize>(extent: usize) -> Shape<N> { Shape::uniform(extent) }

pub fn make_uniform_index<const N: usize>(component: usize) -> Index<N> { Index::uniform(component) }

pub fn make_uniform_jumps<const N: usize>(component: isize) -> Jumps<N> { Jumps::uniform(component) }

/// Row-major strides for `shape`. See [`MemoryStrides::row_major()`].
pub fn make_strides_row_major<const N: usize>(shape: &Shape<N>) -> MemoryStrides<N> {
    MemoryStrides::row_major(shape)
}

/// The identity [`AccessPattern`] over `shape`.
pub fn make_access_pattern<const N: usize>(shape: &Shape<N>) -> AccessPattern<N> {
    AccessPattern::over(shape)
}

/// An [`AccessPattern`] from the origin up to `stop`, with unit jumps.
///
/// ```
/// use ndprovider::{make_access_pattern_to, index, shape};
/// assert_eq!(make_access_pattern_to(index![2, 3]).shape(), shape![2, 3]);
/// ```
pub fn make_access_pattern_to<const N: usize>(stop: Index<N>) -> AccessPattern<N> {
    AccessPattern::default().with_stop(stop)
}

pub fn make_index_provider<const N: usize>(shape: Shape<N>) -> IndexProvider<N> {
    IndexProvider::new(shape)
}

/// A [`SharedProvider`] of shape `shape` with every element set to
/// `T::default()`.
pub fn make_shared_provider<T: Clone + Default, const N: usize>(shape: Shape<N>) -> SharedProvider<N, T> {
    SharedProvider::from_parts(shape, Rc::new(Buffer::filled(shape.size(), T::default())))
}

/// A [`UniqueProvider`] of shape `shape` with every element set to
/// `T::default()`.
pub fn make_unique_provider<T: Clone + Default, const N: usize>(shape: Shape<N>) -> UniqueProvider<N, T> {
    UniqueProvider::from_parts(shape, Buffer::filled(shape.size(), T::default()))
}

/// An [`Array`] covering all of `provider`.
pub fn make_array<const N: usize, P: Provider<N>>(provider: P) -> Array<N, P> {
    Array::from_provider(provider)
}

/// An [`Array`] that sees `provider` through `accessor`.
pub fn make_array_with<const N: usize, P: Provider<N>>(provider: P, accessor: AccessPattern<N>) -> Array<N, P> {
    Array::new(provider, accessor)
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros_infer_rank() {
        let s = shape![2, 3];
        assert_eq!(s.rank(), 2);
        assert_eq!(s, make_shape([2, 3]));
        assert_eq!(index![4, 5, 6], make_index([4, 5, 6]));
        assert_eq!(jumps![1, -2], make_jumps([1, -2]));
        assert_eq!(shape![], Shape::<0>::new([]));
        let n: u32 = 7;
        assert_eq!(index![n, 1], Index::new([7, 1]));
    }

    #[test]
    fn uniform() {
        assert_eq!(make_uniform_shape::<3>(2), shape![2, 2, 2]);
        assert_eq!(make_uniform_index::<2>(0), Index::default());
        assert_eq!(make_uniform_jumps::<2>(1), Jumps::default());
    }

    #[test]
    fn patterns() {
        let shape = shape![2, 3];
        assert_eq!(make_strides_row_major(&shape), MemoryStrides::new([3, 1]));
        let p = make_access_pattern(&shape);
        assert_eq!(p.start(), index![0, 0]);
        assert_eq!(p.stop(), index![2, 3]);
        assert_eq!(p.jumps(), jumps![1, 1]);
        assert_eq!(p, make_access_pattern_to(index![2, 3]));
    }

    #[test]
    fn providers_are_default_filled() {
        let s = make_shared_provider::<f64, 2>(shape![2, 2]);
        assert_eq!(s.data(), [0.0; 4]);
        let u = make_unique_provider::<String, 1>(shape![3]);
        assert!(u.data().iter().all(String::is_empty));
        let p = make_index_provider(shape![5]);
        assert_eq!(p.at(index![3]), index![3]);
    }

    #[test]
    fn arrays() {
        let a = make_array(make_index_provider(shape![3, 3]));
        assert_eq!(*a.accessor(), make_access_pattern(&shape![3, 3]));
        let b = make_array_with(make_index_provider(shape![3, 3]), make_access_pattern_to(index![1, 1]));
        assert_eq!(b.unique().size(), 1);
    }
}
