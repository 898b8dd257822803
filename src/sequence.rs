//! Fixed-length sequences used for shapes, indices, jumps and strides.
//!
//! [`Sequence<T, N>`] holds exactly `N` values of `T` by value. The four
//! public wrappers [`Shape`], [`Index`], [`Jumps`] and [`MemoryStrides`] are
//! distinct types so they cannot be mixed up, but each derefs to its
//! `Sequence` and adds only the one or two methods that make it what it is.

use std::fmt::{self, Debug};
use std::ops::{Deref, DerefMut};

use super::range::{all, any, reduce, transform, zip};
use super::{Error, Result};

/// Exactly `N` values of `T`.
///
/// Equality is elementwise. Copying a `Sequence` copies its elements.
#[derive(Copy, Clone, Hash)]
pub struct Sequence<T, const N: usize>([T; N]);

impl<T: Copy, const N: usize> Sequence<T, N> {
    pub const fn new(items: [T; N]) -> Self { Self(items) }

    /// Returns a `Sequence` with every element equal to `value`.
    pub fn uniform(value: T) -> Self { Self([value; N]) }

    /// Copies `items`, failing unless there are exactly `N` of them.
    pub fn from_slice(items: &[T]) -> Result<Self> {
        <[T; N]>::try_from(items)
            .map(Self)
            .map_err(|_| Error::WrongLength { expected: N, got: items.len() })
    }

    /// Collects `items`, failing unless there are exactly `N` of them.
    ///
    /// At most `N + 1` items are read, so `got` in the error is capped at
    /// `N + 1`.
    ///
    /// ```
    /// use ndprovider::{Error, Sequence};
    /// let s = Sequence::<u8, 3>::from_iter_exact(1..4).unwrap();
    /// assert_eq!(s.as_array(), &[1, 2, 3]);
    /// assert_eq!(
    ///     Sequence::<u8, 3>::from_iter_exact(1..3),
    ///     Err(Error::WrongLength { expected: 3, got: 2 }),
    /// );
    /// ```
    pub fn from_iter_exact(items: impl IntoIterator<Item=T>) -> Result<Self> {
        let items: Vec<T> = items.into_iter().take(N + 1).collect();
        Self::from_slice(&items)
    }

    /// The number of elements, which is always `N`.
    pub const fn rank(&self) -> usize { N }

    pub fn as_array(&self) -> &[T; N] { &self.0 }

    pub fn into_array(self) -> [T; N] { self.0 }

    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.0.iter() }

    /// The product of the elements. For a [`Shape`] this is the element
    /// count; for rank 0 it is `1`.
    pub fn size(&self) -> T where T: std::iter::Product { self.0.into_iter().product() }
}

impl<T: PartialEq, const N: usize> PartialEq for Sequence<T, N> {
    fn eq(&self, other: &Self) -> bool { all(zip((&self.0, &other.0)), |(a, b)| a == b) }

    #[allow(clippy::partialeq_ne_impl)]
    fn ne(&self, other: &Self) -> bool { any(zip((&self.0, &other.0)), |(a, b)| a != b) }
}

impl<T: Eq, const N: usize> Eq for Sequence<T, N> {}

impl<T: Debug, const N: usize> Debug for Sequence<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T, N> {
    fn from(items: [T; N]) -> Self { Self(items) }
}

impl<T, const N: usize> AsRef<[T]> for Sequence<T, N> {
    fn as_ref(&self) -> &[T] { &self.0 }
}

impl<T, const N: usize> std::ops::Index<usize> for Sequence<T, N> {
    type Output = T;
    #[inline(always)]
    fn index(&self, axis: usize) -> &T { &self.0[axis] }
}

impl<T, const N: usize> std::ops::IndexMut<usize> for Sequence<T, N> {
    #[inline(always)]
    fn index_mut(&mut self, axis: usize) -> &mut T { &mut self.0[axis] }
}

impl<T, const N: usize> IntoIterator for Sequence<T, N> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;
    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a, T, const N: usize> IntoIterator for &'a Sequence<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

// ----------------------------------------------------------------------------

/// Defines a named wrapper around a [`Sequence`] with a fixed element type.
macro_rules! sequence_type {
    ($(#[$attr:meta])* $name:ident($t:ty), default $default:expr) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Hash, PartialEq, Eq)]
        pub struct $name<const N: usize>(Sequence<$t, N>);

        impl<const N: usize> $name<N> {
            pub const fn new(items: [$t; N]) -> Self { Self(Sequence::new(items)) }

            /// Returns a value with every axis set to `value`.
            pub fn uniform(value: $t) -> Self { Self(Sequence::uniform(value)) }

            /// Fails with [`Error::WrongLength`] unless `items.len() == N`.
            pub fn from_slice(items: &[$t]) -> Result<Self> { Sequence::from_slice(items).map(Self) }

            /// Fails with [`Error::WrongLength`] unless `items` yields exactly
            /// `N` values.
            pub fn from_iter_exact(items: impl IntoIterator<Item=$t>) -> Result<Self> {
                Sequence::from_iter_exact(items).map(Self)
            }
        }

        impl<const N: usize> Default for $name<N> {
            fn default() -> Self { Self::uniform($default) }
        }

        impl<const N: usize> Debug for $name<N> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{:?}", stringify!($name), self.0.as_array())
            }
        }

        impl<const N: usize> Deref for $name<N> {
            type Target = Sequence<$t, N>;
            fn deref(&self) -> &Self::Target { &self.0 }
        }

        impl<const N: usize> DerefMut for $name<N> {
            fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
        }

        impl<const N: usize> From<[$t; N]> for $name<N> {
            fn from(items: [$t; N]) -> Self { Self::new(items) }
        }

        impl<const N: usize> std::ops::Index<usize> for $name<N> {
            type Output = $t;
            #[inline(always)]
            fn index(&self, axis: usize) -> &$t { &self.0[axis] }
        }

        impl<const N: usize> std::ops::IndexMut<usize> for $name<N> {
            #[inline(always)]
            fn index_mut(&mut self, axis: usize) -> &mut $t { &mut self.0[axis] }
        }

        impl<const N: usize> IntoIterator for $name<N> {
            type Item = $t;
            type IntoIter = std::array::IntoIter<$t, N>;
            fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
        }

        impl<'a, const N: usize> IntoIterator for &'a $name<N> {
            type Item = &'a $t;
            type IntoIter = std::slice::Iter<'a, $t>;
            fn into_iter(self) -> Self::IntoIter { self.0.iter() }
        }
    };
}

sequence_type! {
    /// The extent of each axis of an index space.
    Shape(usize), default 0
}

sequence_type! {
    /// A position in an index space. An `Index` knows nothing about bounds.
    Index(usize), default 0
}

sequence_type! {
    /// The per-axis step of an [`AccessPattern`]. Defaults to all ones.
    ///
    /// Jumps describe the logical stride of a slice, not the memory layout;
    /// for that see [`MemoryStrides`].
    ///
    /// [`AccessPattern`]: super::AccessPattern
    Jumps(isize), default 1
}

sequence_type! {
    /// The per-axis multipliers that turn an [`Index`] into a linear offset.
    MemoryStrides(usize), default 0
}

impl<const N: usize> Shape<N> {
    /// Returns `true` if every axis of `index` is strictly less than the
    /// corresponding extent.
    ///
    /// ```
    /// use ndprovider::{shape, index};
    /// let s = shape![2, 3];
    /// assert!(s.contains(&index![1, 2]));
    /// assert!(!s.contains(&index![2, 0]));
    /// ```
    pub fn contains(&self, index: &Index<N>) -> bool {
        all(zip((index, self)), |(i, s)| i < s)
    }
}

impl<const N: usize> MemoryStrides<N> {
    /// Canonical row-major strides for `shape`: the last axis is contiguous
    /// and every other stride is the product of the faster-varying extents.
    ///
    /// ```
    /// use ndprovider::{shape, MemoryStrides};
    /// assert_eq!(MemoryStrides::row_major(&shape![2, 3, 4]), MemoryStrides::new([12, 4, 1]));
    /// ```
    pub fn row_major(shape: &Shape<N>) -> Self {
        let mut strides = Self::uniform(0);
        if let Some(last) = N.checked_sub(1) {
            strides[last] = 1;
            for n in (0..last).rev() {
                strides[n] = strides[n + 1] * shape[n + 1];
            }
        }
        strides
    }

    /// Returns the sum over axes of `index[a] * self[a]`.
    pub fn compute_offset(&self, index: &Index<N>) -> usize {
        reduce(transform(zip((index, self)), |(i, s)| i * s), 0, |total, x| total + x)
    }
}

// ----------------------------------------------------------------------------
