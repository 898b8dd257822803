//! A pure-Rust library for strided, lazily evaluated `N`-dimensional arrays.
//!
//! An [`Array`] pairs a [`Provider`] with an [`AccessPattern`]. The provider
//! knows how to produce the value at any [`Index`] of its [`Shape`]: it might
//! compute it ([`IndexProvider`]), read it from memory ([`SharedProvider`],
//! [`UniqueProvider`]) or ask several other providers at once
//! ([`ZippedProvider`]). The access pattern selects a strided, half-open
//! region of the provider's index space and maps indices relative to that
//! region onto the provider's own indices. Slicing an `Array` therefore
//! copies nothing; elements are only copied when the array is materialized
//! with [`Array::unique()`] or [`Array::shared()`].
//!
//! The rank `N` is a const generic parameter, so shapes and indices live on
//! the stack and rank mismatches are compile-time errors. The macros
//! [`shape!`], [`index!`] and [`jumps!`] infer `N` from their argument count:
//!
//! ```
//! use ndprovider::{index, jumps, make_array_with, make_unique_provider, shape};
//! use ndprovider::{AccessPattern, ProviderMut};
//! let mut grid = make_unique_provider::<u32, 2>(shape![3, 4]);
//! *grid.at_mut(index![1, 2]) = 7;
//!
//! // Every other column, starting from column 0.
//! let columns = AccessPattern::over(&shape![3, 4]).with_jumps(jumps![1, 2]);
//! let view = make_array_with(&grid, columns);
//! assert_eq!(view[index![1, 1]], 7);
//!
//! let copy = view.unique();
//! assert_eq!(copy.shape(), shape![3, 2]);
//! assert_eq!(copy.provider().data(), [0, 0, 0, 7, 0, 0]);
//! ```
//!
//! Storage capabilities are expressed as traits. Every provider implements
//! [`Provider`]; those backed by memory implement [`ProviderRef`]; only
//! [`UniqueProvider`] implements [`ProviderMut`]. Storage behind a
//! `SharedProvider` is reference-counted and can never be written through.
//!
//! Operations that can fail return [`Result`] with an [`Error`] describing
//! the misuse. Materialization emits `log` records at trace level; install
//! any `log` implementation to see them.

mod error;
pub use error::{Error, Result};

pub mod range;

mod sequence;
pub use sequence::{Sequence, Shape, Index, Jumps, MemoryStrides};

mod pattern;
pub use pattern::{AccessPattern, Indices};

mod buffer;
pub use buffer::{Buffer};

mod provider;
pub use provider::{Provider, ProviderRef, ProviderMut, IndexProvider, SharedProvider, UniqueProvider};
pub use provider::{evaluate_as_unique, evaluate_as_shared, evaluate_whole_as_unique, evaluate_whole_as_shared};

mod zipped;
pub use zipped::{ZippedProvider, ZipMembers, zip_arrays};

mod array;
pub use array::{Array};

mod new;
pub use new::{
    make_shape, make_index, make_jumps,
    make_uniform_shape, make_uniform_index, make_uniform_jumps,
    make_strides_row_major, make_access_pattern, make_access_pattern_to,
    make_index_provider, make_shared_provider, make_unique_provider,
    make_array, make_array_with,
};
