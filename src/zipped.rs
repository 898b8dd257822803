use super::{Error, Index, Provider, Result, Shape};

/// A [`Provider`] whose value at each index is a tuple of the values of its
/// members at that index.
///
/// Construct one with [`zip_arrays()`]. All members have the same shape.
#[derive(Debug, Copy, Clone)]
pub struct ZippedProvider<const N: usize, M> {
    shape: Shape<N>,
    members: M,
}

impl<const N: usize, M> ZippedProvider<N, M> {
    /// The zipped providers, in the order they were given.
    ///
    /// ```
    /// use ndprovider::{shape, zip_arrays, IndexProvider, Provider};
    /// let z = zip_arrays((IndexProvider::new(shape![3]), IndexProvider::new(shape![3]))).unwrap();
    /// assert_eq!(z.members().1.shape(), shape![3]);
    /// ```
    pub fn members(&self) -> &M { &self.members }

    pub fn into_members(self) -> M { self.members }
}

/// Implemented by tuples of [`Provider`]s (up to four) that can be zipped.
pub trait ZipMembers<const N: usize> {
    /// Returns the shape shared by every member, or
    /// [`Error::ZipShapeMismatch`] naming the first member that differs
    /// from member `0`.
    fn common_shape(&self) -> Result<Shape<N>>;
}

/// Zips `members` into a single [`Provider`] of tuples.
///
/// `members` is a tuple of arrays or other providers, owned or borrowed.
/// Fails with [`Error::ZipShapeMismatch`] if their shapes differ.
///
/// ```
/// use ndprovider::{index, make_array, make_shared_provider, shape, zip_arrays, Provider};
/// let a = make_array(make_shared_provider::<i32, 2>(shape![2, 2]));
/// let b = make_array(make_shared_provider::<f32, 2>(shape![2, 2]));
/// let z = zip_arrays((&a, &b)).unwrap();
/// assert_eq!(z.at(index![0, 1]), (0, 0.0));
///
/// let c = make_array(make_shared_provider::<u8, 2>(shape![2, 3]));
/// assert!(zip_arrays((&a, &c)).is_err());
/// ```
pub fn zip_arrays<const N: usize, M: ZipMembers<N>>(members: M) -> Result<ZippedProvider<N, M>> {
    let shape = members.common_shape()?;
    Ok(ZippedProvider {shape, members})
}

fn mismatch<const N: usize>(member: usize, expected: Shape<N>, got: Shape<N>) -> Error {
    Error::ZipShapeMismatch {
        member,
        expected: expected.into_iter().collect(),
        got: got.into_iter().collect(),
    }
}

macro_rules! impl_zipped {
    ($($m:ident $i:tt),+) => {
        impl<const N: usize, $($m: Provider<N>),+> ZipMembers<N> for ($($m,)+) {
            fn common_shape(&self) -> Result<Shape<N>> {
                let expected = self.0.shape();
                $(
                    let got = self.$i.shape();
                    if got != expected { return Err(mismatch($i, expected, got)); }
                )+
                Ok(expected)
            }
        }

        impl<const N: usize, $($m: Provider<N>),+> Provider<N> for ZippedProvider<N, ($($m,)+)> {
            type Value = ($(<$m as Provider<N>>::Value,)+);

            #[inline(always)]
            fn shape(&self) -> Shape<N> { self.shape }

            #[inline(always)]
            fn at(&self, index: Index<N>) -> Self::Value {
                ($(self.members.$i.at(index),)+)
            }
        }
    };
}

impl_zipped!(A 0);
impl_zipped!(A 0, B 1);
impl_zipped!(A 0, B 1, C 2);
impl_zipped!(A 0, B 1, C 2, D 3);

// ----------------------------------------------------------------------------
