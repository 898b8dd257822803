use super::{
    evaluate_as_unique, AccessPattern, Index, Provider, ProviderMut, ProviderRef, Shape,
    SharedProvider, UniqueProvider,
};

/// An `N`-dimensional array: a [`Provider`] seen through an
/// [`AccessPattern`].
///
/// Every element access maps the logical index through the access pattern
/// and asks the provider for the value at the resulting physical index.
/// Nothing is copied until [`unique()`] or [`shared()`] is called.
///
/// ```
/// use ndprovider::{index, jumps, make_array_with, make_index_provider, Array, AccessPattern, Provider};
/// let coords = make_index_provider(ndprovider::shape![4, 6]);
/// let odd_columns = AccessPattern::over(&coords.shape())
///     .with_start(index![0, 1])
///     .with_jumps(jumps![1, 2]);
/// let a = make_array_with(coords, odd_columns);
/// assert_eq!(a.at(index![2, 1]), index![2, 3]);
///
/// let b = a.unique();
/// assert_eq!(b.shape(), ndprovider::shape![4, 3]);
/// assert_eq!(b[index![2, 1]], index![2, 3]);
/// ```
///
/// [`unique()`]: Self::unique()
/// [`shared()`]: Self::shared()
#[derive(Debug, Clone)]
pub struct Array<const N: usize, P> {
    provider: P,
    accessor: AccessPattern<N>,
}

impl<const N: usize, P: Provider<N>> Array<N, P> {
    pub fn new(provider: P, accessor: AccessPattern<N>) -> Self {
        Self {provider, accessor}
    }

    /// An `Array` covering all of `provider`.
    pub fn from_provider(provider: P) -> Self {
        let accessor = AccessPattern::over(&provider.shape());
        Self {provider, accessor}
    }

    /// The shape of the underlying provider.
    pub fn shape(&self) -> Shape<N> { self.provider.shape() }

    /// The number of elements of the underlying provider.
    pub fn size(&self) -> usize { self.provider.size() }

    pub fn provider(&self) -> &P { &self.provider }

    pub fn accessor(&self) -> &AccessPattern<N> { &self.accessor }

    pub fn into_provider(self) -> P { self.provider }

    /// Copies the elements selected by the access pattern into a new,
    /// exclusively owned array.
    pub fn unique(&self) -> Array<N, UniqueProvider<N, P::Value>> where
        P::Value: Default,
    {
        Array::from_provider(evaluate_as_unique(&self.provider, &self.accessor))
    }

    /// Copies the elements selected by the access pattern into a new array
    /// backed by shared storage.
    pub fn shared(&self) -> Array<N, SharedProvider<N, P::Value>> where
        P::Value: Default,
    {
        Array::from_provider(evaluate_as_unique(&self.provider, &self.accessor).into_shared())
    }
}

/// As a `Provider`, an `Array` is indexed relative to its accessor, so its
/// shape is the accessor's shape, not the inherent [`Array::shape()`].
impl<const N: usize, P: Provider<N>> Provider<N> for Array<N, P> {
    type Value = P::Value;
    #[inline(always)]
    fn shape(&self) -> Shape<N> { self.accessor.shape() }
    #[inline(always)]
    fn at(&self, index: Index<N>) -> P::Value { self.provider.at(self.accessor.map_index(&index)) }
}

impl<const N: usize, P: ProviderRef<N>> ProviderRef<N> for Array<N, P> {
    #[inline(always)]
    fn at_ref(&self, index: Index<N>) -> &P::Value { self.provider.at_ref(self.accessor.map_index(&index)) }
}

impl<const N: usize, P: ProviderMut<N>> ProviderMut<N> for Array<N, P> {
    #[inline(always)]
    fn at_mut(&mut self, index: Index<N>) -> &mut P::Value {
        let index = self.accessor.map_index(&index);
        self.provider.at_mut(index)
    }
}

impl<const N: usize, P: ProviderRef<N>> std::ops::Index<Index<N>> for Array<N, P> {
    type Output = P::Value;
    #[inline(always)]
    fn index(&self, index: Index<N>) -> &P::Value { self.at_ref(index) }
}

impl<const N: usize, P: ProviderMut<N>> std::ops::IndexMut<Index<N>> for Array<N, P> {
    #[inline(always)]
    fn index_mut(&mut self, index: Index<N>) -> &mut P::Value { self.at_mut(index) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::rc::{Rc};

    use super::*;
    use crate::{Buffer, IndexProvider, Jumps};

    fn counting(shape: Shape<2>) -> Array<2, UniqueProvider<2, usize>> {
        Array::from_provider(UniqueProvider::new(shape, (0..shape.size()).collect()).unwrap())
    }

    #[test]
    fn identity_accessor() {
        let a = counting(Shape::new([2, 3]));
        assert_eq!(a.shape(), Shape::new([2, 3]));
        assert_eq!(a.size(), 6);
        assert_eq!(*a.accessor(), AccessPattern::over(&Shape::new([2, 3])));
        assert_eq!(a.at(Index::new([1, 1])), 4);
        assert_eq!(a[Index::new([0, 2])], 2);
    }

    #[test]
    fn write_through_unique() {
        let mut a = counting(Shape::new([2, 2]));
        a[Index::new([1, 0])] = 20;
        assert_eq!(a.provider().data(), [0, 1, 20, 3]);
    }

    #[test]
    fn write_through_slice() {
        let shape = Shape::new([3, 3]);
        let provider = UniqueProvider::new(shape, Buffer::filled(9, 0)).unwrap();
        let every_other = AccessPattern::over(&shape).with_jumps(Jumps::new([2, 2]));
        let mut a = Array::new(provider, every_other);
        a[Index::new([1, 1])] = 5;
        assert_eq!(a.into_provider().data(), [0, 0, 0, 0, 0, 0, 0, 0, 5]);
    }

    #[test]
    fn unique_materializes_the_slice() {
        let a = Array::new(
            IndexProvider::new(Shape::new([3, 3])),
            AccessPattern::new(Index::new([1, 0]), Index::new([3, 3]), Jumps::new([1, 1])),
        );
        let u = a.unique();
        assert_eq!(u.shape(), Shape::new([2, 3]));
        assert_eq!(u[Index::new([0, 0])], Index::new([1, 0]));
        assert_eq!(u[Index::new([1, 2])], Index::new([2, 2]));
    }

    #[test]
    fn unique_is_decoupled_from_source() {
        let mut a = counting(Shape::new([2, 2]));
        let u = a.unique();
        a[Index::new([0, 0])] = 100;
        assert_eq!(u[Index::new([0, 0])], 0);
    }

    #[test]
    fn shared_arrays_share_storage() {
        let a = counting(Shape::new([2, 2])).shared();
        let b = a.clone();
        assert!(Rc::ptr_eq(a.provider().buffer(), b.provider().buffer()));
        assert_eq!(b[Index::new([1, 1])], 3);
        let c = b.unique();
        assert_eq!(c.provider().data(), [0, 1, 2, 3]);
    }

    #[test]
    fn provider_shape_is_the_accessor_shape() {
        let shape = Shape::new([4, 4]);
        let a = Array::new(IndexProvider::new(shape), AccessPattern::over(&shape).with_jumps(Jumps::new([2, 2])));
        assert_eq!(a.shape(), Shape::new([4, 4]));
        assert_eq!(Provider::shape(&a), Shape::new([2, 2]));
        assert_eq!(Provider::size(&a), 4);
        for i in AccessPattern::over(&Provider::shape(&a)) {
            assert!(Provider::shape(&a).contains(&i));
            assert_eq!(a.at(i), Index::new([i[0] * 2, i[1] * 2]));
        }
        let copy = crate::evaluate_whole_as_unique(&a);
        assert_eq!(copy.data(), a.unique().provider().data());
    }

    #[test]
    fn borrowed_provider() {
        let source = counting(Shape::new([2, 2]));
        let view = Array::new(source.provider(), AccessPattern::over(&Shape::new([1, 2])));
        assert_eq!(view[Index::new([0, 1])], 1);
        assert_eq!(view.unique().provider().data(), [0, 1]);
    }
}
