use super::range::{all, zip};
use super::{Error, Result};

/// Owned, contiguous storage for a run-time number of `T`s.
///
/// Cloning a `Buffer` duplicates every element. [`take()`] moves the
/// storage out and leaves an empty `Buffer` behind.
///
/// ```
/// use ndprovider::Buffer;
/// let mut a = Buffer::filled(3, 0);
/// let b = a.clone();
/// a[1] = 5;
/// assert_eq!(a.as_slice(), [0, 5, 0]);
/// assert_eq!(b.as_slice(), [0, 0, 0]);
/// let c = a.take();
/// assert!(a.is_empty());
/// assert_eq!(c.len(), 3);
/// ```
///
/// [`take()`]: Self::take()
#[derive(Debug, Clone, Hash)]
pub struct Buffer<T> {
    items: Box<[T]>,
}

impl<T> Buffer<T> {
    /// An empty `Buffer`.
    pub fn new() -> Self { Self {items: Box::new([])} }

    /// A `Buffer` of `count` copies of `value`.
    pub fn filled(count: usize, value: T) -> Self where T: Clone {
        Self {items: vec![value; count].into_boxed_slice()}
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn as_slice(&self) -> &[T] { &self.items }

    pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.items }

    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.items.iter() }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> { self.items.iter_mut() }

    /// Moves the elements into a new `Buffer`, leaving `self` empty.
    pub fn take(&mut self) -> Self { std::mem::take(self) }

    /// Returns the element at `offset`, or [`Error::OutOfRange`].
    pub fn at(&self, offset: usize) -> Result<&T> {
        let count = self.len();
        self.items.get(offset).ok_or(Error::OutOfRange {offset, count})
    }

    /// Returns the element at `offset` mutably, or [`Error::OutOfRange`].
    pub fn at_mut(&mut self, offset: usize) -> Result<&mut T> {
        let count = self.len();
        self.items.get_mut(offset).ok_or(Error::OutOfRange {offset, count})
    }

    /// Returns the raw elements.
    ///
    /// ```
    /// use ndprovider::Buffer;
    /// let b: Buffer<_> = vec![1, 2, 3].into();
    /// let raw: Box<[i32]> = b.into_raw();
    /// assert_eq!(&*raw, [1, 2, 3]);
    /// ```
    pub fn into_raw(self) -> Box<[T]> { self.items }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self { Self::new() }
}

impl<T: PartialEq> PartialEq for Buffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && all(zip((self, other)), |(a, b)| a == b)
    }
}

impl<T: Eq> Eq for Buffer<T> {}

/// Unchecked access. Panics if `offset` is out of range.
impl<T> std::ops::Index<usize> for Buffer<T> {
    type Output = T;
    #[inline(always)]
    fn index(&self, offset: usize) -> &T { &self.items[offset] }
}

impl<T> std::ops::IndexMut<usize> for Buffer<T> {
    #[inline(always)]
    fn index_mut(&mut self, offset: usize) -> &mut T { &mut self.items[offset] }
}

impl<T> FromIterator<T> for Buffer<T> {
    fn from_iter<I: IntoIterator<Item=T>>(items: I) -> Self {
        Self {items: items.into_iter().collect()}
    }
}

impl<T> From<Vec<T>> for Buffer<T> {
    fn from(items: Vec<T>) -> Self { Self {items: items.into_boxed_slice()} }
}

impl<T> From<Box<[T]>> for Buffer<T> {
    fn from(items: Box<[T]>) -> Self { Self {items} }
}

impl<T> AsRef<[T]> for Buffer<T> {
    fn as_ref(&self) -> &[T] { &self.items }
}

impl<T> AsMut<[T]> for Buffer<T> {
    fn as_mut(&mut self) -> &mut [T] { &mut self.items }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct() {
        let empty: Buffer<f64> = Buffer::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(Buffer::filled(4, 1.5).as_slice(), [1.5; 4]);
        let b: Buffer<_> = (0..5).collect();
        assert_eq!(b.as_slice(), [0, 1, 2, 3, 4]);
        assert_eq!(Buffer::from(vec![1, 2]), Buffer::from(vec![1, 2]));
    }

    #[test]
    fn copy_is_deep() {
        let original = Buffer::filled(3, String::from("a"));
        let mut copy = original.clone();
        copy[0].push('b');
        assert_eq!(original[0], "a");
        assert_eq!(copy[0], "ab");
        assert_ne!(original, copy);
    }

    #[test]
    fn take_empties_source() {
        let mut source = Buffer::filled(3, 7u32);
        let mut owner = source.take();
        assert_eq!(source.len(), 0);
        assert!(source.is_empty());
        owner[2] = 9;
        assert_eq!(owner.as_slice(), [7, 7, 9]);
    }

    #[test]
    fn checked_access() {
        let mut b = Buffer::filled(3, 0);
        assert_eq!(b.at(2), Ok(&0));
        assert_eq!(b.at(3), Err(Error::OutOfRange { offset: 3, count: 3 }));
        *b.at_mut(1).unwrap() = 4;
        assert_eq!(b[1], 4);
        assert_eq!(b.at_mut(10), Err(Error::OutOfRange { offset: 10, count: 3 }));
        assert_eq!(
            Buffer::<u8>::new().at(0).unwrap_err().to_string(),
            "buffer index out of range on index 0 / 0",
        );
    }

    #[test]
    #[should_panic]
    fn unchecked_access_panics() {
        let b = Buffer::filled(2, 0);
        let _value = b[2];
    }

    #[test]
    fn equality_needs_equal_length() {
        let a: Buffer<_> = [1, 2, 3].into_iter().collect();
        let b: Buffer<_> = [1, 2].into_iter().collect();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
