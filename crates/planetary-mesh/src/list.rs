//! Growable array with constant-time unordered removal.

/// A `Vec` wrapper whose removal swaps the last element into the hole.
///
/// Element order is therefore only stable while nothing is removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List<T> {
    items: Vec<T>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends `item` and returns its index.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Removes the element at `index` by moving the last element into its slot.
    ///
    /// Returns `None` and leaves the list untouched when `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        Some(self.items.swap_remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> List<T> {
    pub fn from_slice(items: &[T]) -> Self {
        Self {
            items: items.to_vec(),
        }
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> std::ops::Index<usize> for List<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> std::ops::IndexMut<usize> for List<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_index_and_counts() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.push('a'), 0);
        assert_eq!(list.push('b'), 1);
        assert_eq!(list.count(), 2);
        assert_eq!(list[1], 'b');
    }

    #[test]
    fn test_remove_at_swaps_last_into_hole() {
        let mut list = List::from_slice(&[10, 20, 30, 40]);
        assert_eq!(list.remove_at(1), Some(20));
        assert_eq!(list.as_slice(), &[10, 40, 30]);
        assert_eq!(list.remove_at(2), Some(30));
        assert_eq!(list.as_slice(), &[10, 40]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut list = List::from_slice(&[1, 2, 3]);
        assert_eq!(list.remove_at(3), None);
        assert_eq!(list.remove_at(usize::MAX), None);
        assert_eq!(list.count(), 3);

        let mut empty: List<u32> = List::new();
        assert_eq!(empty.remove_at(0), None);
    }

    #[test]
    fn test_from_slice_copies_in_order() {
        let source = [3u32, 1, 4, 1, 5];
        let list = List::from_slice(&source);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), source.to_vec());
        assert_eq!(list.into_vec(), source.to_vec());
    }
}
