//! Immutable sorted array of key/value items
//!
//! Items are kept ordered by a caller-supplied comparator and keys are unique.
//!
//! - lookup by key or by [`Locator`]: `O(log n)`
//! - update of an existing value: `O(log n)` plus the copy-on-write of a shared array
//! - insert / remove: `O(n)` (shifting)
//! - range search: `O(log n + span)`
//!
//! The backing vector sits behind an `Arc`: cloning an array is cheap and the
//! first edit of a shared array copies it.

use crate::errors::{Error, Result};
use derive_new::new;
use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;

/// Total order over keys
pub type Comparator<K> = fn(&K, &K) -> Ordering;

/// Locates a target inside the array without naming a concrete key
///
/// `locate` receives a key stored in the array and returns its position relative
/// to the target: `Less` if the key sorts before it, `Equal` if the key is part of
/// it, `Greater` if the key sorts after it. When used for range searches the keys
/// answering `Equal` must be contiguous under the array's order.
pub trait Locator<K> {
    fn locate(&self, key: &K) -> Ordering;
}

impl<K, F> Locator<K> for F
where
    F: Fn(&K) -> Ordering,
{
    fn locate(&self, key: &K) -> Ordering {
        self(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct SortedArrayItem<K, V> {
    pub key: K,
    pub value: V,
}

/// Result of a binary search
///
/// When `item` is `None`, `index` is the position at which the item would be inserted.
#[derive(Debug, PartialEq, Eq)]
pub struct Lookup<'a, K, V> {
    pub item: Option<&'a SortedArrayItem<K, V>>,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct SortedArray<K, V> {
    items: Arc<Vec<SortedArrayItem<K, V>>>,
    compare: Comparator<K>,
}

impl<K, V> PartialEq for SortedArray<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<K, V> Eq for SortedArray<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> SortedArray<K, V>
where
    K: Clone,
    V: Clone,
{
    pub fn new(compare: Comparator<K>) -> Self {
        SortedArray {
            items: Arc::new(Vec::new()),
            compare,
        }
    }

    /// Build an array from unordered items, failing on duplicate keys
    pub fn from_items(compare: Comparator<K>, mut items: Vec<SortedArrayItem<K, V>>) -> Result<Self> {
        items.sort_by(|a, b| compare(&a.key, &b.key));

        let has_duplicates = items
            .windows(2)
            .any(|pair| compare(&pair[0].key, &pair[1].key) == Ordering::Equal);
        if has_duplicates {
            return Err(Error::DuplicateKey);
        }

        Ok(SortedArray {
            items: Arc::new(items),
            compare,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[SortedArrayItem<K, V>] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &SortedArrayItem<K, V>> {
        self.items.iter()
    }

    /// Binary search for `key`
    pub fn get(&self, key: &K) -> Lookup<'_, K, V> {
        let compare = self.compare;
        self.find(|candidate: &K| compare(candidate, key))
    }

    /// Binary search with a [`Locator`]
    pub fn find(&self, locator: impl Locator<K>) -> Lookup<'_, K, V> {
        match self
            .items
            .binary_search_by(|item| locator.locate(&item.key))
        {
            Ok(index) => Lookup {
                item: self.items.get(index),
                index,
            },
            Err(index) => Lookup { item: None, index },
        }
    }

    /// Insert `item` at its ordered position
    ///
    /// Fails if the key already exists, unless `upsert` is set, in which case the
    /// existing item is replaced.
    pub fn insert(&self, item: SortedArrayItem<K, V>, upsert: bool) -> Result<Self> {
        let mut array = self.clone();
        array.insert_in_place(item, upsert)?;
        Ok(array)
    }

    /// Replace the value stored under `key`
    ///
    /// Fails if the key does not exist, unless `upsert` is set, in which case a new
    /// item is inserted.
    pub fn update(&self, key: &K, value: V, upsert: bool) -> Result<Self> {
        let mut array = self.clone();
        array.update_in_place(key, value, upsert)?;
        Ok(array)
    }

    /// Remove the item stored under `key`
    pub fn remove(&self, key: &K) -> Result<Self> {
        let mut array = self.clone();
        array.remove_in_place(key)?;
        Ok(array)
    }

    /// Half-open index span of the items for which `locator` answers `Equal`
    pub fn find_range(&self, locator: impl Locator<K>) -> Range<usize> {
        let Lookup { item, index } = self.find(|key: &K| locator.locate(key));
        if item.is_none() {
            return index..index;
        }

        let mut start = index;
        while start > 0 && locator.locate(&self.items[start - 1].key) == Ordering::Equal {
            start -= 1;
        }

        let mut end = index + 1;
        while end < self.items.len() && locator.locate(&self.items[end].key) == Ordering::Equal {
            end += 1;
        }

        start..end
    }

    /// Replace the items in `range` with `replacement`, trusting the caller to keep
    /// the array ordered and free of duplicates
    pub(crate) fn splice_unchecked(
        &self,
        range: Range<usize>,
        replacement: &[SortedArrayItem<K, V>],
    ) -> Self {
        let mut items = Vec::with_capacity(self.items.len() - range.len() + replacement.len());
        items.extend_from_slice(&self.items[..range.start]);
        items.extend_from_slice(replacement);
        items.extend_from_slice(&self.items[range.end..]);

        SortedArray {
            items: Arc::new(items),
            compare: self.compare,
        }
    }

    pub(crate) fn insert_in_place(&mut self, item: SortedArrayItem<K, V>, upsert: bool) -> Result<()> {
        let Lookup { item: existing, index } = self.get(&item.key);
        let exists = existing.is_some();

        if exists && !upsert {
            return Err(Error::DuplicateKey);
        }

        let items = Arc::make_mut(&mut self.items);
        if exists {
            items[index] = item;
        } else {
            items.insert(index, item);
        }

        Ok(())
    }

    pub(crate) fn update_in_place(&mut self, key: &K, value: V, upsert: bool) -> Result<()> {
        let Lookup { item: existing, index } = self.get(key);
        let exists = existing.is_some();

        if !exists && !upsert {
            return Err(Error::MissingKey);
        }

        let items = Arc::make_mut(&mut self.items);
        if exists {
            items[index].value = value;
        } else {
            items.insert(index, SortedArrayItem::new(key.clone(), value));
        }

        Ok(())
    }

    pub(crate) fn remove_in_place(&mut self, key: &K) -> Result<()> {
        let Lookup { item: existing, index } = self.get(key);
        if existing.is_none() {
            return Err(Error::MissingKey);
        }

        Arc::make_mut(&mut self.items).remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    type TestArray = SortedArray<i32, &'static str>;

    fn compare_ints(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn keys(array: &TestArray) -> Vec<i32> {
        array.iter().map(|item| item.key).collect()
    }

    #[fixture]
    fn sample_array() -> TestArray {
        TestArray::from_items(
            compare_ints,
            vec![
                SortedArrayItem::new(30, "c"),
                SortedArrayItem::new(10, "a"),
                SortedArrayItem::new(40, "d"),
                SortedArrayItem::new(20, "b"),
            ],
        )
        .unwrap()
    }

    #[rstest]
    fn from_items_sorts_and_rejects_duplicates(sample_array: TestArray) {
        assert_eq!(keys(&sample_array), vec![10, 20, 30, 40]);

        let duplicated = TestArray::from_items(
            compare_ints,
            vec![SortedArrayItem::new(1, "a"), SortedArrayItem::new(1, "b")],
        );
        assert_eq!(duplicated.unwrap_err(), Error::DuplicateKey);
    }

    #[rstest]
    fn get_returns_item_or_insertion_point(sample_array: TestArray) {
        let found = sample_array.get(&30);
        assert_eq!(found.item.map(|item| item.value), Some("c"));
        assert_eq!(found.index, 2);

        let missing = sample_array.get(&25);
        assert_eq!(missing.item, None);
        assert_eq!(missing.index, 2);

        assert_eq!(sample_array.get(&0).index, 0);
        assert_eq!(sample_array.get(&99).index, 4);
        assert_eq!(TestArray::new(compare_ints).get(&1).index, 0);
    }

    #[rstest]
    fn insert_respects_upsert(sample_array: TestArray) {
        let inserted = sample_array
            .insert(SortedArrayItem::new(25, "x"), false)
            .unwrap();
        assert_eq!(keys(&inserted), vec![10, 20, 25, 30, 40]);
        // the receiver is untouched
        assert_eq!(keys(&sample_array), vec![10, 20, 30, 40]);

        assert_eq!(
            sample_array
                .insert(SortedArrayItem::new(20, "x"), false)
                .unwrap_err(),
            Error::DuplicateKey
        );

        let replaced = sample_array
            .insert(SortedArrayItem::new(20, "x"), true)
            .unwrap();
        assert_eq!(replaced.get(&20).item.map(|item| item.value), Some("x"));
        assert_eq!(replaced.len(), 4);
    }

    #[rstest]
    fn update_respects_upsert(sample_array: TestArray) {
        let updated = sample_array.update(&10, "z", false).unwrap();
        assert_eq!(updated.get(&10).item.map(|item| item.value), Some("z"));

        assert_eq!(
            sample_array.update(&15, "z", false).unwrap_err(),
            Error::MissingKey
        );

        let upserted = sample_array.update(&15, "z", true).unwrap();
        assert_eq!(keys(&upserted), vec![10, 15, 20, 30, 40]);
    }

    #[rstest]
    fn remove_requires_existing_key(sample_array: TestArray) {
        let removed = sample_array.remove(&20).unwrap();
        assert_eq!(keys(&removed), vec![10, 30, 40]);
        assert_eq!(sample_array.remove(&21).unwrap_err(), Error::MissingKey);
    }

    #[rstest]
    #[case(15, 35, 1..3)]
    #[case(0, 100, 0..4)]
    #[case(21, 29, 2..2)]
    #[case(40, 40, 3..4)]
    #[case(41, 50, 4..4)]
    fn find_range_returns_contiguous_span(
        sample_array: TestArray,
        #[case] low: i32,
        #[case] high: i32,
        #[case] expected: Range<usize>,
    ) {
        let range = sample_array.find_range(|key: &i32| {
            if *key < low {
                Ordering::Less
            } else if *key > high {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        assert_eq!(range, expected);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(i32, bool),
        Update(i32, bool),
        Remove(i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-20..20i32, any::<bool>()).prop_map(|(key, upsert)| Op::Insert(key, upsert)),
            (-20..20i32, any::<bool>()).prop_map(|(key, upsert)| Op::Update(key, upsert)),
            (-20..20i32).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn stays_sorted_and_unique(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let mut array = TestArray::new(compare_ints);

            for op in ops {
                let next = match op {
                    Op::Insert(key, upsert) => array.insert(SortedArrayItem::new(key, "v"), upsert),
                    Op::Update(key, upsert) => array.update(&key, "w", upsert),
                    Op::Remove(key) => array.remove(&key),
                };
                if let Ok(next) = next {
                    array = next;
                }

                let current = keys(&array);
                prop_assert!(current.windows(2).all(|pair| pair[0] < pair[1]));
            }
        }
    }
}
