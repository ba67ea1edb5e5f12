use quill_types::RecordKey;

use crate::error::DuplicateKey;
use crate::search::search_by_key;

/// A vector of records kept sorted ascending by key at all times.
///
/// Sortedness is maintained on insert (records land at their binary-search
/// insertion point), never recovered lazily on read. Keys are unique: an
/// insert that collides with a present key is rejected and the collection is
/// left untouched.
#[derive(Clone, Debug)]
pub struct KeyedIndex<R: RecordKey> {
    records: Vec<R>,
}

impl<R: RecordKey> Default for KeyedIndex<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RecordKey> KeyedIndex<R> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Build an index from records in arbitrary order.
    ///
    /// Sorts by key and rejects the batch if any two records share a key.
    /// This is the decode path: a persisted snapshot is re-indexed through
    /// here, so a blob that somehow carries duplicates is refused rather
    /// than silently shadowed.
    pub fn from_records(mut records: Vec<R>) -> Result<Self, DuplicateKey> {
        records.sort_by_key(|r| r.record_key());
        let duplicated = records
            .windows(2)
            .any(|pair| pair[0].record_key() == pair[1].record_key());
        if duplicated {
            return Err(DuplicateKey);
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The sorted records as a slice.
    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    /// Iterate records in ascending key order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Position of the record with the given key, if present. O(log n).
    pub fn position(&self, key: R::Key) -> Option<usize> {
        search_by_key(&self.records, key, R::record_key).ok()
    }

    /// Look up a record by key. O(log n).
    pub fn get(&self, key: R::Key) -> Option<&R> {
        self.position(key).map(|at| &self.records[at])
    }

    /// Mutable lookup by key. O(log n).
    ///
    /// The key field must not be changed through this reference; a key
    /// change is a remove followed by an insert.
    pub fn get_mut(&mut self, key: R::Key) -> Option<&mut R> {
        self.position(key).map(|at| &mut self.records[at])
    }

    /// Insert a record at its sorted position.
    ///
    /// Rejects the insert if a record with the same key is already present.
    pub fn insert(&mut self, record: R) -> Result<(), DuplicateKey> {
        match search_by_key(&self.records, record.record_key(), R::record_key) {
            Ok(_) => Err(DuplicateKey),
            Err(at) => {
                self.records.insert(at, record);
                Ok(())
            }
        }
    }

    /// Remove and return the record with the given key.
    pub fn remove(&mut self, key: R::Key) -> Option<R> {
        self.position(key).map(|at| self.records.remove(at))
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<R: RecordKey> From<KeyedIndex<R>> for Vec<R> {
    fn from(index: KeyedIndex<R>) -> Self {
        index.records
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Minimal keyed record for exercising the index.
    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Rec {
        key: i64,
        tag: &'static str,
    }

    impl RecordKey for Rec {
        type Key = i64;

        fn record_key(&self) -> i64 {
            self.key
        }
    }

    fn rec(key: i64) -> Rec {
        Rec { key, tag: "" }
    }

    #[test]
    fn insert_keeps_ascending_order() {
        let mut index = KeyedIndex::new();
        for key in [1111114444i64, 1111112000, 1111117777, 1111115555] {
            index.insert(rec(key)).unwrap();
        }
        let keys: Vec<i64> = index.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1111112000, 1111114444, 1111115555, 1111117777]);
    }

    #[test]
    fn duplicate_insert_is_rejected_and_harmless() {
        let mut index = KeyedIndex::new();
        index.insert(Rec { key: 5, tag: "first" }).unwrap();
        let err = index.insert(Rec { key: 5, tag: "second" }).unwrap_err();
        assert_eq!(err, DuplicateKey);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(5).unwrap().tag, "first");
    }

    #[test]
    fn get_on_boundaries() {
        let mut index = KeyedIndex::new();
        for key in [10, 20, 30, 40, 50] {
            index.insert(rec(key)).unwrap();
        }
        assert!(index.get(10).is_some());
        assert!(index.get(30).is_some());
        assert!(index.get(50).is_some());
        assert!(index.get(35).is_none());
        assert!(KeyedIndex::<Rec>::new().get(10).is_none());
    }

    #[test]
    fn remove_returns_record_and_preserves_order() {
        let mut index = KeyedIndex::new();
        for key in [1, 2, 3, 4] {
            index.insert(rec(key)).unwrap();
        }
        assert_eq!(index.remove(3).unwrap().key, 3);
        assert!(index.remove(3).is_none());
        let keys: Vec<i64> = index.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1, 2, 4]);
    }

    #[test]
    fn from_records_sorts_and_rejects_duplicates() {
        let sorted = KeyedIndex::from_records(vec![rec(9), rec(1), rec(5)]).unwrap();
        let keys: Vec<i64> = sorted.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1, 5, 9]);

        assert!(KeyedIndex::from_records(vec![rec(1), rec(1)]).is_err());
        assert!(KeyedIndex::from_records(Vec::<Rec>::new()).is_ok());
    }

    proptest! {
        #[test]
        fn arbitrary_inserts_stay_sorted(keys in proptest::collection::hash_set(any::<i64>(), 0..64)) {
            let mut index = KeyedIndex::new();
            for key in &keys {
                index.insert(rec(*key)).unwrap();
            }
            let collected: Vec<i64> = index.iter().map(|r| r.key).collect();
            let mut expected: Vec<i64> = keys.into_iter().collect();
            expected.sort_unstable();
            prop_assert_eq!(collected, expected);
        }

        #[test]
        fn search_agrees_with_linear_scan(
            keys in proptest::collection::hash_set(any::<i64>(), 0..64),
            probe in any::<i64>(),
        ) {
            let mut index = KeyedIndex::new();
            for key in &keys {
                index.insert(rec(*key)).unwrap();
            }
            let scanned = index.iter().find(|r| r.key == probe);
            prop_assert_eq!(index.get(probe), scanned);
        }
    }
}
