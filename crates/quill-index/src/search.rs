/// Binary search over a key-sorted slice.
///
/// This is the single lookup primitive shared by every sorted collection in
/// the engine: the caller supplies the slice, the target key, and the key
/// extractor. Returns `Ok(position)` when a record with the target key is
/// present, `Err(insertion_point)` otherwise.
///
/// The slice must be sorted ascending by the extracted key, which
/// [`KeyedIndex`](crate::KeyedIndex) maintains as an invariant.
pub fn search_by_key<R, K, F>(records: &[R], target: K, key_of: F) -> Result<usize, usize>
where
    K: Ord,
    F: Fn(&R) -> K,
{
    records.binary_search_by(|record| key_of(record).cmp(&target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_boundaries_and_middle() {
        let keys = [2i64, 5, 9, 14, 20];
        assert_eq!(search_by_key(&keys, 2, |k| *k), Ok(0));
        assert_eq!(search_by_key(&keys, 9, |k| *k), Ok(2));
        assert_eq!(search_by_key(&keys, 20, |k| *k), Ok(4));
    }

    #[test]
    fn reports_insertion_point_when_absent() {
        let keys = [2i64, 5, 9];
        assert_eq!(search_by_key(&keys, 1, |k| *k), Err(0));
        assert_eq!(search_by_key(&keys, 7, |k| *k), Err(2));
        assert_eq!(search_by_key(&keys, 10, |k| *k), Err(3));
    }

    #[test]
    fn empty_slice() {
        let keys: [i64; 0] = [];
        assert_eq!(search_by_key(&keys, 3, |k| *k), Err(0));
    }
}
