use std::fmt::Display;

/// Key extraction for records held in a sorted collection.
///
/// Both record kinds are looked up through the same generic binary search;
/// the only thing that differs between them is which field is the key, so
/// each record type declares its key explicitly.
pub trait RecordKey {
    /// The comparable key type. `Copy` so searches never borrow the record.
    type Key: Ord + Copy + Display;

    /// The unique key of this record within its collection.
    fn record_key(&self) -> Self::Key;
}
