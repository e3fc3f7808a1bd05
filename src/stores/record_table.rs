use crate::core::error::StoreError;
use crate::utils::text::contains_ignore_ascii_case;

/// A stored entity addressed by a sequential id
pub trait Record: Clone {
    /// Human readable entity name used in error messages
    const KIND: &'static str;

    fn id(&self) -> u32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Bounded, id-ordered collection shared by the user and comment stores.
///
/// Records are only ever appended with a freshly issued id and removal keeps
/// the relative order of the rest, so `records` is always sorted by id and
/// lookups can binary search.
#[derive(Debug)]
pub struct RecordTable<T> {
    records: Vec<T>,
    next_id: u32,
    capacity: usize,
}

impl<T: Record> RecordTable<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            capacity,
        }
    }

    /// Fails with `CapacityExceeded` when no slot is left
    pub fn ensure_room(&self) -> Result<(), StoreError> {
        if self.records.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded { max: self.capacity });
        }
        Ok(())
    }

    /// Append a record built around the next id. The id counter only advances on success.
    pub fn insert_with(&mut self, build: impl FnOnce(u32) -> T) -> Result<u32, StoreError> {
        self.ensure_room()?;

        let id = self.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or(StoreError::CapacityExceeded { max: self.capacity })?;

        let record = build(id);
        debug_assert_eq!(record.id(), id);
        debug_assert!(self.records.last().map_or(true, |last| last.id() < id));

        self.records.push(record);
        self.next_id = next_id;
        Ok(id)
    }

    fn position(&self, id: u32) -> Result<usize, StoreError> {
        self.records
            .binary_search_by_key(&id, Record::id)
            .map_err(|_| StoreError::NotFound { kind: T::KIND, id })
    }

    pub fn get(&self, id: u32) -> Result<&T, StoreError> {
        let pos = self.position(id)?;
        Ok(&self.records[pos])
    }

    pub fn get_mut(&mut self, id: u32) -> Result<&mut T, StoreError> {
        let pos = self.position(id)?;
        Ok(&mut self.records[pos])
    }

    /// Remove by id; later records shift down and keep their order
    pub fn remove(&mut self, id: u32) -> Result<T, StoreError> {
        let pos = self.position(id)?;
        Ok(self.records.remove(pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.records.clone()
    }

    pub fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.records.iter().filter(|r| predicate(*r)).cloned().collect()
    }

    /// Records whose `field` contains `needle`, ignoring ASCII case, in storage order
    pub fn search(&self, needle: &str, field: impl Fn(&T) -> &str) -> Result<Vec<T>, StoreError> {
        let matches = self.filtered(|r| contains_ignore_ascii_case(field(r), needle));
        if matches.is_empty() {
            return Err(StoreError::EmptyResult(needle.to_string()));
        }
        Ok(matches)
    }

    /// Sorted copy; the table itself keeps storage order
    pub fn sorted_by_id(&self, direction: SortDirection) -> Vec<T> {
        let mut records = self.snapshot();
        match direction {
            SortDirection::Ascending => records.sort_by_key(Record::id),
            SortDirection::Descending => records.sort_by(|a, b| b.id().cmp(&a.id())),
        }
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        body: String,
    }

    impl Record for Note {
        const KIND: &'static str = "Note";

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn table_with(bodies: &[&str], capacity: usize) -> RecordTable<Note> {
        let mut table = RecordTable::with_capacity(capacity);
        for body in bodies {
            table
                .insert_with(|id| Note { id, body: body.to_string() })
                .unwrap();
        }
        table
    }

    fn ids(notes: &[Note]) -> Vec<u32> {
        notes.iter().map(|n| n.id).collect()
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let table = table_with(&["a", "b", "c"], 10);
        assert_eq!(ids(&table.snapshot()), vec![1, 2, 3]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_insert_refused_when_full() {
        let mut table = table_with(&["a", "b"], 2);
        let result = table.insert_with(|id| Note { id, body: "c".into() });
        assert_eq!(result, Err(StoreError::CapacityExceeded { max: 2 }));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut table = table_with(&["a", "b"], 10);
        table.remove(2).unwrap();
        let id = table.insert_with(|id| Note { id, body: "c".into() }).unwrap();
        assert_eq!(id, 3);
    }

    #[test]
    fn test_remove_keeps_order_and_lookup() {
        let mut table = table_with(&["a", "b", "c", "d"], 10);
        let removed = table.remove(2).unwrap();
        assert_eq!(removed.body, "b");
        assert_eq!(ids(&table.snapshot()), vec![1, 3, 4]);
        assert_eq!(table.get(3).unwrap().body, "c");
        assert_eq!(table.get(4).unwrap().body, "d");
        assert_eq!(table.get(2), Err(StoreError::NotFound { kind: "Note", id: 2 }));
    }

    #[test]
    fn test_get_missing_on_empty_table() {
        let table: RecordTable<Note> = RecordTable::with_capacity(1);
        assert!(table.is_empty());
        assert!(matches!(table.get(1), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_search_empty_result() {
        let table = table_with(&["hello", "world"], 10);
        let result = table.search("xyz", |n| n.body.as_str());
        assert_eq!(result, Err(StoreError::EmptyResult("xyz".into())));
    }

    #[test]
    fn test_search_on_empty_table_is_empty_result() {
        let table: RecordTable<Note> = RecordTable::with_capacity(1);
        assert!(matches!(
            table.search("", |n| n.body.as_str()),
            Err(StoreError::EmptyResult(_))
        ));
    }

    #[test]
    fn test_sorted_by_id_does_not_touch_storage() {
        let table = table_with(&["a", "b", "c"], 10);
        let desc = table.sorted_by_id(SortDirection::Descending);
        assert_eq!(ids(&desc), vec![3, 2, 1]);
        assert_eq!(ids(&table.snapshot()), vec![1, 2, 3]);
    }
}
