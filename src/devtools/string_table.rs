//! String interning for names sent to the inspector.
//!
//! Ids are 1-based in first-seen order; 0 is reserved for "no string".
//! How the table is packed for transport is up to the consumer.

use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct StringTable {
    ids: HashMap<String, u32>,
    strings: Vec<String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `input`, adding it to the table if needed.
    pub fn intern(&mut self, input: &str) -> u32 {
        if let Some(&id) = self.ids.get(input) {
            return id;
        }
        self.strings.push(input.to_string());
        let id = self.strings.len() as u32;
        self.ids.insert(input.to_string(), id);
        id
    }

    pub fn get(&self, id: u32) -> Option<&str> {
        let index = (id as usize).checked_sub(1)?;
        self.strings.get(index).map(String::as_str)
    }

    /// Interned strings in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.strings
            .iter()
            .enumerate()
            .map(|(index, s)| (index as u32 + 1, s.as_str()))
    }

    pub fn clear(&mut self) {
        log::info!("Clearing string table ({} entries)", self.strings.len());
        self.ids.clear();
        self.strings.clear();
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

thread_local! {
    static STRING_TABLE: RefCell<StringTable> = RefCell::new(StringTable::new());
}

/// Intern a string in the thread's default table.
pub fn intern_string(input: &str) -> u32 {
    STRING_TABLE.with(|table| table.borrow_mut().intern(input))
}

/// Look up a string in the thread's default table.
pub fn string_by_id(id: u32) -> Option<String> {
    STRING_TABLE.with(|table| table.borrow().get(id).map(str::to_string))
}

pub fn clear_string_table() {
    STRING_TABLE.with(|table| table.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable_and_one_based() {
        let mut table = StringTable::new();
        assert_eq!(table.intern("div"), 1);
        assert_eq!(table.intern("Foo"), 2);
        assert_eq!(table.intern("div"), 1);
        assert_eq!(table.len(), 2);

        assert_eq!(table.get(0), None);
        assert_eq!(table.get(2), Some("Foo"));
        assert_eq!(table.get(3), None);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(1, "div"), (2, "Foo")]);
    }

    #[test]
    fn test_clear_restarts_numbering() {
        let mut table = StringTable::new();
        table.intern("a");
        table.intern("b");
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.intern("b"), 1);
    }

    #[test]
    fn test_thread_local_table() {
        clear_string_table();
        let id = intern_string("span");
        assert_eq!(intern_string("span"), id);
        assert_eq!(string_by_id(id).as_deref(), Some("span"));

        clear_string_table();
        assert_eq!(string_by_id(id), None);
    }
}
