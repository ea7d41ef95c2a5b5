// intern.rs
//
// Copyright (c) 2019-2026  Minnesota Department of Transportation
//
//! Insertion-ordered interning table for layer keys and values.
//!
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Table assigning each distinct entry a stable index, in order of first
/// occurrence.
#[derive(Clone, Debug)]
pub(crate) struct Interner<T>
where
    T: Clone + Eq + Hash,
{
    list: Vec<T>,
    map: HashMap<T, u32>,
}

impl<T> Default for Interner<T>
where
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        Interner {
            list: vec![],
            map: HashMap::new(),
        }
    }
}

impl<T> Interner<T>
where
    T: Clone + Eq + Hash,
{
    /// Build a table from existing entries.
    ///
    /// Returns `None` if the list contains duplicates.
    pub fn from_list(list: Vec<T>) -> Option<Self> {
        let mut map = HashMap::with_capacity(list.len());
        for (i, entry) in list.iter().enumerate() {
            if map.insert(entry.clone(), i as u32).is_some() {
                return None;
            }
        }
        Some(Interner { list, map })
    }

    /// Get the index of an entry, adding it if not found.
    ///
    /// Returns the index, and whether the entry was added.
    pub fn intern<Q>(&mut self, entry: &Q) -> (u32, bool)
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = T> + ?Sized,
    {
        if let Some(idx) = self.map.get(entry) {
            return (*idx, false);
        }
        let idx = self.list.len() as u32;
        let entry = entry.to_owned();
        self.map.insert(entry.clone(), idx);
        self.list.push(entry);
        (idx, true)
    }

    /// Get an entry by index.
    pub fn get(&self, idx: u32) -> Option<&T> {
        self.list.get(idx as usize)
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Get all entries, in index order.
    pub fn as_slice(&self) -> &[T] {
        &self.list
    }
}
