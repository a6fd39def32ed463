use std::collections::HashMap;

use crate::field::header_key;

/// Case- and whitespace-insensitive index from header labels to column positions.
///
/// The first occurrence of a duplicated header wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    map: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (idx, header) in headers.into_iter().enumerate() {
            map.entry(header_key(header.as_ref())).or_insert(idx);
        }
        Self { map }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.map.get(&header_key(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&header_key(name))
    }

    /// Point `name` at `position`, replacing any earlier column of that name.
    ///
    /// Returns the position it replaced.
    pub fn assign(&mut self, name: &str, position: usize) -> Option<usize> {
        self.map.insert(header_key(name), position)
    }
}
