/// Case-insensitive HTTP header map.
///
/// Names are normalized to lowercase on write; lookups compare without regard
/// to case. [`insert`][HeaderMap::insert] is last-write-wins per name, while
/// [`append`][HeaderMap::append] keeps duplicate entries, which the response
/// layer relies on for `Set-Cookie`.
///
/// Iteration yields entries in insertion order with normalized names.
#[derive(Clone, Default)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    /// Create new empty [`HeaderMap`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Create new empty [`HeaderMap`] with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Returns the number of entries, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===== Lookup =====

impl HeaderMap {
    /// Returns `true` if the map contains an entry for given header name.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    /// Returns the first header value corresponding to the given header name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns an iterator over all values stored under the given header name.
    #[inline]
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns an iterator over entries as name and value pair, in insertion
    /// order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

// ===== Mutation =====

impl HeaderMap {
    /// Store `value` under the lowercased `name`, overwriting any prior value
    /// for that name.
    ///
    /// Returns the previous first value, if any. Duplicates added through
    /// [`append`][HeaderMap::append] are dropped.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        let value = value.into();

        match self.entries.iter().position(|(key, _)| key.eq_ignore_ascii_case(name)) {
            Some(at) => {
                let prior = std::mem::replace(&mut self.entries[at].1, value);
                // collapse duplicates, keeping the entry position
                let mut next = at + 1;
                while next < self.entries.len() {
                    if self.entries[next].0.eq_ignore_ascii_case(name) {
                        self.entries.remove(next);
                    } else {
                        next += 1;
                    }
                }
                Some(prior)
            }
            None => {
                self.entries.push((name.to_ascii_lowercase(), value));
                None
            }
        }
    }

    /// Store `value` under the lowercased `name`, keeping any prior entry for
    /// that name.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.entries.push((name.to_ascii_lowercase(), value.into()));
    }

    /// Remove every entry for the given header name, returning the first
    /// removed value if any was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let at = self
            .entries
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))?;
        let (_, value) = self.entries.remove(at);
        self.entries.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        Some(value)
    }

    /// Remove every entry.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for HeaderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
