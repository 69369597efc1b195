
use std::collections::VecDeque;

/// Holds formatted record bodies until the logger has somewhere to write them.
///
/// Unlike a ring buffer nothing is evicted: every body pushed before activation
/// is replayed, in insertion order, once the destination is opened.
#[derive(Debug, Clone, Default)]
pub struct MessageCache {
  /// Pending bodies, oldest first
  data: VecDeque<String>,
}

impl MessageCache {
  /// Creates an empty cache.
  ///
  /// # Example
  /// ```rust
  /// use scitrack::buffer::MessageCache;
  ///
  /// let cache = MessageCache::new();
  /// assert!(cache.is_empty());
  /// ```
  pub fn new() -> Self {
    Self {
      data: VecDeque::new(),
    }
  }

  /// Appends a body after every body already pending.
  pub fn push(&mut self, body: impl Into<String>) {
    self.data.push_back(body.into());
  }

  /// Removes and returns all pending bodies.
  ///
  /// The cache is left empty, so a second call returns nothing.
  ///
  /// # Example
  /// ```rust
  /// use scitrack::buffer::MessageCache;
  ///
  /// let mut cache = MessageCache::new();
  /// cache.push("misc : one");
  /// cache.push("misc : two");
  /// assert_eq!(cache.drain_all(), vec!["misc : one", "misc : two"]);
  /// assert!(cache.is_empty());
  /// ```
  pub fn drain_all(&mut self) -> Vec<String> {
    std::mem::take(&mut self.data).into_iter().collect()
  }

  /// Iterates over pending bodies, oldest first.
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.data.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Drops every pending body without returning it.
  pub fn clear(&mut self) {
    self.data.clear();
  }
}
