//! Insertion-ordered map
//!
//! Nodes live in a slab threaded on a doubly-linked list (oldest at the head),
//! indexed by an AHash map. Overwriting a key keeps its position, removal is
//! O(1), and iteration walks the list in insertion order.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::mem;

use ahash::RandomState;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Node in the insertion-order list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Map that iterates in the order keys were first inserted
pub struct OrderedMap<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty map
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
        }
    }

    /// Get a value by key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Check whether a key is present
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Insert a key-value pair
    ///
    /// A new key is appended at the end. An existing key has its value
    /// replaced in place and the old value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = self.nodes[idx].as_mut() {
                return Some(mem::replace(&mut node.value, value));
            }
        }

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: self.tail,
            next: None,
        });

        if let Some(tail_idx) = self.tail {
            if let Some(tail) = &mut self.nodes[tail_idx] {
                tail.next = Some(idx);
            }
        }

        self.tail = Some(idx);
        if self.head.is_none() {
            self.head = Some(idx);
        }

        self.map.insert(key, idx);
        None
    }

    /// Remove a key from the map
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        self.free_list.push(idx);
        self.nodes[idx].take().map(|node| node.value)
    }

    /// Keep only the entries for which `keep` returns true
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let doomed: Vec<K> = self
            .iter()
            .filter(|&(k, v)| !keep(k, v))
            .map(|(k, _)| k.clone())
            .collect();

        for key in doomed {
            self.remove(&key);
        }
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.map.len(),
        }
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Insertion-order iterator over an [`OrderedMap`]
pub struct Iter<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes[self.next?].as_ref()?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Hash + Eq + Clone + Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<K, V>(PhantomData<fn() -> (K, V)>);

impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: Hash + Eq + Clone + Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Hash + Eq + Clone + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(map: &OrderedMap<String, i32>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_insertion_order() {
        let mut map = OrderedMap::new();

        map.insert("zulu".to_string(), 1);
        map.insert("alpha".to_string(), 2);
        map.insert("mike".to_string(), 3);

        assert_eq!(keys_of(&map), vec!["zulu", "alpha", "mike"]);
        assert_eq!(map.get("alpha"), Some(&2));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = OrderedMap::new();

        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        assert_eq!(map.insert("a".to_string(), 10), Some(1));

        assert_eq!(keys_of(&map), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&10));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove_and_reinsert() {
        let mut map = OrderedMap::new();

        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        map.insert("c".to_string(), 3);

        assert_eq!(map.remove("a"), Some(1));
        assert_eq!(map.remove("a"), None);
        assert_eq!(keys_of(&map), vec!["b", "c"]);

        // Slot is reused but the key goes to the back
        map.insert("a".to_string(), 4);
        assert_eq!(keys_of(&map), vec!["b", "c", "a"]);

        assert_eq!(map.remove("c"), Some(3));
        assert_eq!(keys_of(&map), vec!["b", "a"]);
    }

    #[test]
    fn test_retain() {
        let mut map = OrderedMap::new();
        for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
            map.insert(key.to_string(), i as i32);
        }

        map.retain(|_, v| v % 2 == 0);

        assert_eq!(keys_of(&map), vec!["a", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut map = OrderedMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);

        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.iter().count(), 0);
        map.insert("c".to_string(), 3);
        assert_eq!(keys_of(&map), vec!["c"]);
    }

    #[test]
    fn test_json_preserves_order() {
        let json = r#"{"zulu":1,"alpha":2,"mike":3}"#;
        let map: OrderedMap<String, i32> = serde_json::from_str(json).unwrap();

        assert_eq!(keys_of(&map), vec!["zulu", "alpha", "mike"]);
        assert_eq!(serde_json::to_string(&map).unwrap(), json);
    }

    #[test]
    fn test_json_duplicate_key_keeps_first_position() {
        let json = r#"{"a":1,"b":2,"a":3}"#;
        let map: OrderedMap<String, i32> = serde_json::from_str(json).unwrap();

        assert_eq!(keys_of(&map), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&3));
    }

    #[test]
    fn test_json_rejects_non_map() {
        let result: Result<OrderedMap<String, i32>, _> = serde_json::from_str("[1,2]");
        assert!(result.is_err());
    }
}
