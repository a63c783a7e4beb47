// src/editor/lru.rs
// Bounded memo store. Entries live in an arena and are linked by index from least to most
// recently used, so eviction and refresh never chase dangling references.
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
pub struct LruCache<K, V> {
    map: HashMap<K, usize>,
    nodes: Vec<Node<K, V>>,
    lru: Option<usize>,
    mru: Option<usize>,
    capacity: usize,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        LruCache {
            map: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            lru: None,
            mru: None,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Looks up `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = *self.map.get(key)?;
        self.touch(i);
        Some(&self.nodes[i].value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Inserts or replaces `key` as the most recently used entry, evicting the least recently
    /// used one first when full.
    pub fn set(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if let Some(&i) = self.map.get(&key) {
            self.nodes[i].value = value;
            self.touch(i);
            return;
        }

        let i = match self.lru {
            Some(evicted) if self.map.len() >= self.capacity => {
                self.unlink(evicted);
                self.map.remove(&self.nodes[evicted].key);
                let node = &mut self.nodes[evicted];
                node.key = key.clone();
                node.value = value;
                evicted
            }
            _ => {
                self.nodes.push(Node { key: key.clone(), value, prev: None, next: None });
                self.nodes.len() - 1
            }
        };
        self.map.insert(key, i);
        self.push_mru(i);
    }

    fn touch(&mut self, i: usize) {
        if self.mru != Some(i) {
            self.unlink(i);
            self.push_mru(i);
        }
    }

    fn unlink(&mut self, i: usize) {
        let (prev, next) = (self.nodes[i].prev, self.nodes[i].next);
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.lru = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.mru = prev,
        }
        self.nodes[i].prev = None;
        self.nodes[i].next = None;
    }

    fn push_mru(&mut self, i: usize) {
        self.nodes[i].prev = self.mru;
        self.nodes[i].next = None;
        match self.mru {
            Some(m) => self.nodes[m].next = Some(i),
            None => self.lru = Some(i),
        }
        self.mru = Some(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recency<V>(cache: &LruCache<String, V>) -> Vec<String> {
        let mut keys = Vec::new();
        let mut cursor = cache.lru;
        while let Some(i) = cursor {
            keys.push(cache.nodes[i].key.clone());
            cursor = cache.nodes[i].next;
        }
        keys
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = LruCache::new(2);
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        assert_eq!(cache.get("a"), Some(&1));
        cache.set("c".to_string(), 3);

        assert!(!cache.contains_key("b"));
        assert_eq!(cache.get("a"), Some(&1));
        assert_eq!(cache.get("c"), Some(&3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_evicts_least_recently_set() {
        let mut cache = LruCache::new(3);
        for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
            cache.set(key.to_string(), i);
        }
        assert!(!cache.contains_key("a"));
        assert_eq!(recency(&cache), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_list_tracks_map_through_churn() {
        let mut cache = LruCache::new(4);
        for i in 0..50 {
            let key = format!("k{}", i % 7);
            if cache.get(&key).is_none() {
                cache.set(key, i);
            }
            let order = recency(&cache);
            assert_eq!(order.len(), cache.len());
            assert!(cache.len() <= cache.capacity());
            assert!(order.iter().all(|k| cache.contains_key(k.as_str())));
        }
    }

    #[test]
    fn test_set_existing_key_replaces_value() {
        let mut cache = LruCache::new(2);
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        cache.set("a".to_string(), 10);
        cache.set("c".to_string(), 3);
        assert_eq!(cache.get("a"), Some(&10));
        assert!(!cache.contains_key("b"));
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache: LruCache<String, u8> = LruCache::new(0);
        cache.set("a".to_string(), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }
}
