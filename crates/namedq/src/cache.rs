use crate::named::CompiledQuery;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// LRU of compiled catalog statements, keyed by statement id.
///
/// Each entry is a complete compile result, so its placeholder numbering is
/// independent of every other entry.
#[derive(Debug)]
pub(crate) struct CompiledCache {
    inner: Mutex<CompiledCacheInner>,
}

#[derive(Debug)]
struct CompiledCacheInner {
    capacity: usize,
    map: HashMap<String, Arc<CompiledQuery>>,
    order: VecDeque<String>,
}

impl CompiledCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CompiledCacheInner {
                capacity,
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CompiledCacheInner> {
        // Entries are immutable once inserted; a poisoned lock still holds valid data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn get(&self, key: &str) -> Option<Arc<CompiledQuery>> {
        let mut inner = self.lock();
        let compiled = inner.map.get(key).cloned()?;
        inner.touch(key);
        Some(compiled)
    }

    pub(crate) fn insert_if_absent(
        &self,
        key: String,
        compiled: Arc<CompiledQuery>,
    ) -> Arc<CompiledQuery> {
        let mut inner = self.lock();

        if let Some(existing) = inner.map.get(&key).cloned() {
            inner.touch(&key);
            return existing;
        }

        inner.map.insert(key.clone(), Arc::clone(&compiled));
        inner.order.push_back(key);
        inner.evict_if_needed();
        compiled
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub(crate) fn clear(&self) {
        let mut inner = self.lock();
        inner.map.clear();
        inner.order.clear();
    }
}

impl CompiledCacheInner {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k.as_str() == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }

    fn evict_if_needed(&mut self) {
        if self.capacity == 0 {
            self.map.clear();
            self.order.clear();
            return;
        }

        while self.map.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            let _ = self.map.remove(&oldest);
        }
    }
}
