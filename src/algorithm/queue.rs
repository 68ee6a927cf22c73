/// An element that can sit in a [`PriorityQueue`]. The entry stores its own
/// 1-based slot in the queue (0 when absent) so that a decreased cost can be
/// restored in place.
pub trait HeapEntry {
    fn cost(&self) -> f64;
    fn heap_index(&self) -> usize;
    fn set_heap_index(&mut self, index: usize);
}

/// Binary min-heap over ids into an external entry table, ordered by entry cost.
#[derive(Debug, Default, Clone)]
pub struct PriorityQueue {
    heap: Vec<usize>,
    capacity: usize,
}

impl PriorityQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            heap: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Empties the queue and sets a new fixed capacity.
    pub fn reset(&mut self, capacity: usize) {
        self.heap.clear();
        self.heap.reserve(capacity);
        self.capacity = capacity;
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Adds `id` to the queue, or restores its position after its cost decreased
    /// if it is already queued.
    pub fn insert_or_relax<E: HeapEntry>(&mut self, entries: &mut [E], id: usize) {
        let index = entries[id].heap_index();
        if index == 0 {
            assert!(
                self.heap.len() < self.capacity,
                "priority queue is full ({} entries)",
                self.capacity
            );
            self.heap.push(id);
            entries[id].set_heap_index(self.heap.len());
            self.sift_up(entries, self.heap.len() - 1);
        } else {
            // A cost decrease can only break the invariant toward the root.
            self.sift_up(entries, index - 1);
        }
    }

    /// Removes and returns the id of the cheapest entry.
    pub fn extract_min<E: HeapEntry>(&mut self, entries: &mut [E]) -> Option<usize> {
        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            entries[last].set_heap_index(0);
            return Some(last);
        }

        let min = std::mem::replace(&mut self.heap[0], last);
        entries[min].set_heap_index(0);
        entries[last].set_heap_index(1);
        self.sift_down(entries, 0);
        Some(min)
    }

    fn sift_up<E: HeapEntry>(&mut self, entries: &mut [E], mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if entries[self.heap[slot]].cost() >= entries[self.heap[parent]].cost() {
                break;
            }
            self.swap(entries, slot, parent);
            slot = parent;
        }
    }

    fn sift_down<E: HeapEntry>(&mut self, entries: &mut [E], mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            // Ties go to the left child.
            if left < len && entries[self.heap[left]].cost() < entries[self.heap[smallest]].cost()
            {
                smallest = left;
            }
            if right < len
                && entries[self.heap[right]].cost() < entries[self.heap[smallest]].cost()
            {
                smallest = right;
            }

            if smallest == slot {
                break;
            }
            self.swap(entries, slot, smallest);
            slot = smallest;
        }
    }

    fn swap<E: HeapEntry>(&mut self, entries: &mut [E], a: usize, b: usize) {
        self.heap.swap(a, b);
        entries[self.heap[a]].set_heap_index(a + 1);
        entries[self.heap[b]].set_heap_index(b + 1);
    }

    #[cfg(test)]
    pub(crate) fn is_valid<E: HeapEntry>(&self, entries: &[E]) -> bool {
        self.heap.iter().enumerate().all(|(slot, &id)| {
            let positioned = entries[id].heap_index() == slot + 1;
            let ordered =
                slot == 0 || entries[id].cost() >= entries[self.heap[(slot - 1) / 2]].cost();
            positioned && ordered
        })
    }
}
