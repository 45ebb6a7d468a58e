//! LRU List Module
//!
//! Doubly linked recency list stored in a slot vector.

// == Node ==
#[derive(Debug)]
struct Node<T> {
    item: T,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU List ==
/// Recency-ordered list with O(1) removal and move-to-back by slot index.
///
/// - Front (head) = least recently used, the eviction candidate
/// - Back (tail) = most recently used
///
/// Slot indices returned by [`LruList::push_back`] stay valid until the item
/// is removed. Freed slots are reused by later pushes.
#[derive(Debug)]
pub struct LruList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> LruList<T> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates a list with room for `capacity` items before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    fn node(&self, slot: usize) -> Option<&Node<T>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    // == Push Back ==
    /// Appends an item as most recently used and returns its slot.
    pub fn push_back(&mut self, item: T) -> usize {
        let node = Node {
            item,
            prev: self.tail,
            next: None,
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(slot);
                }
            }
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
        slot
    }

    // == Unlink ==
    /// Detaches a slot from its neighbours without freeing it.
    fn unlink(&mut self, slot: usize) {
        let (prev, next) = match self.node(slot) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    // == Remove ==
    /// Removes the item at `slot`, returning it if the slot was occupied.
    pub fn remove(&mut self, slot: usize) -> Option<T> {
        self.node(slot)?;
        self.unlink(slot);

        let node = self.slots.get_mut(slot)?.take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(node.item)
    }

    // == Move To Back ==
    /// Marks the item at `slot` as most recently used.
    pub fn move_to_back(&mut self, slot: usize) {
        if self.tail == Some(slot) || self.node(slot).is_none() {
            return;
        }

        self.unlink(slot);

        let old_tail = self.tail;
        if let Some(node) = self.node_mut(slot) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(slot);
                }
            }
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }

    // == Pop Front ==
    /// Removes and returns the least recently used item.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.remove(head)
    }

    // == Peek Front ==
    /// Returns the least recently used item without removing it.
    pub fn peek_front(&self) -> Option<&T> {
        self.head.and_then(|slot| self.get(slot))
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.node(slot).map(|node| &node.item)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.node_mut(slot).map(|node| &mut node.item)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Iterates from least to most recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over an [`LruList`], front to back.
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.item)
    }
}
