//! LRU Recency List Module
//!
//! Arena-backed doubly linked list that keeps cache entries in recency order.

/// Stable handle to a node in the [`RecencyList`] arena.
pub type SlotId = usize;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

// == Recency List ==
/// Doubly linked list of values stored in a slot arena.
///
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// Slots are addressed by index rather than pointer, so an external index can
/// hold a [`SlotId`] and reach its node in O(1). Vacated slots are reused.
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a value at the most recently used position.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let node = Node {
            value,
            prev: None,
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
        self.link_front(slot);
        self.len += 1;
        slot
    }

    // == Move To Front ==
    /// Marks a slot as most recently used. Vacant slots are ignored.
    pub fn move_to_front(&mut self, slot: SlotId) {
        if self.head == Some(slot) || self.node(slot).is_none() {
            return;
        }
        self.unlink(slot);
        self.link_front(slot);
    }

    // == Remove ==
    /// Removes a slot from the list and returns its value.
    pub fn remove(&mut self, slot: SlotId) -> Option<T> {
        self.node(slot)?;
        self.unlink(slot);
        let node = self.slots.get_mut(slot)?.take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(node.value)
    }

    // == Back ==
    /// Returns the least recently used slot.
    pub fn back(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the most recently used slot.
    pub fn front(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the value stored in a slot.
    pub fn get(&self, slot: SlotId) -> Option<&T> {
        self.node(slot).map(|node| &node.value)
    }

    /// Returns the value stored in a slot, mutably.
    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(slot)
            .and_then(Option::as_mut)
            .map(|node| &mut node.value)
    }

    // == Length ==
    /// Returns the number of linked values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no values are linked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates `(slot, value)` pairs from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn node(&self, slot: SlotId) -> Option<&Node<T>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn link_front(&mut self, slot: SlotId) {
        let old_head = self.head;
        if let Some(Some(node)) = self.slots.get_mut(slot) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head.and_then(|head| self.slots.get_mut(head)) {
            Some(Some(head)) => head.prev = Some(slot),
            _ => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    fn unlink(&mut self, slot: SlotId) {
        let (prev, next) = match self.node(slot) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(Some(node)) = self.slots.get_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(Some(node)) = self.slots.get_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(Some(node)) = self.slots.get_mut(slot) {
            node.prev = None;
            node.next = None;
        }
    }
}

/// Iterator over a [`RecencyList`], most recently used first.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let node = self.list.node(slot)?;
        self.cursor = node.next;
        Some((slot, &node.value))
    }
}
