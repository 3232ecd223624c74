/*!
 * Scheduler Ring
 * Circular doubly-linked run ring with a sentinel anchor
 *
 * Nodes live in an arena and link to each other by index. Slot 0 is the
 * sentinel: it never holds a process and marks the ring boundary. Removed
 * slots go on a free list and are reused by later appends.
 */

/// Position of a node in the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor(usize);

impl Cursor {
    /// The sentinel node
    pub const SENTINEL: Cursor = Cursor(0);

    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy)]
struct Node<T> {
    id: Option<T>,
    prev: usize,
    next: usize,
}

/// Run ring of live process identifiers in launch order
#[derive(Debug, Clone)]
pub struct Ring<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T: Copy + Eq> Ring<T> {
    /// Create a ring holding only the sentinel
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                id: None,
                prev: 0,
                next: 0,
            }],
            free: Vec::new(),
            len: 0,
        }
    }

    /// Insert at the tail, just before the sentinel - O(1)
    pub fn append(&mut self, id: T) -> Cursor {
        let sentinel = Cursor::SENTINEL.0;
        let tail = self.nodes[sentinel].prev;
        let node = Node {
            id: Some(id),
            prev: tail,
            next: sentinel,
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        self.nodes[tail].next = slot;
        self.nodes[sentinel].prev = slot;
        self.len += 1;
        Cursor(slot)
    }

    /// Unlink the node holding `id` - O(n) scan
    ///
    /// Removing an identifier that is not in the ring leaves it untouched
    /// and returns `false`.
    pub fn remove(&mut self, id: T) -> bool {
        let Some(slot) = self.position(id) else {
            return false;
        };

        let Node { prev, next, .. } = self.nodes[slot];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;

        self.nodes[slot] = Node {
            id: None,
            prev: slot,
            next: slot,
        };
        self.free.push(slot);
        self.len -= 1;
        true
    }

    /// True iff the sentinel links only to itself
    #[inline]
    pub fn is_empty(&self) -> bool {
        let sentinel = &self.nodes[Cursor::SENTINEL.0];
        sentinel.next == Cursor::SENTINEL.0 && sentinel.prev == Cursor::SENTINEL.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Step to the successor of `cursor`, skipping over the sentinel
    ///
    /// Lands on the sentinel only when the ring is empty.
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        let next = self.nodes[cursor.0].next;
        if next == Cursor::SENTINEL.0 {
            Cursor(self.nodes[next].next)
        } else {
            Cursor(next)
        }
    }

    /// First live node, or the sentinel when empty
    pub fn first(&self) -> Cursor {
        self.advance(Cursor::SENTINEL)
    }

    /// Identifier stored at `cursor`; `None` for the sentinel
    pub fn get(&self, cursor: Cursor) -> Option<T> {
        self.nodes.get(cursor.0).and_then(|node| node.id)
    }

    pub fn contains(&self, id: T) -> bool {
        self.position(id).is_some()
    }

    /// Identifiers in ring order, starting after the sentinel
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            slot: self.nodes[Cursor::SENTINEL.0].next,
        }
    }

    fn position(&self, id: T) -> Option<usize> {
        let mut slot = self.nodes[Cursor::SENTINEL.0].next;
        while slot != Cursor::SENTINEL.0 {
            if self.nodes[slot].id == Some(id) {
                return Some(slot);
            }
            slot = self.nodes[slot].next;
        }
        None
    }
}

impl<T: Copy + Eq> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the live identifiers of a ring
pub struct Iter<'a, T> {
    ring: &'a Ring<T>,
    slot: usize,
}

impl<'a, T: Copy> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.slot == Cursor::SENTINEL.0 {
            return None;
        }
        let node = &self.ring.nodes[self.slot];
        self.slot = node.next;
        node.id
    }
}
