use std::collections::{BinaryHeap, HashSet};

use gridstar_core::Coord;

use crate::Cost;

/// A queued cell with its priority key.
///
/// Ordered by `(f, seq)` only, reversed so that `BinaryHeap` (a max-heap)
/// pops the smallest `f` first and, among equal `f`, the earliest insertion.
/// The coordinate never takes part in the comparison.
#[derive(Copy, Clone, Debug)]
pub struct Entry {
    pub f: Cost,
    pub seq: u64,
    pub coord: Coord,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The open set: a min-queue over `(f, seq)` plus a membership set.
///
/// There is no decrease-key. A cell is queued at most once at a time, and a
/// cell is a member exactly while its entry is waiting to be popped.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    members: HashSet<Coord>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `coord` with priority `f`, stamping it with the next sequence
    /// number. Returns `false` (and queues nothing) if it is already a member.
    pub fn push(&mut self, f: Cost, coord: Coord) -> bool {
        if !self.members.insert(coord) {
            return false;
        }
        self.heap.push(Entry {
            f,
            seq: self.next_seq,
            coord,
        });
        self.next_seq += 1;
        true
    }

    /// Remove and return the entry with the lowest `(f, seq)`.
    pub fn pop(&mut self) -> Option<Entry> {
        let entry = self.heap.pop()?;
        self.members.remove(&entry.coord);
        Some(entry)
    }

    /// The entry [`pop`](Self::pop) would return next.
    pub fn peek(&self) -> Option<&Entry> {
        self.heap.peek()
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.members.contains(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
