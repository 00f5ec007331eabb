//! Priority queue values: a binary heap of `(priority, item)` pairs (§3).
//! §3 doesn't say which end pops first; this port picks min-first (lowest
//! priority number dequeues first, matching the conventional Dijkstra-style
//! usage a scripting language's stdlib would expose it for) and documents
//! the choice in `DESIGN.md`. Ties break FIFO by insertion sequence so
//! `pop` is deterministic for equal priorities.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::value::Value;

#[derive(Debug, Clone)]
struct Entry {
    priority: f64,
    sequence: u64,
    item: Value,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}
impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // `BinaryHeap` is a max-heap; reverse the priority comparison so
        // the *lowest* priority value surfaces first, then break ties by
        // insertion order (earlier sequence number wins, so reverse that
        // too since the heap pops the "greatest" element).
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ZenPriorityQueue {
    heap: BinaryHeap<Entry>,
    next_sequence: u64,
}

impl ZenPriorityQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn push(&mut self, priority: f64, item: Value) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Entry {
            priority,
            sequence,
            item,
        });
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn peek(&self) -> Option<&Value> {
        self.heap.peek().map(|entry| &entry.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_priority_first() {
        let mut pq = ZenPriorityQueue::new();
        pq.push(5.0, Value::Number(5.0));
        pq.push(1.0, Value::Number(1.0));
        pq.push(3.0, Value::Number(3.0));
        assert_eq!(pq.pop(), Some(Value::Number(1.0)));
        assert_eq!(pq.pop(), Some(Value::Number(3.0)));
        assert_eq!(pq.pop(), Some(Value::Number(5.0)));
        assert_eq!(pq.pop(), None);
    }

    #[test]
    fn ties_break_fifo() {
        let mut pq = ZenPriorityQueue::new();
        pq.push(1.0, Value::String(std::rc::Rc::new(crate::ZenString::new("a").unwrap())));
        pq.push(1.0, Value::String(std::rc::Rc::new(crate::ZenString::new("b").unwrap())));
        let first = pq.pop().unwrap();
        assert_eq!(first.to_string(), "a");
    }
}
