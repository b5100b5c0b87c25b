//! Price-time-ordered storage for one side of the book.
//!
//! Mirrors the teacher's `BTreeMap<price, VecDeque<Order>>` layout
//! (`orderbook.rs`), generalized with a side tag so the same type serves
//! both Buy (best = highest price) and Sell (best = lowest price) and
//! paired with an id index for cancellation, per spec §4.1/§9.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::order::{RestingOrder, Side};

/// One side of the book: a multiset of resting orders ordered by price,
/// then by insertion (FIFO within a price level via `VecDeque`), plus an
/// `order_id -> price` index for O(log n) cancellation.
pub struct SideBook {
    side: Side,
    levels: BTreeMap<u32, VecDeque<RestingOrder>>,
    index: HashMap<u32, u32>,
}

/// Unifies ascending and descending traversal over price levels so the
/// matcher and the snapshot walk can share one code path regardless of
/// side (teacher's `EitherIter` plays the same role in `orderbook.rs`).
enum LevelIter<'a> {
    Asc(std::collections::btree_map::Iter<'a, u32, VecDeque<RestingOrder>>),
    Desc(std::iter::Rev<std::collections::btree_map::Iter<'a, u32, VecDeque<RestingOrder>>>),
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = (&'a u32, &'a VecDeque<RestingOrder>);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            LevelIter::Asc(it) => it.next(),
            LevelIter::Desc(it) => it.next(),
        }
    }
}

impl SideBook {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Best (top-of-book) price on this side, if any entries rest here.
    pub fn best_price(&self) -> Option<u32> {
        match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        }
    }

    /// Places `order` after every existing entry at its price (time
    /// priority). Panics if `order_id` is already resting on this side —
    /// an invariant violation per spec §7, not a caller-recoverable error.
    pub fn insert(&mut self, order: RestingOrder) {
        assert!(
            !self.index.contains_key(&order.order_id),
            "duplicate order id {} inserted into side book",
            order.order_id
        );
        self.index.insert(order.order_id, order.price);
        self.levels.entry(order.price).or_default().push_back(order);
    }

    /// Removes and returns the entry for `order_id`, wherever it rests on
    /// this side. `None` if the id isn't live here.
    pub fn erase_by_id(&mut self, order_id: u32) -> Option<RestingOrder> {
        let price = self.index.remove(&order_id)?;
        let level = self.levels.get_mut(&price).expect("id index out of sync");
        let pos = level
            .iter()
            .position(|o| o.order_id == order_id)
            .expect("id index out of sync");
        let removed = level.remove(pos).expect("position just located");
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(removed)
    }

    /// The FIFO queue resting at `price`, best-effort mutable access used
    /// by the matcher while it walks a tier.
    pub fn level_mut(&mut self, price: u32) -> Option<&mut VecDeque<RestingOrder>> {
        self.levels.get_mut(&price)
    }

    pub fn drop_level_if_empty(&mut self, price: u32) {
        if self.levels.get(&price).is_some_and(VecDeque::is_empty) {
            self.levels.remove(&price);
        }
    }

    pub fn drop_index(&mut self, order_id: u32) {
        self.index.remove(&order_id);
    }

    /// Iterates all live entries best price first, FIFO within a level —
    /// exactly the order a book snapshot is reported in (spec §4.3).
    pub fn iter(&self) -> impl Iterator<Item = &RestingOrder> {
        let levels = match self.side {
            Side::Buy => LevelIter::Desc(self.levels.iter().rev()),
            Side::Sell => LevelIter::Asc(self.levels.iter()),
        };
        levels.flat_map(|(_, orders)| orders.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u32, price: u32, qty: u32) -> RestingOrder {
        RestingOrder {
            side: Side::Buy,
            order_id: id,
            price,
            quantity: qty,
            peak: 0,
            hidden: 0,
        }
    }

    #[test]
    fn buy_side_best_price_is_highest() {
        let mut book = SideBook::new(Side::Buy);
        book.insert(order(1, 100, 10));
        book.insert(order(2, 105, 5));
        assert_eq!(book.best_price(), Some(105));
    }

    #[test]
    fn sell_side_best_price_is_lowest() {
        let mut book = SideBook::new(Side::Sell);
        book.insert(order(1, 105, 10));
        book.insert(order(2, 100, 5));
        assert_eq!(book.best_price(), Some(100));
    }

    #[test]
    fn iter_preserves_time_priority_within_level() {
        let mut book = SideBook::new(Side::Buy);
        book.insert(order(1, 100, 5));
        book.insert(order(2, 100, 5));
        let ids: Vec<u32> = book.iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn erase_by_id_removes_entry_and_empties_level() {
        let mut book = SideBook::new(Side::Buy);
        book.insert(order(1, 100, 5));
        assert!(book.erase_by_id(1).is_some());
        assert!(book.is_empty());
        assert!(book.erase_by_id(1).is_none());
    }
}
