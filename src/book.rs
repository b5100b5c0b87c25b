//! The `Book` facade: the engine's only public entry point, bracketing
//! each command with `StartReport`/`FinishReport` and a full snapshot, per
//! spec §4.3. Replaces the teacher's `OrderBook` in `orderbook.rs` with a
//! two-`SideBook` engine parameterized by the matching algorithm in
//! [`crate::matcher`].

use tracing::warn;

use crate::acceptor::Acceptor;
use crate::errors::OrderError;
use crate::matcher;
use crate::order::{Order, Side};
use crate::side_book::SideBook;

/// Owns both side books for one instrument and routes commands to the
/// matcher. Lives for the process; holds no other state.
pub struct Book {
    bids: SideBook,
    asks: SideBook,
}

impl Book {
    pub fn new() -> Self {
        Self {
            bids: SideBook::new(Side::Buy),
            asks: SideBook::new(Side::Sell),
        }
    }

    /// Matches `order` against the opposite side, rests any residue on its
    /// own side, and reports the trades plus a full snapshot.
    ///
    /// Panics if `order.order_id` is already resting on either side — an
    /// invariant violation per spec §7 that well-formed input never
    /// triggers.
    pub fn accept_order(&mut self, order: Order, acceptor: &mut dyn Acceptor) {
        if self.is_live(order.order_id) {
            panic!(
                "{}",
                OrderError::DuplicateOrderId {
                    order_id: order.order_id
                }
            );
        }

        acceptor.start_report();

        let (maker_book, taker_book) = match order.side {
            Side::Buy => (&mut self.asks, &mut self.bids),
            Side::Sell => (&mut self.bids, &mut self.asks),
        };
        let remaining = matcher::match_order(&order, maker_book, acceptor);
        if let Some(resting) = matcher::residue(&order, remaining) {
            taker_book.insert(resting);
        }

        self.emit_snapshot(acceptor);
        acceptor.finish_report();
    }

    /// Cancels a live order by id. Returns whether a matching entry was
    /// found; either way the book still reports a snapshot (spec §7).
    pub fn cancel_order(&mut self, order_id: u32, acceptor: &mut dyn Acceptor) -> bool {
        let found = self.bids.erase_by_id(order_id).is_some()
            || self.asks.erase_by_id(order_id).is_some();

        if !found {
            warn!(order_id, "cancel target not found");
        }

        acceptor.start_report();
        self.emit_snapshot(acceptor);
        acceptor.finish_report();

        found
    }

    /// Emits a snapshot only, with no `StartReport`/`FinishReport`
    /// bracket — matching `IBook::ListBook` in
    /// `examples/original_source/book.cpp`.
    pub fn list_book(&self, acceptor: &mut dyn Acceptor) {
        self.emit_snapshot(acceptor);
    }

    fn is_live(&self, order_id: u32) -> bool {
        self.bids.iter().any(|o| o.order_id == order_id)
            || self.asks.iter().any(|o| o.order_id == order_id)
    }

    fn emit_snapshot(&self, acceptor: &mut dyn Acceptor) {
        for order in self.bids.iter() {
            acceptor.book_line(order);
        }
        for order in self.asks.iter() {
            acceptor.book_line(order);
        }
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acceptor::TestAcceptor;

    fn limit(side: Side, id: u32, price: u32, qty: u32) -> Order {
        Order::new(side, id, price, qty, 0).unwrap()
    }

    // S1 from spec §8.
    #[test]
    fn resting_orders_both_sides_snapshot() {
        let mut book = Book::new();
        let mut acc = TestAcceptor::default();
        book.accept_order(limit(Side::Buy, 1, 100, 10), &mut acc);
        book.accept_order(limit(Side::Sell, 2, 101, 10), &mut acc);

        assert!(acc.trades.is_empty());
        assert_eq!(acc.orders.len(), 2);
        assert_eq!(acc.orders[0].order_id, 1);
        assert_eq!(acc.orders[1].order_id, 2);
    }

    // S3 from spec §8.
    #[test]
    fn partial_fill_residue_posts() {
        let mut book = Book::new();
        let mut acc = TestAcceptor::default();
        book.accept_order(limit(Side::Sell, 1, 100, 10), &mut acc);
        book.accept_order(limit(Side::Buy, 2, 100, 15), &mut acc);

        assert_eq!(acc.trades.len(), 1);
        assert_eq!(acc.trades[0].quantity, 10);
        assert_eq!(acc.orders.len(), 1);
        assert_eq!(acc.orders[0].order_id, 2);
        assert_eq!(acc.orders[0].quantity, 5);
    }

    #[test]
    fn cancel_unknown_id_reports_snapshot_and_fails() {
        let mut book = Book::new();
        let mut acc = TestAcceptor::default();
        book.accept_order(limit(Side::Buy, 1, 100, 10), &mut acc);

        let ok = book.cancel_order(999, &mut acc);
        assert!(!ok);
        assert_eq!(acc.orders.len(), 1);
    }

    #[test]
    fn cancel_known_id_removes_it() {
        let mut book = Book::new();
        let mut acc = TestAcceptor::default();
        book.accept_order(limit(Side::Buy, 1, 100, 10), &mut acc);

        let ok = book.cancel_order(1, &mut acc);
        assert!(ok);
        assert!(acc.orders.is_empty());
    }

    #[test]
    fn book_never_crosses() {
        let mut book = Book::new();
        let mut acc = TestAcceptor::default();
        book.accept_order(limit(Side::Buy, 1, 100, 10), &mut acc);
        book.accept_order(limit(Side::Sell, 2, 101, 10), &mut acc);

        let best_bid = book.bids.best_price();
        let best_ask = book.asks.best_price();
        if let (Some(bid), Some(ask)) = (best_bid, best_ask) {
            assert!(bid < ask);
        }
    }
}
