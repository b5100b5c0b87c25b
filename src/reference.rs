//! A deliberately separate implementation of the matching algorithm used
//! only to cross-check [`crate::book::Book`] in the driver's `test` mode
//! (spec §6.4). Grounded in `NTesting::Test`'s `calcExpected` in
//! `examples/original_source/tests.cpp`: rather than walking a per-tier
//! FIFO queue with replenished makers requeued at the tail (the shape
//! `matcher.rs`'s `consume_tier` uses), it finds the maker side's slice of
//! the previous snapshot with a binary search (`partition_point`, the Rust
//! analog of `std::lower_bound`) and then repeatedly sweeps that slice
//! left to right in place, replenishing icebergs where they sit, until a
//! full pass makes no further progress. A bug in the requeue logic itself
//! would not reproduce here, since there is no requeue.

use std::collections::HashMap;

use crate::order::{Order, RestingOrder, Side};
use crate::trade::Trade;

fn crosses(taker_side: Side, taker_price: u32, tier_price: u32) -> bool {
    match taker_side {
        Side::Buy => tier_price <= taker_price,
        Side::Sell => tier_price >= taker_price,
    }
}

fn orient(taker_side: Side, taker_id: u32, maker_id: u32) -> (u32, u32) {
    match taker_side {
        Side::Buy => (taker_id, maker_id),
        Side::Sell => (maker_id, taker_id),
    }
}

/// The outcome `expected_match` predicts for one `AcceptOrder` call.
pub struct Expectation {
    pub trades: Vec<Trade>,
    pub volume: u64,
    pub cost: u64,
    /// Net change in the number of resting orders this command causes.
    pub book_size_delta: i32,
}

/// Recomputes what `taker` should do against `prev_snapshot` — the full
/// book snapshot reported *before* this command ran. `prev_snapshot`
/// lists every live Buy entry followed by every live Sell entry (spec
/// §4.3's snapshot contract), so the Buy/Sell boundary is a single
/// binary search rather than a linear filter.
pub fn expected_match(prev_snapshot: &[RestingOrder], taker: &Order) -> Expectation {
    let maker_side = taker.side.opposite();
    let mut book: Vec<RestingOrder> = prev_snapshot.to_vec();

    let boundary = book.partition_point(|o| o.side == Side::Buy);
    let (start, end) = match maker_side {
        Side::Buy => (0, boundary),
        Side::Sell => (boundary, book.len()),
    };

    let mut remaining = taker.quantity;
    let mut trades = Vec::new();
    let mut removed = 0i32;
    let mut i = start;

    while remaining > 0 && i < end {
        let tier_price = book[i].price;
        if !crosses(taker.side, taker.price, tier_price) {
            break;
        }
        let mut tier_end = i;
        while tier_end < end && book[tier_end].price == tier_price {
            tier_end += 1;
        }

        let mut aggregate: HashMap<u32, u32> = HashMap::new();
        loop {
            let before = remaining;
            for maker in &mut book[i..tier_end] {
                if remaining == 0 {
                    break;
                }
                if maker.quantity == 0 {
                    continue;
                }
                let fill = remaining.min(maker.quantity);
                *aggregate.entry(maker.order_id).or_insert(0) += fill;
                remaining -= fill;
                maker.quantity -= fill;
                if maker.quantity == 0 && !maker.replenish() {
                    removed += 1;
                }
            }
            if remaining == 0 || remaining == before {
                break;
            }
        }

        for (&maker_id, &quantity) in &aggregate {
            let (buy_order_id, sell_order_id) = orient(taker.side, taker.order_id, maker_id);
            trades.push(Trade::new(buy_order_id, sell_order_id, tier_price, quantity));
        }
        i = tier_end;
    }

    let mut book_size_delta = -removed;
    if remaining > 0 {
        book_size_delta += 1;
    }

    let volume = trades.iter().map(|t| t.quantity as u64).sum();
    let cost = trades
        .iter()
        .map(|t| t.quantity as u64 * t.price as u64)
        .sum();

    Expectation {
        trades,
        volume,
        cost,
        book_size_delta,
    }
}

/// Expected size delta for a cancel command: present ids vanish.
pub fn expected_cancel_delta(prev_snapshot: &[RestingOrder], order_id: u32) -> i32 {
    if prev_snapshot.iter().any(|o| o.order_id == order_id) {
        -1
    } else {
        0
    }
}

fn sort_key(t: &Trade) -> (u32, u32, u32, u32) {
    (t.buy_order_id, t.sell_order_id, t.price, t.quantity)
}

pub fn sorted(mut trades: Vec<Trade>) -> Vec<Trade> {
    trades.sort_by_key(sort_key);
    trades
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maker(side: Side, id: u32, price: u32, qty: u32) -> RestingOrder {
        RestingOrder {
            side,
            order_id: id,
            price,
            quantity: qty,
            peak: 0,
            hidden: 0,
        }
    }

    #[test]
    fn empty_snapshot_rests_whole_order() {
        let order = Order::new(Side::Buy, 1, 100, 10, 0).unwrap();
        let exp = expected_match(&[], &order);
        assert!(exp.trades.is_empty());
        assert_eq!(exp.book_size_delta, 1);
    }

    #[test]
    fn full_fill_removes_maker_and_adds_nothing() {
        let maker = maker(Side::Sell, 1, 100, 10);
        let taker = Order::new(Side::Buy, 2, 105, 10, 0).unwrap();
        let exp = expected_match(&[maker], &taker);
        assert_eq!(exp.volume, 10);
        assert_eq!(exp.cost, 1000);
        assert_eq!(exp.book_size_delta, -1);
    }

    #[test]
    fn buy_taker_only_matches_the_sell_suffix() {
        let snapshot = [
            maker(Side::Buy, 1, 100, 5),
            maker(Side::Buy, 2, 99, 5),
            maker(Side::Sell, 3, 100, 10),
        ];
        let taker = Order::new(Side::Buy, 4, 100, 10, 0).unwrap();
        let exp = expected_match(&snapshot, &taker);
        assert_eq!(exp.volume, 10);
        assert_eq!(exp.trades, vec![Trade::new(4, 3, 100, 10)]);
    }

    #[test]
    fn iceberg_replenishment_converges_over_repeated_sweeps() {
        let snapshot = [RestingOrder {
            side: Side::Sell,
            order_id: 1,
            price: 100,
            quantity: 10,
            peak: 10,
            hidden: 90,
        }];
        let taker = Order::new(Side::Buy, 2, 100, 25, 0).unwrap();
        let exp = expected_match(&snapshot, &taker);
        assert_eq!(exp.volume, 25);
        assert_eq!(exp.trades, vec![Trade::new(2, 1, 100, 25)]);
        assert_eq!(exp.book_size_delta, 0);
    }
}
