//! The matching algorithm: routes an incoming order against the opposite
//! side's [`SideBook`] under price-time priority, per spec §4.2.
//!
//! Re-architected from the teacher's `match_incoming_side` (`orderbook.rs`)
//! and the original `MatchOrder` (`examples/original_source/book.cpp`):
//! instead of templating on a comparator, the taker's [`Side`] alone picks
//! the cross condition and the trade's buy/sell orientation — the two
//! `SideBook`s already carry opposite price ordering internally.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::acceptor::Acceptor;
use crate::order::{Order, RestingOrder, Side};
use crate::side_book::SideBook;
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

/// Walks one price tier of `maker_book`, filling `taker` until it is
/// exhausted or the tier yields no further candidates, aggregating trades
/// per maker id, then flushing them. `aggregate` is cleared on entry and
/// reused by the caller across tiers (spec §5's per-tier buffer).
fn consume_tier(
    taker_side: Side,
    taker_id: u32,
    remaining: &mut u32,
    tier_price: u32,
    maker_book: &mut SideBook,
    aggregate: &mut HashMap<u32, u32>,
    acceptor: &mut dyn Acceptor,
) {
    aggregate.clear();

    loop {
        let level = maker_book
            .level_mut(tier_price)
            .expect("tier price must still hold entries while the tier is active");
        let Some(mut maker) = level.pop_front() else {
            break;
        };

        let fill = (*remaining).min(maker.quantity);
        *aggregate.entry(maker.order_id).or_insert(0) += fill;
        *remaining -= fill;
        maker.quantity -= fill;

        if maker.quantity == 0 {
            if maker.replenish() {
                warn!(order_id = maker.order_id, "iceberg replenished mid-tier");
                maker_book.level_mut(tier_price).unwrap().push_back(maker);
            } else {
                maker_book.drop_index(maker.order_id);
            }
        } else {
            maker_book.level_mut(tier_price).unwrap().push_front(maker);
        }

        if *remaining == 0 {
            break;
        }
    }

    maker_book.drop_level_if_empty(tier_price);

    for (&maker_id, &quantity) in aggregate.iter() {
        let (buy_order_id, sell_order_id) = orient(taker_side, taker_id, maker_id);
        acceptor.match_trade(Trade::new(buy_order_id, sell_order_id, tier_price, quantity));
    }
}

/// Matches `taker` against `maker_book`, emitting `Match` events, and
/// returns the quantity left over for placement on the taker's own side.
pub fn match_order(
    taker: &Order,
    maker_book: &mut SideBook,
    acceptor: &mut dyn Acceptor,
) -> u32 {
    info!(
        order_id = taker.order_id,
        side = ?taker.side,
        price = taker.price,
        quantity = taker.quantity,
        "matching order"
    );

    let mut remaining = taker.quantity;
    let mut aggregate = HashMap::new();

    while remaining > 0 {
        let Some(tier_price) = maker_book.best_price() else {
            break;
        };
        if !crosses(taker.side, taker.price, tier_price) {
            break;
        }
        consume_tier(
            taker.side,
            taker.order_id,
            &mut remaining,
            tier_price,
            maker_book,
            &mut aggregate,
            acceptor,
        );
    }

    remaining
}

/// Builds the resting entry placed for any taker residue, per spec §4.2's
/// residue-placement rules.
pub fn residue(taker: &Order, remaining: u32) -> Option<RestingOrder> {
    (remaining > 0).then(|| RestingOrder::from_residue(taker, remaining))
}
