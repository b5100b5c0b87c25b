//! The acceptor contract (spec §6.1) and the two concrete sinks the crate
//! ships: a stdout formatter for the default CLI driver and a recording
//! acceptor used by the deterministic self-test.

use std::io::{self, Write};

use crate::order::RestingOrder;
use crate::trade::Trade;

/// A callback sink the [`crate::book::Book`] reports to for the duration of
/// a single command. All methods default to no-ops; implementors override
/// only what they care about.
pub trait Acceptor {
    fn start_report(&mut self) {}
    fn match_trade(&mut self, _trade: Trade) {}
    fn book_line(&mut self, _order: &RestingOrder) {}
    fn finish_report(&mut self) {}
}

/// Discards every event. Useful for profiling feeds that don't need the
/// reports (teacher's `NTesting::FeedRandom` uses an equivalent no-op
/// acceptor in `examples/original_source/tests.cpp`).
#[derive(Default)]
pub struct NullAcceptor;

impl Acceptor for NullAcceptor {}

/// The default command-line sink: `M`/`O` lines per spec §6.3, written to
/// any [`Write`] (stdout in the driver, a buffer in tests).
pub struct TextAcceptor<W: Write> {
    out: W,
}

impl<W: Write> TextAcceptor<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl TextAcceptor<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Acceptor for TextAcceptor<W> {
    fn match_trade(&mut self, trade: Trade) {
        let _ = writeln!(
            self.out,
            "M {} {} {} {}",
            trade.buy_order_id, trade.sell_order_id, trade.price, trade.quantity
        );
    }

    fn book_line(&mut self, order: &RestingOrder) {
        let _ = writeln!(
            self.out,
            "O {} {} {} {}",
            order.side.as_char(),
            order.order_id,
            order.price,
            order.quantity
        );
    }

    fn finish_report(&mut self) {
        let _ = writeln!(self.out);
    }
}

/// Records every report for a command so a self-test can compare book
/// state and trades against an independently computed expectation.
/// Mirrors `TTestAcceptor` in `examples/original_source/tests.cpp`.
#[derive(Default)]
pub struct TestAcceptor {
    pub orders: Vec<RestingOrder>,
    pub trades: Vec<Trade>,
    pub volume: u64,
    pub cost: u64,
}

impl Acceptor for TestAcceptor {
    fn start_report(&mut self) {
        self.orders.clear();
        self.trades.clear();
        self.volume = 0;
        self.cost = 0;
    }

    fn match_trade(&mut self, trade: Trade) {
        self.volume += trade.quantity as u64;
        self.cost += trade.quantity as u64 * trade.price as u64;
        self.trades.push(trade);
    }

    fn book_line(&mut self, order: &RestingOrder) {
        self.orders.push(*order);
    }
}
