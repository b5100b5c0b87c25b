//! Pumps commands into a [`Book`]: the stdin/stdout driver of spec §6.4,
//! plus the `test` and `profile` modes. The teacher's equivalent
//! (`cli.rs`, `main.rs`) drove the book over HTTP; this drives it the way
//! `examples/original_source/main.cpp` does, straight from a line stream.

use std::io::BufRead;

use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::error;

use crate::acceptor::{Acceptor, NullAcceptor, TestAcceptor, TextAcceptor};
use crate::book::Book;
use crate::command::{Command, parse_line};
use crate::order::{Order, Side};
use crate::reference;

/// Reads commands from `input` until EOF, reporting each through
/// `acceptor`. Parse errors are logged and the offending line is skipped
/// (spec §7: malformed input is the driver's problem, not the core's).
pub fn feed(book: &mut Book, input: impl BufRead, acceptor: &mut dyn Acceptor) {
    for line in input.lines() {
        let Ok(line) = line else {
            error!("failed to read input line");
            break;
        };
        match parse_line(&line) {
            Ok(Some(Command::Accept(order))) => book.accept_order(order, acceptor),
            Ok(Some(Command::Cancel(id))) => {
                if !book.cancel_order(id, acceptor) {
                    error!(order_id = id, "failed to cancel order");
                }
            }
            Ok(None) => {}
            Err(err) => error!(%err, line = %line, "failed to parse command"),
        }
    }
}

pub fn run_stdin(book: &mut Book) {
    let stdin = std::io::stdin();
    let mut acceptor = TextAcceptor::stdout();
    feed(book, stdin.lock(), &mut acceptor);
}

/// One randomly generated order command, drawn the way
/// `NTesting::FeedRandom`/`NTesting::Test` do in
/// `examples/original_source/tests.cpp`: price in `[100, 125)`, quantity
/// in `[200, 500)`, peak in `[0, 50)`, side and command kind uniform.
enum Draw {
    Limit(Order),
    Iceberg(Order),
    Cancel(u32),
}

fn draw_command(rng: &mut StdRng, next_id: u32) -> Draw {
    let price = 100 + rng.random_range(0..25);
    let quantity = 200 + rng.random_range(0..300);
    let peak = rng.random_range(0..50);
    let side = if rng.random_bool(0.5) {
        Side::Buy
    } else {
        Side::Sell
    };

    match rng.random_range(0..3) {
        0 => Draw::Limit(Order::new(side, next_id, price, quantity, 0).unwrap()),
        1 => Draw::Iceberg(Order::new(side, next_id, price, quantity, peak).unwrap()),
        _ => Draw::Cancel(rng.random_range(0..next_id.max(1))),
    }
}

/// Seed for the infinite `profile` feed, per spec §6.4.
pub const PROFILE_SEED: u64 = 890;
/// Seed and iteration count for the `test` self-check, per spec §6.4.
pub const TEST_SEED: u64 = 777;
pub const TEST_ITERATIONS: u32 = 10_000;

/// Feeds `book` an unbounded random command stream. Intended to run
/// forever under `profile` mode; callers that want a bounded run (e.g.
/// tests) pass a finite `iterations`.
pub fn run_profile(book: &mut Book, seed: u64, iterations: Option<u64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut acceptor = NullAcceptor;
    let mut i = 0u32;
    loop {
        if iterations.is_some_and(|limit| u64::from(i) >= limit) {
            break;
        }
        match draw_command(&mut rng, i) {
            Draw::Limit(order) | Draw::Iceberg(order) => book.accept_order(order, &mut acceptor),
            Draw::Cancel(id) => {
                book.cancel_order(id, &mut acceptor);
            }
        }
        i += 1;
    }
}

#[derive(Error, Debug)]
pub enum TestFailure {
    #[error("iteration {iteration}: volume/cost mismatch (got {got_volume}/{got_cost}, expected {expected_volume}/{expected_cost})")]
    VolumeOrCost {
        iteration: u32,
        got_volume: u64,
        got_cost: u64,
        expected_volume: u64,
        expected_cost: u64,
    },
    #[error("iteration {iteration}: trade set mismatch")]
    Trades { iteration: u32 },
    #[error("iteration {iteration}: book size delta mismatch (got {got}, expected {expected})")]
    BookSize {
        iteration: u32,
        got: i32,
        expected: i32,
    },
}

/// Runs the deterministic self-check: `iterations` random commands
/// against `book`, each cross-checked against [`reference::expected_match`]
/// computed from the previous snapshot. Mirrors `NTesting::Test`.
pub fn run_self_test(book: &mut Book, seed: u64, iterations: u32) -> Result<(), TestFailure> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut acceptor = TestAcceptor::default();

    for i in 0..iterations {
        let prev_snapshot = acceptor.orders.clone();
        let prev_len = prev_snapshot.len() as i32;

        match draw_command(&mut rng, i) {
            Draw::Limit(order) | Draw::Iceberg(order) => {
                let expected = reference::expected_match(&prev_snapshot, &order);
                book.accept_order(order, &mut acceptor);

                if acceptor.volume != expected.volume || acceptor.cost != expected.cost {
                    return Err(TestFailure::VolumeOrCost {
                        iteration: i,
                        got_volume: acceptor.volume,
                        got_cost: acceptor.cost,
                        expected_volume: expected.volume,
                        expected_cost: expected.cost,
                    });
                }
                if reference::sorted(acceptor.trades.clone()) != reference::sorted(expected.trades)
                {
                    return Err(TestFailure::Trades { iteration: i });
                }
                let got_delta = acceptor.orders.len() as i32 - prev_len;
                if got_delta != expected.book_size_delta {
                    return Err(TestFailure::BookSize {
                        iteration: i,
                        got: got_delta,
                        expected: expected.book_size_delta,
                    });
                }
            }
            Draw::Cancel(id) => {
                let expected_delta = reference::expected_cancel_delta(&prev_snapshot, id);
                book.cancel_order(id, &mut acceptor);
                let got_delta = acceptor.orders.len() as i32 - prev_len;
                if got_delta != expected_delta {
                    return Err(TestFailure::BookSize {
                        iteration: i,
                        got: got_delta,
                        expected: expected_delta,
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_test_passes_over_many_iterations() {
        let mut book = Book::new();
        assert!(run_self_test(&mut book, TEST_SEED, 2_000).is_ok());
    }

    #[test]
    fn profile_feed_runs_bounded() {
        let mut book = Book::new();
        run_profile(&mut book, PROFILE_SEED, Some(2_000));
    }
}
