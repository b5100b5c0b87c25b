//! # Limit Order Book Engine
//!
//! A continuous double-auction limit order book: two price-time-ordered
//! side books, a matcher that routes incoming orders against the
//! opposite side before resting any residue, iceberg replenishment, and
//! cancellation by order id.
//!
//! The matching core (`order`, `side_book`, `matcher`, `book`) is the
//! whole of this crate's contract; `command`, `acceptor`, `driver`, and
//! `reference` are external collaborators — a text command parser, a
//! report sink, a command pump, and a self-test reference model — kept
//! thin on purpose.

pub mod acceptor;
pub mod book;
pub mod command;
pub mod driver;
mod errors;
pub mod matcher;
pub mod order;
pub mod reference;
pub mod side_book;
pub mod trade;

pub use book::Book;
pub use errors::OrderError;
pub use order::{Order, RestingOrder, Side};
pub use trade::Trade;
