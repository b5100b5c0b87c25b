use thiserror::Error;

/// Invariant violations from malformed input, per spec §7: these are
/// caller errors, raised at order construction, never by the matcher.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    #[error("order {order_id}: price must be positive")]
    ZeroPrice { order_id: u32 },
    #[error("order {order_id}: quantity must be positive")]
    ZeroQuantity { order_id: u32 },
    #[error("order id {order_id} already resting on the book")]
    DuplicateOrderId { order_id: u32 },
}
