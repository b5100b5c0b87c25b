/// An executed match between a resting (maker) order and an incoming
/// (taker) order.
///
/// - `price` is always the maker's price, never the taker's.
/// - `quantity` is the aggregated fill size for this maker id at this
///   tier within a single `AcceptOrder` call (see the matcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    pub buy_order_id: u32,
    pub sell_order_id: u32,
    pub price: u32,
    pub quantity: u32,
}

impl Trade {
    pub fn new(buy_order_id: u32, sell_order_id: u32, price: u32, quantity: u32) -> Self {
        Self {
            buy_order_id,
            sell_order_id,
            price,
            quantity,
        }
    }
}
