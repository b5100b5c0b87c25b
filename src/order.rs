//! Order types: the immutable incoming [`Order`] and the mutable
//! [`RestingOrder`] it becomes once it sits on a [`crate::side_book::SideBook`].

use crate::errors::OrderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }

    pub fn from_char(c: char) -> Option<Side> {
        match c {
            'B' | 'b' => Some(Side::Buy),
            'S' | 's' => Some(Side::Sell),
            _ => None,
        }
    }
}

/// A request to enter the book. `peak == 0` is a plain limit order;
/// `peak > 0` is an iceberg whose visible size is capped at `peak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub side: Side,
    pub order_id: u32,
    pub price: u32,
    pub quantity: u32,
    pub peak: u32,
}

impl Order {
    pub fn new(
        side: Side,
        order_id: u32,
        price: u32,
        quantity: u32,
        peak: u32,
    ) -> Result<Self, OrderError> {
        if price == 0 {
            return Err(OrderError::ZeroPrice { order_id });
        }
        if quantity == 0 {
            return Err(OrderError::ZeroQuantity { order_id });
        }
        Ok(Self {
            side,
            order_id,
            price,
            quantity,
            peak,
        })
    }

    pub fn is_iceberg(&self) -> bool {
        self.peak > 0
    }
}

/// An [`Order`] once it is resting on a side book: carries the iceberg's
/// hidden reserve. Time priority is encoded by FIFO position within the
/// side book's per-price queue, not by a field on the order itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestingOrder {
    pub side: Side,
    pub order_id: u32,
    pub price: u32,
    pub quantity: u32,
    pub peak: u32,
    pub hidden: u32,
}

impl RestingOrder {
    /// Builds the resting entry for a freshly accepted order's residue.
    /// For icebergs, splits `remaining` into visible `quantity` (capped at
    /// `peak`) and `hidden` reserve.
    pub fn from_residue(order: &Order, remaining: u32) -> Self {
        let (quantity, hidden) = if order.is_iceberg() {
            let visible = order.peak.min(remaining);
            (visible, remaining - visible)
        } else {
            (remaining, 0)
        };
        Self {
            side: order.side,
            order_id: order.order_id,
            price: order.price,
            quantity,
            peak: order.peak,
            hidden,
        }
    }

    pub fn total_remaining(&self) -> u32 {
        self.quantity + self.hidden
    }

    /// Replenishes the visible peak from the hidden reserve after a full
    /// fill. Returns `true` if the entry still has size left to rest.
    pub fn replenish(&mut self) -> bool {
        let refill = self.peak.min(self.hidden);
        self.quantity = refill;
        self.hidden -= refill;
        refill > 0
    }
}
