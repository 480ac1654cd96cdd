/// Open order state from Add/Execute updates
///
/// Keeps every added order keyed by id together with its remaining shares.
/// Orders are never removed, even once fully executed.

use std::collections::HashMap;

use crate::protocol::{OrderId, Symbol};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    #[error("execute references unknown order {0}")]
    UnknownOrder(OrderId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOrder {
    pub order_id: OrderId,
    pub symbol: Symbol,
    pub remaining_shares: u32,
}

/// Shares accepted against an order, to be credited to its symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub symbol: Symbol,
    pub shares: u32,
}

#[derive(Debug, Clone, Default)]
pub struct OrderTracker {
    orders: HashMap<OrderId, OpenOrder>,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        OrderTracker {
            orders: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a new open order. An existing order with the same id is
    /// replaced and returned.
    pub fn on_add(&mut self, order_id: OrderId, symbol: Symbol, shares: u32) -> Option<OpenOrder> {
        self.orders.insert(
            order_id,
            OpenOrder {
                order_id,
                symbol,
                remaining_shares: shares,
            },
        )
    }

    /// Apply an execution.
    ///
    /// Returns `Ok(None)` when more shares are executed than remain; the order
    /// is left untouched in that case.
    pub fn on_execute(
        &mut self,
        order_id: OrderId,
        executed_shares: u32,
    ) -> Result<Option<Fill>, TrackerError> {
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(TrackerError::UnknownOrder(order_id))?;

        if executed_shares > order.remaining_shares {
            return Ok(None);
        }

        order.remaining_shares -= executed_shares;
        Ok(Some(Fill {
            symbol: order.symbol,
            shares: executed_shares,
        }))
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&OpenOrder> {
        self.orders.get(order_id)
    }

    pub fn remaining_shares(&self, order_id: &OrderId) -> Option<u32> {
        self.orders.get(order_id).map(|o| o.remaining_shares)
    }

    /// Number of tracked orders, fully executed ones included
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
