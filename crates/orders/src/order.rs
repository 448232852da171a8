//! The `Order` aggregate root.

use chrono::{DateTime, Utc};
use domainkit_core::{
    identity, AggregateMeta, AggregateRoot, DomainError, DomainResult, Entity,
};
use domainkit_events::DomainEvent;
use serde::{Deserialize, Serialize};

use crate::item::{OrderItem, OrderItemId, ProductId};
use crate::values::{Email, Money, Quantity};

identity!(
    /// Identifier of an order.
    pub OrderId
);

/// Event: an order was opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderOpened {
    pub order_id: OrderId,
    pub customer_email: Email,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a line item was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemAdded {
    pub order_id: OrderId,
    pub item_id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub subtotal: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a line item was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRemoved {
    pub order_id: OrderId,
    pub item_id: OrderItemId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a line item's quantity was changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemQuantityChanged {
    pub order_id: OrderId,
    pub item_id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub subtotal: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: the customer email was changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerEmailChanged {
    pub order_id: OrderId,
    pub old_email: Email,
    pub new_email: Email,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderEvent {
    Opened(OrderOpened),
    ItemAdded(OrderItemAdded),
    ItemRemoved(OrderItemRemoved),
    ItemQuantityChanged(OrderItemQuantityChanged),
    EmailChanged(CustomerEmailChanged),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Opened(_) => "orders.order.opened",
            OrderEvent::ItemAdded(_) => "orders.order.item_added",
            OrderEvent::ItemRemoved(_) => "orders.order.item_removed",
            OrderEvent::ItemQuantityChanged(_) => "orders.order.item_quantity_changed",
            OrderEvent::EmailChanged(_) => "orders.order.email_changed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::Opened(e) => e.occurred_at,
            OrderEvent::ItemAdded(e) => e.occurred_at,
            OrderEvent::ItemRemoved(e) => e.occurred_at,
            OrderEvent::ItemQuantityChanged(e) => e.occurred_at,
            OrderEvent::EmailChanged(e) => e.occurred_at,
        }
    }
}

/// Aggregate root: an order with a derived running total.
///
/// Invariants:
/// - the total equals the sum of the item subtotals;
/// - at most one line per product (the line's business key).
///
/// Every mutation validates first and assigns afterwards, so a failed call
/// leaves the order's observable state exactly as it was. Internal state is
/// read through shared views only.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    customer_email: Email,
    items: Vec<OrderItem>,
    /// Derived: running sum of item subtotals, updated incrementally by the
    /// same operation that changes the items.
    total: Money,
    meta: AggregateMeta<OrderEvent>,
}

impl Order {
    /// Open a new, empty order with a generated identity.
    pub fn open(customer_email: Email) -> Self {
        Self::open_with_id(OrderId::new(), customer_email)
    }

    /// Open a new, empty order under an externally-issued identity.
    pub fn open_with_id(id: OrderId, customer_email: Email) -> Self {
        let mut meta = AggregateMeta::new();
        meta.record(OrderEvent::Opened(OrderOpened {
            order_id: id,
            customer_email: customer_email.clone(),
            occurred_at: Utc::now(),
        }));
        Self {
            id,
            customer_email,
            items: Vec::new(),
            total: Money::ZERO,
            meta,
        }
    }

    /// Rebuild an order from already-validated parts (mapping path).
    ///
    /// Checks the same invariants a live mutation sequence upholds and
    /// recomputes the derived total; fails if the parts cannot form a valid
    /// aggregate.
    pub fn restore(
        id: OrderId,
        customer_email: Email,
        items: Vec<OrderItem>,
        version: u64,
    ) -> DomainResult<Self> {
        let total = Self::sum_subtotals(&items)?;
        let order = Self {
            id,
            customer_email,
            items,
            total,
            meta: AggregateMeta::restore(version),
        };
        order.check_invariants()?;
        Ok(order)
    }

    fn sum_subtotals(items: &[OrderItem]) -> DomainResult<Money> {
        items
            .iter()
            .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.subtotal()))
    }

    /// Add a line for `product_id`.
    ///
    /// Rejects a second line for the same product; the total is updated
    /// incrementally as part of the same operation.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: Quantity,
        unit_price: Money,
    ) -> DomainResult<OrderItemId> {
        if self.item(product_id).is_some() {
            return Err(DomainError::rule(format!(
                "product {product_id} is already on the order"
            )));
        }

        let item = OrderItem::new(product_id, quantity, unit_price)?;
        let subtotal = item.subtotal();
        let total = self.total.checked_add(subtotal)?;
        let item_id = *item.id();

        self.items.push(item);
        self.total = total;
        self.meta.record(OrderEvent::ItemAdded(OrderItemAdded {
            order_id: self.id,
            item_id,
            product_id,
            quantity,
            unit_price,
            subtotal,
            occurred_at: Utc::now(),
        }));

        debug_assert!(self.check_invariants().is_ok());
        Ok(item_id)
    }

    /// Remove the line for `product_id`.
    pub fn remove_item(&mut self, product_id: ProductId) -> DomainResult<()> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_id() == product_id)
            .ok_or_else(|| {
                DomainError::rule(format!("product {product_id} is not on the order"))
            })?;

        let total = self.total.checked_sub(self.items[index].subtotal())?;
        let item = self.items.remove(index);

        self.total = total;
        self.meta.record(OrderEvent::ItemRemoved(OrderItemRemoved {
            order_id: self.id,
            item_id: *item.id(),
            product_id,
            occurred_at: Utc::now(),
        }));

        debug_assert!(self.check_invariants().is_ok());
        Ok(())
    }

    /// Change the quantity of the line for `product_id`, keeping the total
    /// consistent within the same operation.
    pub fn change_item_quantity(
        &mut self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> DomainResult<()> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_id() == product_id)
            .ok_or_else(|| {
                DomainError::rule(format!("product {product_id} is not on the order"))
            })?;

        // Everything fallible happens before any field is assigned.
        let item = &self.items[index];
        let new_subtotal = item.unit_price().times(quantity)?;
        let total = self
            .total
            .checked_sub(item.subtotal())?
            .checked_add(new_subtotal)?;
        let item_id = *item.id();

        self.items[index].change_quantity(quantity)?;
        self.total = total;
        self.meta
            .record(OrderEvent::ItemQuantityChanged(OrderItemQuantityChanged {
                order_id: self.id,
                item_id,
                product_id,
                quantity,
                subtotal: new_subtotal,
                occurred_at: Utc::now(),
            }));

        debug_assert!(self.check_invariants().is_ok());
        Ok(())
    }

    /// Change the customer email. A no-op (no version bump, no event) when
    /// the address is unchanged.
    pub fn change_customer_email(&mut self, email: Email) -> DomainResult<()> {
        if self.customer_email == email {
            return Ok(());
        }

        let old_email = core::mem::replace(&mut self.customer_email, email.clone());
        self.meta
            .record(OrderEvent::EmailChanged(CustomerEmailChanged {
                order_id: self.id,
                old_email,
                new_email: email,
                occurred_at: Utc::now(),
            }));
        Ok(())
    }

    pub fn customer_email(&self) -> &Email {
        &self.customer_email
    }

    /// Shared view of the lines. Callers get visibility, never mutation
    /// rights; cloning the view has no effect on the order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// The line for `product_id`, if present.
    pub fn item(&self, product_id: ProductId) -> Option<&OrderItem> {
        self.items
            .iter()
            .find(|item| item.product_id() == product_id)
    }

    /// Derived running total.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Events recorded since the last drain, in mutation order.
    pub fn pending_events(&self) -> &[OrderEvent] {
        self.meta.pending_events()
    }

    /// Hand accumulated events to the orchestration layer.
    ///
    /// Call only after a successful save — never dispatch speculatively.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        self.meta.drain_outbox()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}

impl AggregateRoot for Order {
    fn version(&self) -> u64 {
        self.meta.version()
    }

    fn persisted_version(&self) -> u64 {
        self.meta.persisted_version()
    }

    fn mark_persisted(&mut self) {
        self.meta.mark_persisted();
    }

    fn check_invariants(&self) -> DomainResult<()> {
        for (i, item) in self.items.iter().enumerate() {
            let duplicated = self.items[..i]
                .iter()
                .any(|other| other.product_id() == item.product_id());
            if duplicated {
                return Err(DomainError::rule(format!(
                    "duplicate line for product {}",
                    item.product_id()
                )));
            }
        }

        let expected = Self::sum_subtotals(&self.items)?;
        if self.total != expected {
            return Err(DomainError::rule(format!(
                "order total {} cents disagrees with sum of subtotals {} cents",
                self.total.cents(),
                expected.cents()
            )));
        }

        Ok(())
    }
}
