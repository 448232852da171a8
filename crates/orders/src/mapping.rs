//! Persisted record and mapper for the `Order` aggregate.

use domainkit_core::{AggregateRoot, Entity};
use domainkit_persistence::{Mapper, MappingError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::item::{OrderItem, OrderItemId, ProductId};
use crate::order::{Order, OrderId};
use crate::values::{Email, Money, Quantity};

/// Storage-owned snapshot of one order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub item_id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    pub unit_price_cents: u64,
}

/// Storage-owned snapshot of an order.
///
/// Plain primitives only: how this is serialized or laid out on disk is the
/// storage adapter's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: Uuid,
    pub customer_email: String,
    pub items: Vec<OrderItemRecord>,
    pub total_cents: u64,
    pub version: u64,
}

/// Maps [`Order`] to/from [`OrderRecord`].
///
/// Reconstruction drives the same factories used at runtime — a record that
/// would not pass live validation cannot become an aggregate. The stored
/// total is cross-checked against the recomputed one so silent corruption of
/// the derived field is caught at the boundary.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderMapper;

impl OrderMapper {
    pub fn new() -> Self {
        Self
    }
}

impl Mapper for OrderMapper {
    type Aggregate = Order;
    type Record = OrderRecord;

    fn to_domain(&self, record: OrderRecord) -> Result<Order, MappingError> {
        let customer_email = Email::new(record.customer_email)
            .map_err(|e| MappingError::invalid_field("customer_email", e))?;

        let mut items = Vec::with_capacity(record.items.len());
        for row in record.items {
            let quantity = Quantity::new(row.quantity)
                .map_err(|e| MappingError::invalid_field("items.quantity", e))?;
            let item = OrderItem::restore(
                OrderItemId::from_uuid(row.item_id),
                ProductId::from_uuid(row.product_id),
                quantity,
                Money::from_cents(row.unit_price_cents),
            )
            .map_err(|e| MappingError::invalid_field("items", e))?;
            items.push(item);
        }

        let order = Order::restore(
            OrderId::from_uuid(record.order_id),
            customer_email,
            items,
            record.version,
        )
        .map_err(MappingError::BrokenInvariant)?;

        if order.total().cents() != record.total_cents {
            return Err(MappingError::corrupt(format!(
                "stored total {} cents disagrees with recomputed total {} cents",
                record.total_cents,
                order.total().cents()
            )));
        }

        Ok(order)
    }

    fn to_record(&self, aggregate: &Order) -> OrderRecord {
        OrderRecord {
            order_id: (*aggregate.id()).into(),
            customer_email: aggregate.customer_email().as_str().to_owned(),
            items: aggregate
                .items()
                .iter()
                .map(|item| OrderItemRecord {
                    item_id: (*item.id()).into(),
                    product_id: item.product_id().into(),
                    quantity: item.quantity().get(),
                    unit_price_cents: item.unit_price().cents(),
                })
                .collect(),
            total_cents: aggregate.total().cents(),
            version: aggregate.version(),
        }
    }
}
