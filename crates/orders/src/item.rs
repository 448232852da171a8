//! Order line item: an entity internal to the `Order` aggregate.

use domainkit_core::{identity, DomainResult, Entity};

use crate::values::{Money, Quantity};

identity!(
    /// Identifier of a product, issued by the product context.
    ///
    /// Orders reference products by identity only — never through their
    /// internals.
    pub ProductId
);

identity!(
    /// Identifier of a line item within an order.
    pub OrderItemId
);

/// One line of an order: a product, a quantity, and a unit price.
///
/// The business key within an order is `product_id` (one line per product);
/// the entity identity is `id`. `subtotal` is derived from quantity and unit
/// price and is kept consistent by the behavior methods.
///
/// Construction and mutation go through the `Order` root; the item is never
/// handed out mutably.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    id: OrderItemId,
    product_id: ProductId,
    quantity: Quantity,
    unit_price: Money,
    subtotal: Money,
}

impl OrderItem {
    pub(crate) fn new(
        product_id: ProductId,
        quantity: Quantity,
        unit_price: Money,
    ) -> DomainResult<Self> {
        Self::restore(OrderItemId::new(), product_id, quantity, unit_price)
    }

    /// Rebuild an item with an existing identity (mapping path).
    ///
    /// Runs the same derivation as runtime construction, so a record whose
    /// numbers cannot form a valid line is rejected here.
    pub(crate) fn restore(
        id: OrderItemId,
        product_id: ProductId,
        quantity: Quantity,
        unit_price: Money,
    ) -> DomainResult<Self> {
        let subtotal = unit_price.times(quantity)?;
        Ok(Self {
            id,
            product_id,
            quantity,
            unit_price,
            subtotal,
        })
    }

    /// Change the quantity, recomputing the subtotal in the same step.
    ///
    /// Fails without touching the item if the new subtotal cannot be
    /// computed.
    pub(crate) fn change_quantity(&mut self, quantity: Quantity) -> DomainResult<()> {
        let subtotal = self.unit_price.times(quantity)?;
        self.quantity = quantity;
        self.subtotal = subtotal;
        Ok(())
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Derived: `unit_price × quantity`.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }
}

impl Entity for OrderItem {
    type Id = OrderItemId;

    fn id(&self) -> &OrderItemId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: u32, price_cents: u64) -> OrderItem {
        OrderItem::new(
            ProductId::new(),
            Quantity::new(qty).unwrap(),
            Money::from_cents(price_cents),
        )
        .unwrap()
    }

    #[test]
    fn subtotal_is_derived_at_construction() {
        let item = item(2, 50);
        assert_eq!(item.subtotal(), Money::from_cents(100));
    }

    #[test]
    fn change_quantity_updates_subtotal_in_the_same_step() {
        let mut item = item(2, 50);
        item.change_quantity(Quantity::new(5).unwrap()).unwrap();
        assert_eq!(item.quantity().get(), 5);
        assert_eq!(item.subtotal(), Money::from_cents(250));
    }

    #[test]
    fn failed_quantity_change_leaves_the_item_untouched() {
        let mut item = OrderItem::new(
            ProductId::new(),
            Quantity::new(1).unwrap(),
            Money::from_cents(u64::MAX),
        )
        .unwrap();
        let before = item.clone();

        let err = item.change_quantity(Quantity::new(2).unwrap()).unwrap_err();
        assert!(matches!(err, domainkit_core::DomainError::RuleViolation(_)));
        assert_eq!(item, before);
    }

    #[test]
    fn construction_rejects_overflowing_subtotal() {
        let result = OrderItem::new(
            ProductId::new(),
            Quantity::new(3).unwrap(),
            Money::from_cents(u64::MAX),
        );
        assert!(result.is_err());
    }

    #[test]
    fn entity_equality_is_by_identity_only() {
        let id = OrderItemId::new();
        let product = ProductId::new();
        let a = OrderItem::restore(
            id,
            product,
            Quantity::new(1).unwrap(),
            Money::from_cents(50),
        )
        .unwrap();
        let b = OrderItem::restore(
            id,
            product,
            Quantity::new(9).unwrap(),
            Money::from_cents(50),
        )
        .unwrap();

        // Same identity, different attribute state: the same entity.
        assert!(a.same_identity(&b));
        assert_ne!(a, b); // structural comparison still sees the difference

        let c = OrderItem::restore(
            OrderItemId::new(),
            product,
            Quantity::new(1).unwrap(),
            Money::from_cents(50),
        )
        .unwrap();
        assert!(!a.same_identity(&c));
    }
}
