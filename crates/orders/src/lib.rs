//! `domainkit-orders` — reference bounded context built on the kernel.
//!
//! A sales order aggregate: validated value objects (email, money,
//! quantity), an internal line-item entity keyed by product, a derived
//! running total, outbound events, and a mapper to/from a persisted record.

pub mod item;
pub mod mapping;
pub mod order;
pub mod values;

pub use item::{OrderItem, OrderItemId, ProductId};
pub use mapping::{OrderItemRecord, OrderMapper, OrderRecord};
pub use order::{Order, OrderEvent, OrderId};
pub use values::{Email, Money, Quantity};
