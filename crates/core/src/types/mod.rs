//! Core types for ReelDeal.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! flat records kept in the admin record store.

pub mod category;
pub mod customer;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod slug;
pub mod status;

pub use category::Category;
pub use customer::Customer;
pub use id::*;
pub use order::{Order, OrderItem, ShippingAddress};
pub use price::Price;
pub use product::{NewProduct, Product, ProductPatch};
pub use slug::slugify;
pub use status::*;
