//! Domain models for the storefront.
//!
//! These types represent validated domain objects separate from database
//! row types: users and products are read from the store, carts live only
//! in the session, orders are the durable ledger records.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartLine};
pub use order::{Order, OrderDetails, OrderStats};
pub use product::Product;
pub use session::{CurrentUser, session_keys};
pub use user::User;
