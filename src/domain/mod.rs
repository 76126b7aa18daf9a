//! Domain model: independent top-level aggregates with no cascading
//! deletes. Orders snapshot the supplier/product data they need at
//! creation time, so deleting a product or supplier never touches history.

pub mod order;
pub mod product;
pub mod settings;
pub mod supplier;

pub use order::{Order, OrderStatus};
pub use product::{OrderMethod, Product};
pub use settings::Settings;
pub use supplier::Supplier;
