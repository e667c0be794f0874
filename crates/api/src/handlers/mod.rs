//! HTTP request handlers, one module per resource.

pub mod category;
pub mod guestbook;
pub mod material;
pub mod material_category;
pub mod plugin;
pub mod product;
