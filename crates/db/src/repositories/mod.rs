//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod guestbook_repo;
pub mod material_category_repo;
pub mod material_repo;
pub mod product_repo;
pub mod setting_repo;

pub use category_repo::CategoryRepo;
pub use guestbook_repo::GuestbookRepo;
pub use material_category_repo::MaterialCategoryRepo;
pub use material_repo::MaterialRepo;
pub use product_repo::ProductRepo;
pub use setting_repo::SettingRepo;
