pub mod manager;
pub mod models;
pub mod postgres;
pub mod sanitize;
pub mod store;

pub use models::{Bar, User};
pub use store::{BarStore, StoreError, UserStore};
