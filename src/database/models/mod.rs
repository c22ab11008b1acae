pub mod bar;
pub mod user;

pub use bar::Bar;
pub use user::User;
