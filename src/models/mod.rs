mod dashboard;
mod order;
mod product;
mod user;

pub use dashboard::*;
pub use order::*;
pub use product::*;
pub use user::*;
