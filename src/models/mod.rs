pub mod book;
pub mod review;
pub mod user;

pub use book::Book;
pub use review::{Review, ReviewWithUser};
pub use user::User;
