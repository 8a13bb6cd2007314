pub mod fake_users;

pub use fake_users::{fake_user, fake_users, USER_FIELDS};
