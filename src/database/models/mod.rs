pub mod category;
pub mod summary;
pub mod transaction;
pub mod user;

pub use category::{Category, CategoryKind, CategoryRef};
pub use summary::Summary;
pub use transaction::{Installments, Transaction, TransactionRecord};
pub use user::{Session, User};
