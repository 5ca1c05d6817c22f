mod category;
mod locale;
mod operation;
mod transaction;

pub use category::{emoji_for, well_known};
pub use locale::Locale;
pub use operation::OperationType;
pub use transaction::{Transaction, MAX_QUANTITIES};
