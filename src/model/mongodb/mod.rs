mod bson;
mod collection;
mod counter;
mod errors;

pub use bson::Id;
pub use collection::{email_collation, ensure_indexes_exist, Coll, MongoCollection};
pub use counter::{ensure_question_order_counter_exists, Counter, QUESTION_ORDER_COUNTER_ID};
pub use errors::is_duplicate_key_error;
