pub mod atomic;
pub mod collection;
pub mod export;

pub use atomic::{read_text, write_atomic};
pub use export::CollectionSnapshot;
