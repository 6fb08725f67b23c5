//! Repositories over the document store
//!
//! This is the persistence boundary: every method reduces its failures to
//! the closed `StorageFault` signal set, so nothing driver-specific ever
//! reaches the handlers or the fault translator. The store itself is an
//! in-process map of documents; a real driver would slot in behind the
//! same signatures by mapping its errors onto the same signals.

pub mod items;
pub mod users;

pub use items::ItemRepository;
pub use users::UserRepository;
