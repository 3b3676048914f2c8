//! Record collections for a personal organizer: persistence, filtering,
//! display ordering and the single write path.

pub mod factory;
pub mod fixtures;
pub mod gateway;
pub mod id;
pub mod migrate;
pub mod ordering;
pub mod portfolio;
pub mod predicate;
pub mod reminders;
mod serde_fmt;
pub mod store;
pub mod types;
pub mod validate;
pub mod view;

pub use gateway::MutationGateway;
pub use store::KvBackend;
pub use store::RecordStore;
pub use view::CollectionView;
