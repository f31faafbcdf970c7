//! Budget drafting from source documents.

pub mod error;
pub mod service;
pub mod types;


pub use error::DraftError;
pub use service::DraftService;
pub use types::BudgetDraft;
