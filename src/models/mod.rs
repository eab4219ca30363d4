pub mod form;
pub mod query_log;
pub mod schema_suggestion;
pub mod settings;

pub use form::*;
pub use query_log::*;
pub use schema_suggestion::*;
pub use settings::*;
