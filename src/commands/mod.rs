//! Command implementations

pub mod cleanup;
pub mod deploy_notes;
pub mod import_card;
pub mod info;
pub mod new;
pub mod pr;
pub mod reviews;
pub mod start;
pub mod status;

pub use cleanup::run_cleanup;
pub use deploy_notes::run_deploy_notes;
pub use import_card::run_import_card;
pub use info::run_info;
pub use new::run_new;
pub use pr::{run_create_pr, run_push_and_pr};
pub use reviews::run_reviews;
pub use start::run_start;
pub use status::run_status;
