pub mod commits;
pub mod fields;
pub mod listing;
