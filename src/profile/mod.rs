pub mod assemble;
pub mod commits;
pub mod metadata;
