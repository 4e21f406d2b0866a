pub mod artifact_generation;
pub mod object_store;
