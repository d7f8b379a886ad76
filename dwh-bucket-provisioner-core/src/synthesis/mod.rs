//! Bucket policy synthesis (deterministic JSON generation)

pub mod policy_builder;

pub use policy_builder::{
    bucket_list_statement, compose, load_balancer_log_statement, object_read_statement,
};
