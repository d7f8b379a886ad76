//! Commands module - service layer for bucket provisioning operations

mod apply;
mod plan;
pub(crate) mod service;

pub use service::BucketProvisionerService;

#[cfg(test)]
pub(crate) mod test_support;
