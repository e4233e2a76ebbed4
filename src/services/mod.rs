pub mod ai;
pub mod crm;
pub mod extraction;
pub mod pipeline;
pub mod scoring;
pub mod validation;
