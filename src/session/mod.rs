pub(crate) mod capture;
pub mod registry;
