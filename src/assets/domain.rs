pub mod model;
pub mod status;
