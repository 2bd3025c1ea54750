pub mod date;
pub mod logging;
pub(crate) mod memory;
