pub mod assets;
pub mod checkout;
pub mod circulation;
pub mod core;
pub mod gateway;
pub mod hold;
pub mod patrons;
pub mod utils;
