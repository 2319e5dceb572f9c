pub mod account;
pub mod asset;
pub mod attribute;
pub mod category;
pub mod money;
pub mod settings;
pub mod tax_year;
pub mod transaction;
pub mod validation;
pub mod workspace;
