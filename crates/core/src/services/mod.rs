pub mod currency_service;
pub mod transaction_composer;
pub mod transaction_rules;
