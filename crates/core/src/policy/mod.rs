pub mod cash;
pub mod deposit;
pub mod portfolio;
pub mod tax_year;
pub mod traits;
pub mod transaction;

pub use cash::CashPolicy;
pub use deposit::DepositPolicy;
pub use portfolio::PortfolioPolicy;
pub use tax_year::TaxYearPolicy;
pub use traits::{AttributeOwner, AttributePolicy};
pub use transaction::TransactionPolicy;
