#![allow(dead_code)]

use chrono::NaiveDate;
use recordkeeper_core::models::account::{
    Cash, CashCategoryClass, Deposit, DepositCategoryClass, Loan, LoanCategoryClass, Payee,
    PayeeType, Portfolio, PortfolioType, Security, SecurityType,
};
use recordkeeper_core::models::asset::AssetId;
use recordkeeper_core::models::attribute::{AttributeValue, TaxYearInfoClass};
use recordkeeper_core::models::category::{CategoryClass, TransactionCategory};
use recordkeeper_core::models::money::{Currency, Money};
use recordkeeper_core::models::tax_year::{TaxRegime, TaxYear};
use recordkeeper_core::models::workspace::{TransactionAsset, Workspace};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn gbp() -> Currency {
    Currency::gbp()
}

pub fn usd() -> Currency {
    Currency::new("USD").unwrap()
}

pub fn money(amount: Decimal) -> Money {
    Money::new(amount, gbp())
}

pub fn uuid_of(id: AssetId) -> Uuid {
    match id {
        AssetId::Payee(u)
        | AssetId::Deposit(u)
        | AssetId::Cash(u)
        | AssetId::Loan(u)
        | AssetId::Portfolio(u)
        | AssetId::Security(u) => u,
        AssetId::Holding { .. } => panic!("holdings have a composite id"),
    }
}

/// A small household: every account kind, two portfolios with holdings,
/// and one category of each class the tests need.
///
/// Insertion order matters for default searches: the employer is the
/// first payee, checking the first deposit, expense the first category.
pub struct Fixture {
    pub ws: Workspace,

    pub employer: AssetId,
    pub government: AssetId,
    pub individual: AssetId,
    pub taxman: AssetId,
    pub shop: AssetId,

    pub checking: AssetId,
    pub p2p: AssetId,
    pub bond: AssetId,
    pub cash: AssetId,
    pub auto_expense: AssetId,
    pub credit_card: AssetId,
    pub mortgage: AssetId,

    pub isa: AssetId,
    pub sipp: AssetId,
    pub acme: AssetId,
    pub globex: AssetId,
    pub fund: AssetId,
    pub flat: AssetId,

    /// ACME shares in the ISA
    pub acme_isa: AssetId,
    /// Globex shares in the ISA
    pub globex_isa: AssetId,
    /// ACME shares in the SIPP
    pub acme_sipp: AssetId,
    /// Unit trust in the ISA
    pub fund_isa: AssetId,
    /// Buy-to-let flat in the ISA
    pub flat_isa: AssetId,

    pub expense: Uuid,
    pub salary: Uuid,
    pub grant: Uuid,
    pub interest: Uuid,
    pub dividend: Uuid,
    pub transfer: Uuid,
    pub write_off: Uuid,
    pub cash_back: Uuid,
    pub stock_split: Uuid,
    pub take_over: Uuid,
    pub demerger: Uuid,
    pub portfolio_xfer: Uuid,
    pub tax_credit: Uuid,
    pub totals: Uuid,
}

impl Fixture {
    pub fn asset(&self, id: AssetId) -> TransactionAsset<'_> {
        self.ws.resolve(&id).unwrap()
    }

    pub fn category(&self, id: Uuid) -> &TransactionCategory {
        self.ws.category(id).unwrap()
    }
}

pub fn fixture() -> Fixture {
    let mut ws = Workspace::new(gbp());
    ws.rates.set_rate(usd(), dec!(1.25));

    let employer = ws.add_payee(Payee::new("Initech", PayeeType::Employer));
    let government = ws.add_payee(Payee::new("Council", PayeeType::Government));
    let individual = ws.add_payee(Payee::new("Aunt May", PayeeType::Individual));
    let taxman = ws.add_payee(Payee::new("HMRC", PayeeType::TaxMan));
    let shop = ws.add_payee(Payee::new("Corner Shop", PayeeType::Payee));

    let checking = ws.add_deposit(Deposit::new("Current", DepositCategoryClass::Checking, gbp()));
    let p2p = ws.add_deposit(Deposit::new("Lending", DepositCategoryClass::PeerToPeer, gbp()));
    let bond = ws.add_deposit(Deposit::new("Fixed Bond", DepositCategoryClass::Bond, gbp()));
    let cash = ws.add_cash(Cash::new("Wallet", CashCategoryClass::Cash, gbp()));
    let auto_expense = ws.add_cash(Cash::new("Lunches", CashCategoryClass::AutoExpense, gbp()));
    let credit_card = ws.add_loan(Loan::new("Visa", LoanCategoryClass::CreditCard, gbp()));
    let mortgage = ws.add_loan(Loan::new("Mortgage", LoanCategoryClass::Loan, gbp()));

    let isa = ws.add_portfolio(Portfolio::new("ISA", PortfolioType::TaxFree, gbp()));
    let sipp = ws.add_portfolio(Portfolio::new("SIPP", PortfolioType::Pension, gbp()));
    let acme = ws.add_security(Security::new("ACME", SecurityType::Shares, gbp()));
    let globex = ws.add_security(Security::new("Globex", SecurityType::Shares, gbp()));
    let fund = ws.add_security(Security::new("Tracker", SecurityType::GrowthUnitTrust, gbp()));
    let flat = ws.add_security(Security::new("Flat 2", SecurityType::Property, gbp()));

    let acme_isa = ws.add_holding(uuid_of(isa), uuid_of(acme)).unwrap();
    let globex_isa = ws.add_holding(uuid_of(isa), uuid_of(globex)).unwrap();
    let fund_isa = ws.add_holding(uuid_of(isa), uuid_of(fund)).unwrap();
    let flat_isa = ws.add_holding(uuid_of(isa), uuid_of(flat)).unwrap();
    let acme_sipp = ws.add_holding(uuid_of(sipp), uuid_of(acme)).unwrap();

    let totals = ws.add_category(TransactionCategory::new("Totals", CategoryClass::Totals));
    let expense = ws.add_category(
        TransactionCategory::new("Groceries", CategoryClass::Expense).with_parent(totals),
    );
    let salary = ws.add_category(TransactionCategory::new("Salary", CategoryClass::TaxedIncome));
    let grant = ws.add_category(TransactionCategory::new("Grant", CategoryClass::GrantIncome));
    let interest = ws.add_category(TransactionCategory::new("Interest", CategoryClass::TaxedInterest));
    let dividend = ws.add_category(TransactionCategory::new("Dividend", CategoryClass::ShareDividend));
    let transfer = ws.add_category(TransactionCategory::new("Transfer", CategoryClass::Transfer));
    let write_off = ws.add_category(TransactionCategory::new("Write Off", CategoryClass::WriteOff));
    let cash_back = ws.add_category(TransactionCategory::new("Cash Back", CategoryClass::CashBack));
    let stock_split = ws.add_category(TransactionCategory::new("Split", CategoryClass::StockSplit));
    let take_over = ws.add_category(TransactionCategory::new("Take Over", CategoryClass::StockTakeOver));
    let demerger = ws.add_category(TransactionCategory::new("Demerger", CategoryClass::StockDemerger));
    let portfolio_xfer =
        ws.add_category(TransactionCategory::new("Portfolio Move", CategoryClass::PortfolioXfer));
    let tax_credit = ws.add_category(TransactionCategory::new("Tax Credit", CategoryClass::TaxCredit));

    Fixture {
        ws,
        employer,
        government,
        individual,
        taxman,
        shop,
        checking,
        p2p,
        bond,
        cash,
        auto_expense,
        credit_card,
        mortgage,
        isa,
        sipp,
        acme,
        globex,
        fund,
        flat,
        acme_isa,
        globex_isa,
        acme_sipp,
        fund_isa,
        flat_isa,
        expense,
        salary,
        grant,
        interest,
        dividend,
        transfer,
        write_off,
        cash_back,
        stock_split,
        take_over,
        demerger,
        portfolio_xfer,
        tax_credit,
        totals,
    }
}

/// A tax year with every field its regime requires, and nothing else.
pub fn complete_tax_year(year: i32, regime: TaxRegime) -> TaxYear {
    use TaxYearInfoClass::*;

    let mut tax_year = TaxYear::new(year, regime, gbp());
    let mut put = |class, value| tax_year.info.set(class, value).unwrap();

    put(LoAllowance, AttributeValue::Money(money(dec!(12570))));
    put(CapitalAllowance, AttributeValue::Money(money(dec!(6000))));
    put(BasicTaxBand, AttributeValue::Money(money(dec!(37700))));
    put(BasicTaxRate, AttributeValue::Rate(dec!(20)));
    put(HiTaxRate, AttributeValue::Rate(dec!(40)));
    put(IntTaxRate, AttributeValue::Rate(dec!(20)));
    put(DivTaxRate, AttributeValue::Rate(dec!(8.75)));
    put(HiDivTaxRate, AttributeValue::Rate(dec!(33.75)));

    if regime.has_low_salary_band() {
        put(LoTaxBand, AttributeValue::Money(money(dec!(2020))));
        put(LoTaxRate, AttributeValue::Rate(dec!(10)));
    }
    if regime.has_additional_tax_band() {
        put(AddAllowanceLimit, AttributeValue::Money(money(dec!(100000))));
        put(AddIncomeThreshold, AttributeValue::Money(money(dec!(150000))));
        put(AddTaxRate, AttributeValue::Rate(dec!(45)));
        put(AddDivTaxRate, AttributeValue::Rate(dec!(39.35)));
    }
    if !regime.has_capital_gains_as_income() {
        put(CapTaxRate, AttributeValue::Rate(dec!(10)));
        put(HiCapTaxRate, AttributeValue::Rate(dec!(20)));
    }

    tax_year
}
