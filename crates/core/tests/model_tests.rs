mod common;

use common::*;
use recordkeeper_core::errors::CoreError;
use recordkeeper_core::models::account::{
    CashCategoryClass, DepositCategoryClass, LoanCategoryClass, PayeeType, PortfolioType,
    SecurityType,
};
use recordkeeper_core::models::asset::{AssetId, AssetType};
use recordkeeper_core::models::attribute::{AccountInfoClass, AttributeSet, AttributeValue};
use recordkeeper_core::models::category::{CategoryClass, CategoryKind, TransactionCategory};
use recordkeeper_core::models::money::{Currency, ExchangeRates, Money};
use recordkeeper_core::models::settings::{DateRange, Settings};
use recordkeeper_core::models::tax_year::TaxRegime;
use recordkeeper_core::models::transaction::{Direction, Transaction};
use recordkeeper_core::models::workspace::AssetCollection;
use rust_decimal_macros::dec;
use strum::IntoEnumIterator;

// ═══════════════════════════════════════════════════════════════════
//  Class ids
// ═══════════════════════════════════════════════════════════════════

mod class_ids {
    use super::*;

    #[test]
    fn asset_type_round_trips_every_variant() {
        for asset_type in AssetType::iter() {
            assert_eq!(AssetType::from_class_id(asset_type.class_id()).unwrap(), asset_type);
        }
    }

    #[test]
    fn category_class_round_trips_every_variant() {
        for class in CategoryClass::iter() {
            assert_eq!(CategoryClass::try_from(class.class_id()).unwrap(), class);
        }
    }

    #[test]
    fn category_class_ids_are_unique() {
        let mut ids: Vec<i32> = CategoryClass::iter().map(CategoryClass::class_id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn sub_kinds_round_trip() {
        assert_eq!(PayeeType::try_from(4).unwrap(), PayeeType::TaxMan);
        assert_eq!(DepositCategoryClass::try_from(5).unwrap(), DepositCategoryClass::Bond);
        assert_eq!(CashCategoryClass::try_from(2).unwrap(), CashCategoryClass::AutoExpense);
        assert_eq!(LoanCategoryClass::try_from(1).unwrap(), LoanCategoryClass::CreditCard);
        assert_eq!(PortfolioType::try_from(3).unwrap(), PortfolioType::Pension);
        assert_eq!(SecurityType::try_from(5).unwrap(), SecurityType::Property);
        assert_eq!(TaxRegime::from_class_id(4).unwrap(), TaxRegime::Additional);
    }

    #[test]
    fn unknown_asset_type_id() {
        let err = AssetType::from_class_id(99).unwrap_err();
        assert!(matches!(err, CoreError::InvalidClassId { kind: "AssetType", id: 99 }));
    }

    #[test]
    fn unknown_category_class_id() {
        assert!(matches!(
            CategoryClass::from_class_id(0),
            Err(CoreError::InvalidClassId { kind: "CategoryClass", id: 0 })
        ));
    }

    #[test]
    fn unknown_sub_kind_id() {
        let err = SecurityType::try_from(-1).unwrap_err();
        assert_eq!(err.to_string(), "Invalid class id for SecurityType: -1");
        assert!(TaxRegime::from_class_id(5).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AssetType predicates
// ═══════════════════════════════════════════════════════════════════

mod asset_type {
    use super::*;

    #[test]
    fn valued_types() {
        let valued: Vec<AssetType> = AssetType::iter().filter(|t| t.is_valued()).collect();
        assert_eq!(
            valued,
            vec![AssetType::Deposit, AssetType::Cash, AssetType::Loan, AssetType::Portfolio]
        );
    }

    #[test]
    fn payee_and_security_are_not_base_accounts() {
        assert!(!AssetType::Payee.is_base_account());
        assert!(!AssetType::Security.is_base_account());
        assert!(AssetType::AutoExpense.is_base_account());
        assert!(AssetType::SecurityHolding.is_base_account());
    }

    #[test]
    fn everything_but_payee_is_an_asset() {
        for asset_type in AssetType::iter() {
            assert_eq!(asset_type.is_asset(), !asset_type.is_payee(), "{asset_type}");
        }
    }

    #[test]
    fn exactly_one_kind_predicate_holds() {
        for asset_type in AssetType::iter() {
            let hits = [
                asset_type.is_payee(),
                asset_type.is_deposit(),
                asset_type.is_loan(),
                asset_type.is_portfolio(),
                asset_type.is_security(),
                asset_type.is_security_holding(),
                asset_type.is_auto_expense(),
                asset_type == AssetType::Cash,
            ];
            assert_eq!(hits.iter().filter(|h| **h).count(), 1, "{asset_type}");
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(AssetType::SecurityHolding.to_string(), "SecurityHolding");
        assert_eq!(AssetType::AutoExpense.to_string(), "AutoExpense");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Resolved assets
// ═══════════════════════════════════════════════════════════════════

mod workspace {
    use super::*;

    #[test]
    fn resolves_every_kind() {
        let fx = fixture();
        assert_eq!(fx.asset(fx.employer).asset_type(), AssetType::Payee);
        assert_eq!(fx.asset(fx.checking).asset_type(), AssetType::Deposit);
        assert_eq!(fx.asset(fx.cash).asset_type(), AssetType::Cash);
        assert_eq!(fx.asset(fx.auto_expense).asset_type(), AssetType::AutoExpense);
        assert_eq!(fx.asset(fx.mortgage).asset_type(), AssetType::Loan);
        assert_eq!(fx.asset(fx.isa).asset_type(), AssetType::Portfolio);
        assert_eq!(fx.asset(fx.acme).asset_type(), AssetType::Security);
        assert_eq!(fx.asset(fx.acme_isa).asset_type(), AssetType::SecurityHolding);
    }

    #[test]
    fn resolved_id_matches_request() {
        let fx = fixture();
        for id in [fx.shop, fx.bond, fx.credit_card, fx.sipp, fx.acme_sipp] {
            assert_eq!(fx.asset(id).id(), id);
        }
    }

    #[test]
    fn unknown_id_is_an_error() {
        let fx = fixture();
        let err = fx.ws.resolve(&AssetId::Deposit(uuid::Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, CoreError::AssetNotFound(_)));
    }

    #[test]
    fn holding_needs_known_portfolio_and_security() {
        let mut fx = fixture();
        let err = fx
            .ws
            .add_holding(uuid::Uuid::new_v4(), uuid_of(fx.acme))
            .unwrap_err();
        assert!(matches!(err, CoreError::AssetNotFound(_)));
    }

    #[test]
    fn holding_reports_portfolio_and_security_traits() {
        let fx = fixture();
        let holding = fx.asset(fx.acme_isa);
        assert_eq!(holding.portfolio_id(), Some(uuid_of(fx.isa)));
        assert!(holding.is_shares());
        assert!(!holding.is_property());
        assert!(fx.asset(fx.flat_isa).is_property());
        assert!(!fx.asset(fx.fund_isa).is_shares());
    }

    #[test]
    fn payees_have_no_currency() {
        let fx = fixture();
        assert_eq!(fx.asset(fx.shop).currency(), None);
        assert_eq!(fx.asset(fx.checking).currency(), Some(&gbp()));
        assert_eq!(fx.asset(fx.employer).payee_type(), Some(PayeeType::Employer));
    }

    #[test]
    fn closing_a_portfolio_closes_its_holdings() {
        let mut fx = fixture();
        fx.ws.portfolios[0].flags.closed = true;
        assert!(fx.asset(fx.acme_isa).is_closed());
        assert!(!fx.asset(fx.acme_sipp).is_closed());
    }

    #[test]
    fn availability_needs_open_visible_and_live() {
        let mut fx = fixture();
        assert!(fx.asset(fx.shop).is_available());
        fx.ws.payees[4].flags.hidden = true;
        assert!(!fx.asset(fx.shop).is_available());
    }

    #[test]
    fn collections_keep_insertion_order() {
        let fx = fixture();
        let ids: Vec<AssetId> = fx
            .ws
            .assets(AssetCollection::Deposits)
            .iter()
            .map(|a| a.id())
            .collect();
        assert_eq!(ids, vec![fx.checking, fx.p2p, fx.bond]);

        let cash: Vec<AssetId> = fx.ws.assets(AssetCollection::Cash).iter().map(|a| a.id()).collect();
        assert_eq!(cash, vec![fx.cash, fx.auto_expense]);
        assert_eq!(fx.ws.assets(AssetCollection::Holdings).len(), 5);
    }

    #[test]
    fn peer_to_peer_and_credit_card() {
        let fx = fixture();
        assert!(fx.asset(fx.p2p).is_peer_to_peer());
        assert!(!fx.asset(fx.checking).is_peer_to_peer());
        assert!(fx.asset(fx.credit_card).is_credit_card());
        assert!(!fx.asset(fx.mortgage).is_credit_card());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Categories
// ═══════════════════════════════════════════════════════════════════

mod category {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(CategoryClass::TaxedIncome.kind(), CategoryKind::Income);
        assert_eq!(CategoryClass::WriteOff.kind(), CategoryKind::Expense);
        assert_eq!(CategoryClass::Transfer.kind(), CategoryKind::Transfer);
        assert_eq!(CategoryClass::StockSplit.kind(), CategoryKind::Structural);
        assert_eq!(CategoryClass::TaxCredit.kind(), CategoryKind::System);
        assert_eq!(CategoryClass::Totals.kind(), CategoryKind::Group);
    }

    #[test]
    fn dividends_and_interest_are_income() {
        for class in CategoryClass::iter().filter(|c| c.is_dividend() || c.is_interest()) {
            assert!(class.is_income(), "{class}");
        }
    }

    #[test]
    fn zero_amount_events() {
        let zero: Vec<CategoryClass> =
            CategoryClass::iter().filter(|c| c.needs_zero_amount()).collect();
        assert_eq!(
            zero,
            vec![CategoryClass::UnitsAdjust, CategoryClass::StockSplit, CategoryClass::StockDemerger]
        );
    }

    #[test]
    fn selectable_excludes_groups_hidden_and_deleted() {
        assert!(TransactionCategory::new("Food", CategoryClass::Expense).is_selectable());
        assert!(!TransactionCategory::new("All", CategoryClass::ExpenseTotals).is_selectable());
        assert!(!TransactionCategory::new("Growth", CategoryClass::MarketGrowth).is_selectable());

        let mut deleted = TransactionCategory::new("Old", CategoryClass::Expense);
        deleted.deleted = true;
        assert!(!deleted.is_selectable());
    }

    #[test]
    fn unknown_category_lookup() {
        let fx = fixture();
        let err = fx.ws.category(uuid::Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, CoreError::CategoryNotFound(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Currency and Money
// ═══════════════════════════════════════════════════════════════════

mod money {
    use super::*;

    #[test]
    fn currency_codes_are_normalized() {
        assert_eq!(Currency::new(" usd ").unwrap().code(), "USD");
        assert_eq!(Currency::gbp().to_string(), "GBP");
    }

    #[test]
    fn currency_rejects_bad_codes() {
        for code in ["", "US", "USDT", "U$D", "12A"] {
            assert!(matches!(Currency::new(code), Err(CoreError::InvalidCurrency(_))), "{code}");
        }
    }

    #[test]
    fn currency_deserialization_validates() {
        let ok: Currency = serde_json::from_str("\"eur\"").unwrap();
        assert_eq!(ok.code(), "EUR");
        assert!(serde_json::from_str::<Currency>("\"EURO\"").is_err());
    }

    #[test]
    fn money_predicates_and_display() {
        assert!(Money::zero(gbp()).is_zero());
        assert!(money(dec!(-0.01)).is_negative());
        assert_eq!(money(dec!(12.50)).to_string(), "12.50 GBP");
    }

    #[test]
    fn base_rate_is_one() {
        let rates = ExchangeRates::new(gbp());
        assert_eq!(rates.rate(&gbp()), Some(dec!(1)));
        assert_eq!(rates.rate(&usd()), None);
    }

    #[test]
    fn zero_rate_counts_as_missing() {
        let mut rates = ExchangeRates::new(gbp());
        rates.set_rate(usd(), dec!(0));
        assert_eq!(rates.rate(&usd()), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transactions
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn direction_reverses() {
        assert_eq!(Direction::To.reverse(), Direction::From);
        assert_eq!(Direction::From.reverse(), Direction::To);
        assert!(Direction::To.is_to());
        assert!(Direction::From.is_from());
    }

    #[test]
    fn self_reference_compares_ids() {
        let fx = fixture();
        let split = Transaction::new(
            d(2024, 1, 1),
            Money::zero(gbp()),
            fx.acme_isa,
            fx.acme_isa,
            fx.stock_split,
            Direction::To,
        );
        assert!(split.is_self_referencing());

        let other = Transaction::new(
            d(2024, 1, 1),
            Money::zero(gbp()),
            fx.acme_isa,
            fx.acme_sipp,
            fx.stock_split,
            Direction::To,
        );
        assert!(!other.is_self_referencing());
    }

    #[test]
    fn json_roundtrip_keeps_attributes() {
        let fx = fixture();
        let mut tx = Transaction::new(
            d(2024, 3, 31),
            money(dec!(1500.25)),
            fx.checking,
            fx.employer,
            fx.salary,
            Direction::From,
        );
        tx.info
            .set(
                recordkeeper_core::models::attribute::TransactionInfoClass::TaxCredit,
                AttributeValue::Money(money(dec!(300))),
            )
            .unwrap();

        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Attribute sets
// ═══════════════════════════════════════════════════════════════════

mod attribute_set {
    use super::*;

    #[test]
    fn iteration_skips_deleted() {
        let mut set = AttributeSet::new();
        set.set(AccountInfoClass::Notes, AttributeValue::Text("a".into())).unwrap();
        set.set(AccountInfoClass::SortCode, AttributeValue::Text("12-34-56".into())).unwrap();
        set.mark_deleted(AccountInfoClass::Notes);
        let live: Vec<AccountInfoClass> = set.iter().map(|(c, _)| c).collect();
        assert_eq!(live, vec![AccountInfoClass::SortCode]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn set_revives_deleted_entry() {
        let mut set = AttributeSet::new();
        set.set(AccountInfoClass::Notes, AttributeValue::Text("a".into())).unwrap();
        set.mark_deleted(AccountInfoClass::Notes);
        set.set(AccountInfoClass::Notes, AttributeValue::Text("b".into())).unwrap();
        assert_eq!(
            set.get(AccountInfoClass::Notes),
            Some(&AttributeValue::Text("b".into()))
        );
    }

    #[test]
    fn json_roundtrip_preserves_deleted_flag() {
        let mut set = AttributeSet::new();
        set.set(AccountInfoClass::Maturity, AttributeValue::Date(d(2027, 6, 30))).unwrap();
        set.set(AccountInfoClass::Reference, AttributeValue::Text("R1".into())).unwrap();
        set.mark_deleted(AccountInfoClass::Reference);

        let json = serde_json::to_string(&set).unwrap();
        let back: AttributeSet<AccountInfoClass> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert!(back.entry(AccountInfoClass::Reference).is_some_and(|e| e.deleted));
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let mut set = AttributeSet::new();
        let err = set
            .set(AccountInfoClass::OpeningBalance, AttributeValue::Rate(dec!(1)))
            .unwrap_err();
        assert!(matches!(err, CoreError::AttributeTypeMismatch { .. }));
        assert!(set.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn default_is_gbp_without_range() {
        let settings = Settings::default();
        assert_eq!(settings.default_currency, gbp());
        assert_eq!(settings.date_range, DateRange::default());
    }

    #[test]
    fn json_roundtrip() {
        let settings = Settings {
            default_currency: usd(),
            date_range: DateRange::between(d(2024, 1, 1), d(2024, 12, 31)),
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn missing_range_defaults_to_open() {
        let settings = Settings::from_json(r#"{"default_currency":"EUR"}"#).unwrap();
        assert_eq!(settings.default_currency.code(), "EUR");
        assert_eq!(settings.date_range, DateRange::new(None, None));
    }

    #[test]
    fn invalid_json_is_a_deserialization_error() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn invalid_currency_in_json() {
        assert!(Settings::from_json(r#"{"default_currency":"POUNDS"}"#).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DateRange
// ═══════════════════════════════════════════════════════════════════

mod date_range {
    use super::*;

    #[test]
    fn clamp_inside_is_unchanged() {
        let range = DateRange::between(d(2024, 1, 1), d(2024, 12, 31));
        assert_eq!(range.clamp(d(2024, 6, 15)), d(2024, 6, 15));
    }

    #[test]
    fn clamp_snaps_to_bounds() {
        let range = DateRange::between(d(2024, 1, 1), d(2024, 12, 31));
        assert_eq!(range.clamp(d(2023, 5, 1)), d(2024, 1, 1));
        assert_eq!(range.clamp(d(2025, 5, 1)), d(2024, 12, 31));
    }

    #[test]
    fn open_ended_ranges() {
        let from = DateRange::new(Some(d(2024, 1, 1)), None);
        assert_eq!(from.clamp(d(2030, 1, 1)), d(2030, 1, 1));
        assert_eq!(from.clamp(d(2020, 1, 1)), d(2024, 1, 1));
        assert!(DateRange::default().contains(d(1900, 1, 1)));
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DateRange::between(d(2024, 1, 1), d(2024, 12, 31));
        assert!(range.contains(d(2024, 1, 1)));
        assert!(range.contains(d(2024, 12, 31)));
        assert!(!range.contains(d(2025, 1, 1)));
    }
}
