//! SEC-code policy table
//!
//! One static [`SecPolicy`] per supported SEC code. A batch is parameterized
//! by the policy selected from its declared SEC code; all per-code differences
//! in validation come from this table and the field rule library.

use super::fields::{self, Field, Inclusion};
use crate::types::{Category, SecCode, TransactionCode};

/// Capacity of the CTX four-digit "number of addenda records" sub-field
pub const CTX_ADDENDA05_CAPACITY: usize = 9999;

/// Per-SEC-code rule set
#[derive(Debug, PartialEq, Eq)]
pub struct SecPolicy {
    pub sec_code: SecCode,

    /// Transaction codes that fail fast with `ForbiddenTransactionCode`
    pub forbidden_transaction_codes: &'static [TransactionCode],

    /// Maximum Addenda05 records per entry, `None` when inclusion rules govern
    pub addenda05_limit: Option<usize>,

    /// Maximum IAT Addenda17 records per entry
    pub addenda17_limit: Option<usize>,

    /// Maximum IAT Addenda18 records per entry
    pub addenda18_limit: Option<usize>,

    /// Whether entries carry a recorded addenda count that must match Addenda05
    pub records_addenda_count: bool,
}

static PPD: SecPolicy = SecPolicy {
    sec_code: SecCode::Ppd,
    forbidden_transaction_codes: &[],
    addenda05_limit: Some(1),
    addenda17_limit: None,
    addenda18_limit: None,
    records_addenda_count: false,
};

static CCD: SecPolicy = SecPolicy {
    sec_code: SecCode::Ccd,
    forbidden_transaction_codes: &[],
    addenda05_limit: Some(1),
    addenda17_limit: None,
    addenda18_limit: None,
    records_addenda_count: false,
};

static CTX: SecPolicy = SecPolicy {
    sec_code: SecCode::Ctx,
    forbidden_transaction_codes: &TransactionCode::PRENOTES,
    addenda05_limit: Some(CTX_ADDENDA05_CAPACITY),
    addenda17_limit: None,
    addenda18_limit: None,
    records_addenda_count: true,
};

static WEB: SecPolicy = SecPolicy {
    sec_code: SecCode::Web,
    forbidden_transaction_codes: &[],
    addenda05_limit: Some(1),
    addenda17_limit: None,
    addenda18_limit: None,
    records_addenda_count: false,
};

static IAT: SecPolicy = SecPolicy {
    sec_code: SecCode::Iat,
    forbidden_transaction_codes: &[],
    addenda05_limit: None,
    addenda17_limit: Some(2),
    addenda18_limit: Some(5),
    records_addenda_count: false,
};

/// Look up the policy for an exact SEC code
pub fn policy_for(sec_code: SecCode) -> &'static SecPolicy {
    match sec_code {
        SecCode::Ppd => &PPD,
        SecCode::Ccd => &CCD,
        SecCode::Ctx => &CTX,
        SecCode::Web => &WEB,
        SecCode::Iat => &IAT,
    }
}

impl SecPolicy {
    /// Whether `code` is outright forbidden in batches of this SEC code
    pub fn forbids(&self, code: TransactionCode) -> bool {
        self.forbidden_transaction_codes.contains(&code)
    }

    /// Inclusion requirement of `field` for an entry of `category` under this policy
    pub fn inclusion(&self, field: Field, category: Category) -> Inclusion {
        fields::inclusion(field, category, self.sec_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_lookup_is_exact() {
        for sec_code in SecCode::ALL {
            assert_eq!(policy_for(sec_code).sec_code, sec_code);
        }
    }

    #[rstest]
    #[case(TransactionCode::CheckingPrenoteCredit)]
    #[case(TransactionCode::CheckingPrenoteDebit)]
    #[case(TransactionCode::SavingsPrenoteCredit)]
    #[case(TransactionCode::SavingsPrenoteDebit)]
    #[case(TransactionCode::GlPrenoteCredit)]
    #[case(TransactionCode::GlPrenoteDebit)]
    #[case(TransactionCode::LoanPrenoteCredit)]
    fn test_ctx_forbids_prenotes(#[case] code: TransactionCode) {
        assert!(policy_for(SecCode::Ctx).forbids(code));
        assert!(!policy_for(SecCode::Ppd).forbids(code));
    }

    #[rstest]
    #[case(TransactionCode::CheckingCredit)]
    #[case(TransactionCode::CheckingZeroDollarRemittanceCredit)]
    #[case(TransactionCode::SavingsDebit)]
    #[case(TransactionCode::SavingsReturnNocDebit)]
    fn test_ctx_permits_non_prenote_codes(#[case] code: TransactionCode) {
        assert!(!policy_for(SecCode::Ctx).forbids(code));
    }

    #[rstest]
    #[case(SecCode::Ppd, Some(1))]
    #[case(SecCode::Ccd, Some(1))]
    #[case(SecCode::Web, Some(1))]
    #[case(SecCode::Ctx, Some(9999))]
    #[case(SecCode::Iat, None)]
    fn test_addenda05_limits(#[case] sec_code: SecCode, #[case] limit: Option<usize>) {
        assert_eq!(policy_for(sec_code).addenda05_limit, limit);
    }

    #[test]
    fn test_only_ctx_records_addenda_count() {
        for sec_code in SecCode::ALL {
            assert_eq!(
                policy_for(sec_code).records_addenda_count,
                sec_code == SecCode::Ctx
            );
        }
    }

    #[test]
    fn test_policy_inclusion_delegates_to_field_rules() {
        let web = policy_for(SecCode::Web);
        assert_eq!(
            web.inclusion(Field::PaymentTypeCode, Category::Forward),
            Inclusion::Required
        );
        assert_eq!(
            web.inclusion(Field::InternationalDetail, Category::Forward),
            Inclusion::Blank
        );
    }
}
