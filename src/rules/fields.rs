//! Field rule library
//!
//! Pure functions of (field, category, SEC code) deciding whether an entry
//! field is required, optional or must be blank. Every SEC policy shares this
//! table, so supporting a new SEC code means adding rows here and a policy
//! entry, not new branches in the engine.

use crate::types::{Category, EntryDetail, SecCode};
use std::fmt;

/// Entry fields subject to inclusion rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Addenda02,
    Addenda05,
    Addenda98,
    Addenda99,
    InternationalDetail,
    PaymentTypeCode,
    IndividualName,
    AddendaRecordCount,
}

impl Field {
    /// Fields in the order the engine checks them
    pub const ALL: [Field; 8] = [
        Field::Addenda02,
        Field::Addenda05,
        Field::Addenda98,
        Field::Addenda99,
        Field::InternationalDetail,
        Field::PaymentTypeCode,
        Field::IndividualName,
        Field::AddendaRecordCount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Addenda02 => "Addenda02",
            Field::Addenda05 => "Addenda05",
            Field::Addenda98 => "Addenda98",
            Field::Addenda99 => "Addenda99",
            Field::InternationalDetail => "InternationalDetail",
            Field::PaymentTypeCode => "PaymentTypeCode",
            Field::IndividualName => "IndividualName",
            Field::AddendaRecordCount => "AddendaRecordCount",
        }
    }

    /// Whether the field carries a value on `entry`
    pub fn is_present_on(&self, entry: &EntryDetail) -> bool {
        match self {
            Field::Addenda02 => entry.addenda02.is_some(),
            Field::Addenda05 => !entry.addenda05.is_empty(),
            Field::Addenda98 => entry.addenda98.is_some(),
            Field::Addenda99 => entry.addenda99.is_some(),
            Field::InternationalDetail => entry.international.is_some(),
            Field::PaymentTypeCode => entry.payment_type.is_some(),
            Field::IndividualName => !entry.individual_name.trim().is_empty(),
            Field::AddendaRecordCount => entry.recorded_addenda_count.is_some(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusion requirement for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    Required,
    Optional,
    Blank,
}

/// Inclusion requirement of `field` for an entry of `category` in a `sec_code` batch
pub fn inclusion(field: Field, category: Category, sec_code: SecCode) -> Inclusion {
    use Inclusion::*;

    match field {
        // Terminal data belongs to point-of-sale SEC codes only.
        Field::Addenda02 => Blank,
        Field::Addenda05 => match (category, sec_code) {
            (Category::Forward, SecCode::Iat) => Blank,
            (Category::Forward, _) => Optional,
            _ => Blank,
        },
        Field::Addenda98 => match category {
            Category::Noc => Required,
            _ => Blank,
        },
        Field::Addenda99 => match category {
            Category::Return => Required,
            _ => Blank,
        },
        Field::InternationalDetail => match (category, sec_code) {
            (Category::Forward, SecCode::Iat) => Required,
            (_, SecCode::Iat) => Optional,
            _ => Blank,
        },
        Field::PaymentTypeCode => match (category, sec_code) {
            (Category::Forward, SecCode::Web) => Required,
            (_, SecCode::Web) => Optional,
            _ => Blank,
        },
        Field::IndividualName => match (category, sec_code) {
            // IAT carries the receiver name in Addenda10.
            (_, SecCode::Iat) => Blank,
            (Category::Forward, SecCode::Ppd | SecCode::Web) => Required,
            _ => Optional,
        },
        Field::AddendaRecordCount => match sec_code {
            SecCode::Ctx => Optional,
            _ => Blank,
        },
    }
}

pub fn field_is_required_for(field: Field, category: Category, sec_code: SecCode) -> bool {
    inclusion(field, category, sec_code) == Inclusion::Required
}

pub fn field_must_be_blank_for(field: Field, category: Category, sec_code: SecCode) -> bool {
    inclusion(field, category, sec_code) == Inclusion::Blank
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::ctx_addenda05(Field::Addenda05, Category::Forward, SecCode::Ctx, Inclusion::Optional)]
    #[case::iat_addenda05(Field::Addenda05, Category::Forward, SecCode::Iat, Inclusion::Blank)]
    #[case::return_addenda05(Field::Addenda05, Category::Return, SecCode::Ppd, Inclusion::Blank)]
    #[case::noc_addenda98(Field::Addenda98, Category::Noc, SecCode::Ccd, Inclusion::Required)]
    #[case::forward_addenda98(Field::Addenda98, Category::Forward, SecCode::Ccd, Inclusion::Blank)]
    #[case::return_addenda99(Field::Addenda99, Category::Return, SecCode::Web, Inclusion::Required)]
    #[case::noc_addenda99(Field::Addenda99, Category::Noc, SecCode::Web, Inclusion::Blank)]
    #[case::iat_detail(Field::InternationalDetail, Category::Forward, SecCode::Iat, Inclusion::Required)]
    #[case::iat_return_detail(Field::InternationalDetail, Category::Return, SecCode::Iat, Inclusion::Optional)]
    #[case::ppd_detail(Field::InternationalDetail, Category::Forward, SecCode::Ppd, Inclusion::Blank)]
    #[case::web_payment_type(Field::PaymentTypeCode, Category::Forward, SecCode::Web, Inclusion::Required)]
    #[case::ccd_payment_type(Field::PaymentTypeCode, Category::Forward, SecCode::Ccd, Inclusion::Blank)]
    #[case::ppd_name(Field::IndividualName, Category::Forward, SecCode::Ppd, Inclusion::Required)]
    #[case::ctx_name(Field::IndividualName, Category::Forward, SecCode::Ctx, Inclusion::Optional)]
    #[case::iat_name(Field::IndividualName, Category::Forward, SecCode::Iat, Inclusion::Blank)]
    #[case::ctx_record_count(Field::AddendaRecordCount, Category::Forward, SecCode::Ctx, Inclusion::Optional)]
    #[case::ppd_record_count(Field::AddendaRecordCount, Category::Forward, SecCode::Ppd, Inclusion::Blank)]
    fn test_inclusion_table(
        #[case] field: Field,
        #[case] category: Category,
        #[case] sec_code: SecCode,
        #[case] expected: Inclusion,
    ) {
        assert_eq!(inclusion(field, category, sec_code), expected);
    }

    #[test]
    fn test_predicates_are_exclusive() {
        for sec_code in SecCode::ALL {
            for category in [Category::Forward, Category::Return, Category::Noc] {
                for field in Field::ALL {
                    assert!(
                        !(field_is_required_for(field, category, sec_code)
                            && field_must_be_blank_for(field, category, sec_code)),
                        "{} is both required and blank for {} {}",
                        field,
                        category,
                        sec_code
                    );
                }
            }
        }
    }

    #[test]
    fn test_addenda02_is_blank_for_every_supported_sec_code() {
        for sec_code in SecCode::ALL {
            assert!(field_must_be_blank_for(
                Field::Addenda02,
                Category::Forward,
                sec_code
            ));
        }
    }
}
