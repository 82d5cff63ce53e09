//! Code tables for the ACH record model
//!
//! This module defines the enumerated NACHA codes the engine reasons about:
//! Standard Entry Class codes, Service Class Codes, transaction codes and the
//! derived entry category.

use super::error::BatchError;
use std::fmt;
use std::str::FromStr;

/// Standard Entry Class code
///
/// Identifies the payment application of a batch and with it the set of
/// structural rules every entry in the batch must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecCode {
    /// Prearranged Payment and Deposit (consumer)
    Ppd,
    /// Corporate Credit or Debit
    Ccd,
    /// Corporate Trade Exchange
    Ctx,
    /// Internet-initiated entry
    Web,
    /// International ACH Transaction
    Iat,
}

impl SecCode {
    /// All SEC codes the engine has a policy for
    pub const ALL: [SecCode; 5] = [
        SecCode::Ppd,
        SecCode::Ccd,
        SecCode::Ctx,
        SecCode::Web,
        SecCode::Iat,
    ];

    /// The three-letter code as it appears in the batch header
    pub fn as_str(&self) -> &'static str {
        match self {
            SecCode::Ppd => "PPD",
            SecCode::Ccd => "CCD",
            SecCode::Ctx => "CTX",
            SecCode::Web => "WEB",
            SecCode::Iat => "IAT",
        }
    }
}

impl fmt::Display for SecCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecCode {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PPD" => Ok(SecCode::Ppd),
            "CCD" => Ok(SecCode::Ccd),
            "CTX" => Ok(SecCode::Ctx),
            "WEB" => Ok(SecCode::Web),
            "IAT" => Ok(SecCode::Iat),
            _ => Err(BatchError::UnknownSecCode {
                code: s.to_string(),
            }),
        }
    }
}

/// Service Class Code of a batch
///
/// Restricts the direction of the entries a batch may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceClassCode {
    /// 200: debits and credits may be mixed
    MixedDebitsAndCredits,
    /// 220: credits only
    CreditsOnly,
    /// 225: debits only
    DebitsOnly,
}

impl ServiceClassCode {
    /// Numeric value used in the batch header and control records
    pub fn code(&self) -> u16 {
        match self {
            ServiceClassCode::MixedDebitsAndCredits => 200,
            ServiceClassCode::CreditsOnly => 220,
            ServiceClassCode::DebitsOnly => 225,
        }
    }

    /// Parse a numeric Service Class Code
    pub fn from_code(code: u16) -> Result<Self, BatchError> {
        match code {
            200 => Ok(ServiceClassCode::MixedDebitsAndCredits),
            220 => Ok(ServiceClassCode::CreditsOnly),
            225 => Ok(ServiceClassCode::DebitsOnly),
            _ => Err(BatchError::UnknownServiceClassCode { code }),
        }
    }

    /// Whether an entry moving money in `direction` may appear in this class
    pub fn permits(&self, direction: Direction) -> bool {
        match self {
            ServiceClassCode::MixedDebitsAndCredits => true,
            ServiceClassCode::CreditsOnly => direction == Direction::Credit,
            ServiceClassCode::DebitsOnly => direction == Direction::Debit,
        }
    }
}

impl fmt::Display for ServiceClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Direction of funds for a transaction code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

/// Receiver account type encoded by a transaction code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Checking,
    Savings,
    GeneralLedger,
    Loan,
}

/// What an entry with a given transaction code does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Live dollar entry
    Live,
    /// Zero-dollar pre-notification used to verify the receiver account
    Prenote,
    /// Zero-dollar entry carrying remittance data
    ZeroDollarRemittance,
    /// Automated return or notification of change
    ReturnOrNoc,
}

/// NACHA transaction code
///
/// The discriminant is the two-digit code carried on the entry detail record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionCode {
    CheckingReturnNocCredit = 21,
    CheckingCredit = 22,
    CheckingPrenoteCredit = 23,
    CheckingZeroDollarRemittanceCredit = 24,
    CheckingReturnNocDebit = 26,
    CheckingDebit = 27,
    CheckingPrenoteDebit = 28,
    CheckingZeroDollarRemittanceDebit = 29,
    SavingsReturnNocCredit = 31,
    SavingsCredit = 32,
    SavingsPrenoteCredit = 33,
    SavingsZeroDollarRemittanceCredit = 34,
    SavingsReturnNocDebit = 36,
    SavingsDebit = 37,
    SavingsPrenoteDebit = 38,
    SavingsZeroDollarRemittanceDebit = 39,
    GlReturnNocCredit = 41,
    GlCredit = 42,
    GlPrenoteCredit = 43,
    GlZeroDollarRemittanceCredit = 44,
    GlReturnNocDebit = 46,
    GlDebit = 47,
    GlPrenoteDebit = 48,
    GlZeroDollarRemittanceDebit = 49,
    LoanReturnNocCredit = 51,
    LoanCredit = 52,
    LoanPrenoteCredit = 53,
    LoanZeroDollarRemittanceCredit = 54,
    LoanDebit = 55,
    LoanReturnNocDebit = 56,
}

impl TransactionCode {
    /// Every prenote code, across all account types
    pub const PRENOTES: [TransactionCode; 7] = [
        TransactionCode::CheckingPrenoteCredit,
        TransactionCode::CheckingPrenoteDebit,
        TransactionCode::SavingsPrenoteCredit,
        TransactionCode::SavingsPrenoteDebit,
        TransactionCode::GlPrenoteCredit,
        TransactionCode::GlPrenoteDebit,
        TransactionCode::LoanPrenoteCredit,
    ];

    /// Parse a two-digit transaction code
    pub fn from_code(code: u8) -> Result<Self, BatchError> {
        use TransactionCode::*;
        let parsed = match code {
            21 => CheckingReturnNocCredit,
            22 => CheckingCredit,
            23 => CheckingPrenoteCredit,
            24 => CheckingZeroDollarRemittanceCredit,
            26 => CheckingReturnNocDebit,
            27 => CheckingDebit,
            28 => CheckingPrenoteDebit,
            29 => CheckingZeroDollarRemittanceDebit,
            31 => SavingsReturnNocCredit,
            32 => SavingsCredit,
            33 => SavingsPrenoteCredit,
            34 => SavingsZeroDollarRemittanceCredit,
            36 => SavingsReturnNocDebit,
            37 => SavingsDebit,
            38 => SavingsPrenoteDebit,
            39 => SavingsZeroDollarRemittanceDebit,
            41 => GlReturnNocCredit,
            42 => GlCredit,
            43 => GlPrenoteCredit,
            44 => GlZeroDollarRemittanceCredit,
            46 => GlReturnNocDebit,
            47 => GlDebit,
            48 => GlPrenoteDebit,
            49 => GlZeroDollarRemittanceDebit,
            51 => LoanReturnNocCredit,
            52 => LoanCredit,
            53 => LoanPrenoteCredit,
            54 => LoanZeroDollarRemittanceCredit,
            55 => LoanDebit,
            56 => LoanReturnNocDebit,
            _ => return Err(BatchError::UnknownTransactionCode { code }),
        };
        Ok(parsed)
    }

    /// The two-digit numeric code
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Credit or debit, by the last digit of the code (1-4 credit, 5-9 debit)
    pub fn direction(&self) -> Direction {
        if self.code() % 10 <= 4 {
            Direction::Credit
        } else {
            Direction::Debit
        }
    }

    /// Account type, by the first digit of the code
    pub fn account_type(&self) -> AccountType {
        match self.code() / 10 {
            2 => AccountType::Checking,
            3 => AccountType::Savings,
            4 => AccountType::GeneralLedger,
            _ => AccountType::Loan,
        }
    }

    /// Live, prenote, zero-dollar remittance or automated return/NOC
    pub fn kind(&self) -> TransactionKind {
        // Loan debits break the per-account digit pattern.
        match self {
            TransactionCode::LoanDebit => return TransactionKind::Live,
            TransactionCode::LoanReturnNocDebit => return TransactionKind::ReturnOrNoc,
            _ => {}
        }
        match self.code() % 10 {
            1 | 6 => TransactionKind::ReturnOrNoc,
            2 | 7 => TransactionKind::Live,
            3 | 8 => TransactionKind::Prenote,
            _ => TransactionKind::ZeroDollarRemittance,
        }
    }

    pub fn is_prenote(&self) -> bool {
        self.kind() == TransactionKind::Prenote
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

/// Entry category, selects the addenda field-inclusion rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Originated entry flowing from ODFI to RDFI
    Forward,
    /// Returned entry carrying an Addenda99
    Return,
    /// Notification of change carrying an Addenda98
    Noc,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Forward => "Forward",
            Category::Return => "Return",
            Category::Noc => "NOC",
        };
        f.write_str(name)
    }
}

/// WEB payment type code carried in the entry discretionary data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentType {
    /// `R`: recurring authorization
    Recurring,
    /// `S`: single entry
    Single,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Recurring => "R",
            PaymentType::Single => "S",
        }
    }
}

impl FromStr for PaymentType {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "R" => Ok(PaymentType::Recurring),
            "S" => Ok(PaymentType::Single),
            _ => Err(BatchError::InvalidPaymentType {
                value: s.to_string(),
            }),
        }
    }
}
