//! CSV format handling for entry input and batch output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvEntryRecord structure for deserialization
//! - Conversion from CSV records to entry details
//! - Control and entry output serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::entry::MAX_ENTRY_AMOUNT;
use crate::types::{BatchControl, BatchError, EntryDetail, PaymentType, RoutingNumber, TransactionCode};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Separator between Addenda05 payment-related information strings
pub const ADDENDA_SEPARATOR: char = '|';

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: transaction_code,
/// routing_number, account_number, amount, individual_name,
/// identification_number, payment_type, addenda. The trailing columns are
/// optional.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvEntryRecord {
    pub transaction_code: u8,
    pub routing_number: String,
    pub account_number: String,
    pub amount: String,
    #[serde(default)]
    pub individual_name: Option<String>,
    #[serde(default)]
    pub identification_number: Option<String>,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub addenda: Option<String>,
}

/// Parse a dollar amount such as `100.25` into cents
///
/// # Errors
///
/// Returns `InvalidAmount` for malformed, negative or sub-cent values and for
/// amounts that do not fit the 10-digit entry amount field.
pub fn parse_amount(value: &str) -> Result<u64, BatchError> {
    let invalid = || BatchError::InvalidAmount {
        value: value.to_string(),
    };

    let dollars = Decimal::from_str(value.trim()).map_err(|_| invalid())?;
    if dollars.is_sign_negative() {
        return Err(invalid());
    }

    let cents = dollars.checked_mul(Decimal::ONE_HUNDRED).ok_or_else(invalid)?;
    if cents.trunc() != cents {
        return Err(invalid());
    }

    cents
        .to_u64()
        .filter(|cents| *cents <= MAX_ENTRY_AMOUNT)
        .ok_or_else(invalid)
}

/// Format cents as dollars with two decimal places
pub fn format_amount(cents: u64) -> String {
    // Control totals are capped at 12 digits, well inside i64.
    let cents = i64::try_from(cents).unwrap_or(i64::MAX);
    format!("{:.2}", Decimal::new(cents, 2))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Convert a CsvEntryRecord to an EntryDetail
///
/// # Errors
///
/// Returns the parse error of the first column that fails: transaction code,
/// routing number, amount or payment type.
pub fn convert_csv_record(record: CsvEntryRecord) -> Result<EntryDetail, BatchError> {
    let transaction_code = TransactionCode::from_code(record.transaction_code)?;
    let routing_number = RoutingNumber::from_str(&record.routing_number)?;
    let amount = parse_amount(&record.amount)?;

    let mut entry = EntryDetail::new(
        transaction_code,
        routing_number,
        record.account_number.trim(),
        amount,
    );

    if let Some(name) = non_blank(record.individual_name) {
        entry.individual_name = name;
    }
    if let Some(identification) = non_blank(record.identification_number) {
        entry.identification_number = identification;
    }
    if let Some(payment_type) = non_blank(record.payment_type) {
        entry.payment_type = Some(PaymentType::from_str(&payment_type)?);
    }
    if let Some(addenda) = non_blank(record.addenda) {
        for information in addenda.split(ADDENDA_SEPARATOR) {
            entry = entry.with_addenda05(information.trim());
        }
    }

    Ok(entry)
}

/// Write a batch control as a single CSV row
///
/// Columns: service_class_code, sec_code, entry_addenda_count, entry_hash,
/// total_debit, total_credit, company_identification, odfi_identification,
/// batch_number. Amounts are written in dollars.
pub fn write_control_csv(control: &BatchControl, output: &mut dyn Write) -> Result<(), BatchError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "service_class_code",
        "sec_code",
        "entry_addenda_count",
        "entry_hash",
        "total_debit",
        "total_credit",
        "company_identification",
        "odfi_identification",
        "batch_number",
    ])?;

    writer.write_record(&[
        control.service_class_code().to_string(),
        control.sec_code().to_string(),
        control.entry_addenda_count().to_string(),
        format!("{:010}", control.entry_hash()),
        format_amount(control.total_debit()),
        format_amount(control.total_credit()),
        control.company_identification().to_string(),
        format!("{:08}", control.odfi_identification()),
        format!("{:07}", control.batch_number()),
    ])?;

    writer.flush()?;
    Ok(())
}

/// Write sequenced entries as CSV, one row per entry
///
/// Columns: trace_number, transaction_code, routing_number, account_number,
/// amount, addenda_count. Entries without a trace number (never built) get an
/// empty trace column.
pub fn write_entries_csv(entries: &[EntryDetail], output: &mut dyn Write) -> Result<(), BatchError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "trace_number",
        "transaction_code",
        "routing_number",
        "account_number",
        "amount",
        "addenda_count",
    ])?;

    for entry in entries {
        writer.write_record(&[
            entry
                .trace_number()
                .map(|trace| trace.to_string())
                .unwrap_or_default(),
            entry.transaction_code.code().to_string(),
            entry.routing_number.to_string(),
            entry.account_number.clone(),
            format_amount(entry.amount),
            entry.addenda_record_count().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Batch;
    use crate::types::{BatchHeader, SecCode};
    use rstest::rstest;

    fn record(code: u8, amount: &str) -> CsvEntryRecord {
        CsvEntryRecord {
            transaction_code: code,
            routing_number: "121042882".to_string(),
            account_number: " 123456789 ".to_string(),
            amount: amount.to_string(),
            individual_name: None,
            identification_number: None,
            payment_type: None,
            addenda: None,
        }
    }

    #[rstest]
    #[case("100", 10000)]
    #[case("100.00", 10000)]
    #[case("  0.01 ", 1)]
    #[case("1234.5", 123450)]
    #[case("0", 0)]
    #[case("99999999.99", 9_999_999_999)]
    fn test_parse_amount(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(parse_amount(input).unwrap(), expected);
    }

    #[rstest]
    #[case::not_a_number("ten")]
    #[case::negative("-1.00")]
    #[case::sub_cent("1.005")]
    #[case::too_large("100000000.00")]
    #[case::empty("")]
    fn test_parse_amount_rejects(#[case] input: &str) {
        assert!(matches!(
            parse_amount(input),
            Err(BatchError::InvalidAmount { .. })
        ));
    }

    #[rstest]
    #[case(0, "0.00")]
    #[case(1, "0.01")]
    #[case(10000, "100.00")]
    #[case(999_999_999_999, "9999999999.99")]
    fn test_format_amount(#[case] cents: u64, #[case] expected: &str) {
        assert_eq!(format_amount(cents), expected);
    }

    #[test]
    fn test_convert_minimal_record() {
        let entry = convert_csv_record(record(22, "100.00")).unwrap();

        assert_eq!(entry.transaction_code, TransactionCode::CheckingCredit);
        assert_eq!(entry.routing_number.value(), 121042882);
        assert_eq!(entry.account_number, "123456789");
        assert_eq!(entry.amount, 10000);
        assert!(entry.individual_name.is_empty());
        assert!(entry.addenda05.is_empty());
        assert_eq!(entry.payment_type, None);
    }

    #[test]
    fn test_convert_full_record() {
        let full = CsvEntryRecord {
            individual_name: Some("Jane Doe".to_string()),
            identification_number: Some("ID-7".to_string()),
            payment_type: Some("r".to_string()),
            addenda: Some("Invoice 1 | Invoice 2".to_string()),
            ..record(27, "25.50")
        };

        let entry = convert_csv_record(full).unwrap();
        assert_eq!(entry.transaction_code, TransactionCode::CheckingDebit);
        assert_eq!(entry.individual_name, "Jane Doe");
        assert_eq!(entry.identification_number, "ID-7");
        assert_eq!(entry.payment_type, Some(PaymentType::Recurring));
        assert_eq!(entry.addenda05.len(), 2);
        assert_eq!(entry.addenda05[1].payment_related_information, "Invoice 2");
    }

    #[test]
    fn test_convert_blank_optional_columns() {
        let blank = CsvEntryRecord {
            individual_name: Some("  ".to_string()),
            payment_type: Some(String::new()),
            addenda: Some(" ".to_string()),
            ..record(22, "1")
        };

        let entry = convert_csv_record(blank).unwrap();
        assert!(entry.individual_name.is_empty());
        assert_eq!(entry.payment_type, None);
        assert!(entry.addenda05.is_empty());
    }

    #[rstest]
    #[case::unknown_code(record(99, "1.00"), "Unknown transaction code 99")]
    #[case::bad_routing(CsvEntryRecord { routing_number: "12345".to_string(), ..record(22, "1.00") }, "Invalid routing number")]
    #[case::bad_amount(record(22, "abc"), "Invalid amount")]
    #[case::bad_payment_type(CsvEntryRecord { payment_type: Some("X".to_string()), ..record(22, "1.00") }, "Invalid payment type")]
    fn test_convert_errors(#[case] input: CsvEntryRecord, #[case] expected: &str) {
        let error = convert_csv_record(input).unwrap_err();
        assert!(
            error.to_string().contains(expected),
            "'{}' should contain '{}'",
            error,
            expected
        );
    }

    #[test]
    fn test_write_control_csv() {
        let mut batch = Batch::new(
            BatchHeader::new(SecCode::Ctx, "Acme Corp", "1234567890", 12104288)
                .with_batch_number(2),
        )
        .unwrap();
        batch.add_entry(convert_csv_record(CsvEntryRecord {
            addenda: Some("Invoice 1".to_string()),
            ..record(22, "100.00")
        }).unwrap());
        batch.build().unwrap();

        let mut output = Vec::new();
        write_control_csv(batch.control(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "service_class_code,sec_code,entry_addenda_count,entry_hash,total_debit,total_credit,company_identification,odfi_identification,batch_number\n\
             200,CTX,2,0121042882,0.00,100.00,1234567890,12104288,0000002\n"
        );
    }

    #[test]
    fn test_write_entries_csv() {
        let mut batch = Batch::new(BatchHeader::new(SecCode::Ccd, "Acme Corp", "1234567890", 12104288)).unwrap();
        batch.add_entry(convert_csv_record(record(22, "1.50")).unwrap());
        batch.add_entry(convert_csv_record(record(27, "2.00")).unwrap());
        batch.build().unwrap();

        let mut output = Vec::new();
        write_entries_csv(batch.entries(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "trace_number,transaction_code,routing_number,account_number,amount,addenda_count\n\
             121042880000001,22,121042882,123456789,1.50,0\n\
             121042880000002,27,121042882,123456789,2.00,0\n"
        );
    }

    #[test]
    fn test_write_entries_csv_unbuilt() {
        let entry = convert_csv_record(record(22, "1.00")).unwrap();

        let mut output = Vec::new();
        write_entries_csv(&[entry], &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.ends_with("\n,22,121042882,123456789,1.00,0\n"));
    }
}
