//! Addenda records attached to entry details
//!
//! - `Addenda02`: point-of-sale terminal data
//! - `Addenda05`: payment-related remittance information
//! - `Addenda98`: notification of change
//! - `Addenda99`: return
//! - `InternationalDetail`: the IAT addenda block (Addenda10-16 mandatory,
//!   Addenda17 and Addenda18 optional)

use super::entry::TraceNumber;

/// Terminal information for point-of-sale style entries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda02 {
    pub reference_information_one: String,
    pub reference_information_two: String,
    pub terminal_identification_code: String,
    pub transaction_serial_number: String,
    pub terminal_city: String,
    pub terminal_state: String,
}

/// Payment-related information addenda
///
/// The sequence numbers are assigned by `Batch::build`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda05 {
    /// Free-form remittance data (80 characters in the encoded record)
    pub payment_related_information: String,
    sequence_number: u32,
    entry_detail_sequence_number: u32,
}

impl Addenda05 {
    pub fn new(payment_related_information: &str) -> Self {
        Addenda05 {
            payment_related_information: payment_related_information.to_string(),
            sequence_number: 0,
            entry_detail_sequence_number: 0,
        }
    }

    /// Position of this addenda under its entry, starting at 1
    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    /// Sequence portion of the owning entry's trace number
    pub fn entry_detail_sequence_number(&self) -> u32 {
        self.entry_detail_sequence_number
    }

    pub(crate) fn assign_sequence(&mut self, sequence_number: u32, entry_sequence: u32) {
        self.sequence_number = sequence_number;
        self.entry_detail_sequence_number = entry_sequence;
    }
}

/// Notification of change addenda
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda98 {
    /// Change code, e.g. `C01` (incorrect account number)
    pub change_code: String,
    pub original_trace: String,
    pub original_dfi: String,
    pub corrected_data: String,
    pub(crate) trace_number: Option<TraceNumber>,
}

impl Addenda98 {
    pub fn new(change_code: &str, original_trace: &str, corrected_data: &str) -> Self {
        Addenda98 {
            change_code: change_code.to_string(),
            original_trace: original_trace.to_string(),
            corrected_data: corrected_data.to_string(),
            ..Default::default()
        }
    }

    pub fn trace_number(&self) -> Option<TraceNumber> {
        self.trace_number
    }
}

/// Return addenda
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda99 {
    /// Return reason code, e.g. `R01` (insufficient funds)
    pub return_code: String,
    pub original_trace: String,
    pub original_dfi: String,
    pub addenda_information: String,
    pub(crate) trace_number: Option<TraceNumber>,
}

impl Addenda99 {
    pub fn new(return_code: &str, original_trace: &str) -> Self {
        Addenda99 {
            return_code: return_code.to_string(),
            original_trace: original_trace.to_string(),
            ..Default::default()
        }
    }

    pub fn trace_number(&self) -> Option<TraceNumber> {
        self.trace_number
    }
}

/// Addenda10: transaction type and receiver name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda10 {
    /// Transaction type code, e.g. `BUS`, `ANN`, `SAL`
    pub transaction_type_code: String,
    /// Amount in the foreign currency, in minor units
    pub foreign_payment_amount: u64,
    pub foreign_trace_number: String,
    pub name: String,
}

/// Addenda11: originator name and street address
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda11 {
    pub originator_name: String,
    pub originator_street_address: String,
}

/// Addenda12: originator city, state, country and postal code
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda12 {
    pub originator_city_state_province: String,
    pub originator_country_postal_code: String,
}

/// Addenda13: originating DFI
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda13 {
    pub odfi_name: String,
    pub odfi_id_number_qualifier: String,
    pub odfi_identification: String,
    pub odfi_branch_country_code: String,
}

/// Addenda14: receiving DFI
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda14 {
    pub rdfi_name: String,
    pub rdfi_id_number_qualifier: String,
    pub rdfi_identification: String,
    pub rdfi_branch_country_code: String,
}

/// Addenda15: receiver identification and street address
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda15 {
    pub receiver_id_number: String,
    pub receiver_street_address: String,
}

/// Addenda16: receiver city, state, country and postal code
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda16 {
    pub receiver_city_state_province: String,
    pub receiver_country_postal_code: String,
}

/// Addenda17: IAT remittance information
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda17 {
    pub payment_related_information: String,
}

/// Addenda18: foreign correspondent bank
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Addenda18 {
    pub foreign_correspondent_bank_name: String,
    pub foreign_correspondent_bank_id_number_qualifier: String,
    pub foreign_correspondent_bank_id_number: String,
    pub foreign_correspondent_bank_branch_country_code: String,
}

/// Number of mandatory records (Addenda10 through Addenda16) in an IAT block
pub const IAT_MANDATORY_ADDENDA: usize = 7;

/// International detail block carried by every forward IAT entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InternationalDetail {
    pub addenda10: Addenda10,
    pub addenda11: Addenda11,
    pub addenda12: Addenda12,
    pub addenda13: Addenda13,
    pub addenda14: Addenda14,
    pub addenda15: Addenda15,
    pub addenda16: Addenda16,
    pub addenda17: Vec<Addenda17>,
    pub addenda18: Vec<Addenda18>,
}

impl InternationalDetail {
    /// Number of addenda records this block contributes to the entry
    pub fn record_count(&self) -> usize {
        IAT_MANDATORY_ADDENDA + self.addenda17.len() + self.addenda18.len()
    }

    /// Name of the first mandatory sub-field that is blank, if any
    pub fn blank_required_field(&self) -> Option<&'static str> {
        if self.addenda10.transaction_type_code.trim().is_empty() {
            return Some("Addenda10.TransactionTypeCode");
        }
        // A zero amount is how the fixed-width record encodes a blank.
        if self.addenda10.foreign_payment_amount == 0 {
            return Some("Addenda10.ForeignPaymentAmount");
        }

        let mandatory = [
            ("Addenda10.Name", &self.addenda10.name),
            ("Addenda11.OriginatorName", &self.addenda11.originator_name),
            ("Addenda11.OriginatorStreetAddress", &self.addenda11.originator_street_address),
            ("Addenda12.OriginatorCityStateProvince", &self.addenda12.originator_city_state_province),
            ("Addenda12.OriginatorCountryPostalCode", &self.addenda12.originator_country_postal_code),
            ("Addenda13.ODFIName", &self.addenda13.odfi_name),
            ("Addenda13.ODFIIDNumberQualifier", &self.addenda13.odfi_id_number_qualifier),
            ("Addenda13.ODFIIdentification", &self.addenda13.odfi_identification),
            ("Addenda13.ODFIBranchCountryCode", &self.addenda13.odfi_branch_country_code),
            ("Addenda14.RDFIName", &self.addenda14.rdfi_name),
            ("Addenda14.RDFIIDNumberQualifier", &self.addenda14.rdfi_id_number_qualifier),
            ("Addenda14.RDFIIdentification", &self.addenda14.rdfi_identification),
            ("Addenda14.RDFIBranchCountryCode", &self.addenda14.rdfi_branch_country_code),
            ("Addenda15.ReceiverIDNumber", &self.addenda15.receiver_id_number),
            ("Addenda15.ReceiverStreetAddress", &self.addenda15.receiver_street_address),
            ("Addenda16.ReceiverCityStateProvince", &self.addenda16.receiver_city_state_province),
            ("Addenda16.ReceiverCountryPostalCode", &self.addenda16.receiver_country_postal_code),
        ];
        if let Some((name, _)) = mandatory.iter().find(|(_, value)| value.trim().is_empty()) {
            return Some(*name);
        }

        if self
            .addenda17
            .iter()
            .any(|a| a.payment_related_information.trim().is_empty())
        {
            return Some("Addenda17.PaymentRelatedInformation");
        }

        for addenda in &self.addenda18 {
            let fields = [
                ("Addenda18.ForeignCorrespondentBankName", &addenda.foreign_correspondent_bank_name),
                ("Addenda18.ForeignCorrespondentBankIDNumberQualifier", &addenda.foreign_correspondent_bank_id_number_qualifier),
                ("Addenda18.ForeignCorrespondentBankIDNumber", &addenda.foreign_correspondent_bank_id_number),
                ("Addenda18.ForeignCorrespondentBankBranchCountryCode", &addenda.foreign_correspondent_bank_branch_country_code),
            ];
            if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
                return Some(*name);
            }
        }

        None
    }
}
