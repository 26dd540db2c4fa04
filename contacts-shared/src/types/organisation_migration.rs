//! Payloads of the organisation migration endpoint.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{AuditOverride, CodedValue, IdPair};

/// A full NOMIS corporate snapshot with every nested sub-element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateOrganisationRequest {
    pub nomis_corporate_id: i64,
    pub organisation_name: String,
    #[serde(default)]
    pub programme_number: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    #[serde(default)]
    pub caseload_id: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub deactivated_date: Option<NaiveDate>,
    #[serde(default)]
    pub organisation_types: Vec<MigrateOrganisationType>,
    #[serde(default)]
    pub phone_numbers: Vec<MigrateOrganisationPhoneNumber>,
    #[serde(default)]
    pub email_addresses: Vec<MigrateOrganisationEmailAddress>,
    #[serde(default)]
    pub web_addresses: Vec<MigrateOrganisationWebAddress>,
    #[serde(default)]
    pub addresses: Vec<MigrateOrganisationAddress>,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateOrganisationType {
    #[serde(rename = "type")]
    pub organisation_type: CodedValue,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateOrganisationPhoneNumber {
    pub nomis_phone_id: i64,
    pub number: String,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(rename = "type")]
    pub phone_type: CodedValue,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateOrganisationEmailAddress {
    pub nomis_email_address_id: i64,
    pub email: String,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateOrganisationWebAddress {
    pub nomis_web_address_id: i64,
    pub web_address: String,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateOrganisationAddress {
    pub nomis_address_id: i64,
    #[serde(default, rename = "type")]
    pub address_type: Option<CodedValue>,
    #[serde(default)]
    pub flat: Option<String>,
    #[serde(default)]
    pub premise: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub city: Option<CodedValue>,
    #[serde(default)]
    pub county: Option<CodedValue>,
    #[serde(default)]
    pub country: Option<CodedValue>,
    #[serde(default)]
    pub primary_address: bool,
    #[serde(default)]
    pub mail_address: bool,
    #[serde(default)]
    pub service_address: bool,
    #[serde(default)]
    pub no_fixed_address: bool,
    #[serde(default)]
    pub special_needs_code: Option<CodedValue>,
    #[serde(default)]
    pub contact_person_name: Option<String>,
    #[serde(default)]
    pub business_hours: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub phone_numbers: Vec<MigrateOrganisationPhoneNumber>,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

/// Identifier mapping returned for a migrated organisation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateOrganisationResponse {
    pub organisation: IdPair,
    pub organisation_types: Vec<IdPair>,
    pub phone_numbers: Vec<IdPair>,
    pub email_addresses: Vec<IdPair>,
    pub web_addresses: Vec<IdPair>,
    pub addresses: Vec<OrganisationAddressAndPhones>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationAddressAndPhones {
    pub address: IdPair,
    pub phone_numbers: Vec<IdPair>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_reads_nested_address_phones() {
        let request: MigrateOrganisationRequest = serde_json::from_value(serde_json::json!({
            "nomisCorporateId": 999,
            "organisationName": "Basildon Probation",
            "active": true,
            "organisationTypes": [{"type": {"code": "BSKILLS", "description": "Basic skills"}}],
            "addresses": [{
                "nomisAddressId": 55,
                "postcode": "SS14 1AA",
                "phoneNumbers": [{"nomisPhoneId": 7, "number": "01268 1234", "type": {"code": "BUS", "description": "Business"}}]
            }]
        }))
        .unwrap();

        assert_eq!(request.nomis_corporate_id, 999);
        assert!(request.active);
        assert_eq!(request.organisation_types[0].organisation_type.code, "BSKILLS");
        assert_eq!(request.addresses[0].postcode.as_deref(), Some("SS14 1AA"));
        assert_eq!(request.addresses[0].phone_numbers[0].nomis_phone_id, 7);
    }
}
