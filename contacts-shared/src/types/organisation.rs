//! Stored records owned by an organisation.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Audit;

/// An organisation, always stored under its NOMIS corporate id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    pub organisation_id: i64,
    pub organisation_name: String,
    pub programme_number: Option<String>,
    pub vat_number: Option<String>,
    pub caseload_id: Option<String>,
    pub comments: Option<String>,
    pub active: bool,
    pub deactivated_date: Option<NaiveDate>,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationType {
    pub organisation_id: i64,
    pub organisation_type: String,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationPhone {
    pub organisation_id: i64,
    pub phone_type: String,
    pub phone_number: String,
    pub ext_number: Option<String>,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationEmail {
    pub organisation_id: i64,
    pub email_address: String,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationWebAddress {
    pub organisation_id: i64,
    pub web_address: String,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationAddress {
    pub organisation_id: i64,
    pub address_type: Option<String>,
    pub primary_address: bool,
    pub flat: Option<String>,
    pub property: Option<String>,
    pub street: Option<String>,
    pub area: Option<String>,
    pub city_code: Option<String>,
    pub county_code: Option<String>,
    pub post_code: Option<String>,
    pub country_code: Option<String>,
    pub mail_address: bool,
    pub service_address: bool,
    pub no_fixed_address: bool,
    pub special_needs_code: Option<String>,
    pub contact_person_name: Option<String>,
    pub business_hours: Option<String>,
    pub comments: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub audit: Audit,
}

/// Links an organisation phone to the organisation address it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationAddressPhone {
    pub organisation_id: i64,
    pub organisation_address_id: i64,
    pub organisation_phone_id: i64,
    pub audit: Audit,
}
