//! Stored records owned by a contact.
//!
//! Child records carry no identifier of their own: the store generates one on insert
//! and hands it back. Only [`Contact`] carries its key, because a contact is always
//! stored under its NOMIS person id.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Audit;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub contact_id: i64,
    pub title: Option<String>,
    pub last_name: String,
    pub first_name: String,
    pub middle_names: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub deceased_flag: bool,
    pub deceased_date: Option<NaiveDate>,
    pub is_staff: bool,
    pub remitter: bool,
    pub gender: Option<String>,
    pub domestic_status: Option<String>,
    pub language_code: Option<String>,
    pub interpreter_required: bool,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactPhone {
    pub contact_id: i64,
    pub phone_type: String,
    pub phone_number: String,
    pub ext_number: Option<String>,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactAddress {
    pub contact_id: i64,
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
    pub verified: bool,
    pub mail_flag: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub no_fixed_address: bool,
    pub comments: Option<String>,
    pub audit: Audit,
}

/// Links a phone number to the address it was recorded against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactAddressPhone {
    pub contact_id: i64,
    pub contact_address_id: i64,
    pub contact_phone_id: i64,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactEmail {
    pub contact_id: i64,
    pub email_address: String,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactIdentity {
    pub contact_id: i64,
    pub identity_type: String,
    pub identity_value: String,
    pub issuing_authority: Option<String>,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRestriction {
    pub contact_id: i64,
    pub restriction_type: String,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub comments: Option<String>,
    pub staff_username: Option<String>,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactEmployment {
    pub contact_id: i64,
    pub organisation_id: i64,
    pub active: bool,
    pub audit: Audit,
}

/// Relationship between a contact and a prisoner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrisonerContact {
    pub contact_id: i64,
    pub prisoner_number: String,
    pub contact_type: String,
    pub relationship_type: String,
    pub next_of_kin: bool,
    pub emergency_contact: bool,
    pub active: bool,
    pub approved_visitor: bool,
    pub current_term: bool,
    pub comments: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrisonerContactRestriction {
    pub prisoner_contact_id: i64,
    pub restriction_type: String,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub comments: Option<String>,
    pub staff_username: Option<String>,
    pub audit: Audit,
}
