//! Payloads of the contact migration endpoint.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{AuditOverride, CodedValue, IdPair};

/// A full NOMIS person snapshot with every nested sub-element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateContactRequest {
    pub person_id: i64,
    #[serde(default)]
    pub title: Option<CodedValue>,
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<CodedValue>,
    #[serde(default)]
    pub domestic_status: Option<CodedValue>,
    #[serde(default)]
    pub language: Option<CodedValue>,
    #[serde(default)]
    pub interpreter_required: bool,
    #[serde(default)]
    pub deceased_flag: bool,
    #[serde(default)]
    pub deceased_date: Option<NaiveDate>,
    #[serde(default)]
    pub staff: bool,
    #[serde(default)]
    pub remitter: bool,
    #[serde(default)]
    pub phone_numbers: Vec<MigratePhoneNumber>,
    #[serde(default)]
    pub addresses: Vec<MigrateContactAddress>,
    #[serde(default)]
    pub email_addresses: Vec<MigrateEmailAddress>,
    #[serde(default)]
    pub identifiers: Vec<MigrateIdentifier>,
    #[serde(default)]
    pub restrictions: Vec<MigrateRestriction>,
    #[serde(default)]
    pub employments: Vec<MigrateEmployment>,
    #[serde(default)]
    pub contacts: Vec<MigrateRelationship>,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigratePhoneNumber {
    pub phone_id: i64,
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
pub struct MigrateContactAddress {
    pub address_id: i64,
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
    pub post_code: Option<String>,
    #[serde(default)]
    pub city: Option<CodedValue>,
    #[serde(default)]
    pub county: Option<CodedValue>,
    #[serde(default)]
    pub country: Option<CodedValue>,
    #[serde(default, rename = "validatedPAF")]
    pub validated_paf: bool,
    #[serde(default)]
    pub no_fixed_address: bool,
    #[serde(default)]
    pub primary_address: bool,
    #[serde(default)]
    pub mail_address: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub phone_numbers: Vec<MigratePhoneNumber>,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateEmailAddress {
    pub email_address_id: i64,
    pub email: String,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateIdentifier {
    pub sequence: i64,
    #[serde(rename = "type")]
    pub identity_type: CodedValue,
    pub identifier: String,
    #[serde(default)]
    pub issued_authority: Option<String>,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateRestriction {
    pub id: i64,
    #[serde(rename = "type")]
    pub restriction_type: CodedValue,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub staff_username: Option<String>,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateCorporate {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Employment of the person by an organisation that has already been migrated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateEmployment {
    pub sequence: i64,
    pub corporate: MigrateCorporate,
    #[serde(default)]
    pub active: bool,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

/// A relationship between the person and a prisoner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateRelationship {
    pub id: i64,
    pub contact_type: CodedValue,
    pub relationship_type: CodedValue,
    pub prisoner_number: String,
    #[serde(default)]
    pub current_term: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub approved_visitor: bool,
    #[serde(default)]
    pub next_of_kin: bool,
    #[serde(default)]
    pub emergency_contact: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub restrictions: Vec<MigratePrisonerContactRestriction>,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigratePrisonerContactRestriction {
    pub id: i64,
    pub restriction_type: CodedValue,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub staff_username: Option<String>,
    #[serde(flatten)]
    pub audit: AuditOverride,
}

/// Identifier mapping returned for a migrated contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrateContactResponse {
    pub contact: IdPair,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_numbers: Vec<IdPair>,
    pub addresses: Vec<AddressAndPhones>,
    pub emails: Vec<IdPair>,
    pub identities: Vec<IdPair>,
    pub restrictions: Vec<IdPair>,
    pub employments: Vec<IdPair>,
    pub relationships: Vec<ContactsAndRestrictions>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddressAndPhones {
    pub address: IdPair,
    pub phones: Vec<IdPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactsAndRestrictions {
    pub relationship: IdPair,
    pub restrictions: Vec<IdPair>,
}
