//! Conversions from contact migration payloads into stored records.
use chrono::NaiveDateTime;
use contacts_shared::types::{
    CodedValue, Contact, ContactAddress, ContactAddressPhone, ContactEmail, ContactEmployment,
    ContactIdentity, ContactPhone, ContactRestriction, MigrateContactAddress,
    MigrateContactRequest, MigrateEmailAddress, MigrateEmployment, MigrateIdentifier,
    MigratePhoneNumber, MigratePrisonerContactRestriction, MigrateRelationship,
    MigrateRestriction, PrisonerContact, PrisonerContactRestriction,
};

pub(crate) fn code(value: Option<&CodedValue>) -> Option<String> {
    value.map(|coded| coded.code.clone())
}

pub(crate) fn contact(request: &MigrateContactRequest, now: NaiveDateTime) -> Contact {
    Contact {
        contact_id: request.person_id,
        title: code(request.title.as_ref()),
        last_name: request.last_name.clone(),
        first_name: request.first_name.clone(),
        middle_names: request.middle_name.clone(),
        date_of_birth: request.date_of_birth,
        deceased_flag: request.deceased_flag,
        deceased_date: request.deceased_date,
        is_staff: request.staff,
        remitter: request.remitter,
        gender: code(request.gender.as_ref()),
        domestic_status: code(request.domestic_status.as_ref()),
        language_code: code(request.language.as_ref()),
        interpreter_required: request.interpreter_required,
        audit: request.audit.resolve(now),
    }
}

pub(crate) fn phone(
    contact_id: i64,
    phone: &MigratePhoneNumber,
    now: NaiveDateTime,
) -> ContactPhone {
    ContactPhone {
        contact_id,
        phone_type: phone.phone_type.code.clone(),
        phone_number: phone.number.clone(),
        ext_number: phone.extension.clone(),
        audit: phone.audit.resolve(now),
    }
}

pub(crate) fn address(
    contact_id: i64,
    address: &MigrateContactAddress,
    now: NaiveDateTime,
) -> ContactAddress {
    ContactAddress {
        contact_id,
        address_type: code(address.address_type.as_ref()),
        primary_address: address.primary_address,
        flat: address.flat.clone(),
        property: address.premise.clone(),
        street: address.street.clone(),
        area: address.locality.clone(),
        city_code: code(address.city.as_ref()),
        county_code: code(address.county.as_ref()),
        post_code: address.post_code.clone(),
        country_code: code(address.country.as_ref()),
        verified: address.validated_paf,
        mail_flag: address.mail_address,
        start_date: address.start_date,
        end_date: address.end_date,
        no_fixed_address: address.no_fixed_address,
        comments: address.comment.clone(),
        audit: address.audit.resolve(now),
    }
}

/// Link between an address and a phone that was recorded against it.
///
/// The link takes its audit from the phone it was migrated with.
pub(crate) fn address_phone(
    contact_id: i64,
    contact_address_id: i64,
    contact_phone_id: i64,
    phone: &MigratePhoneNumber,
    now: NaiveDateTime,
) -> ContactAddressPhone {
    ContactAddressPhone {
        contact_id,
        contact_address_id,
        contact_phone_id,
        audit: phone.audit.resolve(now),
    }
}

pub(crate) fn email(
    contact_id: i64,
    email: &MigrateEmailAddress,
    now: NaiveDateTime,
) -> ContactEmail {
    ContactEmail {
        contact_id,
        email_address: email.email.clone(),
        audit: email.audit.resolve(now),
    }
}

pub(crate) fn identity(
    contact_id: i64,
    identifier: &MigrateIdentifier,
    now: NaiveDateTime,
) -> ContactIdentity {
    ContactIdentity {
        contact_id,
        identity_type: identifier.identity_type.code.clone(),
        identity_value: identifier.identifier.clone(),
        issuing_authority: identifier.issued_authority.clone(),
        audit: identifier.audit.resolve(now),
    }
}

pub(crate) fn restriction(
    contact_id: i64,
    restriction: &MigrateRestriction,
    now: NaiveDateTime,
) -> ContactRestriction {
    ContactRestriction {
        contact_id,
        restriction_type: restriction.restriction_type.code.clone(),
        start_date: restriction.effective_date,
        expiry_date: restriction.expiry_date,
        comments: restriction.comment.clone(),
        staff_username: restriction.staff_username.clone(),
        audit: restriction.audit.resolve(now),
    }
}

pub(crate) fn employment(
    contact_id: i64,
    employment: &MigrateEmployment,
    now: NaiveDateTime,
) -> ContactEmployment {
    ContactEmployment {
        contact_id,
        organisation_id: employment.corporate.id,
        active: employment.active,
        audit: employment.audit.resolve(now),
    }
}

pub(crate) fn prisoner_contact(
    contact_id: i64,
    relationship: &MigrateRelationship,
    now: NaiveDateTime,
) -> PrisonerContact {
    PrisonerContact {
        contact_id,
        prisoner_number: relationship.prisoner_number.clone(),
        contact_type: relationship.contact_type.code.clone(),
        relationship_type: relationship.relationship_type.code.clone(),
        next_of_kin: relationship.next_of_kin,
        emergency_contact: relationship.emergency_contact,
        active: relationship.active,
        approved_visitor: relationship.approved_visitor,
        current_term: relationship.current_term,
        comments: relationship.comment.clone(),
        expiry_date: relationship.expiry_date,
        audit: relationship.audit.resolve(now),
    }
}

pub(crate) fn prisoner_contact_restriction(
    prisoner_contact_id: i64,
    restriction: &MigratePrisonerContactRestriction,
    now: NaiveDateTime,
) -> PrisonerContactRestriction {
    PrisonerContactRestriction {
        prisoner_contact_id,
        restriction_type: restriction.restriction_type.code.clone(),
        start_date: restriction.start_date,
        expiry_date: restriction.expiry_date,
        comments: restriction.comment.clone(),
        staff_username: restriction.staff_username.clone(),
        audit: restriction.audit.resolve(now),
    }
}
