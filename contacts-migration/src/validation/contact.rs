use contacts_shared::types::{
    CodedValue, MigrateContactAddress, MigrateContactRequest, MigratePhoneNumber,
};

use crate::errors::MigrationError;
use crate::validation::{USERNAME, Violations};

const NAME: usize = 35;
const CODE: usize = 12;
const PHONE_NUMBER: usize = 40;
const PHONE_EXTENSION: usize = 7;
const EMAIL: usize = 240;
const IDENTIFIER: usize = 20;
const ISSUED_AUTHORITY: usize = 40;
const COMMENT: usize = 240;
const FLAT: usize = 30;
const PREMISE: usize = 50;
const STREET: usize = 160;
const LOCALITY: usize = 70;
const POST_CODE: usize = 12;
const PRISONER_NUMBER: usize = 7;

fn code(violations: &mut Violations, field: &str, value: &CodedValue) {
    violations.text(&format!("{field}.code"), &value.code, CODE);
}

fn optional_code(violations: &mut Violations, field: &str, value: Option<&CodedValue>) {
    if let Some(value) = value {
        code(violations, field, value);
    }
}

fn phone(violations: &mut Violations, field: &str, phone: &MigratePhoneNumber) {
    violations.positive_id(&format!("{field}.phoneId"), phone.phone_id);
    violations.text(&format!("{field}.number"), &phone.number, PHONE_NUMBER);
    violations.max_length_opt(
        &format!("{field}.extension"),
        phone.extension.as_deref(),
        PHONE_EXTENSION,
    );
    code(violations, &format!("{field}.type"), &phone.phone_type);
    violations.audit(field, &phone.audit);
}

fn address(violations: &mut Violations, field: &str, address: &MigrateContactAddress) {
    violations.positive_id(&format!("{field}.addressId"), address.address_id);
    optional_code(violations, &format!("{field}.type"), address.address_type.as_ref());
    violations.max_length_opt(&format!("{field}.flat"), address.flat.as_deref(), FLAT);
    violations.max_length_opt(
        &format!("{field}.premise"),
        address.premise.as_deref(),
        PREMISE,
    );
    violations.max_length_opt(&format!("{field}.street"), address.street.as_deref(), STREET);
    violations.max_length_opt(
        &format!("{field}.locality"),
        address.locality.as_deref(),
        LOCALITY,
    );
    violations.max_length_opt(
        &format!("{field}.postCode"),
        address.post_code.as_deref(),
        POST_CODE,
    );
    optional_code(violations, &format!("{field}.city"), address.city.as_ref());
    optional_code(violations, &format!("{field}.county"), address.county.as_ref());
    optional_code(violations, &format!("{field}.country"), address.country.as_ref());
    violations.max_length_opt(
        &format!("{field}.comment"),
        address.comment.as_deref(),
        COMMENT,
    );
    violations.date_order(field, address.start_date, address.end_date);
    violations.audit(field, &address.audit);

    violations.unique(
        &format!("{field}.phoneNumbers"),
        address.phone_numbers.iter().map(|p| p.phone_id),
    );
    for (i, nested) in address.phone_numbers.iter().enumerate() {
        phone(violations, &format!("{field}.phoneNumbers[{i}]"), nested);
    }
}

/// Checks a contact migration request against the field rules of the contact tables.
///
/// # Returns
///
/// * `Ok(())` - The request can be persisted as given
/// * `Err(MigrationError::Validation)` - Every violation found, sorted and unique
pub fn validate_contact(request: &MigrateContactRequest) -> Result<(), MigrationError> {
    let mut v = Violations::default();

    v.positive_id("personId", request.person_id);
    v.text("lastName", &request.last_name, NAME);
    v.text("firstName", &request.first_name, NAME);
    v.max_length_opt("middleName", request.middle_name.as_deref(), NAME);
    optional_code(&mut v, "title", request.title.as_ref());
    optional_code(&mut v, "gender", request.gender.as_ref());
    optional_code(&mut v, "domesticStatus", request.domestic_status.as_ref());
    optional_code(&mut v, "language", request.language.as_ref());
    v.audit("", &request.audit);

    v.unique(
        "phoneNumbers",
        request.phone_numbers.iter().map(|p| p.phone_id),
    );
    for (i, p) in request.phone_numbers.iter().enumerate() {
        phone(&mut v, &format!("phoneNumbers[{i}]"), p);
    }

    v.unique("addresses", request.addresses.iter().map(|a| a.address_id));
    for (i, a) in request.addresses.iter().enumerate() {
        address(&mut v, &format!("addresses[{i}]"), a);
    }

    v.unique(
        "emailAddresses",
        request.email_addresses.iter().map(|e| e.email_address_id),
    );
    for (i, email) in request.email_addresses.iter().enumerate() {
        let field = format!("emailAddresses[{i}]");
        v.positive_id(&format!("{field}.emailAddressId"), email.email_address_id);
        v.text(&format!("{field}.email"), &email.email, EMAIL);
        v.audit(&field, &email.audit);
    }

    v.unique("identifiers", request.identifiers.iter().map(|i| i.sequence));
    for (i, identifier) in request.identifiers.iter().enumerate() {
        let field = format!("identifiers[{i}]");
        v.positive_id(&format!("{field}.sequence"), identifier.sequence);
        code(&mut v, &format!("{field}.type"), &identifier.identity_type);
        v.text(
            &format!("{field}.identifier"),
            &identifier.identifier,
            IDENTIFIER,
        );
        v.max_length_opt(
            &format!("{field}.issuedAuthority"),
            identifier.issued_authority.as_deref(),
            ISSUED_AUTHORITY,
        );
        v.audit(&field, &identifier.audit);
    }

    v.unique("restrictions", request.restrictions.iter().map(|r| r.id));
    for (i, restriction) in request.restrictions.iter().enumerate() {
        let field = format!("restrictions[{i}]");
        v.positive_id(&format!("{field}.id"), restriction.id);
        code(&mut v, &format!("{field}.type"), &restriction.restriction_type);
        v.max_length_opt(
            &format!("{field}.comment"),
            restriction.comment.as_deref(),
            COMMENT,
        );
        v.date_order(&field, restriction.effective_date, restriction.expiry_date);
        v.max_length_opt(
            &format!("{field}.staffUsername"),
            restriction.staff_username.as_deref(),
            USERNAME,
        );
        v.audit(&field, &restriction.audit);
    }

    v.unique("employments", request.employments.iter().map(|e| e.sequence));
    for (i, employment) in request.employments.iter().enumerate() {
        let field = format!("employments[{i}]");
        v.positive_id(&format!("{field}.sequence"), employment.sequence);
        v.positive_id(&format!("{field}.corporate.id"), employment.corporate.id);
        v.audit(&field, &employment.audit);
    }

    v.unique("contacts", request.contacts.iter().map(|r| r.id));
    for (i, relationship) in request.contacts.iter().enumerate() {
        let field = format!("contacts[{i}]");
        v.positive_id(&format!("{field}.id"), relationship.id);
        code(&mut v, &format!("{field}.contactType"), &relationship.contact_type);
        code(
            &mut v,
            &format!("{field}.relationshipType"),
            &relationship.relationship_type,
        );
        v.text(
            &format!("{field}.prisonerNumber"),
            &relationship.prisoner_number,
            PRISONER_NUMBER,
        );
        v.max_length_opt(
            &format!("{field}.comment"),
            relationship.comment.as_deref(),
            COMMENT,
        );
        v.audit(&field, &relationship.audit);

        v.unique(
            &format!("{field}.restrictions"),
            relationship.restrictions.iter().map(|r| r.id),
        );
        for (j, restriction) in relationship.restrictions.iter().enumerate() {
            let nested = format!("{field}.restrictions[{j}]");
            v.positive_id(&format!("{nested}.id"), restriction.id);
            code(
                &mut v,
                &format!("{nested}.restrictionType"),
                &restriction.restriction_type,
            );
            v.max_length_opt(
                &format!("{nested}.comment"),
                restriction.comment.as_deref(),
                COMMENT,
            );
            v.date_order(&nested, restriction.start_date, restriction.expiry_date);
            v.max_length_opt(
                &format!("{nested}.staffUsername"),
                restriction.staff_username.as_deref(),
                USERNAME,
            );
            v.audit(&nested, &restriction.audit);
        }
    }

    v.into_result()
}
