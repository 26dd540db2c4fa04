use contacts_shared::types::{
    CodedValue, MigrateOrganisationAddress, MigrateOrganisationPhoneNumber,
    MigrateOrganisationRequest,
};

use crate::errors::MigrationError;
use crate::validation::Violations;

const ORGANISATION_NAME: usize = 40;
const PROGRAMME_NUMBER: usize = 40;
const VAT_NUMBER: usize = 36;
const CASELOAD_ID: usize = 6;
const COMMENTS: usize = 240;
const CODE: usize = 12;
const PHONE_NUMBER: usize = 40;
const PHONE_EXTENSION: usize = 7;
const EMAIL: usize = 240;
const WEB_ADDRESS: usize = 100;
const FLAT: usize = 30;
const PREMISE: usize = 50;
const STREET: usize = 160;
const LOCALITY: usize = 70;
const POST_CODE: usize = 12;
const CONTACT_PERSON_NAME: usize = 40;
const BUSINESS_HOURS: usize = 60;

fn code(v: &mut Violations, field: &str, value: &CodedValue) {
    v.text(&format!("{field}.code"), &value.code, CODE);
}

fn optional_code(v: &mut Violations, field: &str, value: Option<&CodedValue>) {
    if let Some(value) = value {
        code(v, field, value);
    }
}

fn phone(v: &mut Violations, field: &str, phone: &MigrateOrganisationPhoneNumber) {
    v.positive_id(&format!("{field}.nomisPhoneId"), phone.nomis_phone_id);
    v.text(&format!("{field}.number"), &phone.number, PHONE_NUMBER);
    v.max_length_opt(
        &format!("{field}.extension"),
        phone.extension.as_deref(),
        PHONE_EXTENSION,
    );
    code(v, &format!("{field}.type"), &phone.phone_type);
    v.audit(field, &phone.audit);
}

fn address(v: &mut Violations, field: &str, address: &MigrateOrganisationAddress) {
    v.positive_id(&format!("{field}.nomisAddressId"), address.nomis_address_id);
    optional_code(v, &format!("{field}.type"), address.address_type.as_ref());
    v.max_length_opt(&format!("{field}.flat"), address.flat.as_deref(), FLAT);
    v.max_length_opt(&format!("{field}.premise"), address.premise.as_deref(), PREMISE);
    v.max_length_opt(&format!("{field}.street"), address.street.as_deref(), STREET);
    v.max_length_opt(
        &format!("{field}.locality"),
        address.locality.as_deref(),
        LOCALITY,
    );
    v.max_length_opt(
        &format!("{field}.postcode"),
        address.postcode.as_deref(),
        POST_CODE,
    );
    optional_code(v, &format!("{field}.city"), address.city.as_ref());
    optional_code(v, &format!("{field}.county"), address.county.as_ref());
    optional_code(v, &format!("{field}.country"), address.country.as_ref());
    optional_code(
        v,
        &format!("{field}.specialNeedsCode"),
        address.special_needs_code.as_ref(),
    );
    v.max_length_opt(
        &format!("{field}.contactPersonName"),
        address.contact_person_name.as_deref(),
        CONTACT_PERSON_NAME,
    );
    v.max_length_opt(
        &format!("{field}.businessHours"),
        address.business_hours.as_deref(),
        BUSINESS_HOURS,
    );
    v.max_length_opt(
        &format!("{field}.comment"),
        address.comment.as_deref(),
        COMMENTS,
    );
    v.date_order(field, address.start_date, address.end_date);
    v.audit(field, &address.audit);

    v.unique(
        &format!("{field}.phoneNumbers"),
        address.phone_numbers.iter().map(|p| p.nomis_phone_id),
    );
    for (i, nested) in address.phone_numbers.iter().enumerate() {
        phone(v, &format!("{field}.phoneNumbers[{i}]"), nested);
    }
}

/// Checks an organisation migration request against the field rules of the
/// organisation tables.
pub fn validate_organisation(request: &MigrateOrganisationRequest) -> Result<(), MigrationError> {
    let mut v = Violations::default();

    v.positive_id("nomisCorporateId", request.nomis_corporate_id);
    v.text(
        "organisationName",
        &request.organisation_name,
        ORGANISATION_NAME,
    );
    v.max_length_opt(
        "programmeNumber",
        request.programme_number.as_deref(),
        PROGRAMME_NUMBER,
    );
    v.max_length_opt("vatNumber", request.vat_number.as_deref(), VAT_NUMBER);
    v.max_length_opt("caseloadId", request.caseload_id.as_deref(), CASELOAD_ID);
    v.max_length_opt("comments", request.comments.as_deref(), COMMENTS);
    v.audit("", &request.audit);

    v.unique(
        "organisationTypes",
        request
            .organisation_types
            .iter()
            .map(|t| t.organisation_type.code.as_str()),
    );
    for (i, organisation_type) in request.organisation_types.iter().enumerate() {
        let field = format!("organisationTypes[{i}]");
        code(
            &mut v,
            &format!("{field}.type"),
            &organisation_type.organisation_type,
        );
        v.audit(&field, &organisation_type.audit);
    }

    v.unique(
        "phoneNumbers",
        request.phone_numbers.iter().map(|p| p.nomis_phone_id),
    );
    for (i, p) in request.phone_numbers.iter().enumerate() {
        phone(&mut v, &format!("phoneNumbers[{i}]"), p);
    }

    v.unique(
        "emailAddresses",
        request
            .email_addresses
            .iter()
            .map(|e| e.nomis_email_address_id),
    );
    for (i, email) in request.email_addresses.iter().enumerate() {
        let field = format!("emailAddresses[{i}]");
        v.positive_id(
            &format!("{field}.nomisEmailAddressId"),
            email.nomis_email_address_id,
        );
        v.text(&format!("{field}.email"), &email.email, EMAIL);
        v.audit(&field, &email.audit);
    }

    v.unique(
        "webAddresses",
        request
            .web_addresses
            .iter()
            .map(|w| w.nomis_web_address_id),
    );
    for (i, web) in request.web_addresses.iter().enumerate() {
        let field = format!("webAddresses[{i}]");
        v.positive_id(
            &format!("{field}.nomisWebAddressId"),
            web.nomis_web_address_id,
        );
        v.text(&format!("{field}.webAddress"), &web.web_address, WEB_ADDRESS);
        v.audit(&field, &web.audit);
    }

    v.unique(
        "addresses",
        request.addresses.iter().map(|a| a.nomis_address_id),
    );
    for (i, a) in request.addresses.iter().enumerate() {
        address(&mut v, &format!("addresses[{i}]"), a);
    }

    v.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(value: serde_json::Value) -> MigrateOrganisationRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minimal_request_is_valid() {
        let request = request(serde_json::json!({
            "nomisCorporateId": 999,
            "organisationName": "Basildon Probation"
        }));

        assert!(validate_organisation(&request).is_ok());
    }

    #[test]
    fn test_duplicate_types_and_long_fields_are_reported() {
        let request = request(serde_json::json!({
            "nomisCorporateId": 999,
            "organisationName": "Basildon Probation",
            "caseloadId": "TOOLONG",
            "organisationTypes": [
                {"type": {"code": "TEA", "description": "Teacher"}},
                {"type": {"code": "TEA", "description": "Teacher"}}
            ],
            "webAddresses": [{"nomisWebAddressId": 3, "webAddress": " "}]
        }));

        let Err(MigrationError::Validation(messages)) = validate_organisation(&request) else {
            panic!("expected validation failure");
        };

        assert_eq!(
            messages,
            vec![
                "caseloadId must be at most 6 characters".to_string(),
                "organisationTypes contains duplicate identifier TEA".to_string(),
                "webAddresses[0].webAddress must not be blank".to_string(),
            ]
        );
    }

    #[test]
    fn test_address_end_before_start_is_rejected() {
        let request = request(serde_json::json!({
            "nomisCorporateId": 1,
            "organisationName": "Acme",
            "addresses": [{
                "nomisAddressId": 10,
                "startDate": "2024-05-01",
                "endDate": "2024-04-30"
            }]
        }));

        let Err(MigrationError::Validation(messages)) = validate_organisation(&request) else {
            panic!("expected validation failure");
        };

        assert_eq!(
            messages,
            vec!["addresses[0] end date must not be before start date".to_string()]
        );
    }

    #[test]
    fn test_usernames_are_length_checked_on_every_element() {
        let long = "u".repeat(150);
        let request = request(serde_json::json!({
            "nomisCorporateId": 1,
            "organisationName": "Acme",
            "createUsername": long,
            "webAddresses": [
                {"nomisWebAddressId": 3, "webAddress": "www.example.com", "modifyUsername": long}
            ],
            "addresses": [{
                "nomisAddressId": 10,
                "phoneNumbers": [{
                    "nomisPhoneId": 7,
                    "number": "01268 1",
                    "type": {"code": "BUS", "description": "Business"},
                    "createUsername": long
                }]
            }]
        }));

        let Err(MigrationError::Validation(messages)) = validate_organisation(&request) else {
            panic!("expected validation failure");
        };

        assert_eq!(
            messages,
            vec![
                "addresses[0].phoneNumbers[0].createUsername must be at most 100 characters"
                    .to_string(),
                "createUsername must be at most 100 characters".to_string(),
                "webAddresses[0].modifyUsername must be at most 100 characters".to_string(),
            ]
        );
    }
}
