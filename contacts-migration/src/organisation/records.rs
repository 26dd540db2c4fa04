use chrono::NaiveDateTime;
use contacts_shared::types::{
    MigrateOrganisationAddress, MigrateOrganisationEmailAddress, MigrateOrganisationPhoneNumber,
    MigrateOrganisationRequest, MigrateOrganisationType, MigrateOrganisationWebAddress,
    Organisation, OrganisationAddress, OrganisationAddressPhone, OrganisationEmail,
    OrganisationPhone, OrganisationType, OrganisationWebAddress,
};

use crate::contact::code;

pub(crate) fn organisation(
    request: &MigrateOrganisationRequest,
    now: NaiveDateTime,
) -> Organisation {
    Organisation {
        organisation_id: request.nomis_corporate_id,
        organisation_name: request.organisation_name.clone(),
        programme_number: request.programme_number.clone(),
        vat_number: request.vat_number.clone(),
        caseload_id: request.caseload_id.clone(),
        comments: request.comments.clone(),
        active: request.active,
        deactivated_date: request.deactivated_date,
        audit: request.audit.resolve(now),
    }
}

pub(crate) fn organisation_type(
    organisation_id: i64,
    organisation_type: &MigrateOrganisationType,
    now: NaiveDateTime,
) -> OrganisationType {
    OrganisationType {
        organisation_id,
        organisation_type: organisation_type.organisation_type.code.clone(),
        audit: organisation_type.audit.resolve(now),
    }
}

pub(crate) fn phone(
    organisation_id: i64,
    phone: &MigrateOrganisationPhoneNumber,
    now: NaiveDateTime,
) -> OrganisationPhone {
    OrganisationPhone {
        organisation_id,
        phone_type: phone.phone_type.code.clone(),
        phone_number: phone.number.clone(),
        ext_number: phone.extension.clone(),
        audit: phone.audit.resolve(now),
    }
}

pub(crate) fn email(
    organisation_id: i64,
    email: &MigrateOrganisationEmailAddress,
    now: NaiveDateTime,
) -> OrganisationEmail {
    OrganisationEmail {
        organisation_id,
        email_address: email.email.clone(),
        audit: email.audit.resolve(now),
    }
}

pub(crate) fn web_address(
    organisation_id: i64,
    web_address: &MigrateOrganisationWebAddress,
    now: NaiveDateTime,
) -> OrganisationWebAddress {
    OrganisationWebAddress {
        organisation_id,
        web_address: web_address.web_address.clone(),
        audit: web_address.audit.resolve(now),
    }
}

pub(crate) fn address(
    organisation_id: i64,
    address: &MigrateOrganisationAddress,
    now: NaiveDateTime,
) -> OrganisationAddress {
    OrganisationAddress {
        organisation_id,
        address_type: code(address.address_type.as_ref()),
        primary_address: address.primary_address,
        flat: address.flat.clone(),
        property: address.premise.clone(),
        street: address.street.clone(),
        area: address.locality.clone(),
        city_code: code(address.city.as_ref()),
        county_code: code(address.county.as_ref()),
        post_code: address.postcode.clone(),
        country_code: code(address.country.as_ref()),
        mail_address: address.mail_address,
        service_address: address.service_address,
        no_fixed_address: address.no_fixed_address,
        special_needs_code: code(address.special_needs_code.as_ref()),
        contact_person_name: address.contact_person_name.clone(),
        business_hours: address.business_hours.clone(),
        comments: address.comment.clone(),
        start_date: address.start_date,
        end_date: address.end_date,
        audit: address.audit.resolve(now),
    }
}

pub(crate) fn address_phone(
    organisation_id: i64,
    organisation_address_id: i64,
    organisation_phone_id: i64,
    phone: &MigrateOrganisationPhoneNumber,
    now: NaiveDateTime,
) -> OrganisationAddressPhone {
    OrganisationAddressPhone {
        organisation_id,
        organisation_address_id,
        organisation_phone_id,
        audit: phone.audit.resolve(now),
    }
}
