mod audit;
mod coded_value;
mod contact;
mod contact_migration;
mod id_pair;
mod organisation;
mod organisation_migration;

pub use audit::{Audit, AuditOverride, MIGRATION_USER};
pub use coded_value::CodedValue;
pub use contact::{
    Contact, ContactAddress, ContactAddressPhone, ContactEmail, ContactEmployment,
    ContactIdentity, ContactPhone, ContactRestriction, PrisonerContact,
    PrisonerContactRestriction,
};
pub use contact_migration::{
    AddressAndPhones, ContactsAndRestrictions, MigrateContactAddress, MigrateContactRequest,
    MigrateContactResponse, MigrateCorporate, MigrateEmailAddress, MigrateEmployment,
    MigrateIdentifier, MigratePhoneNumber, MigratePrisonerContactRestriction,
    MigrateRelationship, MigrateRestriction,
};
pub use id_pair::{ElementType, IdPair};
pub use organisation::{
    Organisation, OrganisationAddress, OrganisationAddressPhone, OrganisationEmail,
    OrganisationPhone, OrganisationType, OrganisationWebAddress,
};
pub use organisation_migration::{
    MigrateOrganisationAddress, MigrateOrganisationEmailAddress, MigrateOrganisationPhoneNumber,
    MigrateOrganisationRequest, MigrateOrganisationResponse, MigrateOrganisationType,
    MigrateOrganisationWebAddress, OrganisationAddressAndPhones,
};

/// First value handed out for generated (non-root) identifiers.
///
/// Legacy identifiers live below this offset, so locally generated keys never collide
/// with keys copied across from NOMIS.
pub const GENERATED_ID_START: i64 = 20_000_000;
