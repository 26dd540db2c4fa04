use serde::{Deserialize, Serialize};

/// Kind of element an [`IdPair`] refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementType {
    Contact,
    Phone,
    Address,
    AddressPhone,
    Email,
    Identity,
    Restriction,
    Employment,
    PrisonerContact,
    PrisonerContactRestriction,
    Organisation,
    OrganisationType,
    OrganisationPhone,
    OrganisationEmail,
    OrganisationWeb,
    OrganisationAddress,
    OrganisationAddressPhone,
}

/// Correlates the NOMIS identifier of one migrated element with the DPS identifier it
/// was stored under. Never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdPair {
    pub element_type: ElementType,
    pub nomis_id: i64,
    pub dps_id: i64,
}

impl IdPair {
    pub fn new(element_type: ElementType, nomis_id: i64, dps_id: i64) -> Self {
        Self {
            element_type,
            nomis_id,
            dps_id,
        }
    }
}
