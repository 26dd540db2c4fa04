//! `StoreTransaction` over a single `sqlx::Transaction`.
//!
//! Dropping a `PostgresStoreTransaction` without calling `commit` drops the underlying
//! `sqlx::Transaction`, which rolls back every statement issued through it.
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use contacts_shared::types::{
    Audit, Contact, ContactAddress, ContactAddressPhone, ContactEmail, ContactEmployment,
    ContactIdentity, ContactPhone, ContactRestriction, ElementType, Organisation,
    OrganisationAddress, OrganisationAddressPhone, OrganisationEmail, OrganisationPhone,
    OrganisationType, OrganisationWebAddress, PrisonerContact, PrisonerContactRestriction,
};
use sqlx::{Postgres, Transaction};

use crate::errors::RepositoryError;
use crate::interfaces::StoreTransaction;

#[derive(sqlx::FromRow)]
struct ContactRow {
    contact_id: i64,
    title: Option<String>,
    last_name: String,
    first_name: String,
    middle_names: Option<String>,
    date_of_birth: Option<NaiveDate>,
    deceased_flag: bool,
    deceased_date: Option<NaiveDate>,
    is_staff: bool,
    remitter: bool,
    gender: Option<String>,
    domestic_status: Option<String>,
    language_code: Option<String>,
    interpreter_required: bool,
    created_by: String,
    created_time: NaiveDateTime,
    updated_by: Option<String>,
    updated_time: Option<NaiveDateTime>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            contact_id: row.contact_id,
            title: row.title,
            last_name: row.last_name,
            first_name: row.first_name,
            middle_names: row.middle_names,
            date_of_birth: row.date_of_birth,
            deceased_flag: row.deceased_flag,
            deceased_date: row.deceased_date,
            is_staff: row.is_staff,
            remitter: row.remitter,
            gender: row.gender,
            domestic_status: row.domestic_status,
            language_code: row.language_code,
            interpreter_required: row.interpreter_required,
            audit: Audit {
                created_by: row.created_by,
                created_time: row.created_time,
                updated_by: row.updated_by,
                updated_time: row.updated_time,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrganisationRow {
    organisation_id: i64,
    organisation_name: String,
    programme_number: Option<String>,
    vat_number: Option<String>,
    caseload_id: Option<String>,
    comments: Option<String>,
    active: bool,
    deactivated_date: Option<NaiveDate>,
    created_by: String,
    created_time: NaiveDateTime,
    updated_by: Option<String>,
    updated_time: Option<NaiveDateTime>,
}

impl From<OrganisationRow> for Organisation {
    fn from(row: OrganisationRow) -> Self {
        Organisation {
            organisation_id: row.organisation_id,
            organisation_name: row.organisation_name,
            programme_number: row.programme_number,
            vat_number: row.vat_number,
            caseload_id: row.caseload_id,
            comments: row.comments,
            active: row.active,
            deactivated_date: row.deactivated_date,
            audit: Audit {
                created_by: row.created_by,
                created_time: row.created_time,
                updated_by: row.updated_by,
                updated_time: row.updated_time,
            },
        }
    }
}

/// Table and primary-key column backing each element type.
fn table_for(element_type: ElementType) -> (&'static str, &'static str) {
    match element_type {
        ElementType::Contact => ("contact", "contact_id"),
        ElementType::Phone => ("contact_phone", "contact_phone_id"),
        ElementType::Address => ("contact_address", "contact_address_id"),
        ElementType::AddressPhone => ("contact_address_phone", "contact_address_phone_id"),
        ElementType::Email => ("contact_email", "contact_email_id"),
        ElementType::Identity => ("contact_identity", "contact_identity_id"),
        ElementType::Restriction => ("contact_restriction", "contact_restriction_id"),
        ElementType::Employment => ("employment", "employment_id"),
        ElementType::PrisonerContact => ("prisoner_contact", "prisoner_contact_id"),
        ElementType::PrisonerContactRestriction => (
            "prisoner_contact_restriction",
            "prisoner_contact_restriction_id",
        ),
        ElementType::Organisation => ("organisation", "organisation_id"),
        ElementType::OrganisationType => ("organisation_type", "organisation_type_id"),
        ElementType::OrganisationPhone => ("organisation_phone", "organisation_phone_id"),
        ElementType::OrganisationEmail => ("organisation_email", "organisation_email_id"),
        ElementType::OrganisationWeb => {
            ("organisation_web_address", "organisation_web_address_id")
        }
        ElementType::OrganisationAddress => ("organisation_address", "organisation_address_id"),
        ElementType::OrganisationAddressPhone => (
            "organisation_address_phone",
            "organisation_address_phone_id",
        ),
    }
}

/// PostgreSQL transaction handed out by [`PostgresEntityStore`](crate::PostgresEntityStore).
pub struct PostgresStoreTransaction {
    tx: Transaction<'static, Postgres>,
}

impl PostgresStoreTransaction {
    pub(crate) fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// Deletes every row of `table` whose `column` equals `id`.
    async fn delete_where(
        &mut self,
        table: &str,
        column: &str,
        id: i64,
    ) -> Result<u64, RepositoryError> {
        let sql = format!("DELETE FROM {table} WHERE {column} = $1");
        let result = sqlx::query(&sql).bind(id).execute(&mut *self.tx).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl StoreTransaction for PostgresStoreTransaction {
    async fn find_contact(&mut self, contact_id: i64) -> Result<Option<Contact>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT contact_id, title, last_name, first_name, middle_names, date_of_birth,
                   deceased_flag, deceased_date, is_staff, remitter, gender, domestic_status,
                   language_code, interpreter_required, created_by, created_time, updated_by,
                   updated_time
            FROM contact
            WHERE contact_id = $1
            "#,
        )
        .bind(contact_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Contact::from))
    }

    async fn insert_contact_with_id(&mut self, contact: &Contact) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO contact (contact_id, title, last_name, first_name, middle_names,
                                 date_of_birth, deceased_flag, deceased_date, is_staff, remitter,
                                 gender, domestic_status, language_code, interpreter_required,
                                 created_by, created_time, updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(contact.contact_id)
        .bind(&contact.title)
        .bind(&contact.last_name)
        .bind(&contact.first_name)
        .bind(&contact.middle_names)
        .bind(contact.date_of_birth)
        .bind(contact.deceased_flag)
        .bind(contact.deceased_date)
        .bind(contact.is_staff)
        .bind(contact.remitter)
        .bind(&contact.gender)
        .bind(&contact.domestic_status)
        .bind(&contact.language_code)
        .bind(contact.interpreter_required)
        .bind(&contact.audit.created_by)
        .bind(contact.audit.created_time)
        .bind(&contact.audit.updated_by)
        .bind(contact.audit.updated_time)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn insert_contact_phone(&mut self, phone: &ContactPhone) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO contact_phone (contact_id, phone_type, phone_number, ext_number,
                                       created_by, created_time, updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING contact_phone_id
            "#,
        )
        .bind(phone.contact_id)
        .bind(&phone.phone_type)
        .bind(&phone.phone_number)
        .bind(&phone.ext_number)
        .bind(&phone.audit.created_by)
        .bind(phone.audit.created_time)
        .bind(&phone.audit.updated_by)
        .bind(phone.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_contact_address(
        &mut self,
        address: &ContactAddress,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO contact_address (contact_id, address_type, primary_address, flat, property,
                                         street, area, city_code, county_code, post_code,
                                         country_code, verified, mail_flag, start_date, end_date,
                                         no_fixed_address, comments, created_by, created_time,
                                         updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, $19, $20, $21)
            RETURNING contact_address_id
            "#,
        )
        .bind(address.contact_id)
        .bind(&address.address_type)
        .bind(address.primary_address)
        .bind(&address.flat)
        .bind(&address.property)
        .bind(&address.street)
        .bind(&address.area)
        .bind(&address.city_code)
        .bind(&address.county_code)
        .bind(&address.post_code)
        .bind(&address.country_code)
        .bind(address.verified)
        .bind(address.mail_flag)
        .bind(address.start_date)
        .bind(address.end_date)
        .bind(address.no_fixed_address)
        .bind(&address.comments)
        .bind(&address.audit.created_by)
        .bind(address.audit.created_time)
        .bind(&address.audit.updated_by)
        .bind(address.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_contact_address_phone(
        &mut self,
        address_phone: &ContactAddressPhone,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO contact_address_phone (contact_id, contact_address_id, contact_phone_id,
                                               created_by, created_time, updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING contact_address_phone_id
            "#,
        )
        .bind(address_phone.contact_id)
        .bind(address_phone.contact_address_id)
        .bind(address_phone.contact_phone_id)
        .bind(&address_phone.audit.created_by)
        .bind(address_phone.audit.created_time)
        .bind(&address_phone.audit.updated_by)
        .bind(address_phone.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_contact_email(&mut self, email: &ContactEmail) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO contact_email (contact_id, email_address, created_by, created_time,
                                       updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING contact_email_id
            "#,
        )
        .bind(email.contact_id)
        .bind(&email.email_address)
        .bind(&email.audit.created_by)
        .bind(email.audit.created_time)
        .bind(&email.audit.updated_by)
        .bind(email.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_contact_identity(
        &mut self,
        identity: &ContactIdentity,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO contact_identity (contact_id, identity_type, identity_value,
                                          issuing_authority, created_by, created_time,
                                          updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING contact_identity_id
            "#,
        )
        .bind(identity.contact_id)
        .bind(&identity.identity_type)
        .bind(&identity.identity_value)
        .bind(&identity.issuing_authority)
        .bind(&identity.audit.created_by)
        .bind(identity.audit.created_time)
        .bind(&identity.audit.updated_by)
        .bind(identity.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_contact_restriction(
        &mut self,
        restriction: &ContactRestriction,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO contact_restriction (contact_id, restriction_type, start_date, expiry_date,
                                             comments, staff_username, created_by, created_time,
                                             updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING contact_restriction_id
            "#,
        )
        .bind(restriction.contact_id)
        .bind(&restriction.restriction_type)
        .bind(restriction.start_date)
        .bind(restriction.expiry_date)
        .bind(&restriction.comments)
        .bind(&restriction.staff_username)
        .bind(&restriction.audit.created_by)
        .bind(restriction.audit.created_time)
        .bind(&restriction.audit.updated_by)
        .bind(restriction.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_contact_employment(
        &mut self,
        employment: &ContactEmployment,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO employment (contact_id, organisation_id, active, created_by, created_time,
                                    updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING employment_id
            "#,
        )
        .bind(employment.contact_id)
        .bind(employment.organisation_id)
        .bind(employment.active)
        .bind(&employment.audit.created_by)
        .bind(employment.audit.created_time)
        .bind(&employment.audit.updated_by)
        .bind(employment.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_prisoner_contact(
        &mut self,
        prisoner_contact: &PrisonerContact,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO prisoner_contact (contact_id, prisoner_number, contact_type,
                                          relationship_type, next_of_kin, emergency_contact,
                                          active, approved_visitor, current_term, comments,
                                          expiry_date, created_by, created_time, updated_by,
                                          updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING prisoner_contact_id
            "#,
        )
        .bind(prisoner_contact.contact_id)
        .bind(&prisoner_contact.prisoner_number)
        .bind(&prisoner_contact.contact_type)
        .bind(&prisoner_contact.relationship_type)
        .bind(prisoner_contact.next_of_kin)
        .bind(prisoner_contact.emergency_contact)
        .bind(prisoner_contact.active)
        .bind(prisoner_contact.approved_visitor)
        .bind(prisoner_contact.current_term)
        .bind(&prisoner_contact.comments)
        .bind(prisoner_contact.expiry_date)
        .bind(&prisoner_contact.audit.created_by)
        .bind(prisoner_contact.audit.created_time)
        .bind(&prisoner_contact.audit.updated_by)
        .bind(prisoner_contact.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_prisoner_contact_restriction(
        &mut self,
        restriction: &PrisonerContactRestriction,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO prisoner_contact_restriction (prisoner_contact_id, restriction_type,
                                                      start_date, expiry_date, comments,
                                                      staff_username, created_by, created_time,
                                                      updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING prisoner_contact_restriction_id
            "#,
        )
        .bind(restriction.prisoner_contact_id)
        .bind(&restriction.restriction_type)
        .bind(restriction.start_date)
        .bind(restriction.expiry_date)
        .bind(&restriction.comments)
        .bind(&restriction.staff_username)
        .bind(&restriction.audit.created_by)
        .bind(restriction.audit.created_time)
        .bind(&restriction.audit.updated_by)
        .bind(restriction.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn find_prisoner_contact_ids(
        &mut self,
        contact_id: i64,
    ) -> Result<Vec<i64>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT prisoner_contact_id FROM prisoner_contact WHERE contact_id = $1 ORDER BY prisoner_contact_id",
        )
        .bind(contact_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(ids)
    }

    async fn delete_contact_address_phones(
        &mut self,
        contact_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("contact_address_phone", "contact_id", contact_id)
            .await
    }

    async fn delete_contact_addresses(&mut self, contact_id: i64) -> Result<u64, RepositoryError> {
        self.delete_where("contact_address", "contact_id", contact_id)
            .await
    }

    async fn delete_contact_phones(&mut self, contact_id: i64) -> Result<u64, RepositoryError> {
        self.delete_where("contact_phone", "contact_id", contact_id)
            .await
    }

    async fn delete_contact_emails(&mut self, contact_id: i64) -> Result<u64, RepositoryError> {
        self.delete_where("contact_email", "contact_id", contact_id)
            .await
    }

    async fn delete_contact_identities(
        &mut self,
        contact_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("contact_identity", "contact_id", contact_id)
            .await
    }

    async fn delete_contact_restrictions(
        &mut self,
        contact_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("contact_restriction", "contact_id", contact_id)
            .await
    }

    async fn delete_contact_employments(
        &mut self,
        contact_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("employment", "contact_id", contact_id)
            .await
    }

    async fn delete_prisoner_contact_restrictions(
        &mut self,
        prisoner_contact_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where(
            "prisoner_contact_restriction",
            "prisoner_contact_id",
            prisoner_contact_id,
        )
        .await
    }

    async fn delete_prisoner_contacts(&mut self, contact_id: i64) -> Result<u64, RepositoryError> {
        self.delete_where("prisoner_contact", "contact_id", contact_id)
            .await
    }

    async fn delete_contact(&mut self, contact_id: i64) -> Result<u64, RepositoryError> {
        self.delete_where("contact", "contact_id", contact_id).await
    }

    async fn find_organisation(
        &mut self,
        organisation_id: i64,
    ) -> Result<Option<Organisation>, RepositoryError> {
        let row = sqlx::query_as::<_, OrganisationRow>(
            r#"
            SELECT organisation_id, organisation_name, programme_number, vat_number, caseload_id,
                   comments, active, deactivated_date, created_by, created_time, updated_by,
                   updated_time
            FROM organisation
            WHERE organisation_id = $1
            "#,
        )
        .bind(organisation_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(row.map(Organisation::from))
    }

    async fn insert_organisation_with_id(
        &mut self,
        organisation: &Organisation,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO organisation (organisation_id, organisation_name, programme_number,
                                      vat_number, caseload_id, comments, active, deactivated_date,
                                      created_by, created_time, updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(organisation.organisation_id)
        .bind(&organisation.organisation_name)
        .bind(&organisation.programme_number)
        .bind(&organisation.vat_number)
        .bind(&organisation.caseload_id)
        .bind(&organisation.comments)
        .bind(organisation.active)
        .bind(organisation.deactivated_date)
        .bind(&organisation.audit.created_by)
        .bind(organisation.audit.created_time)
        .bind(&organisation.audit.updated_by)
        .bind(organisation.audit.updated_time)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn update_organisation(
        &mut self,
        organisation: &Organisation,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE organisation
            SET organisation_name = $2,
                programme_number  = $3,
                vat_number        = $4,
                caseload_id       = $5,
                comments          = $6,
                active            = $7,
                deactivated_date  = $8,
                created_by        = $9,
                created_time      = $10,
                updated_by        = $11,
                updated_time      = $12
            WHERE organisation_id = $1
            "#,
        )
        .bind(organisation.organisation_id)
        .bind(&organisation.organisation_name)
        .bind(&organisation.programme_number)
        .bind(&organisation.vat_number)
        .bind(&organisation.caseload_id)
        .bind(&organisation.comments)
        .bind(organisation.active)
        .bind(organisation.deactivated_date)
        .bind(&organisation.audit.created_by)
        .bind(organisation.audit.created_time)
        .bind(&organisation.audit.updated_by)
        .bind(organisation.audit.updated_time)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn insert_organisation_type(
        &mut self,
        organisation_type: &OrganisationType,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO organisation_type (organisation_id, organisation_type, created_by,
                                           created_time, updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING organisation_type_id
            "#,
        )
        .bind(organisation_type.organisation_id)
        .bind(&organisation_type.organisation_type)
        .bind(&organisation_type.audit.created_by)
        .bind(organisation_type.audit.created_time)
        .bind(&organisation_type.audit.updated_by)
        .bind(organisation_type.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_organisation_phone(
        &mut self,
        phone: &OrganisationPhone,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO organisation_phone (organisation_id, phone_type, phone_number, ext_number,
                                            created_by, created_time, updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING organisation_phone_id
            "#,
        )
        .bind(phone.organisation_id)
        .bind(&phone.phone_type)
        .bind(&phone.phone_number)
        .bind(&phone.ext_number)
        .bind(&phone.audit.created_by)
        .bind(phone.audit.created_time)
        .bind(&phone.audit.updated_by)
        .bind(phone.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_organisation_email(
        &mut self,
        email: &OrganisationEmail,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO organisation_email (organisation_id, email_address, created_by,
                                            created_time, updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING organisation_email_id
            "#,
        )
        .bind(email.organisation_id)
        .bind(&email.email_address)
        .bind(&email.audit.created_by)
        .bind(email.audit.created_time)
        .bind(&email.audit.updated_by)
        .bind(email.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_organisation_web_address(
        &mut self,
        web_address: &OrganisationWebAddress,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO organisation_web_address (organisation_id, web_address, created_by,
                                                  created_time, updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING organisation_web_address_id
            "#,
        )
        .bind(web_address.organisation_id)
        .bind(&web_address.web_address)
        .bind(&web_address.audit.created_by)
        .bind(web_address.audit.created_time)
        .bind(&web_address.audit.updated_by)
        .bind(web_address.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_organisation_address(
        &mut self,
        address: &OrganisationAddress,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO organisation_address (organisation_id, address_type, primary_address, flat,
                                              property, street, area, city_code, county_code,
                                              post_code, country_code, mail_address,
                                              service_address, no_fixed_address,
                                              special_needs_code, contact_person_name,
                                              business_hours, comments, start_date, end_date,
                                              created_by, created_time, updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, $19, $20, $21, $22, $23, $24)
            RETURNING organisation_address_id
            "#,
        )
        .bind(address.organisation_id)
        .bind(&address.address_type)
        .bind(address.primary_address)
        .bind(&address.flat)
        .bind(&address.property)
        .bind(&address.street)
        .bind(&address.area)
        .bind(&address.city_code)
        .bind(&address.county_code)
        .bind(&address.post_code)
        .bind(&address.country_code)
        .bind(address.mail_address)
        .bind(address.service_address)
        .bind(address.no_fixed_address)
        .bind(&address.special_needs_code)
        .bind(&address.contact_person_name)
        .bind(&address.business_hours)
        .bind(&address.comments)
        .bind(address.start_date)
        .bind(address.end_date)
        .bind(&address.audit.created_by)
        .bind(address.audit.created_time)
        .bind(&address.audit.updated_by)
        .bind(address.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn insert_organisation_address_phone(
        &mut self,
        address_phone: &OrganisationAddressPhone,
    ) -> Result<i64, RepositoryError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO organisation_address_phone (organisation_id, organisation_address_id,
                                                    organisation_phone_id, created_by,
                                                    created_time, updated_by, updated_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING organisation_address_phone_id
            "#,
        )
        .bind(address_phone.organisation_id)
        .bind(address_phone.organisation_address_id)
        .bind(address_phone.organisation_phone_id)
        .bind(&address_phone.audit.created_by)
        .bind(address_phone.audit.created_time)
        .bind(&address_phone.audit.updated_by)
        .bind(address_phone.audit.updated_time)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn delete_organisation_address_phones(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("organisation_address_phone", "organisation_id", organisation_id)
            .await
    }

    async fn delete_organisation_addresses(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("organisation_address", "organisation_id", organisation_id)
            .await
    }

    async fn delete_organisation_phones(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("organisation_phone", "organisation_id", organisation_id)
            .await
    }

    async fn delete_organisation_emails(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("organisation_email", "organisation_id", organisation_id)
            .await
    }

    async fn delete_organisation_web_addresses(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("organisation_web_address", "organisation_id", organisation_id)
            .await
    }

    async fn delete_organisation_types(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("organisation_type", "organisation_id", organisation_id)
            .await
    }

    async fn delete_employments_for_organisation(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        self.delete_where("employment", "organisation_id", organisation_id)
            .await
    }

    async fn delete_organisation(&mut self, organisation_id: i64) -> Result<u64, RepositoryError> {
        self.delete_where("organisation", "organisation_id", organisation_id)
            .await
    }

    async fn exists(
        &mut self,
        element_type: ElementType,
        id: i64,
    ) -> Result<bool, RepositoryError> {
        let (table, column) = table_for(element_type);
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE {column} = $1)");
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(exists)
    }

    async fn count(&mut self, element_type: ElementType) -> Result<i64, RepositoryError> {
        let (table, _) = table_for(element_type);
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_element_type_maps_to_a_distinct_table() {
        let all = [
            ElementType::Contact,
            ElementType::Phone,
            ElementType::Address,
            ElementType::AddressPhone,
            ElementType::Email,
            ElementType::Identity,
            ElementType::Restriction,
            ElementType::Employment,
            ElementType::PrisonerContact,
            ElementType::PrisonerContactRestriction,
            ElementType::Organisation,
            ElementType::OrganisationType,
            ElementType::OrganisationPhone,
            ElementType::OrganisationEmail,
            ElementType::OrganisationWeb,
            ElementType::OrganisationAddress,
            ElementType::OrganisationAddressPhone,
        ];

        let tables: std::collections::HashSet<_> =
            all.iter().map(|t| table_for(*t).0).collect();

        assert_eq!(tables.len(), all.len());
        assert_eq!(table_for(ElementType::Employment), ("employment", "employment_id"));
    }
}
