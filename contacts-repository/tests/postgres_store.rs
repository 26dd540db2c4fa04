//! Integration tests for `PostgresEntityStore`.
//!
//! Run with `DATABASE_URL` pointing at a scratch PostgreSQL server and the
//! `postgres-tests` feature enabled. Each test gets a fresh database with the
//! embedded migrations applied.
use chrono::NaiveDate;
use contacts_repository::{EntityStore, PostgresEntityStore, RepositoryError};
use contacts_shared::types::{
    Audit, Contact, ContactEmployment, ContactPhone, ElementType, GENERATED_ID_START,
    Organisation,
};
use sqlx::PgPool;

fn audit() -> Audit {
    Audit {
        created_by: "MIGRATION".to_string(),
        created_time: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        updated_by: None,
        updated_time: None,
    }
}

fn contact(contact_id: i64, last_name: &str) -> Contact {
    Contact {
        contact_id,
        title: Some("MR".to_string()),
        last_name: last_name.to_string(),
        first_name: "John".to_string(),
        middle_names: None,
        date_of_birth: NaiveDate::from_ymd_opt(2001, 1, 1),
        deceased_flag: false,
        deceased_date: None,
        is_staff: false,
        remitter: false,
        gender: None,
        domestic_status: None,
        language_code: None,
        interpreter_required: false,
        audit: audit(),
    }
}

fn organisation(organisation_id: i64, name: &str) -> Organisation {
    Organisation {
        organisation_id,
        organisation_name: name.to_string(),
        programme_number: None,
        vat_number: None,
        caseload_id: None,
        comments: None,
        active: true,
        deactivated_date: None,
        audit: audit(),
    }
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_contact_round_trip_with_generated_child_id(pool: PgPool) {
    let store = PostgresEntityStore::new(pool);

    let mut tx = store.begin().await.unwrap();
    tx.insert_contact_with_id(&contact(1, "Smith")).await.unwrap();
    let phone_id = tx
        .insert_contact_phone(&ContactPhone {
            contact_id: 1,
            phone_type: "MOB".to_string(),
            phone_number: "07700 900000".to_string(),
            ext_number: None,
            audit: audit(),
        })
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let mut tx = store.begin().await.unwrap();
    let stored = tx.find_contact(1).await.unwrap().unwrap();
    assert_eq!(stored, contact(1, "Smith"));
    assert!(phone_id >= GENERATED_ID_START);
    assert!(tx.exists(ElementType::Phone, phone_id).await.unwrap());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_uncommitted_transaction_is_rolled_back(pool: PgPool) {
    let store = PostgresEntityStore::new(pool);

    {
        let mut tx = store.begin().await.unwrap();
        tx.insert_contact_with_id(&contact(2, "Jones")).await.unwrap();
    }

    let mut tx = store.begin().await.unwrap();
    assert_eq!(tx.count(ElementType::Contact).await.unwrap(), 0);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_constraint_failures_are_classified(pool: PgPool) {
    let store = PostgresEntityStore::new(pool);

    let mut tx = store.begin().await.unwrap();
    tx.insert_contact_with_id(&contact(3, "Brown")).await.unwrap();
    let err = tx
        .insert_contact_with_id(&contact(3, "Brown"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueViolation(_)));

    let mut tx = store.begin().await.unwrap();
    tx.insert_contact_with_id(&contact(4, "Green")).await.unwrap();
    let err = tx
        .insert_contact_employment(&ContactEmployment {
            contact_id: 4,
            organisation_id: 12345,
            active: true,
            audit: audit(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_organisation_update_in_place(pool: PgPool) {
    let store = PostgresEntityStore::new(pool);

    let mut tx = store.begin().await.unwrap();
    tx.insert_organisation_with_id(&organisation(999, "Old Name"))
        .await
        .unwrap();
    assert_eq!(
        tx.update_organisation(&organisation(999, "New Name"))
            .await
            .unwrap(),
        1
    );
    tx.commit().await.unwrap();

    let mut tx = store.begin().await.unwrap();
    let stored = tx.find_organisation(999).await.unwrap().unwrap();
    assert_eq!(stored.organisation_name, "New Name");
    assert_eq!(tx.count(ElementType::Organisation).await.unwrap(), 1);
    assert_eq!(tx.delete_organisation(999).await.unwrap(), 1);
    assert_eq!(tx.delete_organisation(999).await.unwrap(), 0);
}
