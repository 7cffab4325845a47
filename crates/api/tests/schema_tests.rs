//! Schema-surface tests. These build the schema against a lazily-connected
//! pool and never touch the database, so they run everywhere.

use api::gql::build_schema;
use api::AppState;
use sqlx::postgres::PgPoolOptions;

fn lazy_schema() -> api::gql::schema::AppSchema {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost:5432/unused")
        .expect("lazy pool never connects eagerly");
    build_schema(AppState::new(pool))
}

#[tokio::test]
async fn test_schema_exposes_query_surface() {
    let schema = lazy_schema();
    let sdl = schema.sdl();

    assert!(sdl.contains("allCompanies"));
    assert!(sdl.contains("companyByName"));
    assert!(sdl.contains("allOwners"));
}

#[tokio::test]
async fn test_schema_exposes_mutation_surface() {
    let schema = lazy_schema();
    let sdl = schema.sdl();

    for field in [
        "createCompany",
        "updateCompany",
        "deleteCompany",
        "createOwner",
        "updateOwner",
        "deleteOwner",
    ] {
        assert!(sdl.contains(field), "missing mutation field {field}");
    }
}

#[tokio::test]
async fn test_schema_renames_storage_fields_to_camel_case() {
    let schema = lazy_schema();
    let sdl = schema.sdl();

    assert!(sdl.contains("employeeSize"));
    assert!(sdl.contains("createdAt"));
    assert!(sdl.contains("firstName"));
    assert!(!sdl.contains("employee_size"));
}

#[tokio::test]
async fn test_schema_has_no_owner_by_name_lookup() {
    let schema = lazy_schema();
    let sdl = schema.sdl();

    assert!(!sdl.contains("ownerByName"));
    assert!(!sdl.contains("userByName"));
}

#[tokio::test]
async fn test_malformed_id_is_rejected_before_touching_the_db() {
    let schema = lazy_schema();

    let response = schema
        .execute(r#"mutation { deleteCompany(id: "not-a-uuid") { id } }"#)
        .await;

    assert!(!response.errors.is_empty());
    assert!(
        response.errors[0].message.contains("Invalid company ID"),
        "unexpected message: {}",
        response.errors[0].message
    );
}

#[tokio::test]
async fn test_malformed_owner_id_on_create_company() {
    let schema = lazy_schema();

    let response = schema
        .execute(r#"mutation { createCompany(name: "X", owners: ["nope"]) { id } }"#)
        .await;

    assert!(!response.errors.is_empty());
    assert!(
        response.errors[0].message.contains("Invalid owner ID"),
        "unexpected message: {}",
        response.errors[0].message
    );
}
