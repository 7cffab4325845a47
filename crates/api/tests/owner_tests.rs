mod common;

use api::gql::build_schema;
use async_graphql::Variables;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_create_owner_appears_once_in_all_owners() {
    let Some(state) = try_setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state);

    let unique = unique_suffix();
    let first_name = format!("George{unique}");

    let mutation = r#"
        mutation CreateOwner($firstName: String!, $username: String!) {
            createOwner(firstName: $firstName, lastName: "Harrison", username: $username) {
                id
                firstName
                lastName
            }
        }
    "#;
    let response = execute_graphql(
        &schema,
        mutation,
        Some(Variables::from_json(json!({
            "firstName": first_name,
            "username": format!("george_{unique}"),
        }))),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let query = r#"
        query AllOwners {
            allOwners {
                firstName
                lastName
            }
        }
    "#;
    let response = execute_graphql(&schema, query, None).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    let owners = data["allOwners"].as_array().unwrap();
    let matches = owners
        .iter()
        .filter(|o| o["firstName"] == first_name.as_str() && o["lastName"] == "Harrison")
        .count();
    assert_eq!(matches, 1, "Created owner should appear exactly once");
}

#[tokio::test]
async fn test_update_owner_keeps_email_when_omitted() {
    let Some(state) = try_setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state);

    let unique = unique_suffix();

    let mutation = r#"
        mutation CreateOwner($username: String!, $email: String!) {
            createOwner(firstName: "Stuart", username: $username, email: $email) {
                id
            }
        }
    "#;
    let email = format!("stuart_{unique}@example.com");
    let response = execute_graphql(
        &schema,
        mutation,
        Some(Variables::from_json(json!({
            "username": format!("stuart_{unique}"),
            "email": email,
        }))),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let id = data["createOwner"]["id"].as_str().unwrap().to_string();

    // firstName is always required here; email stays as stored.
    let mutation = r#"
        mutation UpdateOwner($id: ID!) {
            updateOwner(id: $id, firstName: "Stu") {
                firstName
                email
            }
        }
    "#;
    let response = execute_graphql(
        &schema,
        mutation,
        Some(Variables::from_json(json!({ "id": id }))),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let data = response.data.into_json().unwrap();
    assert_eq!(data["updateOwner"]["firstName"], "Stu");
    assert_eq!(data["updateOwner"]["email"], email.as_str());
}

#[tokio::test]
async fn test_update_owner_missing_errors() {
    let Some(state) = try_setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state);

    let missing = uuid::Uuid::new_v4().to_string();
    let mutation = r#"
        mutation UpdateOwner($id: ID!) {
            updateOwner(id: $id, firstName: "Nobody") { id }
        }
    "#;
    let response = execute_graphql(
        &schema,
        mutation,
        Some(Variables::from_json(json!({ "id": missing }))),
    )
    .await;

    assert!(!response.errors.is_empty());
    assert!(response.errors[0].message.contains("Owner not found"));
}

#[tokio::test]
async fn test_delete_owner_returns_snapshot_then_null() {
    let Some(state) = try_setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state);

    let unique = unique_suffix();
    let mutation = r#"
        mutation CreateOwner($username: String!) {
            createOwner(firstName: "Pete", username: $username) { id }
        }
    "#;
    let response = execute_graphql(
        &schema,
        mutation,
        Some(Variables::from_json(
            json!({ "username": format!("pete_{unique}") }),
        )),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let id = data["createOwner"]["id"].as_str().unwrap().to_string();

    let mutation = r#"
        mutation DeleteOwner($id: ID!) {
            deleteOwner(id: $id) {
                id
                firstName
            }
        }
    "#;
    let response = execute_graphql(
        &schema,
        mutation,
        Some(Variables::from_json(json!({ "id": id }))),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["deleteOwner"]["firstName"], "Pete");

    let response = execute_graphql(
        &schema,
        mutation,
        Some(Variables::from_json(json!({ "id": id }))),
    )
    .await;
    assert!(
        response.errors.is_empty(),
        "Deleting a missing owner must not error: {:?}",
        response.errors
    );
    let data = response.data.into_json().unwrap();
    assert!(data["deleteOwner"].is_null());
}

#[tokio::test]
async fn test_deleting_owner_detaches_from_companies() {
    let Some(state) = try_setup_test_db().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let schema = build_schema(state);

    let unique = unique_suffix();

    let mutation = r#"
        mutation CreateOwner($username: String!) {
            createOwner(firstName: "Brian", username: $username) { id }
        }
    "#;
    let response = execute_graphql(
        &schema,
        mutation,
        Some(Variables::from_json(
            json!({ "username": format!("brian_{unique}") }),
        )),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let owner_id = data["createOwner"]["id"].as_str().unwrap().to_string();

    let name = format!("Detach Co {unique}");
    let mutation = r#"
        mutation CreateCompany($name: String!, $owners: [ID!]) {
            createCompany(name: $name, owners: $owners) { id }
        }
    "#;
    let response = execute_graphql(
        &schema,
        mutation,
        Some(Variables::from_json(
            json!({ "name": name, "owners": [owner_id] }),
        )),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let mutation = r#"
        mutation DeleteOwner($id: ID!) {
            deleteOwner(id: $id) { id }
        }
    "#;
    let response = execute_graphql(
        &schema,
        mutation,
        Some(Variables::from_json(json!({ "id": owner_id }))),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let query = r#"
        query CompanyByName($name: String!) {
            companyByName(name: $name) {
                owners { id }
            }
        }
    "#;
    let response = execute_graphql(
        &schema,
        query,
        Some(Variables::from_json(json!({ "name": name }))),
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    let owners = data["companyByName"]["owners"].as_array().unwrap();
    assert!(owners.is_empty(), "Ownership rows must go away with the owner");
}
