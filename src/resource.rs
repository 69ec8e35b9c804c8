//! Resource record types and the `Resource` trait tying each one to its collection and rules.

use crate::service::{FieldCheck, RuleSet};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Query parameter naming the acting user on delete routes.
pub const ACTOR_PARAM: &str = "user_id";

/// Static description of one CRUD resource.
pub trait Resource: Send + Sync + 'static {
    /// Stored document as returned to clients.
    type Record: Serialize + DeserializeOwned + Send;
    /// Body accepted on create. Every field required.
    type New: Serialize + DeserializeOwned + Send;
    /// Body accepted on update. Every field optional; only set fields are written.
    type Changes: Serialize + DeserializeOwned + Send;

    const COLLECTION: &'static str;
    /// Singular, lower case: "user".
    const NAME: &'static str;
    /// Singular, capitalized: "User".
    const TITLE: &'static str;
    /// Query parameter carrying a document id: "user_id".
    const ID_PARAM: &'static str;
    /// Presence checks run on create.
    const CREATE_RULES: RuleSet;
    /// Presence checks run on update-by-query.
    const ID_QUERY_RULES: RuleSet;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UserChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Org {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewOrg {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct OrgChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

pub struct Users;

impl Resource for Users {
    type Record = User;
    type New = NewUser;
    type Changes = UserChanges;

    const COLLECTION: &'static str = "users";
    const NAME: &'static str = "user";
    const TITLE: &'static str = "User";
    const ID_PARAM: &'static str = "user_id";
    const CREATE_RULES: RuleSet = RuleSet(&[
        FieldCheck::body("name", "name is required"),
        FieldCheck::body("email", "email is required"),
    ]);
    const ID_QUERY_RULES: RuleSet = RuleSet(&[FieldCheck::query("user_id", "user_id is required")]);
}

pub struct Orgs;

impl Resource for Orgs {
    type Record = Org;
    type New = NewOrg;
    type Changes = OrgChanges;

    const COLLECTION: &'static str = "orgs";
    const NAME: &'static str = "org";
    const TITLE: &'static str = "Org";
    const ID_PARAM: &'static str = "org_id";
    const CREATE_RULES: RuleSet = RuleSet(&[
        FieldCheck::body("name", "name is required"),
        FieldCheck::body("address", "address is required"),
    ]);
    const ID_QUERY_RULES: RuleSet = RuleSet(&[FieldCheck::query("org_id", "org_id is required")]);
}

/// Every collection the service owns, for table bootstrap.
pub const COLLECTIONS: &[&str] = &[Users::COLLECTION, Orgs::COLLECTION];
