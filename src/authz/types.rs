use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The unit of permission granularity.
///
/// `Create` is a type-level action: it is evaluated against an object type
/// through [`user_can_create`](crate::authz::user_can_create) and never
/// against an existing object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(format!("unknown action '{}'", other)),
        }
    }
}

/// Every kind of access-controlled platform resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Forecasts,
    Observations,
    Mappings,
    Sites,
    Aggregates,
    Users,
    Roles,
    Permissions,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Forecasts => "forecasts",
            ObjectType::Observations => "observations",
            ObjectType::Mappings => "mappings",
            ObjectType::Sites => "sites",
            ObjectType::Aggregates => "aggregates",
            ObjectType::Users => "users",
            ObjectType::Roles => "roles",
            ObjectType::Permissions => "permissions",
        }
    }

    /// Backing table for objects of this type. Role and permission mappings
    /// are relation rows rather than standalone objects, so they have no
    /// table of their own and can never be resolved by id.
    pub fn table(&self) -> Option<&'static str> {
        match self {
            ObjectType::Forecasts => Some("forecasts"),
            ObjectType::Observations => Some("observations"),
            ObjectType::Sites => Some("sites"),
            ObjectType::Aggregates => Some("aggregates"),
            ObjectType::Users => Some("users"),
            ObjectType::Roles => Some("roles"),
            ObjectType::Permissions => Some("permissions"),
            ObjectType::Mappings => None,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forecasts" => Ok(ObjectType::Forecasts),
            "observations" => Ok(ObjectType::Observations),
            "mappings" => Ok(ObjectType::Mappings),
            "sites" => Ok(ObjectType::Sites),
            "aggregates" => Ok(ObjectType::Aggregates),
            "users" => Ok(ObjectType::Users),
            "roles" => Ok(ObjectType::Roles),
            "permissions" => Ok(ObjectType::Permissions),
            other => Err(format!("unknown object type '{}'", other)),
        }
    }
}
