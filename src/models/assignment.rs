use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const ALL_STAFF_TAG: &str = "all_staff";
pub const USER_PREFIX: &str = "user_";
pub const ROLE_PREFIX: &str = "role_";

/// Staff identifier. Stored ids are sometimes numbers and sometimes strings,
/// so the value is normalised on construction: integral ids lose leading
/// zeros and surrounding whitespace, and compare equal regardless of how
/// they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StaffId(String);

impl StaffId {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => Self(n.to_string()),
            Err(_) => Self(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<u64> for StaffId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StaffId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for StaffId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => Self::new(&n.to_string()),
            Value::String(s) => Self::new(&s),
            _ => Self(String::new()),
        })
    }
}

/// Who a task belongs to, parsed once from its stored tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Assignment {
    #[default]
    Unassigned,
    AllStaff,
    User(StaffId),
    Role(String),
    /// A tag in none of the known forms. Kept verbatim so saving the record
    /// does not lose it; it matches nobody.
    Unrecognized(String),
}

impl Assignment {
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.is_empty() {
            return Self::Unassigned;
        }
        if tag == ALL_STAFF_TAG {
            return Self::AllStaff;
        }
        if let Some(rest) = tag.strip_prefix(USER_PREFIX) {
            let id = StaffId::new(rest);
            if !id.is_empty() {
                return Self::User(id);
            }
        }
        if let Some(role) = tag.strip_prefix(ROLE_PREFIX) {
            if !role.is_empty() {
                return Self::Role(role.to_string());
            }
        }
        Self::Unrecognized(tag.to_string())
    }

    /// Resolves the current and legacy field pair. `assignTo` wins whenever
    /// it is present, even when empty.
    pub fn resolve(assign_to: Option<&str>, assigned_to: Option<&str>) -> Self {
        assign_to
            .or(assigned_to)
            .map(Self::parse)
            .unwrap_or_default()
    }

    pub fn tag(&self) -> Option<String> {
        match self {
            Self::Unassigned => None,
            Self::AllStaff => Some(ALL_STAFF_TAG.to_string()),
            Self::User(id) => Some(format!("{USER_PREFIX}{id}")),
            Self::Role(role) => Some(format!("{ROLE_PREFIX}{role}")),
            Self::Unrecognized(raw) => Some(raw.clone()),
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => f.write_str("unassigned"),
            Self::AllStaff => f.write_str("all staff"),
            Self::User(id) => write!(f, "user {id}"),
            Self::Role(role) => write!(f, "role {role}"),
            Self::Unrecognized(raw) => write!(f, "unrecognized ({raw})"),
        }
    }
}

impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.tag() {
            Some(tag) => serializer.serialize_str(&tag),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Assignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Self::parse(&s),
            Some(other @ Value::Number(_)) => Self::Unrecognized(other.to_string()),
            _ => Self::Unassigned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_id_normalises_numbers() {
        assert_eq!(StaffId::new("007"), StaffId::from(7));
        assert_eq!(StaffId::new(" 12 "), StaffId::new("12"));
        assert_eq!(StaffId::new("abc-1").as_str(), "abc-1");
    }

    #[test]
    fn test_staff_id_reads_numbers_and_strings() {
        let ids: Vec<StaffId> = serde_json::from_str(r#"[7, "7", "x9"]"#).unwrap();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2].as_str(), "x9");
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[7,7,"x9"]"#);
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(Assignment::parse("all_staff"), Assignment::AllStaff);
        assert_eq!(Assignment::parse("user_42"), Assignment::User(StaffId::from(42)));
        assert_eq!(
            Assignment::parse("role_Harvester"),
            Assignment::Role("Harvester".into())
        );
        assert_eq!(Assignment::parse(""), Assignment::Unassigned);
        assert_eq!(
            Assignment::parse("user_"),
            Assignment::Unrecognized("user_".into())
        );
        assert_eq!(
            Assignment::parse("Bob"),
            Assignment::Unrecognized("Bob".into())
        );
    }

    #[test]
    fn test_resolve_prefers_current_field() {
        assert_eq!(
            Assignment::resolve(Some("role_Packer"), Some("user_3")),
            Assignment::Role("Packer".into())
        );
        assert_eq!(
            Assignment::resolve(None, Some("user_3")),
            Assignment::User(StaffId::from(3))
        );
        assert_eq!(Assignment::resolve(None, None), Assignment::Unassigned);
    }

    #[test]
    fn test_tag_round_trips() {
        for tag in ["all_staff", "user_5", "role_Grower", "legacy-name"] {
            assert_eq!(Assignment::parse(tag).tag().as_deref(), Some(tag));
        }
        assert_eq!(Assignment::Unassigned.tag(), None);
    }
}
