use std::fmt;
use serde::{Serialize, Deserialize, Deserializer};

/// Identifier assigned by the remote contact service. Opaque to the client;
/// the service may hand it out as a JSON string or integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(v) => Self(v),
            RawId::Signed(v) => Self(v.to_string()),
            RawId::Unsigned(v) => Self(v.to_string()),
        })
    }
}

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for ContactId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "id")]
    id      : ContactId,
    #[serde(rename = "name")]
    name    : String,
    #[serde(rename = "number")]
    number  : String,
}

impl Contact {
    pub fn new(id: ContactId, name: &str, number: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    pub fn id(&self) -> &ContactId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    /// Case-insensitive name comparison, ignoring surrounding whitespace.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.id, self.name, self.number)
    }
}

/// What the user submits from the add form, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    name    : String,
    number  : String,
}

impl Candidate {
    pub fn new(name: &str, number: &str) -> Self {
        Self {
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

/// Avatar initials: the first two letters of a single-word name, otherwise
/// the first letter of each of the first two words. Upper-cased.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };

    match words.next() {
        Some(second) => first.chars().take(1)
            .chain(second.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect(),
        None => first.chars()
            .take(2)
            .flat_map(char::to_uppercase)
            .collect(),
    }
}
