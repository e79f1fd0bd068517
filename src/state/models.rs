//! Domain records exchanged with the remote services

use serde::{Deserialize, Deserializer, Serialize};

/// A state as listed by the geography service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    #[serde(rename = "sigla")]
    pub code: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

/// A city of a state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRegion {
    #[serde(rename = "nome")]
    pub name: String,
}

/// Institution the user can register interest in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationAddress {
    pub city: String,
    pub state: String,
}

/// An interest as stored by the permutas API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub institution: InstitutionRef,
    pub destination_address: DestinationAddress,
}

impl InterestRecord {
    /// "City - ST" line shown under the institution name
    pub fn destination_label(&self) -> String {
        format!(
            "{} - {}",
            self.destination_address.city, self.destination_address.state
        )
    }
}

/// Address collected on the address screen and carried to the cargo screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Body of an interest creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterest {
    pub institution_id: String,
    pub cargo: String,
    pub destination_address: Address,
}

/// Accepts `"35"` as well as `35`
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}
