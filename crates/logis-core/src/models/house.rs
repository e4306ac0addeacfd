use crate::{Result, de, models::Room, validation};
use serde::{Deserialize, Serialize};

pub type HouseId = u64;

/// A house listed by a property owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,

    #[serde(rename = "adresse")]
    pub address: String,

    /// Decimal degrees, kept as the server renders them
    #[serde(deserialize_with = "de::decimal_text")]
    pub latitude: String,

    #[serde(deserialize_with = "de::decimal_text")]
    pub longitude: String,

    #[serde(default)]
    pub description: String,
}

impl House {
    /// Parsed `(latitude, longitude)`, if both are valid numbers
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.latitude.trim().parse::<f64>().ok()?;
        let lon = self.longitude.trim().parse::<f64>().ok()?;
        Some((lat, lon))
    }

    /// OpenStreetMap link centered on the house
    pub fn map_url(&self) -> Option<String> {
        self.coordinates().map(|(lat, lon)| {
            format!(
                "https://www.openstreetmap.org/?mlat={lat:.6}&mlon={lon:.6}#map=17/{lat:.6}/{lon:.6}"
            )
        })
    }
}

/// Create payload for a house, holding the raw form values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseDraft {
    #[serde(rename = "adresse")]
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub description: String,
}

impl HouseDraft {
    pub fn validate(&self) -> Result<()> {
        validation::validate_house(self).into_result()
    }

    /// Draft pre-filled from an existing house, for editing
    pub fn from_house(house: &House) -> Self {
        Self {
            address: house.address.clone(),
            latitude: house.latitude.clone(),
            longitude: house.longitude.clone(),
            description: house.description.clone(),
        }
    }

    /// Copy with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self {
            address: self.address.trim().to_string(),
            latitude: self.latitude.trim().to_string(),
            longitude: self.longitude.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Partial update for a house; unset fields are left out of the body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HousePatch {
    #[serde(rename = "adresse", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<HouseDraft> for HousePatch {
    fn from(draft: HouseDraft) -> Self {
        Self {
            address: Some(draft.address),
            latitude: Some(draft.latitude),
            longitude: Some(draft.longitude),
            description: Some(draft.description),
        }
    }
}

/// A house together with the rooms shown for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseWithRooms {
    #[serde(flatten)]
    pub house: House,
    #[serde(rename = "chambres")]
    pub rooms: Vec<Room>,
}
