use crate::{Result, de, models::HouseId, validation};
use serde::{Deserialize, Serialize};

pub type RoomId = u64;

wire_enum! {
    /// Kind of rentable unit
    RoomKind, "room type" {
        Simple => "simple",
        Appartement => "appartement",
        Maison => "maison",
    }
}

impl Default for RoomKind {
    fn default() -> Self {
        RoomKind::Simple
    }
}

/// A rentable room inside a house
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,

    #[serde(rename = "maison")]
    pub house_id: HouseId,

    #[serde(rename = "titre")]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Surface in square meters, free text on the server
    #[serde(rename = "taille", default, deserialize_with = "de::decimal_text")]
    pub size: String,

    #[serde(rename = "type", default)]
    pub kind: RoomKind,

    #[serde(rename = "meublee", default)]
    pub furnished: bool,

    #[serde(rename = "salle_de_bain", default)]
    pub has_bathroom: bool,

    #[serde(rename = "prix", deserialize_with = "de::number")]
    pub price: f64,

    #[serde(rename = "disponible", default)]
    pub available: bool,
}

/// Create payload for a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDraft {
    #[serde(rename = "maison")]
    pub house_id: HouseId,
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    #[serde(rename = "taille")]
    pub size: String,
    #[serde(rename = "type")]
    pub kind: RoomKind,
    #[serde(rename = "meublee")]
    pub furnished: bool,
    #[serde(rename = "salle_de_bain")]
    pub has_bathroom: bool,
    #[serde(rename = "prix")]
    pub price: f64,
    #[serde(rename = "disponible")]
    pub available: bool,
}

impl RoomDraft {
    /// Empty form for a house, with the form's defaults
    pub fn for_house(house_id: HouseId) -> Self {
        Self {
            house_id,
            title: String::new(),
            description: String::new(),
            size: String::new(),
            kind: RoomKind::Simple,
            furnished: false,
            has_bathroom: false,
            price: 0.0,
            available: true,
        }
    }

    pub fn from_room(room: &Room) -> Self {
        Self {
            house_id: room.house_id,
            title: room.title.clone(),
            description: room.description.clone(),
            size: room.size.clone(),
            kind: room.kind.clone(),
            furnished: room.furnished,
            has_bathroom: room.has_bathroom,
            price: room.price,
            available: room.available,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_room(self).into_result()
    }
}

/// Partial update for a room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomPatch {
    #[serde(rename = "titre", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "taille", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RoomKind>,
    #[serde(rename = "meublee", skip_serializing_if = "Option::is_none")]
    pub furnished: Option<bool>,
    #[serde(rename = "salle_de_bain", skip_serializing_if = "Option::is_none")]
    pub has_bathroom: Option<bool>,
    #[serde(rename = "prix", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "disponible", skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl From<RoomDraft> for RoomPatch {
    fn from(draft: RoomDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            size: Some(draft.size),
            kind: Some(draft.kind),
            furnished: Some(draft.furnished),
            has_bathroom: Some(draft.has_bathroom),
            price: Some(draft.price),
            available: Some(draft.available),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_room_from_server() {
        let room: Room = serde_json::from_value(json!({
            "id": 12,
            "maison": 3,
            "titre": "Chambre lumineuse",
            "description": "Vue sur cour",
            "taille": "20",
            "type": "simple",
            "meublee": true,
            "salle_de_bain": false,
            "prix": "35000.00",
            "disponible": true
        }))
        .unwrap();

        assert_eq!(room.house_id, 3);
        assert_eq!(room.kind, RoomKind::Simple);
        assert_eq!(room.price, 35000.0);
        assert!(room.furnished);
        assert!(room.available);
    }

    #[test]
    fn test_unknown_room_type_survives() {
        let room: Room = serde_json::from_value(json!({
            "id": 1, "maison": 1, "titre": "Studio", "taille": 18,
            "type": "studio", "prix": 10
        }))
        .unwrap();
        assert_eq!(room.kind, RoomKind::Other("studio".to_string()));
        assert_eq!(room.size, "18");
    }

    #[test]
    fn test_draft_serializes_wire_names() {
        let mut draft = RoomDraft::for_house(5);
        draft.title = "Suite".to_string();
        draft.kind = RoomKind::Appartement;
        draft.price = 50000.0;

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["maison"], 5);
        assert_eq!(value["titre"], "Suite");
        assert_eq!(value["type"], "appartement");
        assert_eq!(value["disponible"], true);
    }

    #[test]
    fn test_patch_from_draft_sets_everything() {
        let patch = RoomPatch::from(RoomDraft::for_house(1));
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 8);
        assert!(value.get("maison").is_none());
    }
}
