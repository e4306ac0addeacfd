use crate::{
    Result, de,
    models::{HouseId, RoomId},
    validation,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ContractId = u64;

wire_enum! {
    /// Lease status, owned by the server
    ///
    /// Transitions (en_cours → signe/annule → termine) happen server-side only.
    ContractStatus, "contract status" {
        EnCours => "en_cours",
        Signe => "signe",
        Annule => "annule",
        Termine => "termine",
    }
}

impl ContractStatus {
    /// Only contracts still being drafted can be cancelled from the client
    pub fn is_cancellable(&self) -> bool {
        matches!(self, ContractStatus::EnCours)
    }
}

wire_enum! {
    PaymentMode, "payment mode" {
        Cash => "cash",
        Virement => "virement",
        MobileMoney => "mobile money",
    }
}

wire_enum! {
    /// How often rent is paid
    Periodicity, "periodicity" {
        Journalier => "journalier",
        Hebdomadaire => "hebdomadaire",
        Mensuel => "mensuel",
    }
}

/// Tenant details attached to contracts the owner can see
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// A lease contract binding a tenant to a room
///
/// The server has shipped two shapes of this resource: the deposit appears as
/// either `caution` or `montant_caution`, and `locataire_info` is only present
/// in the newer one. Both are accepted, and `montant_caution` wins when a
/// payload carries both keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ContractRepr")]
pub struct Contract {
    pub id: ContractId,

    #[serde(rename = "chambre")]
    pub room_id: RoomId,

    #[serde(rename = "maison", skip_serializing_if = "Option::is_none")]
    pub house_id: Option<HouseId>,

    #[serde(rename = "date_debut")]
    pub start_date: NaiveDate,

    #[serde(rename = "date_fin")]
    pub end_date: NaiveDate,

    #[serde(rename = "loyer", skip_serializing_if = "Option::is_none")]
    pub rent: Option<f64>,

    #[serde(rename = "caution", skip_serializing_if = "Option::is_none")]
    pub deposit: Option<f64>,

    #[serde(rename = "mode_paiement")]
    pub payment_mode: PaymentMode,

    #[serde(rename = "periodicite", skip_serializing_if = "Option::is_none")]
    pub periodicity: Option<Periodicity>,

    #[serde(rename = "statut")]
    pub status: ContractStatus,

    #[serde(rename = "locataire_info", skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantInfo>,
}

/// Contract as received, with both deposit keys kept apart
#[derive(Deserialize)]
struct ContractRepr {
    id: ContractId,
    chambre: RoomId,
    #[serde(default)]
    maison: Option<HouseId>,
    date_debut: NaiveDate,
    date_fin: NaiveDate,
    #[serde(default, deserialize_with = "de::optional_number")]
    loyer: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_number")]
    caution: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_number")]
    montant_caution: Option<f64>,
    mode_paiement: PaymentMode,
    #[serde(default)]
    periodicite: Option<Periodicity>,
    statut: ContractStatus,
    #[serde(default)]
    locataire_info: Option<TenantInfo>,
}

impl From<ContractRepr> for Contract {
    fn from(repr: ContractRepr) -> Self {
        Self {
            id: repr.id,
            room_id: repr.chambre,
            house_id: repr.maison,
            start_date: repr.date_debut,
            end_date: repr.date_fin,
            rent: repr.loyer,
            deposit: repr.montant_caution.or(repr.caution),
            payment_mode: repr.mode_paiement,
            periodicity: repr.periodicite,
            status: repr.statut,
            tenant: repr.locataire_info,
        }
    }
}

impl Contract {
    /// Lease length in days
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Create payload for a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDraft {
    #[serde(rename = "chambre")]
    pub room: RoomId,
    #[serde(rename = "date_debut")]
    pub start_date: NaiveDate,
    #[serde(rename = "date_fin")]
    pub end_date: NaiveDate,
    #[serde(rename = "mode_paiement")]
    pub payment_mode: PaymentMode,
    #[serde(rename = "periodicite")]
    pub periodicity: Periodicity,
    #[serde(rename = "montant_caution")]
    pub deposit: f64,
}

/// Raw rental form input, before parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractForm {
    pub start_date: String,
    pub end_date: String,
    pub payment_mode: String,
    pub periodicity: String,
    pub deposit: String,
}

impl ContractForm {
    /// Validate the form and build the payload for `room`
    pub fn into_draft(&self, room: RoomId) -> Result<ContractDraft> {
        validation::parse_contract_form(self, room)
    }
}

/// Partial update for a contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractPatch {
    #[serde(rename = "date_debut", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "date_fin", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "mode_paiement", skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<PaymentMode>,
    #[serde(rename = "periodicite", skip_serializing_if = "Option::is_none")]
    pub periodicity: Option<Periodicity>,
    #[serde(rename = "montant_caution", skip_serializing_if = "Option::is_none")]
    pub deposit: Option<f64>,
}

impl ContractPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
