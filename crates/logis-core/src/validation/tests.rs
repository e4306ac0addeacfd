use super::*;
use crate::models::{RoomKind, HouseDraft, Registration, RoomDraft};
use crate::role::Role;

fn registration() -> Registration {
    Registration {
        email: "awa@example.com".to_string(),
        username: "awa".to_string(),
        first_name: "Awa".to_string(),
        last_name: "Ndiaye".to_string(),
        telephone: "770000000".to_string(),
        cni: "SN-123".to_string(),
        role: Role::Locataire,
        password: "secret1".to_string(),
        password_confirmation: "secret1".to_string(),
    }
}

fn house() -> HouseDraft {
    HouseDraft {
        address: "Rue 10, Dakar".to_string(),
        latitude: "14.6937".to_string(),
        longitude: "-17.4441".to_string(),
        description: "Maison de deux étages".to_string(),
    }
}

fn room() -> RoomDraft {
    RoomDraft {
        title: "Chambre A".to_string(),
        description: "Claire".to_string(),
        size: "16".to_string(),
        price: 30000.0,
        ..RoomDraft::for_house(1)
    }
}

fn contract_form() -> ContractForm {
    ContractForm {
        start_date: "2025-01-01".to_string(),
        end_date: "2025-06-30".to_string(),
        payment_mode: "virement".to_string(),
        periodicity: "mensuel".to_string(),
        deposit: "60000".to_string(),
    }
}

#[test]
fn test_valid_registration() {
    assert!(validate_registration(&registration()).is_empty());
    assert!(registration().validate().is_ok());
}

#[test]
fn test_registration_field_errors() {
    let form = Registration {
        email: "not-an-email".to_string(),
        username: "  ".to_string(),
        telephone: "12ab".to_string(),
        role: Role::Other(String::new()),
        password: "abc".to_string(),
        password_confirmation: "abd".to_string(),
        ..registration()
    };

    let errors = validate_registration(&form);
    assert!(errors.get("email").is_some());
    assert!(errors.get("username").is_some());
    assert!(errors.get("telephone").is_some());
    assert!(errors.get("role").is_some());
    assert!(errors.get("password").is_some());
    assert!(errors.get("password_confirmation").is_some());
    assert!(errors.get("first_name").is_none());
    assert_eq!(errors.len(), 6);
}

#[test]
fn test_phone_length_bounds() {
    let short = Registration {
        telephone: "1234567".to_string(),
        ..registration()
    };
    let long = Registration {
        telephone: "1234567890123456".to_string(),
        ..registration()
    };
    assert!(validate_registration(&short).get("telephone").is_some());
    assert!(validate_registration(&long).get("telephone").is_some());
}

#[test]
fn test_valid_house() {
    assert!(validate_house(&house()).is_empty());
}

#[test]
fn test_house_coordinates_out_of_range() {
    let draft = HouseDraft {
        latitude: "91".to_string(),
        longitude: "east".to_string(),
        ..house()
    };
    let errors = validate_house(&draft);
    assert!(errors.get("latitude").unwrap().contains("between -90 and 90"));
    assert!(errors.get("longitude").unwrap().contains("between -180 and 180"));
}

#[test]
fn test_house_required_fields_and_short_description() {
    let draft = HouseDraft {
        address: String::new(),
        latitude: " ".to_string(),
        longitude: String::new(),
        description: "Petite".to_string(),
    };
    let errors = validate_house(&draft);
    assert_eq!(errors.get("adresse"), Some("address is required"));
    assert_eq!(errors.get("latitude"), Some("latitude is required"));
    assert_eq!(errors.get("longitude"), Some("longitude is required"));
    assert!(errors.get("description").unwrap().contains("at least 10"));
}

#[test]
fn test_house_validation_error_display() {
    let draft = HouseDraft {
        address: String::new(),
        ..house()
    };
    let err = draft.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation failed: adresse: address is required"
    );
}

#[test]
fn test_room_rules() {
    assert!(validate_room(&room()).is_empty());

    let draft = RoomDraft {
        title: String::new(),
        size: " ".to_string(),
        kind: RoomKind::Other(String::new()),
        price: 0.0,
        ..room()
    };
    let errors = validate_room(&draft);
    assert!(errors.get("titre").is_some());
    assert!(errors.get("taille").is_some());
    assert!(errors.get("type").is_some());
    assert!(errors.get("prix").is_some());
    assert!(errors.get("description").is_none());

    let nan_price = RoomDraft {
        price: f64::NAN,
        ..room()
    };
    assert!(validate_room(&nan_price).get("prix").is_some());
}

#[test]
fn test_contract_form_builds_draft() {
    let draft = contract_form().into_draft(42).unwrap();
    assert_eq!(draft.room, 42);
    assert_eq!(draft.payment_mode, PaymentMode::Virement);
    assert_eq!(draft.periodicity, Periodicity::Mensuel);
    assert_eq!(draft.deposit, 60000.0);
}

#[test]
fn test_contract_form_missing_fields_reported_alone() {
    let form = ContractForm {
        end_date: "2024-01-01".to_string(),
        periodicity: String::new(),
        ..contract_form()
    };
    match form.into_draft(1) {
        Err(Error::Validation(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get("periodicite"), Some("all fields are required"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_contract_end_must_follow_start() {
    let same_day = ContractForm {
        end_date: "2025-01-01".to_string(),
        ..contract_form()
    };
    match same_day.into_draft(1) {
        Err(Error::Validation(errors)) => {
            assert_eq!(
                errors.get("date_fin"),
                Some("end date must be after start date")
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_contract_deposit_and_choices() {
    let form = ContractForm {
        deposit: "-5".to_string(),
        payment_mode: "cheque".to_string(),
        start_date: "01/02/2025".to_string(),
        ..contract_form()
    };
    match form.into_draft(1) {
        Err(Error::Validation(errors)) => {
            assert!(errors.get("montant_caution").is_some());
            assert!(errors.get("mode_paiement").unwrap().contains("cash"));
            assert!(errors.get("date_debut").unwrap().contains("YYYY-MM-DD"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_field_errors_keep_first_message() {
    let mut errors = FieldErrors::new();
    errors.add("x", "first");
    errors.add("x", "second");
    errors.add("y", "other");
    assert_eq!(errors.get("x"), Some("first"));
    assert_eq!(errors.to_string(), "x: first; y: other");
    assert_eq!(errors.iter().count(), 2);
}
