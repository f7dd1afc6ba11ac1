mod common;

use common::{animal_params, date, insemination_params, start};
use herd_ledger::error::{ErrorKind, LedgerError};
use herd_ledger::lifecycle::ERRONEOUS_ENTRY;
use herd_ledger::model::{
    AnimalCreate, AnimalDeletion, AnimalId, AnimalUpdate, Availability, BullDeletion,
    EnclosureCreate, InventoryDeletion, InventoryKind, LifeState, RecordStatus, VitalState,
};

#[tokio::test]
async fn erroneous_animal_is_removed_and_dependents_detached() {
    let herd = start();
    let bull = herd.bull("Atlas", 4).await;
    let calf = herd.calf("Lucera", bull.id).await;
    let item = herd.item("Treatment A", InventoryKind::Treatment, 3).await;
    let administration = herd.administer(calf.id, &item, date(2024, 3, 1)).await;
    let insemination = herd
        .client()
        .inseminations
        .create_insemination(insemination_params(calf.id, bull.id))
        .await
        .unwrap();

    let outcome = herd
        .client()
        .animals
        .delete_animal(calf.id, AnimalDeletion::reason(ERRONEOUS_ENTRY))
        .await
        .unwrap();

    assert_eq!(outcome.status, RecordStatus::Removed);
    assert_eq!(outcome.code, calf.code);
    assert!(herd
        .client()
        .animals
        .get_animal(calf.id)
        .await
        .unwrap()
        .is_none());

    let administration = herd
        .client()
        .administrations
        .get_administration(administration.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(administration.animal, None);
    let insemination = herd
        .client()
        .inseminations
        .get_insemination(insemination.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(insemination.animal, None);
    assert_eq!(herd.units(item.id).await, 2);
    assert_eq!(herd.semen(bull.id).await, 3);
}

#[tokio::test]
async fn removing_a_dam_clears_offspring_links() {
    let herd = start();
    let bull = herd.bull("Atlas", 4).await;
    let calf = herd.calf("Lucera", bull.id).await;

    herd.client()
        .animals
        .delete_animal(herd.founder, AnimalDeletion::default())
        .await
        .unwrap();

    let calf = herd
        .client()
        .animals
        .get_animal(calf.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(calf.dam, None);
    assert_eq!(calf.sire, Some(bull.id));
}

#[tokio::test]
async fn sold_animal_is_retired_with_history_kept() {
    let herd = start();
    let item = herd.item("Treatment A", InventoryKind::Treatment, 3).await;
    let administration = herd.administer(herd.founder, &item, date(2024, 3, 1)).await;

    let outcome = herd
        .client()
        .animals
        .sell(herd.founder, date(2024, 6, 30))
        .await
        .unwrap();
    assert_eq!(outcome.status, RecordStatus::Retired);

    let founder = herd
        .client()
        .animals
        .get_animal(herd.founder)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(founder.life_state, LifeState::Sold);
    assert_eq!(founder.status, RecordStatus::Retired);
    assert_eq!(founder.removal_date, Some(date(2024, 6, 30)));
    assert_eq!(founder.enclosure, None);

    let administration = herd
        .client()
        .administrations
        .get_administration(administration.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(administration.animal, Some(herd.founder));
}

#[tokio::test]
async fn death_without_a_date_is_recorded_today() {
    let herd = start();

    herd.client()
        .animals
        .delete_animal(
            herd.founder,
            AnimalDeletion {
                reason: Some("Dead".into()),
                removal_date: None,
                note: Some("milk fever".into()),
            },
        )
        .await
        .unwrap();

    let founder = herd
        .client()
        .animals
        .get_animal(herd.founder)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(founder.life_state, LifeState::Dead);
    assert_eq!(founder.removal_date, Some(chrono::Local::now().date_naive()));
    assert_eq!(founder.note.as_deref(), Some("milk fever"));
}

#[tokio::test]
async fn retired_animal_cannot_be_retired_again() {
    let herd = start();
    herd.client()
        .animals
        .sell(herd.founder, date(2024, 6, 30))
        .await
        .unwrap();

    let err = herd
        .client()
        .animals
        .record_death(herd.founder, date(2024, 7, 1), None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::StateConsistencyError);
}

#[tokio::test]
async fn removal_before_birth_is_an_ordering_error() {
    let herd = start();

    let err = herd
        .client()
        .animals
        .sell(herd.founder, date(2010, 1, 1))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::Ordering {
            earlier: "birthDate",
            later: "removalDate"
        }
    );
}

#[tokio::test]
async fn unknown_reason_is_rejected_with_accepted_list() {
    let herd = start();

    let err = herd
        .client()
        .animals
        .delete_animal(herd.founder, AnimalDeletion::reason("stolen"))
        .await
        .unwrap_err();

    match err {
        LedgerError::InvalidReason { accepted, .. } => {
            assert_eq!(accepted, "erroneous entry, dead, sold");
        }
        other => panic!("Expected InvalidReason, got {other:?}"),
    }
}

#[tokio::test]
async fn occupied_enclosure_cannot_be_deleted() {
    let herd = start();

    let err = herd
        .client()
        .enclosures
        .delete_enclosure(herd.pen)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConflictError);

    let empty = herd
        .client()
        .enclosures
        .create_enclosure(EnclosureCreate {
            code: None,
            name: "Quarantine".into(),
        })
        .await
        .unwrap();
    assert_eq!(empty.code, "ENC-2");
    let outcome = herd
        .client()
        .enclosures
        .delete_enclosure(empty.id)
        .await
        .unwrap();
    assert_eq!(outcome.status, RecordStatus::Removed);
}

#[tokio::test]
async fn sold_animal_frees_its_enclosure() {
    let herd = start();
    herd.client()
        .animals
        .sell(herd.founder, date(2024, 6, 30))
        .await
        .unwrap();

    let outcome = herd
        .client()
        .enclosures
        .delete_enclosure(herd.pen)
        .await
        .unwrap();
    assert_eq!(outcome.status, RecordStatus::Removed);
}

#[tokio::test]
async fn animal_recorded_as_sold_does_not_occupy_its_pen() {
    let herd = start();
    let bull = herd.bull("Atlas", 2).await;
    let pen = herd
        .client()
        .enclosures
        .create_enclosure(EnclosureCreate {
            code: None,
            name: "Sale yard".into(),
        })
        .await
        .unwrap();

    let calf = herd
        .client()
        .animals
        .create_animal(AnimalCreate {
            life_state: Some(LifeState::Sold),
            removal_date: Some(date(2024, 1, 1)),
            ..animal_params("Lucera", bull.id, herd.founder, pen.id)
        })
        .await
        .unwrap();
    assert_eq!(calf.status, RecordStatus::Retired);
    assert_eq!(calf.enclosure, None);

    let outcome = herd
        .client()
        .enclosures
        .delete_enclosure(pen.id)
        .await
        .unwrap();
    assert_eq!(outcome.status, RecordStatus::Removed);
}

#[tokio::test]
async fn retiring_without_a_note_clears_the_previous_one() {
    let herd = start();
    herd.client()
        .animals
        .update_animal(
            herd.founder,
            AnimalUpdate {
                note: Some(Some("lame hind leg".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    herd.client()
        .animals
        .sell(herd.founder, date(2024, 6, 30))
        .await
        .unwrap();

    let founder = herd
        .client()
        .animals
        .get_animal(herd.founder)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(founder.note, None);
}

#[tokio::test]
async fn deceased_bull_is_retired_and_keeps_offspring() {
    let herd = start();
    let bull = herd.bull("Atlas", 2).await;
    let calf = herd.calf("Lucera", bull.id).await;

    let outcome = herd
        .client()
        .bulls
        .delete_bull(bull.id, BullDeletion::reason("deceased"))
        .await
        .unwrap();
    assert_eq!(outcome.status, RecordStatus::Retired);

    let bull = herd.client().bulls.get_bull(bull.id).await.unwrap().unwrap();
    assert_eq!(bull.vital_state, VitalState::Deceased);
    let calf = herd
        .client()
        .animals
        .get_animal(calf.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(calf.sire, Some(bull.id));
}

#[tokio::test]
async fn erroneous_bull_is_removed_and_detached() {
    let herd = start();
    let bull = herd.bull("Atlas", 2).await;
    let calf = herd.calf("Lucera", bull.id).await;
    let insemination = herd
        .client()
        .inseminations
        .create_insemination(insemination_params(herd.founder, bull.id))
        .await
        .unwrap();

    let outcome = herd
        .client()
        .bulls
        .delete_bull(bull.id, BullDeletion::default())
        .await
        .unwrap();
    assert_eq!(outcome.status, RecordStatus::Removed);

    let insemination = herd
        .client()
        .inseminations
        .get_insemination(insemination.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(insemination.bull, None);
    let calf = herd
        .client()
        .animals
        .get_animal(calf.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(calf.sire, None);
}

#[tokio::test]
async fn referenced_item_cannot_be_erased_but_can_be_deactivated() {
    let herd = start();
    let item = herd.item("Treatment A", InventoryKind::Treatment, 3).await;
    let administration = herd.administer(herd.founder, &item, date(2024, 3, 1)).await;

    let err = herd
        .client()
        .inventory
        .delete_inventory_item(item.id, InventoryDeletion::reason(ERRONEOUS_ENTRY))
        .await
        .unwrap_err();
    match &err {
        LedgerError::Conflict { message, .. } => assert!(message.contains(&administration.code)),
        other => panic!("Expected Conflict, got {other:?}"),
    }

    let outcome = herd
        .client()
        .inventory
        .delete_inventory_item(item.id, InventoryDeletion::reason("inactive"))
        .await
        .unwrap();
    assert_eq!(outcome.status, RecordStatus::Retired);
    let item = herd
        .client()
        .inventory
        .get_inventory_item(item.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.availability, Availability::Inactive);
    assert_eq!(item.unit_count, 2);
}

#[tokio::test]
async fn unreferenced_item_is_removed() {
    let herd = start();
    let item = herd.item("Never used", InventoryKind::Vaccine, 3).await;

    let outcome = herd
        .client()
        .inventory
        .delete_inventory_item(item.id, InventoryDeletion::default())
        .await
        .unwrap();

    assert_eq!(outcome.status, RecordStatus::Removed);
    assert!(herd
        .client()
        .inventory
        .list_inventory_items()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn deleting_a_missing_record_is_not_found() {
    let herd = start();

    let err = herd
        .client()
        .animals
        .delete_animal(AnimalId(99), AnimalDeletion::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFoundError);
}

#[tokio::test]
async fn shutdown_completes_after_requests() {
    let herd = start();
    herd.bull("Atlas", 1).await;

    herd.system.shutdown().await.unwrap();
}
