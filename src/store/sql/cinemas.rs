use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::schedules;
use crate::{
    entities::{adresse, cinema, projeter},
    error::AppResult,
    models::{Address, Cinema, CinemaPatch, NewCinema},
};

fn to_cinema(model: cinema::Model, address: Option<adresse::Model>) -> AppResult<Cinema> {
    let Some(address) = address else {
        return Err(anyhow::anyhow!("cinema {} has no address row", model.id).into());
    };
    Ok(Cinema {
        id: model.id,
        name: model.nom,
        rating: model.note,
        address: Address {
            number: address.numero,
            street: address.rue,
            city: address.ville,
            postal_code: address.code_postal,
        },
    })
}

pub(super) async fn create(db: &DatabaseConnection, new: NewCinema) -> AppResult<Cinema> {
    let txn = db.begin().await?;
    let address = adresse::ActiveModel {
        id: NotSet,
        numero: Set(new.address.number.clone()),
        rue: Set(new.address.street.clone()),
        ville: Set(new.address.city.clone()),
        code_postal: Set(new.address.postal_code.clone()),
    }
    .insert(&txn)
    .await?;

    let model = cinema::ActiveModel {
        id: NotSet,
        nom: Set(new.name),
        note: Set(new.rating),
        adresse_id: Set(address.id),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    debug!(cinema_id = model.id, "cinema created");
    to_cinema(model, Some(address))
}

pub(super) async fn list(db: &DatabaseConnection) -> AppResult<Vec<Cinema>> {
    cinema::Entity::find()
        .find_also_related(adresse::Entity)
        .order_by_asc(cinema::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|(model, address)| to_cinema(model, address))
        .collect()
}

pub(super) async fn find(db: &DatabaseConnection, id: i32) -> AppResult<Option<Cinema>> {
    cinema::Entity::find_by_id(id)
        .find_also_related(adresse::Entity)
        .one(db)
        .await?
        .map(|(model, address)| to_cinema(model, address))
        .transpose()
}

pub(super) async fn update(
    db: &DatabaseConnection,
    id: i32,
    patch: CinemaPatch,
) -> AppResult<Option<Cinema>> {
    let txn = db.begin().await?;
    let Some((model, Some(address))) =
        cinema::Entity::find_by_id(id).find_also_related(adresse::Entity).one(&txn).await?
    else {
        return Ok(None);
    };

    let mut updated = to_cinema(model.clone(), Some(address.clone()))?;
    patch.apply(&mut updated);

    let mut active: cinema::ActiveModel = model.into();
    active.nom = Set(updated.name.clone());
    active.note = Set(updated.rating);
    active.update(&txn).await?;

    let mut active: adresse::ActiveModel = address.into();
    active.numero = Set(updated.address.number.clone());
    active.rue = Set(updated.address.street.clone());
    active.ville = Set(updated.address.city.clone());
    active.code_postal = Set(updated.address.postal_code.clone());
    active.update(&txn).await?;

    txn.commit().await?;
    debug!(cinema_id = id, "cinema updated");
    Ok(Some(updated))
}

pub(super) async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
    let txn = db.begin().await?;
    let Some(model) = cinema::Entity::find_by_id(id).one(&txn).await? else {
        return Ok(false);
    };

    let programmation_ids: Vec<i32> = projeter::Entity::find()
        .filter(projeter::Column::CinemaId.eq(id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|link| link.programmation_id)
        .collect();
    schedules::purge_programmations(&txn, programmation_ids).await?;

    cinema::Entity::delete_by_id(id).exec(&txn).await?;
    adresse::Entity::delete_by_id(model.adresse_id).exec(&txn).await?;

    txn.commit().await?;
    debug!(cinema_id = id, "cinema deleted");
    Ok(true)
}
