use std::collections::HashMap;

use jiff::{Timestamp, civil::Date};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::debug;

use super::now;
use crate::{
    entities::{cinema, film, programmation, programmer, projeter, seance, seance_salle},
    error::{AppError, AppResult},
    models::{
        NewProgrammation, NewScreening, Programmation, SCREENING_STATUS, Screening, Seance, Tariffs,
        sort_seances,
    },
    schedule::{self, CONFLICT_WINDOW, Weekday},
    store::{CINEMA_NOT_FOUND, CONFLICT_MESSAGE, FILM_NOT_FOUND},
};

fn to_screening(model: seance_salle::Model) -> AppResult<Screening> {
    Ok(Screening {
        id: model.id,
        film_id: model.film_id,
        room_id: model.salle_id,
        date_heure: model.date_heure,
        starts_at: Timestamp::from_second(model.debut)?,
        tariffs: Tariffs {
            normal: model.tarif_normal,
            reduced: model.tarif_reduit,
            child: model.tarif_enfant,
        },
        seats_available: model.places_disponibles,
        seats_reserved: model.places_reservees,
        version: model.version,
        quality: model.qualite,
        kind: model.type_seance,
        status: model.statut,
        created_at: Timestamp::from_second(model.date_creation)?,
    })
}

/// Screenings of `room_id` around `start`. The rows (and on MySQL the index gap)
/// stay locked until the transaction ends, so two writers cannot both pass the
/// check.
fn same_room_window(room_id: i32, start: i64) -> Select<seance_salle::Entity> {
    let window = CONFLICT_WINDOW.as_secs();
    seance_salle::Entity::find()
        .filter(seance_salle::Column::SalleId.eq(room_id))
        .filter(seance_salle::Column::Debut.between(start - window, start + window))
        .lock_exclusive()
}

pub(super) async fn schedule_screening(
    db: &DatabaseConnection,
    film_id: i32,
    new: NewScreening,
) -> AppResult<Screening> {
    let created_at = now()?;
    let txn = db.begin().await?;
    if film::Entity::find_by_id(film_id).one(&txn).await?.is_none() {
        return Err(AppError::not_found(FILM_NOT_FOUND));
    }

    let start = new.starts_at.as_second();
    let nearby = same_room_window(new.room_id, start).all(&txn).await?;
    for other in nearby {
        if schedule::conflicts(Timestamp::from_second(other.debut)?, new.starts_at) {
            debug!(film_id, room_id = new.room_id, clashes_with = other.id, "room already taken");
            return Err(AppError::conflict(CONFLICT_MESSAGE));
        }
    }

    let model = seance_salle::ActiveModel {
        id: NotSet,
        film_id: Set(film_id),
        salle_id: Set(new.room_id),
        date_heure: Set(new.date_heure),
        debut: Set(start),
        tarif_normal: Set(new.tariffs.normal),
        tarif_reduit: Set(new.tariffs.reduced),
        tarif_enfant: Set(new.tariffs.child),
        places_disponibles: Set(new.seats_available),
        places_reservees: Set(0),
        version: Set(new.version),
        qualite: Set(new.quality),
        type_seance: Set(new.kind),
        statut: Set(SCREENING_STATUS.to_string()),
        date_creation: Set(created_at.as_second()),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    debug!(film_id, screening_id = model.id, room_id = model.salle_id, "screening scheduled");
    to_screening(model)
}

pub(super) async fn list_screenings(
    db: &DatabaseConnection,
    film_id: i32,
) -> AppResult<Vec<Screening>> {
    seance_salle::Entity::find()
        .filter(seance_salle::Column::FilmId.eq(film_id))
        .order_by_asc(seance_salle::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(to_screening)
        .collect()
}

fn to_seance(model: seance::Model) -> AppResult<Seance> {
    Ok(Seance { id: model.id, day: model.jour.parse::<Weekday>()?, time: model.heure })
}

pub(super) async fn create_programmation(
    db: &DatabaseConnection,
    new: NewProgrammation,
) -> AppResult<Programmation> {
    let txn = db.begin().await?;
    let Some(film) = film::Entity::find_by_id(new.film_id).one(&txn).await? else {
        return Err(AppError::not_found(FILM_NOT_FOUND));
    };
    let Some(cinema) = cinema::Entity::find_by_id(new.cinema_id).one(&txn).await? else {
        return Err(AppError::not_found(CINEMA_NOT_FOUND));
    };

    let model = programmation::ActiveModel {
        id: NotSet,
        date_debut: Set(new.start_date.to_string()),
        date_fin: Set(new.end_date.to_string()),
    }
    .insert(&txn)
    .await?;

    programmer::Entity::insert(programmer::ActiveModel {
        programmation_id: Set(model.id),
        film_id: Set(film.id),
    })
    .exec_without_returning(&txn)
    .await?;
    projeter::Entity::insert(projeter::ActiveModel {
        programmation_id: Set(model.id),
        cinema_id: Set(cinema.id),
    })
    .exec_without_returning(&txn)
    .await?;

    let mut seances = Vec::with_capacity(new.seances.len());
    for slot in new.seances {
        let row = seance::ActiveModel {
            id: NotSet,
            jour: Set(slot.day.as_str().to_string()),
            heure: Set(slot.time),
            programmation_id: Set(model.id),
        }
        .insert(&txn)
        .await?;
        seances.push(to_seance(row)?);
    }
    txn.commit().await?;
    sort_seances(&mut seances);

    debug!(programmation_id = model.id, "programmation created");
    Ok(Programmation {
        id: model.id,
        film_id: film.id,
        film_title: film.titre,
        cinema_id: cinema.id,
        cinema_name: cinema.nom,
        start_date: new.start_date,
        end_date: new.end_date,
        seances,
    })
}

pub(super) async fn list_programmations(db: &DatabaseConnection) -> AppResult<Vec<Programmation>> {
    let programmations =
        programmation::Entity::find().order_by_asc(programmation::Column::Id).all(db).await?;

    let films: HashMap<i32, i32> = programmer::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|link| (link.programmation_id, link.film_id))
        .collect();
    let cinemas: HashMap<i32, i32> = projeter::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|link| (link.programmation_id, link.cinema_id))
        .collect();

    let titles: HashMap<i32, String> = film::Entity::find()
        .select_only()
        .column(film::Column::Id)
        .column(film::Column::Titre)
        .into_tuple::<(i32, String)>()
        .all(db)
        .await?
        .into_iter()
        .collect();
    let names: HashMap<i32, String> = cinema::Entity::find()
        .select_only()
        .column(cinema::Column::Id)
        .column(cinema::Column::Nom)
        .into_tuple::<(i32, String)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let mut seances: HashMap<i32, Vec<Seance>> = HashMap::new();
    for row in seance::Entity::find().order_by_asc(seance::Column::Id).all(db).await? {
        let programmation_id = row.programmation_id;
        seances.entry(programmation_id).or_default().push(to_seance(row)?);
    }

    let mut out = Vec::with_capacity(programmations.len());
    for model in programmations {
        let film_id = films.get(&model.id).copied();
        let cinema_id = cinemas.get(&model.id).copied();
        let (Some(film_id), Some(cinema_id)) = (film_id, cinema_id) else {
            return Err(anyhow::anyhow!("programmation {} is missing a link", model.id).into());
        };
        let (Some(film_title), Some(cinema_name)) = (titles.get(&film_id), names.get(&cinema_id))
        else {
            let msg = format!("programmation {} has dangling references", model.id);
            return Err(anyhow::anyhow!(msg).into());
        };

        let mut slots = seances.remove(&model.id).unwrap_or_default();
        sort_seances(&mut slots);
        out.push(Programmation {
            id: model.id,
            film_id,
            film_title: film_title.clone(),
            cinema_id,
            cinema_name: cinema_name.clone(),
            start_date: model.date_debut.parse::<Date>()?,
            end_date: model.date_fin.parse::<Date>()?,
            seances: slots,
        });
    }
    Ok(out)
}

pub(super) async fn delete_programmation(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
    let txn = db.begin().await?;
    if programmation::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Ok(false);
    }
    purge_programmations(&txn, vec![id]).await?;
    txn.commit().await?;
    debug!(programmation_id = id, "programmation deleted");
    Ok(true)
}

/// Removes programmations along with their seances and links. Callers own the
/// transaction.
pub(super) async fn purge_programmations<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    seance::Entity::delete_many()
        .filter(seance::Column::ProgrammationId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    programmer::Entity::delete_many()
        .filter(programmer::Column::ProgrammationId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    projeter::Entity::delete_many()
        .filter(projeter::Column::ProgrammationId.is_in(ids.clone()))
        .exec(conn)
        .await?;
    programmation::Entity::delete_many()
        .filter(programmation::Column::Id.is_in(ids))
        .exec(conn)
        .await?;
    Ok(())
}
