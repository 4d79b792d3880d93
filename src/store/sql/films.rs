use std::collections::HashSet;

use futures::future::try_join_all;
use jiff::Timestamp;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::{now, schedules};
use crate::{
    entities::{acteur, film, jouer, programmer, realisateur, realiser, seance_salle},
    error::AppResult,
    models::{Film, FilmPatch, NewFilm},
};

pub(super) async fn create(db: &DatabaseConnection, new: NewFilm) -> AppResult<Film> {
    let created_at = now()?;
    let txn = db.begin().await?;

    let model = film::ActiveModel {
        id: NotSet,
        titre: Set(new.title.clone()),
        duree: Set(new.duration),
        langue: Set(new.language.clone()),
        synopsis: Set(new.synopsis.clone()),
        age_minimum: Set(new.minimum_age),
        classification: Set(new.classification.clone()),
        date_sortie: Set(new.release_date.clone()),
        poster: Set(new.poster.clone()),
        bande_annonce: Set(new.trailer.clone()),
        genres: Set(serde_json::to_string(&new.genre)?),
        statut: Set(crate::models::FILM_STATUS_ACTIVE.to_string()),
        date_creation: Set(created_at.as_second()),
        date_modification: Set(None),
    }
    .insert(&txn)
    .await?;

    link_directors(&txn, model.id, &new.directors).await?;
    link_cast(&txn, model.id, &new.cast).await?;
    txn.commit().await?;

    debug!(film_id = model.id, "film created");
    Ok(new.into_film(model.id, created_at))
}

pub(super) async fn list(db: &DatabaseConnection) -> AppResult<Vec<Film>> {
    let models = film::Entity::find().order_by_asc(film::Column::Id).all(db).await?;
    try_join_all(models.into_iter().map(|model| load(db, model))).await
}

pub(super) async fn find(db: &DatabaseConnection, id: i32) -> AppResult<Option<Film>> {
    match film::Entity::find_by_id(id).one(db).await? {
        Some(model) => Ok(Some(load(db, model).await?)),
        None => Ok(None),
    }
}

pub(super) async fn update(
    db: &DatabaseConnection,
    id: i32,
    patch: FilmPatch,
) -> AppResult<Option<Film>> {
    let txn = db.begin().await?;
    let Some(model) = film::Entity::find_by_id(id).one(&txn).await? else {
        return Ok(None);
    };

    let relink_directors = patch.directors.is_some();
    let relink_cast = patch.cast.is_some();
    let mut film = load(&txn, model.clone()).await?;
    patch.apply(&mut film, now()?);

    let mut active: film::ActiveModel = model.into();
    active.titre = Set(film.title.clone());
    active.duree = Set(film.duration);
    active.langue = Set(film.language.clone());
    active.synopsis = Set(film.synopsis.clone());
    active.age_minimum = Set(film.minimum_age);
    active.classification = Set(film.classification.clone());
    active.date_sortie = Set(film.release_date.clone());
    active.poster = Set(film.poster.clone());
    active.bande_annonce = Set(film.trailer.clone());
    active.genres = Set(serde_json::to_string(&film.genre)?);
    active.statut = Set(film.status.clone());
    active.date_modification = Set(film.updated_at.map(|t| t.as_second()));
    active.update(&txn).await?;

    if relink_directors {
        realiser::Entity::delete_many()
            .filter(realiser::Column::FilmId.eq(id))
            .exec(&txn)
            .await?;
        link_directors(&txn, id, &film.directors).await?;
    }
    if relink_cast {
        jouer::Entity::delete_many().filter(jouer::Column::FilmId.eq(id)).exec(&txn).await?;
        link_cast(&txn, id, &film.cast).await?;
    }

    txn.commit().await?;
    debug!(film_id = id, "film updated");
    Ok(Some(film))
}

pub(super) async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<bool> {
    let txn = db.begin().await?;
    if film::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Ok(false);
    }

    seance_salle::Entity::delete_many()
        .filter(seance_salle::Column::FilmId.eq(id))
        .exec(&txn)
        .await?;

    let programmation_ids: Vec<i32> = programmer::Entity::find()
        .filter(programmer::Column::FilmId.eq(id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|link| link.programmation_id)
        .collect();
    schedules::purge_programmations(&txn, programmation_ids).await?;

    realiser::Entity::delete_many().filter(realiser::Column::FilmId.eq(id)).exec(&txn).await?;
    jouer::Entity::delete_many().filter(jouer::Column::FilmId.eq(id)).exec(&txn).await?;
    film::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    debug!(film_id = id, "film deleted");
    Ok(true)
}

async fn load<C: ConnectionTrait>(conn: &C, model: film::Model) -> AppResult<Film> {
    let directors = realisateur::Entity::find()
        .inner_join(realiser::Entity)
        .filter(realiser::Column::FilmId.eq(model.id))
        .order_by_asc(realiser::Column::Position)
        .all(conn)
        .await?
        .into_iter()
        .map(|r| r.nom)
        .collect();

    let cast = acteur::Entity::find()
        .inner_join(jouer::Entity)
        .filter(jouer::Column::FilmId.eq(model.id))
        .order_by_asc(jouer::Column::Position)
        .all(conn)
        .await?
        .into_iter()
        .map(|a| a.nom)
        .collect();

    Ok(Film {
        id: model.id,
        title: model.titre,
        directors,
        genre: serde_json::from_str(&model.genres)?,
        language: model.langue,
        duration: model.duree,
        synopsis: model.synopsis,
        release_date: model.date_sortie,
        classification: model.classification,
        minimum_age: model.age_minimum,
        poster: model.poster,
        trailer: model.bande_annonce,
        cast,
        created_at: Timestamp::from_second(model.date_creation)?,
        updated_at: model.date_modification.map(Timestamp::from_second).transpose()?,
        status: model.statut,
    })
}

async fn link_directors<C: ConnectionTrait>(
    conn: &C,
    film_id: i32,
    names: &[String],
) -> AppResult<()> {
    let mut linked = HashSet::new();
    let mut links = Vec::with_capacity(names.len());
    for name in names {
        // Collations may fold case; only an identical name is the same person.
        let existing = realisateur::Entity::find()
            .filter(realisateur::Column::Nom.eq(name.as_str()))
            .all(conn)
            .await?
            .into_iter()
            .find(|r| r.nom == *name);
        let realisateur_id = match existing {
            Some(r) => r.id,
            None => {
                realisateur::ActiveModel { id: NotSet, nom: Set(name.clone()) }
                    .insert(conn)
                    .await?
                    .id
            },
        };
        if !linked.insert(realisateur_id) {
            continue;
        }
        links.push(realiser::ActiveModel {
            film_id: Set(film_id),
            realisateur_id: Set(realisateur_id),
            position: Set(links.len() as i32),
        });
    }

    if !links.is_empty() {
        realiser::Entity::insert_many(links).exec_without_returning(conn).await?;
    }
    Ok(())
}

async fn link_cast<C: ConnectionTrait>(conn: &C, film_id: i32, names: &[String]) -> AppResult<()> {
    let mut linked = HashSet::new();
    let mut links = Vec::with_capacity(names.len());
    for name in names {
        let existing = acteur::Entity::find()
            .filter(acteur::Column::Nom.eq(name.as_str()))
            .all(conn)
            .await?
            .into_iter()
            .find(|a| a.nom == *name);
        let acteur_id = match existing {
            Some(a) => a.id,
            None => {
                acteur::ActiveModel { id: NotSet, nom: Set(name.clone()) }.insert(conn).await?.id
            },
        };
        if !linked.insert(acteur_id) {
            continue;
        }
        links.push(jouer::ActiveModel {
            film_id: Set(film_id),
            acteur_id: Set(acteur_id),
            position: Set(links.len() as i32),
        });
    }

    if !links.is_empty() {
        jouer::Entity::insert_many(links).exec_without_returning(conn).await?;
    }
    Ok(())
}
