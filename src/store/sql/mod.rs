use async_trait::async_trait;
use jiff::Timestamp;
use sea_orm::DatabaseConnection;

use super::Store;
use crate::{
    error::AppResult,
    models::{
        Cinema, CinemaPatch, Film, FilmPatch, NewCinema, NewFilm, NewProgrammation,
        NewScreening, Programmation, Screening,
    },
};

mod cinemas;
mod films;
mod schedules;

/// Relational store over the migrated schema. Every multi-statement write runs
/// inside one transaction.
#[derive(Clone)]
pub struct SqlStore {
    db: DatabaseConnection,
}

impl SqlStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Timestamps are persisted with second precision; truncate up front so the
/// value returned on creation matches later reads.
fn now() -> AppResult<Timestamp> {
    Ok(Timestamp::from_second(Timestamp::now().as_second())?)
}

#[async_trait]
impl Store for SqlStore {
    async fn create_film(&self, film: NewFilm) -> AppResult<Film> {
        films::create(&self.db, film).await
    }

    async fn list_films(&self) -> AppResult<Vec<Film>> {
        films::list(&self.db).await
    }

    async fn find_film(&self, id: i32) -> AppResult<Option<Film>> {
        films::find(&self.db, id).await
    }

    async fn update_film(&self, id: i32, patch: FilmPatch) -> AppResult<Option<Film>> {
        films::update(&self.db, id, patch).await
    }

    async fn delete_film(&self, id: i32) -> AppResult<bool> {
        films::delete(&self.db, id).await
    }

    async fn schedule_screening(
        &self,
        film_id: i32,
        screening: NewScreening,
    ) -> AppResult<Screening> {
        schedules::schedule_screening(&self.db, film_id, screening).await
    }

    async fn list_screenings(&self, film_id: i32) -> AppResult<Vec<Screening>> {
        schedules::list_screenings(&self.db, film_id).await
    }

    async fn create_cinema(&self, cinema: NewCinema) -> AppResult<Cinema> {
        cinemas::create(&self.db, cinema).await
    }

    async fn list_cinemas(&self) -> AppResult<Vec<Cinema>> {
        cinemas::list(&self.db).await
    }

    async fn find_cinema(&self, id: i32) -> AppResult<Option<Cinema>> {
        cinemas::find(&self.db, id).await
    }

    async fn update_cinema(&self, id: i32, patch: CinemaPatch) -> AppResult<Option<Cinema>> {
        cinemas::update(&self.db, id, patch).await
    }

    async fn delete_cinema(&self, id: i32) -> AppResult<bool> {
        cinemas::delete(&self.db, id).await
    }

    async fn create_programmation(
        &self,
        programmation: NewProgrammation,
    ) -> AppResult<Programmation> {
        schedules::create_programmation(&self.db, programmation).await
    }

    async fn list_programmations(&self) -> AppResult<Vec<Programmation>> {
        schedules::list_programmations(&self.db).await
    }

    async fn delete_programmation(&self, id: i32) -> AppResult<bool> {
        schedules::delete_programmation(&self.db, id).await
    }
}
