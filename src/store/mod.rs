use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{
        Cinema, CinemaPatch, Film, FilmPatch, NewCinema, NewFilm, NewProgrammation,
        NewScreening, Programmation, Screening,
    },
};

pub mod memory;
pub mod sql;

pub use memory::MemoryStore;
pub use sql::SqlStore;

pub(crate) const CONFLICT_MESSAGE: &str =
    "Conflit de programmation: la salle est déjà occupée à ce moment";
pub(crate) const FILM_NOT_FOUND: &str = "Film non trouvé";
pub(crate) const CINEMA_NOT_FOUND: &str = "Cinéma non trouvé";

#[async_trait]
pub trait Store: Send + Sync {
    async fn create_film(&self, film: NewFilm) -> AppResult<Film>;
    async fn list_films(&self) -> AppResult<Vec<Film>>;
    async fn find_film(&self, id: i32) -> AppResult<Option<Film>>;
    async fn update_film(&self, id: i32, patch: FilmPatch) -> AppResult<Option<Film>>;
    /// Also drops the film's screenings, programmations and credits.
    async fn delete_film(&self, id: i32) -> AppResult<bool>;

    /// Checks the room's conflict window and inserts in one step.
    async fn schedule_screening(&self, film_id: i32, screening: NewScreening)
    -> AppResult<Screening>;
    async fn list_screenings(&self, film_id: i32) -> AppResult<Vec<Screening>>;

    async fn create_cinema(&self, cinema: NewCinema) -> AppResult<Cinema>;
    async fn list_cinemas(&self) -> AppResult<Vec<Cinema>>;
    async fn find_cinema(&self, id: i32) -> AppResult<Option<Cinema>>;
    async fn update_cinema(&self, id: i32, patch: CinemaPatch) -> AppResult<Option<Cinema>>;
    /// Also drops the address and the programmations shown there.
    async fn delete_cinema(&self, id: i32) -> AppResult<bool>;

    async fn create_programmation(&self, programmation: NewProgrammation)
    -> AppResult<Programmation>;
    /// Seances come back ordered Monday → Sunday.
    async fn list_programmations(&self) -> AppResult<Vec<Programmation>>;
    async fn delete_programmation(&self, id: i32) -> AppResult<bool>;
}
