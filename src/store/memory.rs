use async_trait::async_trait;
use jiff::{Timestamp, civil::Date};
use tokio::sync::Mutex;
use tracing::debug;

use super::{CINEMA_NOT_FOUND, CONFLICT_MESSAGE, FILM_NOT_FOUND, Store};
use crate::{
    error::{AppError, AppResult},
    models::{
        Cinema, CinemaPatch, Film, FilmPatch, NewCinema, NewFilm, NewProgrammation,
        NewScreening, Programmation, Screening, Seance, sort_seances,
    },
    schedule,
};

/// Volatile store. All state sits behind one lock, so every trait call is
/// atomic with respect to the others.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    films: Vec<Film>,
    screenings: Vec<Screening>,
    cinemas: Vec<Cinema>,
    programmations: Vec<ProgrammationRecord>,
    ids: Counters,
}

#[derive(Default)]
struct Counters {
    film: i32,
    screening: i32,
    cinema: i32,
    programmation: i32,
    seance: i32,
}

fn next(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

struct ProgrammationRecord {
    id: i32,
    film_id: i32,
    cinema_id: i32,
    start_date: Date,
    end_date: Date,
    seances: Vec<Seance>,
}

impl Inner {
    fn resolve(&self, record: &ProgrammationRecord) -> AppResult<Programmation> {
        let film = self.films.iter().find(|f| f.id == record.film_id);
        let cinema = self.cinemas.iter().find(|c| c.id == record.cinema_id);
        let (Some(film), Some(cinema)) = (film, cinema) else {
            let msg = format!("programmation {} has dangling references", record.id);
            return Err(anyhow::anyhow!(msg).into());
        };
        let mut seances = record.seances.clone();
        sort_seances(&mut seances);
        Ok(Programmation {
            id: record.id,
            film_id: film.id,
            film_title: film.title.clone(),
            cinema_id: cinema.id,
            cinema_name: cinema.name.clone(),
            start_date: record.start_date,
            end_date: record.end_date,
            seances,
        })
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_film(&self, film: NewFilm) -> AppResult<Film> {
        let mut inner = self.inner.lock().await;
        let id = next(&mut inner.ids.film);
        let film = film.into_film(id, Timestamp::now());
        inner.films.push(film.clone());
        debug!(film_id = id, "film created");
        Ok(film)
    }

    async fn list_films(&self) -> AppResult<Vec<Film>> {
        Ok(self.inner.lock().await.films.clone())
    }

    async fn find_film(&self, id: i32) -> AppResult<Option<Film>> {
        Ok(self.inner.lock().await.films.iter().find(|f| f.id == id).cloned())
    }

    async fn update_film(&self, id: i32, patch: FilmPatch) -> AppResult<Option<Film>> {
        let mut inner = self.inner.lock().await;
        let Some(film) = inner.films.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        patch.apply(film, Timestamp::now());
        debug!(film_id = id, "film updated");
        Ok(Some(film.clone()))
    }

    async fn delete_film(&self, id: i32) -> AppResult<bool> {
        let mut inner = self.inner.lock().await;
        let Some(pos) = inner.films.iter().position(|f| f.id == id) else {
            return Ok(false);
        };
        inner.screenings.retain(|s| s.film_id != id);
        inner.programmations.retain(|p| p.film_id != id);
        inner.films.remove(pos);
        debug!(film_id = id, "film deleted");
        Ok(true)
    }

    async fn schedule_screening(
        &self,
        film_id: i32,
        screening: NewScreening,
    ) -> AppResult<Screening> {
        let mut inner = self.inner.lock().await;
        if !inner.films.iter().any(|f| f.id == film_id) {
            return Err(AppError::not_found(FILM_NOT_FOUND));
        }
        let taken = inner.screenings.iter().any(|s| {
            s.room_id == screening.room_id && schedule::conflicts(s.starts_at, screening.starts_at)
        });
        if taken {
            return Err(AppError::conflict(CONFLICT_MESSAGE));
        }
        let id = next(&mut inner.ids.screening);
        let screening = screening.into_screening(id, film_id, Timestamp::now());
        inner.screenings.push(screening.clone());
        debug!(film_id, screening_id = id, room_id = screening.room_id, "screening scheduled");
        Ok(screening)
    }

    async fn list_screenings(&self, film_id: i32) -> AppResult<Vec<Screening>> {
        let inner = self.inner.lock().await;
        Ok(inner.screenings.iter().filter(|s| s.film_id == film_id).cloned().collect())
    }

    async fn create_cinema(&self, cinema: NewCinema) -> AppResult<Cinema> {
        let mut inner = self.inner.lock().await;
        let id = next(&mut inner.ids.cinema);
        let cinema =
            Cinema { id, name: cinema.name, rating: cinema.rating, address: cinema.address };
        inner.cinemas.push(cinema.clone());
        debug!(cinema_id = id, "cinema created");
        Ok(cinema)
    }

    async fn list_cinemas(&self) -> AppResult<Vec<Cinema>> {
        Ok(self.inner.lock().await.cinemas.clone())
    }

    async fn find_cinema(&self, id: i32) -> AppResult<Option<Cinema>> {
        Ok(self.inner.lock().await.cinemas.iter().find(|c| c.id == id).cloned())
    }

    async fn update_cinema(&self, id: i32, patch: CinemaPatch) -> AppResult<Option<Cinema>> {
        let mut inner = self.inner.lock().await;
        let Some(cinema) = inner.cinemas.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        patch.apply(cinema);
        Ok(Some(cinema.clone()))
    }

    async fn delete_cinema(&self, id: i32) -> AppResult<bool> {
        let mut inner = self.inner.lock().await;
        let Some(pos) = inner.cinemas.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        inner.programmations.retain(|p| p.cinema_id != id);
        inner.cinemas.remove(pos);
        debug!(cinema_id = id, "cinema deleted");
        Ok(true)
    }

    async fn create_programmation(
        &self,
        programmation: NewProgrammation,
    ) -> AppResult<Programmation> {
        let mut inner = self.inner.lock().await;
        if !inner.films.iter().any(|f| f.id == programmation.film_id) {
            return Err(AppError::not_found(FILM_NOT_FOUND));
        }
        if !inner.cinemas.iter().any(|c| c.id == programmation.cinema_id) {
            return Err(AppError::not_found(CINEMA_NOT_FOUND));
        }

        let id = next(&mut inner.ids.programmation);
        let mut seances = Vec::with_capacity(programmation.seances.len());
        for seance in programmation.seances {
            let seance_id = next(&mut inner.ids.seance);
            seances.push(Seance { id: seance_id, day: seance.day, time: seance.time });
        }
        let record = ProgrammationRecord {
            id,
            film_id: programmation.film_id,
            cinema_id: programmation.cinema_id,
            start_date: programmation.start_date,
            end_date: programmation.end_date,
            seances,
        };
        let out = inner.resolve(&record)?;
        inner.programmations.push(record);
        debug!(programmation_id = id, "programmation created");
        Ok(out)
    }

    async fn list_programmations(&self) -> AppResult<Vec<Programmation>> {
        let inner = self.inner.lock().await;
        inner.programmations.iter().map(|p| inner.resolve(p)).collect()
    }

    async fn delete_programmation(&self, id: i32) -> AppResult<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.programmations.len();
        inner.programmations.retain(|p| p.id != id);
        Ok(inner.programmations.len() != before)
    }
}
