use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::{AppError, AppResult},
    schedule::{self, Weekday},
};

pub const DEFAULT_LANGUAGE: &str = "VF";
pub const FILM_STATUS_ACTIVE: &str = "actif";
pub const SCREENING_STATUS: &str = "programmee";
pub const DEFAULT_SEATS: i32 = 100;
pub const DEFAULT_VERSION: &str = "VF";
pub const DEFAULT_QUALITY: &str = "HD";
pub const DEFAULT_SCREENING_KIND: &str = "standard";

/// A JSON scalar the frontend may send either as a number or as a string.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Loose {
    Number(serde_json::Number),
    Text(String),
}

impl Loose {
    pub fn text(&self) -> String {
        match self {
            Loose::Number(n) => n.to_string(),
            Loose::Text(s) => s.trim().to_string(),
        }
    }

    /// Keeps only the digits, e.g. `"120 min"` → 120, `"-12"` → 12.
    pub fn digits(&self) -> Option<i32> {
        match self {
            Loose::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.abs() as u64)),
            Loose::Text(s) => {
                let digits: String = s.chars().filter(char::is_ascii_digit).collect();
                digits.parse().ok()
            },
        }
        .and_then(|n| i32::try_from(n).ok())
    }

    pub fn id(&self) -> Option<i32> {
        match self {
            Loose::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            Loose::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One name or a list of names. A single string is split on commas.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Names {
    One(String),
    Many(Vec<String>),
}

impl Names {
    pub fn into_list(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            Names::One(s) => s.split(',').map(str::to_string).collect(),
            Names::Many(v) => v,
        };
        let mut out: Vec<String> = Vec::with_capacity(raw.len());
        for name in raw {
            let name = name.trim();
            if !name.is_empty() && !out.iter().any(|n| n == name) {
                out.push(name.to_string());
            }
        }
        out
    }
}

fn join_names<S: Serializer>(names: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&names.join(", "))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// `?genre=` means no filter.
fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(non_blank(Option::<String>::deserialize(deserializer)?))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Film {
    pub id: i32,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "realisateur", serialize_with = "join_names")]
    pub directors: Vec<String>,
    pub genre: Vec<String>,
    #[serde(rename = "langue")]
    pub language: String,
    #[serde(rename = "duree")]
    pub duration: i32,
    pub synopsis: Option<String>,
    #[serde(rename = "dateSortie")]
    pub release_date: Option<String>,
    pub classification: Option<String>,
    #[serde(rename = "ageMinimum")]
    pub minimum_age: i32,
    pub poster: Option<String>,
    #[serde(rename = "bande_annonce")]
    pub trailer: Option<String>,
    #[serde(rename = "acteurs")]
    pub cast: Vec<String>,
    #[serde(rename = "dateCreation")]
    pub created_at: Timestamp,
    #[serde(rename = "dateModification", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(rename = "statut")]
    pub status: String,
}

/// Body of `POST /api/films` and `PUT /api/films/{id}`. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct FilmPayload {
    #[serde(rename = "titre")]
    pub title: Option<String>,
    #[serde(rename = "realisateur")]
    pub directors: Option<Names>,
    pub genre: Option<Names>,
    #[serde(rename = "langue")]
    pub language: Option<String>,
    #[serde(rename = "duree")]
    pub duration: Option<Loose>,
    pub synopsis: Option<String>,
    #[serde(rename = "dateSortie")]
    pub release_date: Option<String>,
    pub classification: Option<Loose>,
    pub poster: Option<String>,
    #[serde(rename = "bande_annonce")]
    pub trailer: Option<String>,
    #[serde(rename = "acteurs")]
    pub cast: Option<Names>,
    #[serde(rename = "statut")]
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewFilm {
    pub title: String,
    pub directors: Vec<String>,
    pub genre: Vec<String>,
    pub language: String,
    pub duration: i32,
    pub synopsis: Option<String>,
    pub release_date: Option<String>,
    pub classification: Option<String>,
    pub minimum_age: i32,
    pub poster: Option<String>,
    pub trailer: Option<String>,
    pub cast: Vec<String>,
}

impl NewFilm {
    pub fn into_film(self, id: i32, created_at: Timestamp) -> Film {
        Film {
            id,
            title: self.title,
            directors: self.directors,
            genre: self.genre,
            language: self.language,
            duration: self.duration,
            synopsis: self.synopsis,
            release_date: self.release_date,
            classification: self.classification,
            minimum_age: self.minimum_age,
            poster: self.poster,
            trailer: self.trailer,
            cast: self.cast,
            created_at,
            updated_at: None,
            status: FILM_STATUS_ACTIVE.to_string(),
        }
    }
}

/// Fields a `PUT` overwrites. `None` leaves the stored value alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilmPatch {
    pub title: Option<String>,
    pub directors: Option<Vec<String>>,
    pub genre: Option<Vec<String>>,
    pub language: Option<String>,
    pub duration: Option<i32>,
    pub synopsis: Option<String>,
    pub release_date: Option<String>,
    pub classification: Option<(String, i32)>,
    pub poster: Option<String>,
    pub trailer: Option<String>,
    pub cast: Option<Vec<String>>,
    pub status: Option<String>,
}

impl FilmPatch {
    pub fn apply(self, film: &mut Film, now: Timestamp) {
        if let Some(title) = self.title {
            film.title = title;
        }
        if let Some(directors) = self.directors {
            film.directors = directors;
        }
        if let Some(genre) = self.genre {
            film.genre = genre;
        }
        if let Some(language) = self.language {
            film.language = language;
        }
        if let Some(duration) = self.duration {
            film.duration = duration;
        }
        if self.synopsis.is_some() {
            film.synopsis = self.synopsis;
        }
        if self.release_date.is_some() {
            film.release_date = self.release_date;
        }
        if let Some((label, age)) = self.classification {
            film.classification = Some(label);
            film.minimum_age = age;
        }
        if self.poster.is_some() {
            film.poster = self.poster;
        }
        if self.trailer.is_some() {
            film.trailer = self.trailer;
        }
        if let Some(cast) = self.cast {
            film.cast = cast;
        }
        if let Some(status) = self.status {
            film.status = status;
        }
        film.updated_at = Some(now);
    }
}

const FILM_REQUIRED: &str = "Les champs titre, réalisateur et durée sont obligatoires";

impl FilmPayload {
    pub fn into_new_film(self) -> AppResult<NewFilm> {
        let title = non_blank(self.title);
        let directors = self.directors.map(Names::into_list).unwrap_or_default();
        let duration = self.duration.as_ref().and_then(Loose::digits);

        let (Some(title), Some(duration)) = (title, duration) else {
            return Err(AppError::validation(FILM_REQUIRED));
        };
        if directors.is_empty() {
            return Err(AppError::validation(FILM_REQUIRED));
        }

        let classification = self.classification.map(|c| c.text()).filter(|c| !c.is_empty());
        let minimum_age = minimum_age_of(classification.as_deref());

        Ok(NewFilm {
            title,
            directors,
            genre: self.genre.map(Names::into_list).unwrap_or_default(),
            language: non_blank(self.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            duration,
            synopsis: self.synopsis,
            release_date: non_blank(self.release_date),
            classification,
            minimum_age,
            poster: self.poster,
            trailer: self.trailer,
            cast: self.cast.map(Names::into_list).unwrap_or_default(),
        })
    }

    pub fn into_patch(self) -> AppResult<FilmPatch> {
        let title = match self.title {
            Some(t) if t.trim().is_empty() => {
                return Err(AppError::validation("Le titre ne peut pas être vide"));
            },
            other => other.map(|t| t.trim().to_string()),
        };
        let directors = match self.directors.map(Names::into_list) {
            Some(d) if d.is_empty() => {
                return Err(AppError::validation("Le réalisateur ne peut pas être vide"));
            },
            other => other,
        };
        let duration = match self.duration {
            Some(raw) => Some(
                raw.digits()
                    .ok_or_else(|| AppError::validation("La durée doit contenir un nombre"))?,
            ),
            None => None,
        };
        let classification = self.classification.map(|c| {
            let label = c.text();
            let age = minimum_age_of(Some(&label));
            (label, age)
        });

        Ok(FilmPatch {
            title,
            directors,
            genre: self.genre.map(Names::into_list),
            language: non_blank(self.language),
            duration,
            synopsis: self.synopsis,
            release_date: self.release_date,
            classification,
            poster: self.poster,
            trailer: self.trailer,
            cast: self.cast.map(Names::into_list),
            status: non_blank(self.status),
        })
    }
}

fn minimum_age_of(classification: Option<&str>) -> i32 {
    classification
        .and_then(|c| Loose::Text(c.to_string()).digits())
        .unwrap_or(0)
}

#[derive(Debug, Default, Deserialize)]
pub struct FilmFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub annee: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub realisateur: Option<String>,
}

impl FilmFilter {
    pub fn matches(&self, film: &Film) -> bool {
        if let Some(genre) = &self.genre {
            if !film.genre.iter().any(|g| g == genre) {
                return false;
            }
        }
        if let Some(year) = &self.annee {
            if !film.release_date.as_deref().is_some_and(|d| d.starts_with(year.as_str())) {
                return false;
            }
        }
        if let Some(director) = &self.realisateur {
            let needle = director.to_lowercase();
            if !film.directors.join(", ").to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Missing tiers fall back to the house prices.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tariffs {
    pub normal: f64,
    #[serde(rename = "reduit")]
    pub reduced: f64,
    #[serde(rename = "enfant")]
    pub child: f64,
}

impl Default for Tariffs {
    fn default() -> Self {
        Self { normal: 12.50, reduced: 9.50, child: 8.00 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Screening {
    pub id: i32,
    #[serde(rename = "filmId")]
    pub film_id: i32,
    #[serde(rename = "salleId")]
    pub room_id: i32,
    #[serde(rename = "dateHeure")]
    pub date_heure: String,
    #[serde(skip)]
    pub starts_at: Timestamp,
    #[serde(rename = "tarifs")]
    pub tariffs: Tariffs,
    #[serde(rename = "placesDisponibles")]
    pub seats_available: i32,
    #[serde(rename = "placesReservees")]
    pub seats_reserved: i32,
    pub version: String,
    #[serde(rename = "qualite")]
    pub quality: String,
    #[serde(rename = "typeSeance")]
    pub kind: String,
    #[serde(rename = "statut")]
    pub status: String,
    #[serde(rename = "dateCreation")]
    pub created_at: Timestamp,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScreeningRequest {
    #[serde(rename = "salleId")]
    pub room_id: Option<Loose>,
    #[serde(rename = "dateHeure")]
    pub date_heure: Option<String>,
    #[serde(rename = "tarifs")]
    pub tariffs: Option<Tariffs>,
    #[serde(rename = "placesDisponibles")]
    pub seats_available: Option<i32>,
    pub version: Option<String>,
    #[serde(rename = "qualite")]
    pub quality: Option<String>,
    #[serde(rename = "typeSeance")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewScreening {
    pub room_id: i32,
    pub date_heure: String,
    pub starts_at: Timestamp,
    pub tariffs: Tariffs,
    pub seats_available: i32,
    pub version: String,
    pub quality: String,
    pub kind: String,
}

impl NewScreening {
    pub fn into_screening(self, id: i32, film_id: i32, created_at: Timestamp) -> Screening {
        Screening {
            id,
            film_id,
            room_id: self.room_id,
            date_heure: self.date_heure,
            starts_at: self.starts_at,
            tariffs: self.tariffs,
            seats_available: self.seats_available,
            seats_reserved: 0,
            version: self.version,
            quality: self.quality,
            kind: self.kind,
            status: SCREENING_STATUS.to_string(),
            created_at,
        }
    }
}

impl ScreeningRequest {
    /// `fallback` is the batch-wide default pricing, if any.
    pub fn into_new(self, fallback: Option<Tariffs>) -> AppResult<NewScreening> {
        let date_heure = non_blank(self.date_heure);
        let (Some(room), Some(date_heure)) = (self.room_id, date_heure) else {
            return Err(AppError::validation(
                "Les champs salleId et dateHeure sont obligatoires",
            ));
        };
        let room_id = room
            .id()
            .ok_or_else(|| AppError::validation(format!("salleId invalide: {}", room.text())))?;
        let starts_at = schedule::parse_moment(&date_heure)?;

        Ok(NewScreening {
            room_id,
            date_heure,
            starts_at,
            tariffs: self.tariffs.or(fallback).unwrap_or_default(),
            seats_available: self.seats_available.filter(|n| *n > 0).unwrap_or(DEFAULT_SEATS),
            version: non_blank(self.version).unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            quality: non_blank(self.quality).unwrap_or_else(|| DEFAULT_QUALITY.to_string()),
            kind: non_blank(self.kind).unwrap_or_else(|| DEFAULT_SCREENING_KIND.to_string()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchRequest {
    pub seances: Option<Vec<ScreeningRequest>>,
    #[serde(rename = "tarifsDefaut")]
    pub default_tariffs: Option<Tariffs>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchError {
    pub index: usize,
    pub error: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScreeningFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Address {
    #[serde(rename = "numero")]
    pub number: Option<String>,
    #[serde(rename = "rue")]
    pub street: String,
    #[serde(rename = "ville")]
    pub city: String,
    #[serde(rename = "codePostal")]
    pub postal_code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cinema {
    pub id: i32,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "note")]
    pub rating: Option<f64>,
    #[serde(rename = "adresse")]
    pub address: Address,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddressPayload {
    #[serde(rename = "numero")]
    pub number: Option<Loose>,
    #[serde(rename = "rue")]
    pub street: Option<String>,
    #[serde(rename = "ville")]
    pub city: Option<String>,
    #[serde(rename = "codePostal")]
    pub postal_code: Option<Loose>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CinemaPayload {
    #[serde(rename = "nom")]
    pub name: Option<String>,
    #[serde(rename = "note")]
    pub rating: Option<f64>,
    #[serde(rename = "adresse")]
    pub address: Option<AddressPayload>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCinema {
    pub name: String,
    pub rating: Option<f64>,
    pub address: Address,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CinemaPatch {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub number: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

impl CinemaPatch {
    pub fn apply(self, cinema: &mut Cinema) {
        if let Some(name) = self.name {
            cinema.name = name;
        }
        if self.rating.is_some() {
            cinema.rating = self.rating;
        }
        if self.number.is_some() {
            cinema.address.number = self.number;
        }
        if let Some(street) = self.street {
            cinema.address.street = street;
        }
        if let Some(city) = self.city {
            cinema.address.city = city;
        }
        if let Some(postal_code) = self.postal_code {
            cinema.address.postal_code = postal_code;
        }
    }
}

impl CinemaPayload {
    pub fn into_new_cinema(self) -> AppResult<NewCinema> {
        let name = non_blank(self.name);
        let address = self.address.unwrap_or_default();
        let street = non_blank(address.street);
        let city = non_blank(address.city);
        let postal_code = address.postal_code.map(|p| p.text()).filter(|p| !p.is_empty());

        let (Some(name), Some(street), Some(city), Some(postal_code)) =
            (name, street, city, postal_code)
        else {
            return Err(AppError::validation(
                "Les champs nom et adresse (rue, ville, code postal) sont obligatoires",
            ));
        };

        Ok(NewCinema {
            name,
            rating: self.rating,
            address: Address {
                number: address.number.map(|n| n.text()).filter(|n| !n.is_empty()),
                street,
                city,
                postal_code,
            },
        })
    }

    pub fn into_patch(self) -> AppResult<CinemaPatch> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Le nom ne peut pas être vide"));
        }
        let address = self.address.unwrap_or_default();
        Ok(CinemaPatch {
            name: non_blank(self.name),
            rating: self.rating,
            number: address.number.map(|n| n.text()),
            street: non_blank(address.street),
            city: non_blank(address.city),
            postal_code: address.postal_code.map(|p| p.text()).filter(|p| !p.is_empty()),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Seance {
    pub id: i32,
    #[serde(rename = "jour")]
    pub day: Weekday,
    #[serde(rename = "heure")]
    pub time: String,
}

/// Sorts Monday → Sunday, then by start time.
pub fn sort_seances(seances: &mut [Seance]) {
    seances.sort_by(|a, b| a.day.cmp(&b.day).then_with(|| a.time.cmp(&b.time)));
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Programmation {
    pub id: i32,
    #[serde(rename = "filmId")]
    pub film_id: i32,
    #[serde(rename = "titreFilm")]
    pub film_title: String,
    #[serde(rename = "cinemaId")]
    pub cinema_id: i32,
    #[serde(rename = "nomCinema")]
    pub cinema_name: String,
    #[serde(rename = "dateDebut")]
    pub start_date: Date,
    #[serde(rename = "dateFin")]
    pub end_date: Date,
    pub seances: Vec<Seance>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SeancePayload {
    pub jour: Option<String>,
    pub heure: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProgrammationPayload {
    #[serde(rename = "filmId")]
    pub film_id: Option<Loose>,
    #[serde(rename = "cinemaId")]
    pub cinema_id: Option<Loose>,
    #[serde(rename = "dateDebut")]
    pub start_date: Option<String>,
    #[serde(rename = "dateFin")]
    pub end_date: Option<String>,
    pub seances: Option<Vec<SeancePayload>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewSeance {
    pub day: Weekday,
    pub time: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProgrammation {
    pub film_id: i32,
    pub cinema_id: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub seances: Vec<NewSeance>,
}

impl ProgrammationPayload {
    pub fn into_new(self) -> AppResult<NewProgrammation> {
        let film_id = self.film_id.as_ref().and_then(Loose::id);
        let cinema_id = self.cinema_id.as_ref().and_then(Loose::id);
        let start = non_blank(self.start_date);
        let end = non_blank(self.end_date);

        let (Some(film_id), Some(cinema_id), Some(start), Some(end)) =
            (film_id, cinema_id, start, end)
        else {
            return Err(AppError::validation(
                "Les champs filmId, cinemaId, dateDebut et dateFin sont obligatoires",
            ));
        };

        let start_date = schedule::parse_day(&start)?;
        let end_date = schedule::parse_day(&end)?;
        if end_date < start_date {
            return Err(AppError::validation(
                "La date de fin doit être postérieure à la date de début",
            ));
        }

        let seances = self
            .seances
            .unwrap_or_default()
            .into_iter()
            .map(|s| {
                let (Some(jour), Some(heure)) = (s.jour, s.heure) else {
                    return Err(AppError::validation(
                        "Chaque séance doit préciser un jour et une heure",
                    ));
                };
                Ok(NewSeance { day: jour.parse()?, time: schedule::parse_heure(&heure)? })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(NewProgrammation { film_id, cinema_id, start_date, end_date, seances })
    }
}
