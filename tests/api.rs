use std::sync::Arc;

use allonscinoche::{
    AppState, db, routes,
    store::{MemoryStore, SqlStore},
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn memory_app() -> Router {
    routes::router(Arc::new(AppState::new(Arc::new(MemoryStore::new()))))
}

async fn sql_app() -> Router {
    let db = db::connect_and_migrate("sqlite::memory:").await.unwrap();
    routes::router(Arc::new(AppState::new(Arc::new(SqlStore::new(db)))))
}

/// Runs each scenario once per store.
macro_rules! against_both_stores {
    ($($scenario:ident),* $(,)?) => {
        mod memory {
            $(
                #[tokio::test]
                async fn $scenario() {
                    super::$scenario(super::memory_app().await).await;
                }
            )*
        }

        mod sql {
            $(
                #[tokio::test]
                async fn $scenario() {
                    super::$scenario(super::sql_app().await).await;
                }
            )*
        }
    };
}

against_both_stores!(
    film_creation_requires_title_director_and_duration,
    film_round_trip_keeps_actor_order,
    film_list_filters,
    update_ignores_body_id,
    deleting_film_cascades,
    screening_conflict_window,
    batch_reports_each_conflict,
    batch_without_conflicts_applies_default_tariffs,
    screening_list_filters_by_day,
    blank_query_values_are_ignored,
    partial_tariffs_keep_house_prices,
    cinema_crud,
    deleting_missing_cinema_changes_nothing,
    deleting_cinema_drops_its_programmations,
    programmation_lifecycle,
    programmation_requires_existing_references,
    mutations_require_a_token,
    malformed_requests_are_rejected,
);

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send(app, method, uri, body, Some("demo-token-123")).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

fn fargo() -> Value {
    json!({
        "titre": "Fargo",
        "realisateur": "Joel Coen, Ethan Coen",
        "genre": ["Policier", "Comédie noire"],
        "duree": "98 min",
        "dateSortie": "1996-09-04",
        "classification": "-12",
        "acteurs": ["Frances McDormand", "William H. Macy", "Steve Buscemi"]
    })
}

async fn create_film(app: &Router, body: Value) -> i64 {
    let (status, film) = call(app, Method::POST, "/api/films", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{film}");
    film["id"].as_i64().unwrap()
}

async fn create_cinema(app: &Router, name: &str) -> i64 {
    let body = json!({
        "nom": name,
        "note": 4.5,
        "adresse": { "numero": 12, "rue": "rue des Écoles", "ville": "Paris", "codePostal": 75005 }
    });
    let (status, cinema) = call(app, Method::POST, "/api/cinemas", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{cinema}");
    cinema["id"].as_i64().unwrap()
}

async fn film_creation_requires_title_director_and_duration(app: Router) {
    for missing in ["titre", "realisateur", "duree"] {
        let mut body = fargo();
        body.as_object_mut().unwrap().remove(missing);
        let (status, err) = call(&app, Method::POST, "/api/films", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "Les champs titre, réalisateur et durée sont obligatoires");
    }

    let mut body = fargo();
    body["duree"] = json!("long");
    let (status, _) = call(&app, Method::POST, "/api/films", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = call(&app, Method::GET, "/api/films", None).await;
    assert_eq!(list["total"], 0);
}

async fn film_round_trip_keeps_actor_order(app: Router) {
    let (status, created) = call(&app, Method::POST, "/api/films", Some(fargo())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["duree"], 98);
    assert_eq!(created["ageMinimum"], 12);
    assert_eq!(created["langue"], "VF");
    assert_eq!(created["statut"], "actif");

    let id = created["id"].as_i64().unwrap();
    let (status, film) = call(&app, Method::GET, &format!("/api/films/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(film["realisateur"], "Joel Coen, Ethan Coen");
    assert_eq!(film["acteurs"], json!(["Frances McDormand", "William H. Macy", "Steve Buscemi"]));
    assert_eq!(film["genre"], json!(["Policier", "Comédie noire"]));
    assert_eq!(film["dateCreation"], created["dateCreation"]);

    let (status, err) = call(&app, Method::GET, "/api/films/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "Film non trouvé");
}

async fn film_list_filters(app: Router) {
    create_film(&app, fargo()).await;
    create_film(
        &app,
        json!({
            "titre": "Cléo de 5 à 7",
            "realisateur": "Agnès Varda",
            "genre": "Drame",
            "duree": 90,
            "dateSortie": "1962-04-11"
        }),
    )
    .await;

    let (_, all) = call(&app, Method::GET, "/api/films", None).await;
    assert_eq!(all["total"], 2);

    let (_, drames) = call(&app, Method::GET, "/api/films?genre=Drame", None).await;
    assert_eq!(drames["total"], 1);
    assert_eq!(drames["films"][0]["titre"], "Cléo de 5 à 7");

    let (_, nineties) = call(&app, Method::GET, "/api/films?annee=1996", None).await;
    assert_eq!(nineties["total"], 1);
    assert_eq!(nineties["films"][0]["titre"], "Fargo");

    let (_, coen) = call(&app, Method::GET, "/api/films?realisateur=ethan%20COEN", None).await;
    assert_eq!(coen["total"], 1);

    let (_, none) = call(&app, Method::GET, "/api/films?genre=Western", None).await;
    assert_eq!(none["total"], 0);
    assert_eq!(none["films"], json!([]));
}

async fn update_ignores_body_id(app: Router) {
    let id = create_film(&app, fargo()).await;

    let body = json!({ "id": 999, "titre": "Fargo (1996)", "acteurs": ["Peter Stormare"] });
    let (status, updated) = call(&app, Method::PUT, &format!("/api/films/{id}"), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["titre"], "Fargo (1996)");
    assert!(updated["dateModification"].is_string());

    let (_, film) = call(&app, Method::GET, &format!("/api/films/{id}"), None).await;
    assert_eq!(film["titre"], "Fargo (1996)");
    assert_eq!(film["acteurs"], json!(["Peter Stormare"]));
    assert_eq!(film["realisateur"], "Joel Coen, Ethan Coen");

    let (status, _) = call(&app, Method::GET, "/api/films/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        call(&app, Method::PUT, "/api/films/999", Some(json!({ "titre": "Nope" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn deleting_film_cascades(app: Router) {
    let id = create_film(&app, fargo()).await;
    let cinema_id = create_cinema(&app, "Le Champo").await;

    let screening = json!({ "salleId": 1, "dateHeure": "2025-03-01T20:00:00Z" });
    let uri = format!("/api/films/{id}/programmations");
    let (status, _) = call(&app, Method::POST, &uri, Some(screening)).await;
    assert_eq!(status, StatusCode::CREATED);

    let programmation = json!({
        "filmId": id,
        "cinemaId": cinema_id,
        "dateDebut": "2025-03-05",
        "dateFin": "2025-03-11",
        "seances": [{ "jour": "Lundi", "heure": "20:00" }]
    });
    let (status, _) = call(&app, Method::POST, "/api/programmations", Some(programmation)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, Method::DELETE, &format!("/api/films/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = call(&app, Method::GET, &format!("/api/films/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, screenings) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(screenings["total"], 0);
    let (_, programmations) = call(&app, Method::GET, "/api/programmations", None).await;
    assert_eq!(programmations["total"], 0);

    let (status, _) = call(&app, Method::GET, &format!("/api/cinemas/{cinema_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, Method::DELETE, &format!("/api/films/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn screening_conflict_window(app: Router) {
    let id = create_film(&app, fargo()).await;
    let uri = format!("/api/films/{id}/programmations");

    let (status, first) = call(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "salleId": 1, "dateHeure": "2025-03-01T20:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["tarifs"], json!({ "normal": 12.5, "reduit": 9.5, "enfant": 8.0 }));
    assert_eq!(first["placesDisponibles"], 100);
    assert_eq!(first["placesReservees"], 0);
    assert_eq!(first["version"], "VF");
    assert_eq!(first["qualite"], "HD");
    assert_eq!(first["typeSeance"], "standard");
    assert_eq!(first["statut"], "programmee");

    let (status, err) = call(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "salleId": 1, "dateHeure": "2025-03-01T21:30:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"], "Conflit de programmation: la salle est déjà occupée à ce moment");

    let (status, _) = call(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "salleId": 2, "dateHeure": "2025-03-01T21:30:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
        &app,
        Method::POST,
        &uri,
        Some(json!({ "salleId": 1, "dateHeure": "2025-03-01T23:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, listed) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(listed["total"], 3);
    assert_eq!(listed["programmations"][0], first);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/films/999/programmations",
        Some(json!({ "salleId": 1, "dateHeure": "2025-06-01T20:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        call(&app, Method::POST, &uri, Some(json!({ "dateHeure": "2025-06-01T20:00:00Z" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        call(&app, Method::POST, &uri, Some(json!({ "salleId": 1, "dateHeure": "demain" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

async fn batch_reports_each_conflict(app: Router) {
    let id = create_film(&app, fargo()).await;
    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/api/films/{id}/programmations"),
        Some(json!({ "salleId": 1, "dateHeure": "2025-03-01T20:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let batch = json!({
        "seances": [
            { "salleId": 1, "dateHeure": "2025-03-01T21:00:00Z" },
            { "salleId": 2, "dateHeure": "2025-03-01T20:00:00Z" },
            { "salleId": 2, "dateHeure": "2025-03-01T22:00:00Z" },
            { "salleId": 3, "dateHeure": "2025-03-01T20:00:00Z" }
        ]
    });
    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/api/films/{id}/programmations/batch"),
        Some(batch),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Certaines programmations n'ont pas pu être créées");
    assert_eq!(body["programmationsCreees"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["erreurs"],
        json!([
            { "index": 0, "error": "Conflit pour la séance 1: salle 1 occupée" },
            { "index": 2, "error": "Conflit pour la séance 3: salle 2 occupée" }
        ])
    );

    let (_, listed) =
        call(&app, Method::GET, &format!("/api/films/{id}/programmations"), None).await;
    assert_eq!(listed["total"], 3);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/films/999/programmations/batch",
        Some(json!({ "seances": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn batch_without_conflicts_applies_default_tariffs(app: Router) {
    let id = create_film(&app, fargo()).await;
    let batch = json!({
        "tarifsDefaut": { "normal": 10.0, "reduit": 7.0, "enfant": 5.0 },
        "seances": [
            { "salleId": 1, "dateHeure": "2025-03-01T14:00:00Z" },
            { "salleId": "1", "dateHeure": "2025-03-01T17:00:00Z",
              "tarifs": { "normal": 15.0, "reduit": 12.0, "enfant": 9.0 } }
        ]
    });
    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/api/films/{id}/programmations/batch"),
        Some(batch),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "2 programmations créées avec succès");
    let created = body["programmations"].as_array().unwrap();
    assert_eq!(created[0]["tarifs"]["normal"], 10.0);
    assert_eq!(created[1]["tarifs"]["normal"], 15.0);
    assert_eq!(created[1]["salleId"], 1);
}

async fn screening_list_filters_by_day(app: Router) {
    let id = create_film(&app, fargo()).await;
    let uri = format!("/api/films/{id}/programmations");
    for at in ["2025-03-01T20:00:00Z", "2025-03-02T20:00:00Z", "2025-03-02T14:00"] {
        let body = json!({ "salleId": 1, "dateHeure": at });
        let (status, _) = call(&app, Method::POST, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, day) = call(&app, Method::GET, &format!("{uri}?date=2025-03-02"), None).await;
    assert_eq!(day["total"], 2);

    let (_, none) = call(&app, Method::GET, &format!("{uri}?date=2025-03-03"), None).await;
    assert_eq!(none["total"], 0);

    let (status, _) = call(&app, Method::GET, &format!("{uri}?date=bientot"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

async fn blank_query_values_are_ignored(app: Router) {
    let id = create_film(&app, fargo()).await;
    let (status, films) =
        call(&app, Method::GET, "/api/films?genre=&annee=&realisateur=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(films["total"], 1);

    let uri = format!("/api/films/{id}/programmations");
    let body = json!({ "salleId": 1, "dateHeure": "2025-03-01T20:00:00Z" });
    let (status, _) = call(&app, Method::POST, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, screenings) = call(&app, Method::GET, &format!("{uri}?date="), None).await;
    assert_eq!(status, StatusCode::OK, "{screenings}");
    assert_eq!(screenings["total"], 1);
}

async fn partial_tariffs_keep_house_prices(app: Router) {
    let id = create_film(&app, fargo()).await;
    let body = json!({
        "salleId": 2,
        "dateHeure": "2025-03-01T20:00:00Z",
        "tarifs": { "normal": 15 }
    });
    let (status, screening) =
        call(&app, Method::POST, &format!("/api/films/{id}/programmations"), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{screening}");
    assert_eq!(screening["tarifs"]["normal"], 15.0);
    assert_eq!(screening["tarifs"]["reduit"], 9.5);
    assert_eq!(screening["tarifs"]["enfant"], 8.0);
}

async fn cinema_crud(app: Router) {
    let (status, err) =
        call(&app, Method::POST, "/api/cinemas", Some(json!({ "nom": "Sans adresse" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let id = create_cinema(&app, "Le Champo").await;
    let (status, cinema) = call(&app, Method::GET, &format!("/api/cinemas/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cinema["adresse"]["codePostal"], "75005");
    assert_eq!(cinema["adresse"]["numero"], "12");

    let patch = json!({ "note": 4.9, "adresse": { "ville": "Lyon" } });
    let (status, updated) =
        call(&app, Method::PUT, &format!("/api/cinemas/{id}"), Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["note"], 4.9);
    assert_eq!(updated["nom"], "Le Champo");
    assert_eq!(updated["adresse"]["ville"], "Lyon");
    assert_eq!(updated["adresse"]["rue"], "rue des Écoles");

    let (_, list) = call(&app, Method::GET, "/api/cinemas", None).await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["cinemas"][0], updated);

    let (status, _) = call(&app, Method::DELETE, &format!("/api/cinemas/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, err) = call(&app, Method::GET, &format!("/api/cinemas/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "Cinéma non trouvé");
}

async fn deleting_missing_cinema_changes_nothing(app: Router) {
    let id = create_cinema(&app, "Le Champo").await;
    let (_, before) = call(&app, Method::GET, "/api/cinemas", None).await;

    let (status, err) = call(&app, Method::DELETE, &format!("/api/cinemas/{}", id + 1), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "Cinéma non trouvé");

    let (_, after) = call(&app, Method::GET, "/api/cinemas", None).await;
    assert_eq!(before, after);
}

async fn deleting_cinema_drops_its_programmations(app: Router) {
    let film_id = create_film(&app, fargo()).await;
    let cinema_id = create_cinema(&app, "Le Champo").await;
    let body = json!({
        "filmId": film_id,
        "cinemaId": cinema_id,
        "dateDebut": "2025-03-05",
        "dateFin": "2025-03-11",
        "seances": [
            { "jour": "Samedi", "heure": "21:00" },
            { "jour": "Dimanche", "heure": "18:00" }
        ]
    });
    let (status, _) = call(&app, Method::POST, "/api/programmations", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) =
        call(&app, Method::DELETE, &format!("/api/cinemas/{cinema_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, listed) = call(&app, Method::GET, "/api/programmations", None).await;
    assert_eq!(status, StatusCode::OK, "{listed}");
    assert_eq!(listed["total"], 0);
    let (status, film) = call(&app, Method::GET, &format!("/api/films/{film_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(film["titre"], "Fargo");
}

async fn programmation_lifecycle(app: Router) {
    let film_id = create_film(&app, fargo()).await;
    let cinema_id = create_cinema(&app, "Le Champo").await;

    let body = json!({
        "filmId": film_id,
        "cinemaId": cinema_id.to_string(),
        "dateDebut": "2025-03-05",
        "dateFin": "2025-03-11",
        "seances": [
            { "jour": "samedi", "heure": "21:00" },
            { "jour": "Mercredi", "heure": "14:00" },
            { "jour": "Samedi", "heure": "16:00" }
        ]
    });
    let (status, created) = call(&app, Method::POST, "/api/programmations", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["titreFilm"], "Fargo");
    assert_eq!(created["nomCinema"], "Le Champo");
    assert_eq!(created["dateDebut"], "2025-03-05");
    assert_eq!(created["dateFin"], "2025-03-11");

    let (_, listed) = call(&app, Method::GET, "/api/programmations", None).await;
    assert_eq!(listed["total"], 1);
    let programmation = &listed["programmations"][0];
    assert_eq!(programmation, &created);
    let slots: Vec<(String, String)> = programmation["seances"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| (s["jour"].as_str().unwrap().to_string(), s["heure"].as_str().unwrap().to_string()))
        .collect();
    assert_eq!(
        slots,
        vec![
            ("Mercredi".to_string(), "14:00".to_string()),
            ("Samedi".to_string(), "16:00".to_string()),
            ("Samedi".to_string(), "21:00".to_string()),
        ]
    );

    let id = created["id"].as_i64().unwrap();
    let (status, _) = call(&app, Method::DELETE, &format!("/api/programmations/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, listed) = call(&app, Method::GET, "/api/programmations", None).await;
    assert_eq!(listed["total"], 0);

    let (status, err) =
        call(&app, Method::DELETE, &format!("/api/programmations/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "Programmation non trouvée");
}

async fn programmation_requires_existing_references(app: Router) {
    let film_id = create_film(&app, fargo()).await;
    let cinema_id = create_cinema(&app, "Le Champo").await;

    let body = |film: i64, cinema: i64, start: &str, end: &str| {
        json!({ "filmId": film, "cinemaId": cinema, "dateDebut": start, "dateFin": end })
    };

    let (status, err) = call(
        &app,
        Method::POST,
        "/api/programmations",
        Some(body(film_id, cinema_id + 1, "2025-03-05", "2025-03-11")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "Cinéma non trouvé");

    let (status, err) = call(
        &app,
        Method::POST,
        "/api/programmations",
        Some(body(film_id + 1, cinema_id, "2025-03-05", "2025-03-11")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "Film non trouvé");

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/programmations",
        Some(body(film_id, cinema_id, "2025-03-11", "2025-03-05")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/programmations",
        Some(json!({ "filmId": film_id, "dateDebut": "2025-03-05" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = call(&app, Method::GET, "/api/programmations", None).await;
    assert_eq!(listed["total"], 0);
}

async fn mutations_require_a_token(app: Router) {
    let (status, err) = send(&app, Method::POST, "/api/films", Some(fargo()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(err["error"], "Token d'authentification requis");

    let (status, _) = send(&app, Method::DELETE, "/api/cinemas/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) =
        send(&app, Method::POST, "/api/films", Some(fargo()), Some("literally-anything")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = send(&app, Method::GET, "/api/films", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
}

async fn malformed_requests_are_rejected(app: Router) {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/films")
        .header(header::AUTHORIZATION, "Bearer t")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (status, err) = call(&app, Method::GET, "/api/films/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let (status, err) = call(&app, Method::GET, "/api/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "Route non trouvée");

    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}
