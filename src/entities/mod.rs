pub mod acteur;
pub mod adresse;
pub mod cinema;
pub mod film;
pub mod jouer;
pub mod programmation;
pub mod programmer;
pub mod projeter;
pub mod realisateur;
pub mod realiser;
pub mod seance;
pub mod seance_salle;
