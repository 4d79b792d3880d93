use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Programmation::Table)
                    .if_not_exists()
                    .col(pk_auto(Programmation::Id))
                    .col(string(Programmation::DateDebut))
                    .col(string(Programmation::DateFin))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Programmer::Table)
                    .if_not_exists()
                    .col(integer(Programmer::ProgrammationId))
                    .col(integer(Programmer::FilmId))
                    .primary_key(
                        Index::create().col(Programmer::ProgrammationId).col(Programmer::FilmId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_programmer_programmation")
                            .from(Programmer::Table, Programmer::ProgrammationId)
                            .to(Programmation::Table, Programmation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_programmer_film")
                            .from(Programmer::Table, Programmer::FilmId)
                            .to(Film::Table, Film::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projeter::Table)
                    .if_not_exists()
                    .col(integer(Projeter::ProgrammationId))
                    .col(integer(Projeter::CinemaId))
                    .primary_key(
                        Index::create().col(Projeter::ProgrammationId).col(Projeter::CinemaId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projeter_programmation")
                            .from(Projeter::Table, Projeter::ProgrammationId)
                            .to(Programmation::Table, Programmation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projeter_cinema")
                            .from(Projeter::Table, Projeter::CinemaId)
                            .to(Cinema::Table, Cinema::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Seance::Table)
                    .if_not_exists()
                    .col(pk_auto(Seance::Id))
                    .col(string(Seance::Jour))
                    .col(string(Seance::Heure))
                    .col(integer(Seance::ProgrammationId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seance_programmation")
                            .from(Seance::Table, Seance::ProgrammationId)
                            .to(Programmation::Table, Programmation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SeanceSalle::Table)
                    .if_not_exists()
                    .col(pk_auto(SeanceSalle::Id))
                    .col(integer(SeanceSalle::FilmId))
                    .col(integer(SeanceSalle::SalleId))
                    .col(string(SeanceSalle::DateHeure))
                    .col(big_integer(SeanceSalle::Debut))
                    .col(double(SeanceSalle::TarifNormal))
                    .col(double(SeanceSalle::TarifReduit))
                    .col(double(SeanceSalle::TarifEnfant))
                    .col(integer(SeanceSalle::PlacesDisponibles))
                    .col(integer(SeanceSalle::PlacesReservees))
                    .col(string(SeanceSalle::Version))
                    .col(string(SeanceSalle::Qualite))
                    .col(string(SeanceSalle::TypeSeance))
                    .col(string(SeanceSalle::Statut))
                    .col(big_integer(SeanceSalle::DateCreation))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seance_salle_film")
                            .from(SeanceSalle::Table, SeanceSalle::FilmId)
                            .to(Film::Table, Film::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seance_salle_salle_debut")
                    .table(SeanceSalle::Table)
                    .col(SeanceSalle::SalleId)
                    .col(SeanceSalle::Debut)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SeanceSalle::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Seance::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Projeter::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Programmer::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Programmation::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Film {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Cinema {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Programmation {
    Table,
    Id,
    DateDebut,
    DateFin,
}

#[derive(DeriveIden)]
enum Programmer {
    Table,
    ProgrammationId,
    FilmId,
}

#[derive(DeriveIden)]
enum Projeter {
    Table,
    ProgrammationId,
    CinemaId,
}

#[derive(DeriveIden)]
enum Seance {
    Table,
    Id,
    Jour,
    Heure,
    ProgrammationId,
}

#[derive(DeriveIden)]
enum SeanceSalle {
    Table,
    Id,
    FilmId,
    SalleId,
    DateHeure,
    Debut,
    TarifNormal,
    TarifReduit,
    TarifEnfant,
    PlacesDisponibles,
    PlacesReservees,
    Version,
    Qualite,
    TypeSeance,
    Statut,
    DateCreation,
}
