use sea_query::{ColumnDef, SqliteQueryBuilder, Table};

use crate::schema::Songs;

/// CREATE TABLE IF NOT EXISTS songs (
///     artist TEXT NOT NULL,
///     album TEXT NOT NULL,
///     played_at TEXT NOT NULL PRIMARY KEY,
///     song_name TEXT NOT NULL
/// )
pub fn create_songs_table() -> String {
    Table::create()
        .table(Songs::Table)
        .if_not_exists()
        .col(ColumnDef::new(Songs::Artist).text().not_null())
        .col(ColumnDef::new(Songs::Album).text().not_null())
        .col(
            ColumnDef::new(Songs::PlayedAt)
                .text()
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(Songs::SongName).text().not_null())
        .to_string(SqliteQueryBuilder)
}
