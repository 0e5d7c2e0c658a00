use sea_query::{Expr, Func, Order, Query, SqliteQueryBuilder};

use crate::model::PlayEvent;
use crate::schema::Songs;

/// INSERT INTO songs (artist, album, played_at, song_name) VALUES (?, ?, ?, ?), ...
///
/// Returns None for an empty slice since a VALUES list cannot be empty.
pub fn insert_many(events: &[PlayEvent]) -> Option<String> {
    if events.is_empty() {
        return None;
    }

    let mut query = Query::insert();
    query.into_table(Songs::Table).columns([
        Songs::Artist,
        Songs::Album,
        Songs::PlayedAt,
        Songs::SongName,
    ]);
    for event in events {
        query.values_panic([
            event.artist.as_str().into(),
            event.album.as_str().into(),
            event.played_at.as_str().into(),
            event.song_name.as_str().into(),
        ]);
    }
    Some(query.to_string(SqliteQueryBuilder))
}

/// SELECT artist, album, played_at, song_name FROM songs ORDER BY played_at
pub fn select_all() -> String {
    Query::select()
        .columns([
            Songs::Artist,
            Songs::Album,
            Songs::PlayedAt,
            Songs::SongName,
        ])
        .from(Songs::Table)
        .order_by(Songs::PlayedAt, Order::Asc)
        .to_string(SqliteQueryBuilder)
}

/// SELECT COUNT(*) FROM songs
pub fn count() -> String {
    Query::select()
        .expr(Func::count(Expr::col(Songs::PlayedAt)))
        .from(Songs::Table)
        .to_string(SqliteQueryBuilder)
}
