/// One play of a track, as stored in the `songs` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayEvent {
    /// First listed artist of the track's album
    pub artist: String,
    pub album: String,
    pub song_name: String,
    /// ISO-8601 timestamp; natural key of the table
    pub played_at: String,
}

impl PlayEvent {
    pub fn new(
        artist: impl Into<String>,
        album: impl Into<String>,
        song_name: impl Into<String>,
        played_at: impl Into<String>,
    ) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
            song_name: song_name.into(),
            played_at: played_at.into(),
        }
    }

    /// Field names paired with their values, in table column order
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("artist", self.artist.as_str()),
            ("album", self.album.as_str()),
            ("played_at", self.played_at.as_str()),
            ("song_name", self.song_name.as_str()),
        ]
    }
}

/// Insertion-ordered rows extracted in a single run. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayEventBatch {
    events: Vec<PlayEvent>,
}

impl PlayEventBatch {
    pub fn new(events: Vec<PlayEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[PlayEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<PlayEvent> {
        self.events
    }
}

impl FromIterator<PlayEvent> for PlayEventBatch {
    fn from_iter<I: IntoIterator<Item = PlayEvent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
