/// Default base URL of the Spotify Web API
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Path of the recently-played endpoint, relative to the API base URL
pub const RECENTLY_PLAYED_PATH: &str = "/me/player/recently-played";

/// Length of the trailing extraction window in days
pub const WINDOW_DAYS: u64 = 7;

/// Default timeout for the API request in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variables that override values from the config file
pub const ENV_TOKEN: &str = "SPOTIFY_TOKEN";
pub const ENV_USERNAME: &str = "SPOTIFY_USERNAME";
pub const ENV_DB_PATH: &str = "SPOTIFY_DB_PATH";
