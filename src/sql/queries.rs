//! SQL text for the staging tables and the star schema
//!
//! COPY templates take their values from the config via `{{ path }}`
//! placeholders; everything else is static.

// ============================================================================
// Drop
// ============================================================================

pub(crate) const STAGING_EVENTS_DROP: &str = "DROP TABLE IF EXISTS staging_events";
pub(crate) const STAGING_SONGS_DROP: &str = "DROP TABLE IF EXISTS staging_songs";
pub(crate) const SONGPLAYS_DROP: &str = "DROP TABLE IF EXISTS songplays";
pub(crate) const USERS_DROP: &str = "DROP TABLE IF EXISTS users";
pub(crate) const SONGS_DROP: &str = "DROP TABLE IF EXISTS songs";
pub(crate) const ARTISTS_DROP: &str = "DROP TABLE IF EXISTS artists";
pub(crate) const TIME_DROP: &str = "DROP TABLE IF EXISTS time";

// ============================================================================
// Create
// ============================================================================

pub(crate) const STAGING_EVENTS_CREATE: &str = "
    CREATE TABLE staging_events (
        artist_name VARCHAR,
        auth VARCHAR,
        user_first_name VARCHAR,
        user_gender VARCHAR,
        item_in_session INT NOT NULL,
        user_last_name VARCHAR,
        length REAL,
        user_level VARCHAR,
        user_location VARCHAR,
        method VARCHAR,
        page VARCHAR,
        registration REAL,
        session_id INT NOT NULL,
        song VARCHAR,
        status SMALLINT,
        ts BIGINT,
        user_agent VARCHAR,
        user_id INT,
        PRIMARY KEY(session_id, item_in_session)
    )";

// Column order follows the song JSON files, minus the leading num_songs key.
pub(crate) const STAGING_SONGS_CREATE: &str = "
    CREATE TABLE staging_songs (
        artist_id VARCHAR NOT NULL,
        artist_latitude REAL,
        artist_longitude REAL,
        artist_location VARCHAR,
        artist_name VARCHAR,
        song_id VARCHAR NOT NULL,
        title VARCHAR NOT NULL,
        duration REAL,
        year SMALLINT,
        PRIMARY KEY(song_id)
    )";

pub(crate) const SONGPLAYS_CREATE: &str = "
    CREATE TABLE songplays (
        songplay_id INT IDENTITY(0,1),
        start_time TIMESTAMP NOT NULL,
        user_id VARCHAR NOT NULL,
        level VARCHAR,
        song_id VARCHAR,
        artist_id VARCHAR,
        session_id INT,
        location VARCHAR,
        user_agent VARCHAR,
        PRIMARY KEY(songplay_id),
        FOREIGN KEY(start_time) REFERENCES time(start_time),
        FOREIGN KEY(song_id) REFERENCES songs(song_id),
        FOREIGN KEY(artist_id) REFERENCES artists(artist_id),
        FOREIGN KEY(user_id) REFERENCES users(user_id))
        DISTKEY(user_id)
        SORTKEY(start_time)
    ";

pub(crate) const USERS_CREATE: &str = "
    CREATE TABLE users (
        user_id VARCHAR NOT NULL,
        first_name VARCHAR,
        last_name VARCHAR,
        gender VARCHAR,
        level VARCHAR,
        PRIMARY KEY(user_id))
        DISTKEY(user_id)
    ";

pub(crate) const SONGS_CREATE: &str = "
    CREATE TABLE songs (
        song_id VARCHAR NOT NULL,
        title VARCHAR,
        artist_id VARCHAR,
        year SMALLINT,
        duration REAL,
        PRIMARY KEY(song_id),
        FOREIGN KEY(artist_id) REFERENCES artists(artist_id))
        DISTSTYLE ALL
    ";

pub(crate) const ARTISTS_CREATE: &str = "
    CREATE TABLE artists (
        artist_id VARCHAR NOT NULL,
        name VARCHAR,
        location VARCHAR,
        latitude REAL,
        longitude REAL,
        PRIMARY KEY(artist_id))
        DISTSTYLE ALL
    ";

pub(crate) const TIME_CREATE: &str = "
    CREATE TABLE time (
        start_time TIMESTAMP NOT NULL,
        hour SMALLINT,
        day SMALLINT,
        week SMALLINT,
        month SMALLINT,
        year SMALLINT,
        weekday SMALLINT,
        PRIMARY KEY(start_time))
        DISTSTYLE ALL
    ";

// ============================================================================
// Copy (templated)
// ============================================================================

// Rejected rows are recorded in stl_load_errors.
pub(crate) const STAGING_EVENTS_COPY: &str = "
    COPY staging_events
        FROM {{ s3.log_data }}
        CREDENTIALS {{ iam_role.credentials }}
        REGION {{ s3.region }}
        FORMAT AS JSON {{ s3.log_jsonpath }}
        MAXERROR AS {{ copy.max_error }}
    ";

pub(crate) const STAGING_SONGS_COPY: &str = "
    COPY staging_songs
        FROM {{ s3.song_data }}
        CREDENTIALS {{ iam_role.credentials }}
        REGION {{ s3.region }}
        FORMAT AS JSON 'auto'
        MAXERROR AS {{ copy.max_error }}
    ";

// ============================================================================
// Insert
// ============================================================================

pub(crate) const SONGPLAYS_INSERT: &str = "
    INSERT INTO songplays (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
        SELECT
            TIMESTAMP 'epoch' + e.ts/1000 * INTERVAL '1 second',
            e.user_id,
            e.user_level,
            s.song_id,
            s.artist_id,
            e.session_id,
            e.user_location,
            e.user_agent
            FROM staging_events AS e
            JOIN staging_songs AS s
                ON e.artist_name = s.artist_name AND
                e.song = s.title AND
                e.length = s.duration
            WHERE e.page = 'NextSong'
    ";

pub(crate) const USERS_INSERT: &str = "
    INSERT INTO users (user_id, first_name, last_name, gender, level)
        SELECT DISTINCT user_id, user_first_name, user_last_name, user_gender, user_level
            FROM staging_events
            WHERE page = 'NextSong'
    ";

pub(crate) const SONGS_INSERT: &str = "
    INSERT INTO songs (song_id, title, artist_id, year, duration)
        SELECT DISTINCT song_id, title, artist_id, year, duration
            FROM staging_songs
    ";

pub(crate) const ARTISTS_INSERT: &str = "
    INSERT INTO artists (artist_id, name, location, latitude, longitude)
        SELECT DISTINCT artist_id, artist_name, artist_location, artist_latitude, artist_longitude
            FROM staging_songs
    ";

pub(crate) const TIME_INSERT: &str = "
    INSERT INTO time (start_time, hour, day, week, month, year, weekday)
        SELECT
            DISTINCT TIMESTAMP 'epoch' + ts/1000 * INTERVAL '1 second' AS st,
            EXTRACT(h from st),
            EXTRACT(d from st),
            EXTRACT(w from st),
            EXTRACT(mon from st),
            EXTRACT(y from st),
            EXTRACT(weekday from st)
            FROM staging_events AS e
            WHERE page = 'NextSong'
    ";
