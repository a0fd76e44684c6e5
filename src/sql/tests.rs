//! Tests for the statement lists

use super::*;
use crate::template::has_templates;
use pretty_assertions::assert_eq;

fn config() -> DwhConfig {
    DwhConfig::from_yaml_str(
        r"
cluster:
  host: localhost
  db_name: dwh
  db_user: dwhuser
  db_password: secret
iam_role:
  arn: arn:aws:iam::123456789012:role/dwhRole
s3:
  log_data: s3://udacity-dend/log_data
  log_jsonpath: s3://udacity-dend/log_json_path.json
  song_data: s3://udacity-dend/song_data
",
    )
    .unwrap()
}

fn tables(statements: &[Statement]) -> Vec<&str> {
    statements.iter().map(|s| s.table).collect()
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_drop_order() {
    assert_eq!(
        tables(&drop_table_queries()),
        vec!["staging_events", "staging_songs", "songplays", "users", "songs", "artists", "time"]
    );
}

#[test]
fn test_create_order_puts_fact_table_last() {
    assert_eq!(
        tables(&create_table_queries()),
        vec!["staging_events", "staging_songs", "users", "artists", "songs", "time", "songplays"]
    );
}

#[test]
fn test_insert_order_puts_fact_table_last() {
    assert_eq!(
        tables(&insert_table_queries()),
        vec!["users", "artists", "songs", "time", "songplays"]
    );
}

#[test]
fn test_artists_created_before_songs() {
    // songs.artist_id references artists
    let creates = create_table_queries();
    let pos = |t: &str| creates.iter().position(|s| s.table == t).unwrap();
    assert!(pos("artists") < pos("songs"));
}

// ============================================================================
// Statement contents
// ============================================================================

#[test]
fn test_statement_names_and_kinds() {
    let drops = drop_table_queries();
    assert_eq!(drops[0].name, "staging_events_drop");
    assert!(drops.iter().all(|s| s.kind == StatementKind::Drop));
    assert!(drops.iter().all(|s| s.sql.starts_with("DROP TABLE IF EXISTS ")));

    let inserts = insert_table_queries();
    assert_eq!(inserts[4].name, "songplays_insert");
    assert!(inserts.iter().all(|s| s.kind == StatementKind::Insert));
}

#[test]
fn test_create_statements_target_their_table() {
    for stmt in create_table_queries() {
        assert!(
            stmt.sql.contains(&format!("CREATE TABLE {} (", stmt.table)),
            "{} does not create {}",
            stmt.name,
            stmt.table
        );
    }
}

#[test]
fn test_copy_statements_render_config() {
    let copies = copy_table_queries(&config()).unwrap();
    assert_eq!(tables(&copies), vec!["staging_events", "staging_songs"]);

    let events = &copies[0].sql;
    assert!(events.contains("COPY staging_events"));
    assert!(events.contains("FROM 's3://udacity-dend/log_data'"));
    assert!(events.contains("CREDENTIALS 'aws_iam_role=arn:aws:iam::123456789012:role/dwhRole'"));
    assert!(events.contains("REGION 'us-west-2'"));
    assert!(events.contains("FORMAT AS JSON 's3://udacity-dend/log_json_path.json'"));
    assert!(events.contains("MAXERROR AS 1000"));

    let songs = &copies[1].sql;
    assert!(songs.contains("COPY staging_songs"));
    assert!(songs.contains("FROM 's3://udacity-dend/song_data'"));
    assert!(songs.contains("FORMAT AS JSON 'auto'"));

    assert!(copies.iter().all(|s| !has_templates(&s.sql)));
}

#[test]
fn test_copy_respects_overrides() {
    let mut config = config();
    config.s3.region = "eu-central-1".to_string();
    config.copy.max_error = 0;

    let copies = copy_table_queries(&config).unwrap();
    assert!(copies[1].sql.contains("REGION 'eu-central-1'"));
    assert!(copies[1].sql.contains("MAXERROR AS 0"));
}

#[test]
fn test_fact_and_time_only_take_next_song_events() {
    let inserts = insert_table_queries();
    for table in ["users", "time", "songplays"] {
        let stmt = inserts.iter().find(|s| s.table == table).unwrap();
        assert!(stmt.sql.contains("page = 'NextSong'"), "{table}");
    }
}

#[test]
fn test_songplays_join_keys() {
    let inserts = insert_table_queries();
    let songplays = &inserts.last().unwrap().sql;
    assert!(songplays.contains("e.artist_name = s.artist_name"));
    assert!(songplays.contains("e.song = s.title"));
    assert!(songplays.contains("e.length = s.duration"));
    assert!(songplays.contains("TIMESTAMP 'epoch' + e.ts/1000 * INTERVAL '1 second'"));
}

#[test]
fn test_kind_display() {
    assert_eq!(StatementKind::Copy.to_string(), "copy");
    assert_eq!(
        serde_json::to_value(StatementKind::Insert).unwrap(),
        serde_json::json!("insert")
    );
}
