mod common;
use common::{assert_sqlite_pragmas, count, fk_check_empty, setup_db};

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use station_sync::db::{connection, migrate};

#[test]
fn migrated_db_has_pragmas_and_empty_tables() {
    let (_db, mut conn) = setup_db();
    assert_sqlite_pragmas(&mut conn);
    assert_eq!(count(&mut conn, "dim_station"), 0);
    assert_eq!(count(&mut conn, "fact_observation"), 0);
    fk_check_empty(&mut conn);
}

#[test]
fn migrations_are_rerunnable() {
    let (db, mut conn) = setup_db();
    migrate::run_all(&db.path).expect("second run");
    migrate::run_all(&format!("sqlite://{}", db.path)).expect("url form");
    assert_eq!(count(&mut conn, "dim_station"), 0);
}

#[test]
fn station_id_is_unique_in_the_schema() {
    let (_db, mut conn) = setup_db();
    conn.batch_execute("INSERT INTO dim_station (station_id) VALUES ('0007W');")
        .unwrap();
    let dup = conn.batch_execute("INSERT INTO dim_station (station_id) VALUES ('0007W');");
    assert!(dup.is_err());
}

#[test]
fn fact_without_station_is_rejected() {
    let (db, _conn) = setup_db();
    let mut conn = connection::connect_sqlite(&db.path).unwrap();
    let orphan = conn.batch_execute(
        "INSERT INTO fact_observation (station_sk, observation_timestamp) \
         VALUES (42, '2024-05-09T09:00:00.000Z');",
    );
    assert!(orphan.is_err());
    fk_check_empty(&mut conn);
}

#[test]
fn surrogate_keys_are_not_reused_after_delete() {
    let (_db, mut conn) = setup_db();
    conn.batch_execute(
        "INSERT INTO dim_station (station_id) VALUES ('A');
         DELETE FROM dim_station WHERE station_id = 'A';
         INSERT INTO dim_station (station_id) VALUES ('B');",
    )
    .unwrap();

    use station_sync::schema::dim_station::dsl::*;
    let sk: i32 = dim_station
        .filter(station_id.eq("B"))
        .select(station_sk)
        .first(&mut conn)
        .unwrap();
    assert_eq!(sk, 2);
}
