//! Pruebas básicas de configuración y pool (requiere DATABASE_URL válido en entorno).

use chem_persistence::{config::DbConfig, pg::build_pool, ConnectionProvider};

#[test]
fn create_pool_from_env() {
    let Ok(cfg) = DbConfig::from_env() else {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return;
    };
    let pool = build_pool(&cfg.url, 1, 1).expect("pool");
    let mut conn = pool.get().expect("conn");
    // Sonda trivial de validez
    use diesel::connection::SimpleConnection;
    conn.batch_execute("SELECT 1;").expect("select 1");
}

#[test]
fn connect_verifies_connection() {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return;
    }
    let store = chem_persistence::connect_from_env().expect("store");
    assert!(store.provider().connection().is_ok());
}
