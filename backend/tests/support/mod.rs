//! Shared helpers for backend integration tests.
//!
//! Postgres-backed suites are opt-in: they run only with `RUN_PG_EMBEDDED=1`
//! and `cargo test -- --ignored`.

pub mod pg_embed;

use marquee::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;

/// Migrated database plus the runtime that drives its pool.
///
/// Field order matters: the pool is dropped before the runtime, and the
/// cluster last.
pub struct PgHarness {
    pub pool: DbPool,
    pub runtime: Runtime,
    _cluster: TestCluster,
}

impl PgHarness {
    pub fn block_on<F: std::future::Future>(&self, fut: F) -> F::Output {
        self.runtime.block_on(fut)
    }
}

/// Whether the opt-in flag is set; prints a skip marker otherwise.
pub fn pg_embedded_enabled() -> bool {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1") {
        return true;
    }
    eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
    false
}

/// Start a cluster, apply migrations and open a small pool.
///
/// Returns `None` when the suite is not enabled.
pub fn pg_harness() -> Option<PgHarness> {
    if !pg_embedded_enabled() {
        return None;
    }
    let cluster = pg_embed::test_cluster().expect("embedded Postgres should start");
    let database_url = cluster.connection().database_url("postgres");
    let runtime = Runtime::new().expect("tokio runtime");
    let pool = runtime.block_on(async {
        run_pending_migrations(&database_url)
            .await
            .expect("migrations apply");
        DbPool::new(PoolConfig::new(database_url.as_str()).with_max_size(4))
            .await
            .expect("pool builds")
    });
    Some(PgHarness {
        pool,
        runtime,
        _cluster: cluster,
    })
}
