//! Optional embedded Postgres smoke test gated by RUN_PG_EMBEDDED.
//! Use `cargo test -- --ignored` with `RUN_PG_EMBEDDED=1` to run it.

mod support;

/// Cluster boots and the embedded migrations apply.
#[test]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn pg_embedded_cluster_starts_and_migrates() {
    let Some(harness) = support::pg_harness() else {
        return;
    };
    let connected = harness.block_on(async { harness.pool.get().await.is_ok() });
    assert!(connected, "pool hands out a connection");
}
