/*! Integration tests for Dataview.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - data: Tests for queries, containers, views, coercion and the serializable coupling
 * - translator: Tests for the configuration and JSON translators
 * - config: Tests for configuration trees and their TOML files
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("dataview=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod helpers;
