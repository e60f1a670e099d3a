use harsan_core::{HarDocument, HarSanitizer, NameFilter, SanitizerConfig};
use rstest::fixture;
use tracing::info;

pub const DEMO_HAR: &str = include_str!("../fixtures/demo.har");

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

#[fixture]
pub fn demo_har() -> HarDocument {
    init_tracing();
    match DEMO_HAR.parse() {
        Ok(har) => har,
        Err(error) => {
            panic!("fail to load demo HAR: {error:?}");
        }
    }
}

#[fixture]
pub fn demo_sanitizer() -> HarSanitizer {
    HarSanitizer::new(SanitizerConfig {
        cookies: NameFilter::All,
        headers: NameFilter::names(["header_a"]),
        query_params: NameFilter::All,
        ..SanitizerConfig::default()
    })
}
