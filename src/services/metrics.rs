use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};

lazy_static! {
    pub static ref UPSTREAM_FETCHES: IntCounter = register_int_counter!(
        "talkshow_upstream_fetches_total",
        "Upstream retrievals started"
    )
    .unwrap();
    pub static ref UPSTREAM_FAILURES: IntCounter = register_int_counter!(
        "talkshow_upstream_failures_total",
        "Refreshes that ended in an error"
    )
    .unwrap();
    pub static ref CACHE_HITS: IntCounter = register_int_counter!(
        "talkshow_cache_hits_total",
        "Queries served from the cache"
    )
    .unwrap();
    pub static ref SHOWS_EMITTED: IntCounter = register_int_counter!(
        "talkshow_shows_emitted_total",
        "Normalized shows produced by refreshes"
    )
    .unwrap();
}
