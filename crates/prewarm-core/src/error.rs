use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Route table contains an empty route")]
    EmptyRoute,

    #[error("Route {0} maps to an empty resource key")]
    EmptyResourceKey(String),

    #[error("Common resource list contains an empty key")]
    EmptyCommonKey,

    #[error("Common resource listed more than once: {0}")]
    DuplicateCommonKey(String),

    #[error("Staleness budget '{0}' must be greater than zero")]
    ZeroBudget(&'static str),

    #[error("Reactive budget ({reactive}s) is longer than bulk budget ({bulk}s)")]
    ReactiveExceedsBulk { reactive: u64, bulk: u64 },
}
