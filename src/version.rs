// Crate identity, sent as the HTTP User-Agent and logged at startup

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");
