/// Release version, overridable at build time so CI can stamp tagged builds.
pub const VERSION: &str = match option_env!("PSCHART_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
