/// Intercept messages using the `log` crate and print them to STDERR. `RUST_LOG` overrides the
/// default `info` level.
pub fn setup() {
    use env_logger::{Builder, Env};
    // Tests and repeated CLI invocations in one process may call this more than once.
    let _ = Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
