// Both the demo binary and a preloaded library call this,
// so it has to tolerate a logger that is already installed.
#[cfg(target_os = "android")]
pub fn init() {
    android_logger::init_once(
        android_logger::Config::default().with_min_level(log::Level::Trace),
    );
}

#[cfg(not(target_os = "android"))]
pub fn init() {
    use log::LevelFilter;
    use std::io::Write;

    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
        })
        .try_init();
}
