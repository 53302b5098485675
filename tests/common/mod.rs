pub mod fixtures;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Routes `log` output through the test harness. Safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
