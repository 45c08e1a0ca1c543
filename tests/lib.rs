/// Main test module that includes all sub-modules
/// Run specific tests with `cargo test <module>::<submodule>`
/// For example: `cargo test integration::import_test`
// Utility modules
pub mod utils;

// Integration tests
pub mod integration {
    pub mod batch_test;
    pub mod geo_test;
    pub mod import_test;
}
