//! Resolution failure behavior through the public facade. These run
//! without a native engine installed; successful-load behavior is covered
//! by the ignored end-to-end suite.

use synthogen_client::{Client, Error};

#[test]
fn explicit_missing_path_is_library_unavailable() {
    let err = Client::with_library_path("/nonexistent/libsynthogen_engine.so")
        .expect_err("no engine at that path");
    assert!(matches!(err, Error::LibraryUnavailable(_)));
}

#[test]
fn load_failure_is_not_cached_and_is_retried() {
    let first = Client::with_library_path("/nonexistent/libsynthogen_engine.so")
        .expect_err("no engine at that path");
    let second = Client::with_library_path("/nonexistent/libsynthogen_engine.so")
        .expect_err("retried and failed again");

    assert!(matches!(first, Error::LibraryUnavailable(_)));
    assert!(matches!(second, Error::LibraryUnavailable(_)));
}

#[test]
fn concurrent_constructors_fail_independently_without_an_engine() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| Client::new().err()))
        .collect();

    for handle in handles {
        let err = handle
            .join()
            .expect("constructor thread")
            .expect("no engine installed in the test environment");
        assert!(matches!(err, Error::LibraryUnavailable(_)));
    }
}
