//! Assertion utilities for testing

/// Assert that a result is OK and unwrap it
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok, got Err: {:?}", err),
        }
    };
}

/// Assert that a changeover operation halted with the given error pattern.
#[macro_export]
macro_rules! assert_halts {
    ($expr:expr, $pat:pat) => {
        match $expr {
            Ok(val) => panic!("Expected the block to halt, got Ok: {:?}", val),
            Err(err) => assert!(
                matches!(err, $pat),
                "Expected {}, got {:?}",
                stringify!($pat),
                err
            ),
        }
    };
}
