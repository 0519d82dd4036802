// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// A wrapper for `pretty_assertions::assert_eq!` macro.
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}

/// Syntactic sugar for `Ok(())` and `Ok($value)`.
///
/// ```
/// use r3bl_editor_core::ok;
///
/// fn unit() -> Result<(), ()> { ok!() }
/// fn value() -> Result<u8, ()> { ok!(42) }
///
/// assert_eq!(unit(), Ok(()));
/// assert_eq!(value(), Ok(42));
/// ```
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}
