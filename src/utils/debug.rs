use once_cell::sync::Lazy;

/// Global debug mode flag, initialized once at startup
pub static DEBUG_MODE: Lazy<bool> = Lazy::new(|| std::env::var("TIERBILL_DEBUG").is_ok());

/// Print to stderr only when `TIERBILL_DEBUG` is set
///
/// ```
/// tierbill::debug_println!("Loaded {} plans", 6);
/// ```
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if *$crate::utils::debug::DEBUG_MODE {
            eprintln!($($arg)*);
        }
    };
}
