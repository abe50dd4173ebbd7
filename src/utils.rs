pub fn set_panic_hook() {
    // Panics show up as console errors instead of a bare `unreachable`.
    // Safe to call more than once.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
