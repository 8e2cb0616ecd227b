fn greywalk_panic() {
    eprintln!("===== Internal Error in greywalk =====");
    eprintln!("A grey-object scan found the heap in an inconsistent state.");
    eprintln!("Continuing the collection could visit corrupt memory.");
    eprintln!();
}

/// Print an internal-error banner before the default panic message. A binding may call this
/// once at start-up so that fatal scan errors that end in a panic are easy to spot.
pub fn set_panic_hook() {
    use std::panic;

    let default_handler = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        greywalk_panic();
        default_handler(info)
    }));
}
