/// Host platform capabilities the input layer needs.
///
/// Injected into the collector so nothing downstream queries global state.
pub trait Platform {
    /// True when touch is the primary pointer (touch presses act as clicks).
    fn is_touch_primary(&self) -> bool;

    /// Ask the host to capture the pointer. Returns whether the request was issued.
    fn request_pointer_lock(&mut self) -> bool;
}

/// Platform for headless runs and tests: no touch, pointer lock always refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessPlatform {
    pub touch_primary: bool,
}

impl Platform for HeadlessPlatform {
    fn is_touch_primary(&self) -> bool {
        self.touch_primary
    }

    fn request_pointer_lock(&mut self) -> bool {
        tracing::debug!("pointer lock requested on headless platform; ignoring");
        false
    }
}
