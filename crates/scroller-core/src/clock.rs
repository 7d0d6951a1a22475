/// Monotonic millisecond source supplied by the host.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin. Must never decrease.
    fn now_ms(&self) -> f64;
}
