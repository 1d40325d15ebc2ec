mod session_rng;

pub mod odd_scoring;

pub use session_rng::SessionRng;
