//! Flight simulation core: state, control and dynamics integrators, the frame
//! clock, and the per-tick pipeline that feeds presentation sinks.
//!
//! Everything here is infallible. Out-of-range values saturate at their band
//! limits instead of producing errors.

pub mod clock;
pub mod controls;
pub mod dynamics;
pub mod pipeline;
pub mod state;
pub mod tuning;

pub use clock::{FrameClock, FrameTiming, MAX_DT};
pub use controls::{ControlIntent, apply_controls};
pub use dynamics::Dynamics;
pub use pipeline::{FrameContext, PresentationSink, Simulation, present_all};
pub use state::{FlightState, GeoPosition, normalize_heading};
