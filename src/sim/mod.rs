//! Table simulation module
//!
//! All table logic lives here. The host delivers events and ticks serially:
//! - One `tick` per frame with the elapsed nanoseconds
//! - Sensor / drop target / rollover callbacks between ticks
//! - Scheduled actions handed back through `TableSession::run_scheduled`

pub mod combo;
pub mod events;
pub mod gravity;
pub mod multiball;
pub mod orbit;
pub mod planet;
pub mod state;
pub mod tick;

pub use combo::{ComboAward, ComboBonus};
pub use gravity::{GravitySource, Sun, attraction, net_force, planet_strength};
pub use multiball::{JackpotAward, MultiballController, MultiballStatus};
pub use orbit::{Orbit, advance_angle};
pub use planet::{Planet, PlanetStatus, PulsePhase};
pub use state::{SessionError, TableElements, TableEvent, TableSession};
pub use tick::tick;
