/*!
 * Playback: the external player capability, subtitle sync and the
 * session that ties them together.
 */

pub mod player;
pub mod repeat;
pub mod session;
pub mod sync;

pub use self::player::VideoPlayer;
pub use self::repeat::RepeatRegion;
pub use self::session::{PlaybackSession, SessionSnapshot, SPEED_OPTIONS};
pub use self::sync::{find_active, SyncEngine, TickOutcome};
