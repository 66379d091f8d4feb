//! Incremental loading of studio and network catalogs.
//!
//! [`CatalogLoader`] is the pure state machine; [`CatalogLoaderHandle`]
//! runs it on a tokio task and carries out its fetches and timers.

mod driver;
mod session;
mod state;
mod throttle;
mod view;

pub use driver::CatalogLoaderHandle;
pub use session::{CatalogSession, CatalogTarget, TimerId};
pub use state::{CatalogLoader, LoaderEffect, LoaderEvent, LoaderState};
pub use throttle::FetchThrottle;
pub use view::{
    CatalogView, ChannelSink, PresentationSink, PresentationUpdate,
    RecordingSink,
};
