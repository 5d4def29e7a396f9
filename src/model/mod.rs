pub mod event;
pub mod filter;
pub mod payload;

pub use event::{Event, FlexBool, FlexValue, StatBlock};
pub use filter::Filter;
pub use payload::{Campeonato, Counts, HomeResponse, PainelResponse};
