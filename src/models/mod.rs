mod show;

pub use show::{BroadcastStart, ChannelRef, NormalizedShow, RawBroadcast};
