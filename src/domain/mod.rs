mod duration;
mod errors;

pub use duration::parse_duration;
pub use errors::{EngineError, EngineResult};

macro_rules! id_type {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
                     derive_more::Display, derive_more::From)]
            pub struct $name(pub i64);
        )+
    };
}

id_type! {
    GiveawayId,
    GuildId,
    ChannelId,
    MessageId,
    UserId,
}
