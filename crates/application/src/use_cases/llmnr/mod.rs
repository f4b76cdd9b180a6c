mod responder;
mod server;

pub use responder::{answer_query, Discard};
pub use server::{
    LlmnrDesc, LlmnrParams, LlmnrServer, LlmnrState, LLMNR_IP4_GROUP, LLMNR_IP6_GROUP,
    LLMNR_MULTICAST_TTL,
};
