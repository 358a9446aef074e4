// Marketing email: HTTP transport, rate-limited FIFO mail queue, campaign handlers.

pub mod handlers;
pub mod queue;
pub mod transport;
