mod log_search;
mod log_stream;
mod message;
mod model_id;
mod outcome;
mod thread;

pub use log_search::*;
pub use log_stream::*;
pub use message::*;
pub use model_id::*;
pub use outcome::*;
pub use thread::*;
