pub mod dispatcher;
pub mod markup;
pub mod models;

pub use dispatcher::{APOLOGY, HttpTransport, RelayTransport, SendOutcome, TurnDispatcher};
pub use models::{Role, Transcript, Turn};
