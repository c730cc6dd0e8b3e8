pub mod domain;
pub mod ports;

pub use domain::{AuthClaims, Note, NoteDraft, NotePatch, User, UserCredentials};
pub use ports::{DatabaseService, PortError, PortResult, TokenService};
